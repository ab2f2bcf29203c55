//! ec-psychro: moist-air property relations.
//!
//! Provides:
//! - Buck saturation vapor pressure over water
//! - Apjohn actual vapor pressure from a wet-bulb depression
//! - Ideal-gas absolute humidity of water vapor
//! - `MoistAirState`, a typed (uom) snapshot of one air sample
//!
//! All scalar functions work in the fixed unit system of the workspace:
//! temperatures in °C, pressures in bar, humidities in g/m³.

pub mod error;
pub mod humidity;
pub mod saturation;
pub mod state;

pub use error::{PsychroError, PsychroResult};
pub use humidity::{absolute_humidity, apjohn_vapor_pressure, max_absolute_humidity};
pub use saturation::{
    BUCK_POLE_C, saturation_pressure, saturation_pressure_of, try_saturation_pressure,
};
pub use state::MoistAirState;
