//! Vapor pressure and humidity relations.

use crate::error::PsychroResult;
use crate::saturation::try_saturation_pressure;
use ec_core::constants::{CELSIUS_TO_KELVIN, PA_PER_BAR};

/// Apjohn coefficient [bar/K]: 1.8/2700.
const APJOHN_NUM: f64 = 1.8;
const APJOHN_DEN: f64 = 2700.0;

const G_PER_KG: f64 = 1000.0;

/// Actual vapor pressure [bar] from the Apjohn equation.
///
/// `p_v = p_vs(T_wb) − 1.8 · (T_db − T_wb) / 2700`, with `p_vs_wet_bar` the
/// saturation pressure already evaluated at the wet-bulb temperature.
#[inline]
pub fn apjohn_vapor_pressure(p_vs_wet_bar: f64, dry_bulb_c: f64, wet_bulb_c: f64) -> f64 {
    p_vs_wet_bar - APJOHN_NUM * (dry_bulb_c - wet_bulb_c) / APJOHN_DEN
}

/// Water vapor mass per volume [g/m³] at partial pressure `vapor_pressure_bar`
/// and temperature `temperature_c`, from the ideal gas law.
#[inline]
pub fn vapor_density(vapor_pressure_bar: f64, temperature_c: f64, gas_const: f64) -> f64 {
    vapor_pressure_bar * PA_PER_BAR / (gas_const * (temperature_c + CELSIUS_TO_KELVIN)) * G_PER_KG
}

/// Maximum (saturation) absolute humidity [g/m³] at `temperature_c`.
pub fn max_absolute_humidity(temperature_c: f64, gas_const: f64) -> PsychroResult<f64> {
    let p_vs = try_saturation_pressure(temperature_c)?;
    Ok(vapor_density(p_vs, temperature_c, gas_const))
}

/// Absolute humidity [g/m³] of air at `temperature_c` and `rel_hum_pct` [%].
pub fn absolute_humidity(temperature_c: f64, rel_hum_pct: f64, gas_const: f64) -> PsychroResult<f64> {
    Ok(max_absolute_humidity(temperature_c, gas_const)? * rel_hum_pct / 100.0)
}
