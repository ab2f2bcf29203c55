//! Buck saturation vapor pressure over liquid water.

use crate::error::{PsychroError, PsychroResult};
use ec_core::units::{Pressure, Temperature, as_degc, bar};

/// Lower edge of the temperature domain accepted by the checked variant [°C].
pub const BUCK_POLE_C: f64 = -234.5;

const BUCK_A_KPA: f64 = 0.61121;
const BUCK_B: f64 = 18.678;
const BUCK_C: f64 = 234.5;
const BUCK_D: f64 = 257.14;
const KPA_PER_BAR: f64 = 100.0;

/// Saturation vapor pressure [bar] at `temperature_c` [°C].
///
/// `p = 0.61121 · exp((18.678 − T/234.5) · T/(257.14 + T)) / 100`
///
/// Unchecked: the result is meaningless at or below [`BUCK_POLE_C`].
#[inline]
pub fn saturation_pressure(temperature_c: f64) -> f64 {
    let t = temperature_c;
    BUCK_A_KPA * ((BUCK_B - t / BUCK_C) * (t / (BUCK_D + t))).exp() / KPA_PER_BAR
}

/// Checked [`saturation_pressure`].
pub fn try_saturation_pressure(temperature_c: f64) -> PsychroResult<f64> {
    if !temperature_c.is_finite() || temperature_c <= BUCK_POLE_C {
        return Err(PsychroError::OutOfDomain {
            what: "saturation temperature",
            value: temperature_c,
        });
    }

    let p = saturation_pressure(temperature_c);
    if !p.is_finite() || p <= 0.0 {
        return Err(PsychroError::NonPhysical {
            what: "saturation pressure",
            value: p,
        });
    }
    Ok(p)
}

/// Typed [`try_saturation_pressure`].
pub fn saturation_pressure_of(temperature: Temperature) -> PsychroResult<Pressure> {
    try_saturation_pressure(as_degc(temperature)).map(bar)
}
