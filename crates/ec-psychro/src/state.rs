//! Typed snapshot of a moist-air sample.

use crate::error::PsychroResult;
use crate::humidity::{absolute_humidity, max_absolute_humidity};
use crate::saturation::saturation_pressure_of;
use ec_core::units::{Density, Pressure, Ratio, Temperature, degc, g_per_m3, percent};

/// Moist-air properties derived from temperature and relative humidity.
#[derive(Debug, Clone, Copy)]
pub struct MoistAirState {
    pub temperature: Temperature,
    pub relative_humidity: Ratio,
    pub saturation_pressure: Pressure,
    pub vapor_pressure: Pressure,
    pub max_humidity: Density,
    pub absolute_humidity: Density,
}

impl MoistAirState {
    pub fn from_measurement(
        temperature_c: f64,
        rel_hum_pct: f64,
        gas_const: f64,
    ) -> PsychroResult<Self> {
        let temperature = degc(temperature_c);
        let p_vs = saturation_pressure_of(temperature)?;
        let max_hum = max_absolute_humidity(temperature_c, gas_const)?;
        let abs_hum = absolute_humidity(temperature_c, rel_hum_pct, gas_const)?;

        Ok(Self {
            temperature,
            relative_humidity: percent(rel_hum_pct),
            saturation_pressure: p_vs,
            vapor_pressure: p_vs * (rel_hum_pct / 100.0),
            max_humidity: g_per_m3(max_hum),
            absolute_humidity: g_per_m3(abs_hum),
        })
    }

    /// Water that can still be absorbed before saturation.
    pub fn humidity_deficit(&self) -> Density {
        self.max_humidity - self.absolute_humidity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_core::constants::GAS_CONST_WATER;
    use ec_core::units::{as_bar, as_degc, as_g_per_m3};

    #[test]
    fn reference_sample() {
        let state = MoistAirState::from_measurement(25.4775, 55.1136, GAS_CONST_WATER).unwrap();
        assert!((as_degc(state.temperature) - 25.4775).abs() < 1e-9);
        assert!((as_bar(state.saturation_pressure) - 0.0326).abs() < 5e-4);
        let abs_hum = as_g_per_m3(state.absolute_humidity);
        assert!(abs_hum > 12.5 && abs_hum < 13.5, "abs_hum = {abs_hum}");
        assert!(as_g_per_m3(state.humidity_deficit()) > 0.0);
    }

    #[test]
    fn saturated_sample_has_no_deficit() {
        let state = MoistAirState::from_measurement(20.0, 100.0, GAS_CONST_WATER).unwrap();
        assert!(as_g_per_m3(state.humidity_deficit()).abs() < 1e-9);
    }
}
