//! Wet-bulb temperature from the Buck/Apjohn vapor pressure balance.

use crate::bisection::{BisectionConfig, BisectionOutcome, bisect};
use crate::error::SolverResult;
use ec_core::numeric::{ensure_finite, ensure_in_range};
use ec_psychro::{apjohn_vapor_pressure, try_saturation_pressure};

/// Converged (or best-effort) wet-bulb temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WetBulbResult {
    /// Wet-bulb temperature [°C]
    pub temperature_c: f64,
    pub outcome: BisectionOutcome,
}

/// Vapor pressure balance at candidate wet-bulb temperature `t_c`.
///
/// `rel_hum/100 · p_vs(air) − [p_vs(T) − 1.8 · (air − T) / 2700]`
fn wet_bulb_error(air_temp_c: f64, actual_vapor_pressure: f64, t_c: f64) -> SolverResult<f64> {
    let p_vs_wb = try_saturation_pressure(t_c)?;
    Ok(actual_vapor_pressure - apjohn_vapor_pressure(p_vs_wb, air_temp_c, t_c))
}

/// Solve for the wet-bulb temperature of air at `air_temp_c` [°C] and
/// `rel_hum_pct` [%].
pub fn solve_wet_bulb(
    air_temp_c: f64,
    rel_hum_pct: f64,
    config: &BisectionConfig,
) -> SolverResult<WetBulbResult> {
    let air_temp_c = ensure_finite(air_temp_c, "air temperature")?;
    let rel_hum_pct = ensure_in_range(rel_hum_pct, 0.0, 100.0, "relative humidity")?;

    let actual_vapor_pressure = rel_hum_pct / 100.0 * try_saturation_pressure(air_temp_c)?;
    let outcome = bisect(
        |t| wet_bulb_error(air_temp_c, actual_vapor_pressure, t),
        config,
    )?;

    if outcome.converged {
        tracing::info!(
            twb = outcome.root,
            iterations = outcome.iterations,
            residual = outcome.residual,
            "wet-bulb temperature found"
        );
    } else {
        tracing::warn!(
            twb = outcome.root,
            iterations = outcome.iterations,
            residual = outcome.residual,
            "wet-bulb solve hit iteration cap, using last midpoint"
        );
    }

    Ok(WetBulbResult {
        temperature_c: outcome.root,
        outcome,
    })
}
