//! Dry-bulb temperature after adding water to the air.
//!
//! The air keeps its wet-bulb temperature while water evaporates into it.
//! For a candidate dry-bulb temperature `T` the added water gives a relative
//! humidity at `T`; the solver finds the `T` at which that humidity and the
//! Apjohn vapor pressure for `(T, T_wb)` agree.

use crate::bisection::{BisectionConfig, BisectionOutcome, bisect};
use crate::error::SolverResult;
use ec_core::numeric::{ensure_finite, ensure_in_range};
use ec_psychro::humidity::vapor_density;
use ec_psychro::{absolute_humidity, apjohn_vapor_pressure, try_saturation_pressure};

/// Inputs of one dry-bulb solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryBulbProblem {
    pub air_temp_c: f64,
    pub rel_hum_pct: f64,
    pub wet_bulb_c: f64,
    pub gas_const: f64,
    /// Water added so far [g/m³]
    pub accumulated_et: f64,
}

/// Terms of the humidity balance at one candidate temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumidityBalance {
    /// Saturation pressure at the candidate [bar]
    pub p_vs_db: f64,
    /// Saturation humidity at the candidate [g/m³]
    pub max_hum_et: f64,
    /// Measured humidity plus added water [g/m³]
    pub abs_hum_et: f64,
    /// Fraction, not percent
    pub rel_hum_et: f64,
    /// Apjohn vapor pressure [bar]
    pub p_v: f64,
    pub error: f64,
}

/// Converged (or best-effort) dry-bulb temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryBulbResult {
    /// Dry-bulb temperature [°C]
    pub temperature_c: f64,
    pub outcome: BisectionOutcome,
    /// Humidity after evaporation [g/m³]
    pub abs_hum_et: f64,
    /// Saturation humidity at `temperature_c` [g/m³]
    pub max_hum_et: f64,
}

/// Per-solve constants, computed once before iterating.
struct Prepared {
    wet_bulb_c: f64,
    gas_const: f64,
    p_vs_wb: f64,
    abs_hum_et: f64,
}

impl Prepared {
    fn balance(&self, t_c: f64) -> SolverResult<HumidityBalance> {
        let p_vs_db = try_saturation_pressure(t_c)?;
        let max_hum_et = vapor_density(p_vs_db, t_c, self.gas_const);
        let rel_hum_et = self.abs_hum_et / max_hum_et;
        let p_v = apjohn_vapor_pressure(self.p_vs_wb, t_c, self.wet_bulb_c);

        Ok(HumidityBalance {
            p_vs_db,
            max_hum_et,
            abs_hum_et: self.abs_hum_et,
            rel_hum_et,
            p_v,
            error: rel_hum_et * p_vs_db - p_v,
        })
    }
}

impl DryBulbProblem {
    fn prepare(&self) -> SolverResult<Prepared> {
        ensure_finite(self.air_temp_c, "air temperature")?;
        ensure_in_range(self.rel_hum_pct, 0.0, 100.0, "relative humidity")?;
        ensure_finite(self.wet_bulb_c, "wet-bulb temperature")?;
        ensure_in_range(self.gas_const, f64::MIN_POSITIVE, f64::MAX, "gas constant")?;
        ensure_finite(self.accumulated_et, "accumulated evapotranspiration")?;

        let abs_hum = absolute_humidity(self.air_temp_c, self.rel_hum_pct, self.gas_const)?;
        Ok(Prepared {
            wet_bulb_c: self.wet_bulb_c,
            gas_const: self.gas_const,
            p_vs_wb: try_saturation_pressure(self.wet_bulb_c)?,
            abs_hum_et: abs_hum + self.accumulated_et,
        })
    }

    /// Evaluate the humidity balance at `t_c` without solving.
    pub fn balance_at(&self, t_c: f64) -> SolverResult<HumidityBalance> {
        self.prepare()?.balance(t_c)
    }

    pub fn solve(&self, config: &BisectionConfig) -> SolverResult<DryBulbResult> {
        let prepared = self.prepare()?;
        let outcome = bisect(|t| Ok(prepared.balance(t)?.error), config)?;
        let at_root = prepared.balance(outcome.root)?;

        tracing::debug!(
            et = self.accumulated_et,
            tdb = outcome.root,
            iterations = outcome.iterations,
            residual = outcome.residual,
            converged = outcome.converged,
            "dry-bulb solve finished"
        );

        Ok(DryBulbResult {
            temperature_c: outcome.root,
            outcome,
            abs_hum_et: at_root.abs_hum_et,
            max_hum_et: at_root.max_hum_et,
        })
    }
}

/// Solve for the dry-bulb temperature after `accumulated_et` [g/m³] of water
/// has evaporated into air measured at `air_temp_c` / `rel_hum_pct`.
pub fn solve_dry_bulb(
    air_temp_c: f64,
    rel_hum_pct: f64,
    wet_bulb_c: f64,
    gas_const: f64,
    accumulated_et: f64,
    config: &BisectionConfig,
) -> SolverResult<DryBulbResult> {
    DryBulbProblem {
        air_temp_c,
        rel_hum_pct,
        wet_bulb_c,
        gas_const,
        accumulated_et,
    }
    .solve(config)
}
