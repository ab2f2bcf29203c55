//! Sweep data types.

use ec_core::numeric::{ensure_finite, ensure_in_range};
use ec_core::{EcError, EcResult};
use ec_psychro::BUCK_POLE_C;
use ec_solver::{PlausibilityFlags, SolverError};
use serde::{Deserialize, Serialize};

/// One measured air sample. Constant for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Air temperature [°C]
    pub air_temp_c: f64,
    /// Relative humidity [%]
    pub rel_hum_pct: f64,
    /// Evapotranspiration rate [g/m³ per time unit of the schedule]
    pub et_rate: f64,
}

impl Measurement {
    pub fn new(air_temp_c: f64, rel_hum_pct: f64, et_rate: f64) -> EcResult<Self> {
        let m = Self {
            air_temp_c,
            rel_hum_pct,
            et_rate,
        };
        m.validate()?;
        Ok(m)
    }

    /// Reference greenhouse sample, rate per second.
    pub const fn reference() -> Self {
        Self {
            air_temp_c: 25.4775,
            rel_hum_pct: 55.1136,
            et_rate: 0.031396,
        }
    }

    /// Reference sample for minute-based runs.
    pub const fn reference_per_minute() -> Self {
        Self {
            air_temp_c: 24.060555,
            rel_hum_pct: 63.282795,
            et_rate: 0.731875837596899,
        }
    }

    pub fn validate(&self) -> EcResult<()> {
        let t = ensure_finite(self.air_temp_c, "air temperature")?;
        if t <= BUCK_POLE_C {
            return Err(EcError::InvalidArg {
                what: "air temperature",
                value: t,
            });
        }
        ensure_in_range(self.rel_hum_pct, 0.0, 100.0, "relative humidity")?;
        ensure_in_range(self.et_rate, 0.0, f64::MAX, "evapotranspiration rate")?;
        Ok(())
    }

    /// Water added after `elapsed` time units [g/m³].
    #[inline]
    pub fn accumulated_et(&self, elapsed: f64) -> f64 {
        self.et_rate * elapsed
    }
}

/// One solved duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    /// Water added so far [g/m³]
    pub accumulated_et: f64,
    /// Elapsed duration in the schedule's time unit
    pub elapsed: f64,
    pub dry_bulb_c: f64,
    /// Air temperature minus dry bulb [K]
    pub temperature_depression: f64,
    pub wet_bulb_c: f64,
    pub iterations: usize,
    pub residual: f64,
    pub converged: bool,
    pub flags: PlausibilityFlags,
}

/// A duration whose solve failed. The sweep continues past it.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    pub elapsed: f64,
    pub accumulated_et: f64,
    pub error: SolverError,
}

pub type RowOutcome = Result<SweepRow, RowFailure>;

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub rows: usize,
    pub failures: usize,
    pub not_converged: usize,
    pub inversions: usize,
    pub supersaturated: usize,
}

impl SweepSummary {
    pub fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            Ok(row) => {
                self.rows += 1;
                if !row.converged {
                    self.not_converged += 1;
                }
                if row.flags.temperature_inversion {
                    self.inversions += 1;
                }
                if row.flags.supersaturation {
                    self.supersaturated += 1;
                }
            }
            Err(_) => self.failures += 1,
        }
    }

    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a RowOutcome>) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }
}
