//! Sweep driver: one dry-bulb solve per duration.

use crate::types::{Measurement, RowFailure, RowOutcome, SweepRow};
use ec_core::constants::GAS_CONST_WATER;
use ec_solver::{BisectionConfig, DryBulbProblem, check};
use rayon::prelude::*;
use std::iter::FusedIterator;

/// Solve a single duration.
///
/// Failures stay local to the row: a solver error becomes a [`RowFailure`].
pub fn evaluate_row(
    measurement: &Measurement,
    wet_bulb_c: f64,
    elapsed: f64,
    config: &BisectionConfig,
) -> RowOutcome {
    let accumulated_et = measurement.accumulated_et(elapsed);
    let problem = DryBulbProblem {
        air_temp_c: measurement.air_temp_c,
        rel_hum_pct: measurement.rel_hum_pct,
        wet_bulb_c,
        gas_const: GAS_CONST_WATER,
        accumulated_et,
    };

    match problem.solve(config) {
        Ok(db) => {
            let flags = check(db.temperature_c, wet_bulb_c, db.abs_hum_et, db.max_hum_et);
            Ok(SweepRow {
                accumulated_et,
                elapsed,
                dry_bulb_c: db.temperature_c,
                temperature_depression: measurement.air_temp_c - db.temperature_c,
                wet_bulb_c,
                iterations: db.outcome.iterations,
                residual: db.outcome.residual,
                converged: db.outcome.converged,
                flags,
            })
        }
        Err(error) => Err(RowFailure {
            elapsed,
            accumulated_et,
            error,
        }),
    }
}

/// Lazy sweep over a sequence of durations.
///
/// Yields one [`RowOutcome`] per duration, in order. Durations are pulled
/// from `I` one at a time; the driver is consumed by iteration, so sweep
/// again with a new [`run_sweep`] call.
#[derive(Debug)]
pub struct SweepDriver<I> {
    measurement: Measurement,
    wet_bulb_c: f64,
    config: BisectionConfig,
    durations: I,
}

impl<I: Iterator<Item = f64>> Iterator for SweepDriver<I> {
    type Item = RowOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let elapsed = self.durations.next()?;
        Some(evaluate_row(
            &self.measurement,
            self.wet_bulb_c,
            elapsed,
            &self.config,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.durations.size_hint()
    }
}

impl<I: ExactSizeIterator<Item = f64>> ExactSizeIterator for SweepDriver<I> {}
impl<I: FusedIterator<Item = f64>> FusedIterator for SweepDriver<I> {}

/// Start a sweep. Nothing is solved until the driver is iterated.
pub fn run_sweep<D>(
    measurement: Measurement,
    wet_bulb_c: f64,
    durations: D,
    config: &BisectionConfig,
) -> SweepDriver<D::IntoIter>
where
    D: IntoIterator<Item = f64>,
{
    SweepDriver {
        measurement,
        wet_bulb_c,
        config: *config,
        durations: durations.into_iter(),
    }
}

/// Solve all durations on the rayon pool. Output order follows `durations`.
pub fn run_sweep_parallel(
    measurement: &Measurement,
    wet_bulb_c: f64,
    durations: &[f64],
    config: &BisectionConfig,
) -> Vec<RowOutcome> {
    durations
        .par_iter()
        .map(|&elapsed| evaluate_row(measurement, wet_bulb_c, elapsed, config))
        .collect()
}
