//! Bracketed bisection with a relative-residual stopping test.

use crate::error::{SolverError, SolverResult};
use ec_core::numeric::{opposite_signs, relative_residual};
use serde::{Deserialize, Serialize};

/// Bisection configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BisectionConfig {
    /// Lower end of the initial bracket [°C]
    pub low: f64,
    /// Upper end of the initial bracket [°C]
    pub high: f64,
    /// Stop when |f(mid) / mid| falls below this
    pub rel_tol: f64,
    /// Below this |mid| the residual is |f(mid)| instead
    #[serde(default = "default_midpoint_floor")]
    pub midpoint_floor: f64,
    /// Maximum midpoint evaluations. The loop stops after exactly this many,
    /// so a cap of 200 evaluates 200 midpoints, not 201.
    pub max_iterations: usize,
}

fn default_midpoint_floor() -> f64 {
    1e-6
}

impl BisectionConfig {
    pub const fn wet_bulb_production() -> Self {
        Self {
            low: -25.0,
            high: 30.0,
            rel_tol: 1e-8,
            midpoint_floor: 1e-6,
            max_iterations: 200,
        }
    }

    pub const fn wet_bulb_debug() -> Self {
        Self {
            low: -25.0,
            high: 30.0,
            rel_tol: 1e-7,
            midpoint_floor: 1e-6,
            max_iterations: 20,
        }
    }

    pub const fn dry_bulb_production() -> Self {
        Self {
            low: -20.0,
            high: 30.0,
            rel_tol: 1e-9,
            midpoint_floor: 1e-6,
            max_iterations: 100,
        }
    }

    pub const fn dry_bulb_debug() -> Self {
        Self {
            low: -20.0,
            high: 30.0,
            rel_tol: 1e-5,
            midpoint_floor: 1e-6,
            max_iterations: 20,
        }
    }

    pub fn validate(&self) -> SolverResult<()> {
        if !(self.low.is_finite() && self.high.is_finite()) || self.low >= self.high {
            return Err(SolverError::InvalidConfig {
                what: format!("bracket [{}, {}] must be finite and ordered", self.low, self.high),
            });
        }
        if !(self.rel_tol.is_finite() && self.rel_tol > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: format!("rel_tol must be positive, got {}", self.rel_tol),
            });
        }
        if !(self.midpoint_floor.is_finite() && self.midpoint_floor >= 0.0) {
            return Err(SolverError::InvalidConfig {
                what: format!("midpoint_floor must be >= 0, got {}", self.midpoint_floor),
            });
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Working state of one bisection solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionState {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub midpoint: f64,
    pub error_at_lower: f64,
    pub error_at_midpoint: f64,
    pub iteration_count: usize,
}

impl BisectionState {
    fn new(low: f64, high: f64, f_low: f64) -> Self {
        Self {
            lower_bound: low,
            upper_bound: high,
            midpoint: 0.5 * (low + high),
            error_at_lower: f_low,
            error_at_midpoint: f_low,
            iteration_count: 0,
        }
    }

    /// Keep the half whose ends still have opposite signs.
    fn narrow(&mut self) {
        if opposite_signs(self.error_at_lower, self.error_at_midpoint) {
            self.upper_bound = self.midpoint;
        } else {
            self.lower_bound = self.midpoint;
            self.error_at_lower = self.error_at_midpoint;
        }
    }
}

/// Result of a bisection solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BisectionOutcome {
    /// Last midpoint (or the exact endpoint root)
    pub root: f64,
    /// Midpoint evaluations performed
    pub iterations: usize,
    /// Residual used by the stopping test at `root`
    pub residual: f64,
    /// False when the iteration cap was hit first
    pub converged: bool,
}

fn evaluate<F>(f: &F, x: f64) -> SolverResult<f64>
where
    F: Fn(f64) -> SolverResult<f64>,
{
    let value = f(x)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::NonFiniteResidual { at: x, value })
    }
}

/// Find a root of `f` inside `[config.low, config.high]`.
///
/// The bracket must have opposite-signed errors at its ends; otherwise
/// [`SolverError::InvalidBracket`] is returned before iterating. Reaching
/// `max_iterations` is not an error: the last midpoint is returned with
/// `converged == false`.
pub fn bisect<F>(f: F, config: &BisectionConfig) -> SolverResult<BisectionOutcome>
where
    F: Fn(f64) -> SolverResult<f64>,
{
    config.validate()?;

    let f_low = evaluate(&f, config.low)?;
    let f_high = evaluate(&f, config.high)?;

    for (end, value) in [(config.low, f_low), (config.high, f_high)] {
        if value == 0.0 {
            return Ok(BisectionOutcome {
                root: end,
                iterations: 0,
                residual: 0.0,
                converged: true,
            });
        }
    }

    if !opposite_signs(f_low, f_high) {
        return Err(SolverError::InvalidBracket {
            low: config.low,
            high: config.high,
            f_low,
            f_high,
        });
    }

    let mut state = BisectionState::new(config.low, config.high, f_low);
    let mut residual = f64::INFINITY;

    while state.iteration_count < config.max_iterations {
        state.midpoint = 0.5 * (state.lower_bound + state.upper_bound);
        state.error_at_midpoint = evaluate(&f, state.midpoint)?;
        state.iteration_count += 1;
        state.narrow();

        // Recomputed on both branches.
        residual = relative_residual(state.error_at_midpoint, state.midpoint, config.midpoint_floor);

        tracing::trace!(
            iteration = state.iteration_count,
            low = state.lower_bound,
            high = state.upper_bound,
            mid = state.midpoint,
            residual,
            "bisection step"
        );

        if residual < config.rel_tol {
            return Ok(BisectionOutcome {
                root: state.midpoint,
                iterations: state.iteration_count,
                residual,
                converged: true,
            });
        }
    }

    Ok(BisectionOutcome {
        root: state.midpoint,
        iterations: state.iteration_count,
        residual,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(low: f64, high: f64, rel_tol: f64, max_iterations: usize) -> BisectionConfig {
        BisectionConfig {
            low,
            high,
            rel_tol,
            midpoint_floor: 1e-6,
            max_iterations,
        }
    }

    #[test]
    fn square_root_of_two() {
        let out = bisect(|x| Ok(x * x - 2.0), &config(0.0, 2.0, 1e-12, 200)).unwrap();
        assert!(out.converged);
        assert!((out.root - 2.0_f64.sqrt()).abs() < 1e-10);
        assert!(out.residual < 1e-12);
    }

    #[test]
    fn decreasing_function() {
        let out = bisect(|x| Ok(3.0 - x), &config(-10.0, 10.0, 1e-12, 200)).unwrap();
        assert!(out.converged);
        assert!((out.root - 3.0).abs() < 1e-10);
    }

    #[test]
    fn cap_returns_last_midpoint() {
        let out = bisect(|x| Ok(x * x - 2.0), &config(0.0, 2.0, 1e-15, 3)).unwrap();
        assert!(!out.converged);
        assert_eq!(out.iterations, 3);
        // midpoints: 1.0, 1.5, 1.25
        assert_eq!(out.root, 1.25);
        assert!(out.residual > 1e-15);
    }

    #[test]
    fn cap_counts_midpoint_evaluations() {
        use std::cell::Cell;
        for cap in [1, 20, 100] {
            let calls = Cell::new(0usize);
            let out = bisect(
                |x| {
                    calls.set(calls.get() + 1);
                    Ok(x * x - 2.0)
                },
                &config(0.0, 2.0, 1e-300, cap),
            )
            .unwrap();
            assert!(!out.converged);
            assert_eq!(out.iterations, cap);
            // two bracket ends plus one call per midpoint
            assert_eq!(calls.get(), cap + 2);
        }
    }

    #[test]
    fn non_bracketing_interval_fails_fast() {
        let err = bisect(|x| Ok(x * x + 1.0), &config(-1.0, 1.0, 1e-9, 100)).unwrap_err();
        assert!(matches!(err, SolverError::InvalidBracket { .. }));
    }

    #[test]
    fn endpoint_root_is_returned_directly() {
        let out = bisect(|x| Ok(x - 2.0), &config(-1.0, 2.0, 1e-9, 100)).unwrap();
        assert_eq!(out.root, 2.0);
        assert_eq!(out.iterations, 0);
        assert!(out.converged);
    }

    #[test]
    fn zero_midpoint_uses_absolute_residual() {
        let out = bisect(|x| Ok(x), &config(-1.0, 1.0, 1e-9, 100)).unwrap();
        assert!(out.converged);
        assert_eq!(out.root, 0.0);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.residual, 0.0);
    }

    #[test]
    fn non_finite_error_function_is_reported() {
        let err = bisect(|x| Ok(1.0 / (x - 0.5) - 0.5 / x), &config(0.0, 1.0, 1e-9, 10))
            .unwrap_err();
        assert!(matches!(err, SolverError::NonFiniteResidual { .. }));
    }

    #[test]
    fn rejects_bad_config() {
        assert!(config(1.0, 1.0, 1e-9, 10).validate().is_err());
        assert!(config(0.0, 1.0, 0.0, 10).validate().is_err());
        assert!(config(0.0, 1.0, 1e-9, 0).validate().is_err());
        assert!(BisectionConfig::wet_bulb_production().validate().is_ok());
        assert!(BisectionConfig::dry_bulb_debug().validate().is_ok());
    }

    #[test]
    fn propagates_error_function_failure() {
        let err = bisect(
            |_| {
                Err(SolverError::InvalidConfig {
                    what: "boom".to_string(),
                })
            },
            &config(0.0, 1.0, 1e-9, 10),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::InvalidConfig { .. }));
    }
}
