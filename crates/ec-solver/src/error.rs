//! Error types for solver operations.

use ec_core::error::EcError;
use ec_psychro::PsychroError;
use thiserror::Error;

/// Errors that can occur during a single solve.
///
/// Hitting the iteration cap is not an error; see
/// [`BisectionOutcome::converged`](crate::BisectionOutcome).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error(
        "Interval [{low}, {high}] does not bracket a root (f(low)={f_low:e}, f(high)={f_high:e})"
    )]
    InvalidBracket {
        low: f64,
        high: f64,
        f_low: f64,
        f_high: f64,
    },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Error function is not finite at T={at}: {value}")]
    NonFiniteResidual { at: f64, value: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] EcError),

    #[error("Domain error: {0}")]
    Domain(#[from] PsychroError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for EcError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidBracket { low, .. } => EcError::InvalidArg {
                what: "bracket",
                value: low,
            },
            SolverError::InvalidConfig { what: _ } => EcError::Invariant {
                what: "solver configuration",
            },
            SolverError::NonFiniteResidual { value, .. } => EcError::NonFinite {
                what: "residual",
                value,
            },
            SolverError::InvalidInput(inner) => inner,
            SolverError::Domain(_) => EcError::Invariant {
                what: "psychrometric domain",
            },
        }
    }
}
