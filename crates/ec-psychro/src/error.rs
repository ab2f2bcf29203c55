//! Psychrometric relation errors.

use thiserror::Error;

/// Result type for psychrometric operations.
pub type PsychroResult<T> = Result<T, PsychroError>;

/// Errors raised when a relation is evaluated outside its domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PsychroError {
    /// Input outside the domain of the formula.
    #[error("{what} out of domain: {value}")]
    OutOfDomain { what: &'static str, value: f64 },

    /// Result is not a physical value (non-finite, non-positive, ...).
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },
}
