//! Sweep and sink errors.

use thiserror::Error;

pub type SweepResult<T> = Result<T, SweepError>;

/// Errors that stop a sweep from being written.
///
/// A row whose solve fails is not one of these; it is reported as a
/// [`RowFailure`](crate::RowFailure) and the sweep carries on.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Invalid schedule: {what}")]
    InvalidSchedule { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
