//! Error types for the ec-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the library crates
/// and provides a single error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Sweep error: {0}")]
    Sweep(String),

    #[error("Failed to open output: {path}")]
    OutputOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ec-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from library error types
impl From<ec_core::EcError> for AppError {
    fn from(err: ec_core::EcError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<ec_psychro::PsychroError> for AppError {
    fn from(err: ec_psychro::PsychroError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<ec_solver::SolverError> for AppError {
    fn from(err: ec_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<ec_sweep::SweepError> for AppError {
    fn from(err: ec_sweep::SweepError) -> Self {
        AppError::Sweep(err.to_string())
    }
}
