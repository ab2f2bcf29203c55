//! Shared application service layer.
//!
//! Loads run configurations, wires the wet-bulb solve and the duration sweep
//! to an output sink, and reports what happened. The CLI is a thin shell over
//! this crate.

pub mod config;
pub mod error;
pub mod run_service;

// Re-export key types for convenience
pub use config::{
    OutputConfig, OutputFormat, RunConfig, load_config, save_config, validate_config,
};
pub use error::{AppError, AppResult};
pub use run_service::{RunReport, StateReport, execute, execute_to_output, open_sink, solve_state};
