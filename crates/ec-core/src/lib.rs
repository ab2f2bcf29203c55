//! ec-core: shared foundation for the evaporative cooling workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for °C, bar, g/m³)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{EcError, EcResult};
pub use numeric::*;
pub use units::*;
