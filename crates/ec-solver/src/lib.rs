//! Two-stage bisection solver for evaporative cooling.
//!
//! Stage one finds the wet-bulb temperature of the measured air from the
//! balance between the Buck saturation pressure and the Apjohn vapor
//! pressure. Stage two takes that wet-bulb temperature as a constant and
//! finds the dry-bulb temperature reached after a given amount of water has
//! been added to the air. Both stages share one bracketed bisection routine.

pub mod bisection;
pub mod dry_bulb;
pub mod error;
pub mod plausibility;
pub mod profile;
pub mod wet_bulb;

pub use bisection::{BisectionConfig, BisectionOutcome, BisectionState, bisect};
pub use dry_bulb::{DryBulbProblem, DryBulbResult, HumidityBalance, solve_dry_bulb};
pub use error::{SolverError, SolverResult};
pub use plausibility::{PlausibilityFlags, PlausibilityViolation, check};
pub use profile::{SolverProfile, SolverSettings};
pub use wet_bulb::{WetBulbResult, solve_wet_bulb};
