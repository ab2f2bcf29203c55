//! ec-sweep: duration sweeps over the dry-bulb solver.
//!
//! A sweep takes one [`Measurement`] and its wet-bulb temperature and, for
//! every elapsed duration of a [`DurationSchedule`], solves the dry-bulb
//! temperature after `rate × duration` of water has evaporated. Rows are
//! produced lazily by [`SweepDriver`] and handed to a [`RowSink`].

pub mod driver;
pub mod error;
pub mod schedule;
pub mod sink;
pub mod types;

pub use driver::{SweepDriver, evaluate_row, run_sweep, run_sweep_parallel};
pub use error::{SweepError, SweepResult};
pub use schedule::{DurationSchedule, Durations, MAX_SCHEDULE_POINTS, TimeUnit};
pub use sink::{CsvSink, JsonLinesSink, MemorySink, RowSink, drain_into};
pub use types::{Measurement, RowFailure, RowOutcome, SweepRow, SweepSummary};
