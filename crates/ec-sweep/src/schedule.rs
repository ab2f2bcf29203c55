//! Elapsed-duration schedules.
//!
//! A schedule is the list of evaporation durations a sweep visits, in one
//! time unit. The evapotranspiration rate of the measurement must be given
//! per the same unit.

use crate::error::{SweepError, SweepResult};
use ec_core::units::{Time, minutes, s};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;

/// Most durations a schedule may hold.
pub const MAX_SCHEDULE_POINTS: usize = 1_000_000;

/// Unit of the elapsed-time column and of the ET rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
}

impl TimeUnit {
    pub fn label(self) -> &'static str {
        match self {
            Self::Seconds => "sec",
            Self::Minutes => "min",
        }
    }

    pub fn to_time(self, value: f64) -> Time {
        match self {
            Self::Seconds => s(value),
            Self::Minutes => minutes(value),
        }
    }

    pub fn to_seconds(self, value: f64) -> f64 {
        use uom::si::time::second;
        self.to_time(value).get::<second>()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Durations visited by a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DurationSchedule {
    /// `start, start + step, ...` up to but excluding `end`
    Range { start: f64, end: f64, step: f64 },
    /// Explicit durations, visited in order
    List { values: Vec<f64> },
}

impl Default for DurationSchedule {
    fn default() -> Self {
        Self::production()
    }
}

impl DurationSchedule {
    /// Every second from 0 to 199.
    pub fn production() -> Self {
        Self::Range {
            start: 0.0,
            end: 200.0,
            step: 1.0,
        }
    }

    /// Minutes 0 through 5.
    pub fn debug() -> Self {
        Self::List {
            values: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
        }
    }

    pub fn validate(&self) -> SweepResult<()> {
        match self {
            Self::Range { start, end, step } => {
                if !(start.is_finite() && end.is_finite() && step.is_finite()) {
                    return Err(SweepError::InvalidSchedule {
                        what: "range bounds must be finite".to_string(),
                    });
                }
                if *step <= 0.0 {
                    return Err(SweepError::InvalidSchedule {
                        what: format!("step must be positive, got {step}"),
                    });
                }
                if *start < 0.0 || end <= start {
                    return Err(SweepError::InvalidSchedule {
                        what: format!("range [{start}, {end}) must be non-empty and non-negative"),
                    });
                }
                if range_len(*start, *end, *step).is_none() {
                    return Err(SweepError::InvalidSchedule {
                        what: format!(
                            "range [{start}, {end}) step {step} exceeds {MAX_SCHEDULE_POINTS} points"
                        ),
                    });
                }
            }
            Self::List { values } => {
                if values.is_empty() {
                    return Err(SweepError::InvalidSchedule {
                        what: "duration list is empty".to_string(),
                    });
                }
                if values.len() > MAX_SCHEDULE_POINTS {
                    return Err(SweepError::InvalidSchedule {
                        what: format!("duration list exceeds {MAX_SCHEDULE_POINTS} points"),
                    });
                }
                if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
                    return Err(SweepError::InvalidSchedule {
                        what: format!("duration {bad} must be finite and non-negative"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of durations.
    ///
    /// A range too large to pass [`validate`](Self::validate) reports
    /// `usize::MAX`.
    pub fn len(&self) -> usize {
        match self {
            Self::Range { start, end, step } => {
                range_len(*start, *end, *step).unwrap_or(usize::MAX)
            }
            Self::List { values } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the durations in order. Ranges are generated on the fly.
    pub fn durations(&self) -> Durations {
        let inner = match self {
            Self::Range { start, step, .. } => DurationsInner::Range {
                start: *start,
                step: *step,
                next: 0,
                len: self.len(),
            },
            Self::List { values } => DurationsInner::List(values.clone().into_iter()),
        };
        Durations { inner }
    }
}

/// Point count of `[start, end)` in `step`s, `None` above [`MAX_SCHEDULE_POINTS`].
fn range_len(start: f64, end: f64, step: f64) -> Option<usize> {
    if !(step > 0.0 && end > start) {
        return Some(0);
    }
    let count = ((end - start) / step).ceil();
    if count.is_finite() && count <= MAX_SCHEDULE_POINTS as f64 {
        Some(count as usize)
    } else {
        None
    }
}

/// Durations of a [`DurationSchedule`], produced lazily.
#[derive(Debug, Clone)]
pub struct Durations {
    inner: DurationsInner,
}

#[derive(Debug, Clone)]
enum DurationsInner {
    Range {
        start: f64,
        step: f64,
        next: usize,
        len: usize,
    },
    List(std::vec::IntoIter<f64>),
}

impl Iterator for Durations {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match &mut self.inner {
            DurationsInner::Range {
                start,
                step,
                next,
                len,
            } => {
                if *next >= *len {
                    return None;
                }
                // multiplied, not accumulated, so rounding does not drift
                let value = *start + *next as f64 * *step;
                *next += 1;
                Some(value)
            }
            DurationsInner::List(values) => values.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.inner {
            DurationsInner::Range { next, len, .. } => len - next,
            DurationsInner::List(values) => values.len(),
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Durations {}
impl FusedIterator for Durations {}

impl fmt::Display for DurationSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { start, end, step } => {
                write!(f, "{start}..{end} step {step} ({} points)", self.len())
            }
            Self::List { values } => write!(f, "{values:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_is_two_hundred_seconds() {
        let d: Vec<f64> = DurationSchedule::production().durations().collect();
        assert_eq!(d.len(), 200);
        assert_eq!(d[0], 0.0);
        assert_eq!(d[199], 199.0);
    }

    #[test]
    fn debug_is_six_minutes() {
        assert_eq!(
            DurationSchedule::debug().durations().collect::<Vec<_>>(),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn fractional_step() {
        let sched = DurationSchedule::Range {
            start: 0.0,
            end: 1.0,
            step: 0.25,
        };
        assert_eq!(sched.durations().collect::<Vec<_>>(), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn rejects_bad_schedules() {
        let zero_step = DurationSchedule::Range {
            start: 0.0,
            end: 10.0,
            step: 0.0,
        };
        assert!(zero_step.validate().is_err());
        assert!(zero_step.is_empty());

        let empty = DurationSchedule::List { values: vec![] };
        assert!(empty.validate().is_err());

        let negative = DurationSchedule::List {
            values: vec![1.0, -2.0],
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn oversized_range_is_rejected() {
        let huge = DurationSchedule::Range {
            start: 0.0,
            end: 1e20,
            step: 1.0,
        };
        assert!(matches!(huge.validate(), Err(SweepError::InvalidSchedule { .. })));
        assert_eq!(huge.len(), usize::MAX);

        let tiny_step = DurationSchedule::Range {
            start: 0.0,
            end: 1.0,
            step: 1e-300,
        };
        assert!(tiny_step.validate().is_err());

        let at_limit = DurationSchedule::Range {
            start: 0.0,
            end: MAX_SCHEDULE_POINTS as f64,
            step: 1.0,
        };
        assert!(at_limit.validate().is_ok());
        assert_eq!(at_limit.len(), MAX_SCHEDULE_POINTS);
    }

    #[test]
    fn durations_are_generated_lazily() {
        let huge = DurationSchedule::Range {
            start: 0.0,
            end: 1e20,
            step: 1.0,
        };
        let first: Vec<f64> = huge.durations().take(3).collect();
        assert_eq!(first, vec![0.0, 1.0, 2.0]);

        let mut it = DurationSchedule::production().durations();
        assert_eq!(it.len(), 200);
        it.next();
        assert_eq!(it.len(), 199);
    }

    #[test]
    fn minutes_convert_to_seconds() {
        assert!((TimeUnit::Minutes.to_seconds(3.0) - 180.0).abs() < 1e-9);
        assert!((TimeUnit::Seconds.to_seconds(3.0) - 3.0).abs() < 1e-12);
        assert_eq!(TimeUnit::Minutes.to_string(), "min");
    }
}
