//! Named tolerance/iteration presets.

use crate::bisection::BisectionConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Solver preset.
///
/// `Production` converges tightly; `Debug` stops after a few iterations for
/// quick checks of a measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverProfile {
    #[default]
    Production,
    Debug,
}

impl SolverProfile {
    pub fn settings(self) -> SolverSettings {
        match self {
            Self::Production => SolverSettings {
                wet_bulb: BisectionConfig::wet_bulb_production(),
                dry_bulb: BisectionConfig::dry_bulb_production(),
            },
            Self::Debug => SolverSettings {
                wet_bulb: BisectionConfig::wet_bulb_debug(),
                dry_bulb: BisectionConfig::dry_bulb_debug(),
            },
        }
    }
}

impl fmt::Display for SolverProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

/// Bisection configuration for both stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub wet_bulb: BisectionConfig,
    pub dry_bulb: BisectionConfig,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverProfile::default().settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_constants() {
        let s = SolverProfile::Production.settings();
        assert_eq!((s.wet_bulb.low, s.wet_bulb.high), (-25.0, 30.0));
        assert_eq!(s.wet_bulb.rel_tol, 1e-8);
        assert_eq!(s.wet_bulb.max_iterations, 200);
        assert_eq!((s.dry_bulb.low, s.dry_bulb.high), (-20.0, 30.0));
        assert_eq!(s.dry_bulb.rel_tol, 1e-9);
        assert_eq!(s.dry_bulb.max_iterations, 100);
    }

    #[test]
    fn debug_constants() {
        let s = SolverProfile::Debug.settings();
        assert_eq!(s.wet_bulb.max_iterations, 20);
        assert_eq!(s.dry_bulb.rel_tol, 1e-5);
        assert_eq!(s.dry_bulb.max_iterations, 20);
    }

    #[test]
    fn default_is_production() {
        assert_eq!(SolverSettings::default(), SolverProfile::Production.settings());
        assert_eq!(SolverProfile::Debug.to_string(), "debug");
    }
}
