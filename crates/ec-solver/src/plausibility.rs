//! Physical plausibility of a dry-bulb solution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One violated constraint. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlausibilityViolation {
    /// Dry bulb below wet bulb
    TemperatureInversion,
    /// More water than the air can hold at the dry-bulb temperature
    Supersaturation,
}

impl fmt::Display for PlausibilityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemperatureInversion => {
                write!(f, "dry bulb below wet bulb (temperature inversion), reduce duration")
            }
            Self::Supersaturation => write!(
                f,
                "absolute humidity exceeds maximum humidity (supersaturation), reduce duration"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlausibilityFlags {
    pub temperature_inversion: bool,
    pub supersaturation: bool,
}

impl PlausibilityFlags {
    pub fn is_plausible(&self) -> bool {
        !self.temperature_inversion && !self.supersaturation
    }

    pub fn violations(&self) -> impl Iterator<Item = PlausibilityViolation> {
        [
            (self.temperature_inversion, PlausibilityViolation::TemperatureInversion),
            (self.supersaturation, PlausibilityViolation::Supersaturation),
        ]
        .into_iter()
        .filter_map(|(set, v)| set.then_some(v))
    }
}

/// Check a dry-bulb solution against its wet bulb and saturation humidity.
pub fn check(dry_bulb_c: f64, wet_bulb_c: f64, abs_hum_et: f64, max_hum_et: f64) -> PlausibilityFlags {
    PlausibilityFlags {
        temperature_inversion: dry_bulb_c < wet_bulb_c,
        supersaturation: abs_hum_et > max_hum_et,
    }
}
