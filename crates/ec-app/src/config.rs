//! Run configuration: YAML schema, defaults, loading and validation.

use std::path::{Path, PathBuf};

use ec_solver::{SolverProfile, SolverSettings};
use ec_sweep::{DurationSchedule, Measurement, TimeUnit};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const CONFIG_VERSION: u32 = 1;

/// Output table format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Written to stdout when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
}

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub version: u32,
    pub measurement: Measurement,
    #[serde(default)]
    pub profile: SolverProfile,
    #[serde(default)]
    pub time_unit: TimeUnit,
    #[serde(default)]
    pub schedule: DurationSchedule,
    /// Replaces the profile's bisection settings when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverSettings>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::for_profile(SolverProfile::Production)
    }
}

impl RunConfig {
    /// Reference measurement with the profile's schedule and time unit.
    pub fn for_profile(profile: SolverProfile) -> Self {
        let (measurement, time_unit, schedule, file) = match profile {
            SolverProfile::Production => (
                Measurement::reference(),
                TimeUnit::Seconds,
                DurationSchedule::production(),
                "results_sec.csv",
            ),
            SolverProfile::Debug => (
                Measurement::reference_per_minute(),
                TimeUnit::Minutes,
                DurationSchedule::debug(),
                "results_min.csv",
            ),
        };

        Self {
            version: CONFIG_VERSION,
            measurement,
            profile,
            time_unit,
            schedule,
            solver: None,
            output: OutputConfig {
                path: Some(PathBuf::from(file)),
                format: OutputFormat::Csv,
            },
            parallel: false,
        }
    }

    pub fn solver_settings(&self) -> SolverSettings {
        self.solver.unwrap_or_else(|| self.profile.settings())
    }

    /// Switch to `profile` for a run loaded from a file.
    ///
    /// The file's measurement and schedule are kept, so the profile must use
    /// the same time unit; otherwise the ET rate and the elapsed column would
    /// be read in the wrong unit.
    pub fn apply_profile(&mut self, profile: SolverProfile) -> AppResult<()> {
        let expected = Self::for_profile(profile).time_unit;
        if expected != self.time_unit {
            return Err(AppError::InvalidInput(format!(
                "profile {profile} runs in {expected}, but the run file uses {}; \
                 edit `profile` and `time_unit` in the run file instead",
                self.time_unit
            )));
        }
        self.profile = profile;
        Ok(())
    }
}

/// Load a run configuration from a YAML file.
pub fn load_config(path: &Path) -> AppResult<RunConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: RunConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;

    validate_config(&config)?;
    Ok(config)
}

/// Save a run configuration to a YAML file.
pub fn save_config(path: &Path, config: &RunConfig) -> AppResult<()> {
    let content = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Validate a run configuration.
pub fn validate_config(config: &RunConfig) -> AppResult<()> {
    if config.version != CONFIG_VERSION {
        return Err(AppError::Validation(format!(
            "Unsupported config version {} (expected {})",
            config.version, CONFIG_VERSION
        )));
    }

    config
        .measurement
        .validate()
        .map_err(|e| AppError::Validation(format!("measurement: {}", e)))?;

    config
        .schedule
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if let Some(settings) = &config.solver {
        settings
            .wet_bulb
            .validate()
            .map_err(|e| AppError::Validation(format!("wet_bulb: {}", e)))?;
        settings
            .dry_bulb
            .validate()
            .map_err(|e| AppError::Validation(format!("dry_bulb: {}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        validate_config(&RunConfig::default()).unwrap();
        validate_config(&RunConfig::for_profile(SolverProfile::Debug)).unwrap();
    }

    #[test]
    fn debug_profile_runs_in_minutes() {
        let cfg = RunConfig::for_profile(SolverProfile::Debug);
        assert_eq!(cfg.time_unit, TimeUnit::Minutes);
        assert_eq!(cfg.schedule.len(), 6);
        assert_eq!(cfg.solver_settings().dry_bulb.max_iterations, 20);
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = r#"
version: 1
measurement:
  air_temp_c: 22.0
  rel_hum_pct: 60.0
  et_rate: 0.05
"#;
        let cfg: RunConfig = serde_yaml::from_str(yaml).unwrap();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.profile, SolverProfile::Production);
        assert_eq!(cfg.schedule, DurationSchedule::production());
        assert_eq!(cfg.output.format, OutputFormat::Csv);
        assert!(cfg.output.path.is_none());
        assert!(!cfg.parallel);
    }

    #[test]
    fn explicit_schedule_and_solver_override() {
        let yaml = r#"
version: 1
measurement: { air_temp_c: 24.0, rel_hum_pct: 63.0, et_rate: 0.7 }
profile: debug
time_unit: minutes
schedule:
  type: list
  values: [0, 2, 4]
solver:
  wet_bulb: { low: -25.0, high: 30.0, rel_tol: 1.0e-8, max_iterations: 200 }
  dry_bulb: { low: -20.0, high: 30.0, rel_tol: 1.0e-9, max_iterations: 100 }
output:
  path: out.jsonl
  format: jsonl
"#;
        let cfg: RunConfig = serde_yaml::from_str(yaml).unwrap();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.schedule.durations().collect::<Vec<_>>(), vec![0.0, 2.0, 4.0]);
        let settings = cfg.solver_settings();
        assert_eq!(settings.dry_bulb.max_iterations, 100);
        assert_eq!(settings.dry_bulb.midpoint_floor, 1e-6);
        assert_eq!(cfg.output.format, OutputFormat::Jsonl);
    }

    #[test]
    fn rejects_humidity_above_hundred() {
        let mut cfg = RunConfig::default();
        cfg.measurement.rel_hum_pct = 120.0;
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_version() {
        let cfg = RunConfig {
            version: 7,
            ..RunConfig::default()
        };
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn profile_override_keeps_time_unit() {
        let mut cfg = RunConfig::default();
        cfg.apply_profile(SolverProfile::Production).unwrap();
        assert_eq!(cfg.profile, SolverProfile::Production);

        let err = cfg.apply_profile(SolverProfile::Debug).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(cfg.profile, SolverProfile::Production);
        assert_eq!(cfg.time_unit, TimeUnit::Seconds);

        let mut minutes = RunConfig::for_profile(SolverProfile::Debug);
        assert!(minutes.apply_profile(SolverProfile::Production).is_err());
        minutes.time_unit = TimeUnit::Seconds;
        minutes.apply_profile(SolverProfile::Production).unwrap();
        assert_eq!(minutes.solver_settings(), SolverProfile::Production.settings());
    }

    #[test]
    fn yaml_round_trip_of_default() {
        let cfg = RunConfig::default();
        let text = serde_yaml::to_string(&cfg).unwrap();
        let back: RunConfig = serde_yaml::from_str(&text).unwrap();
        assert_eq!(cfg, back);
    }
}
