//! Run execution: wet-bulb solve, sweep, sink.

use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

use ec_core::constants::GAS_CONST_WATER;
use ec_psychro::MoistAirState;
use ec_solver::{SolverProfile, WetBulbResult, solve_wet_bulb};
use ec_sweep::{
    CsvSink, JsonLinesSink, RowSink, SweepSummary, TimeUnit, drain_into, run_sweep,
    run_sweep_parallel,
};

use crate::config::{OutputConfig, OutputFormat, RunConfig, validate_config};
use crate::error::{AppError, AppResult};

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub wet_bulb: WetBulbResult,
    pub summary: SweepSummary,
    pub time_unit: TimeUnit,
    /// Longest swept duration [s]
    pub span_s: f64,
    pub solve_time_s: f64,
}

/// Open the configured output sink.
pub fn open_sink(output: &OutputConfig) -> AppResult<Box<dyn RowSink>> {
    let sink: Box<dyn RowSink> = match &output.path {
        Some(path) => {
            let file = File::create(path).map_err(|e| AppError::OutputOpen {
                path: path.clone(),
                source: e,
            })?;
            let writer = BufWriter::new(file);
            match output.format {
                OutputFormat::Csv => Box::new(CsvSink::new(writer)),
                OutputFormat::Jsonl => Box::new(JsonLinesSink::new(writer)),
            }
        }
        None => {
            let writer = io::stdout().lock();
            match output.format {
                OutputFormat::Csv => Box::new(CsvSink::new(writer)),
                OutputFormat::Jsonl => Box::new(JsonLinesSink::new(writer)),
            }
        }
    };
    Ok(sink)
}

/// Run the two-stage solve and write every row to `sink`.
///
/// A failed wet-bulb solve aborts the run. Failed rows do not; they are
/// counted in the returned summary.
pub fn execute(config: &RunConfig, sink: &mut dyn RowSink) -> AppResult<RunReport> {
    validate_config(config)?;

    let settings = config.solver_settings();
    let m = config.measurement;
    let span_s = config
        .time_unit
        .to_seconds(config.schedule.durations().fold(0.0, f64::max));
    let start = Instant::now();

    tracing::info!(
        air_temp_c = m.air_temp_c,
        rel_hum_pct = m.rel_hum_pct,
        et_rate = m.et_rate,
        profile = %config.profile,
        schedule = %config.schedule,
        span_s,
        "starting run"
    );

    let wet_bulb = solve_wet_bulb(m.air_temp_c, m.rel_hum_pct, &settings.wet_bulb)?;

    let summary = if config.parallel {
        // bounded by MAX_SCHEDULE_POINTS after validation
        let durations: Vec<f64> = config.schedule.durations().collect();
        let outcomes = run_sweep_parallel(&m, wet_bulb.temperature_c, &durations, &settings.dry_bulb);
        drain_into(outcomes, config.time_unit, sink)?
    } else {
        let driver = run_sweep(
            m,
            wet_bulb.temperature_c,
            config.schedule.durations(),
            &settings.dry_bulb,
        );
        drain_into(driver, config.time_unit, sink)?
    };

    let solve_time_s = start.elapsed().as_secs_f64();
    tracing::info!(
        rows = summary.rows,
        failures = summary.failures,
        flagged_inversion = summary.inversions,
        flagged_supersaturation = summary.supersaturated,
        not_converged = summary.not_converged,
        solve_time_s,
        "run finished"
    );

    Ok(RunReport {
        wet_bulb,
        summary,
        time_unit: config.time_unit,
        span_s,
        solve_time_s,
    })
}

/// [`execute`] against the sink named in `config.output`.
pub fn execute_to_output(config: &RunConfig) -> AppResult<RunReport> {
    let mut sink = open_sink(&config.output)?;
    execute(config, sink.as_mut())
}

/// Psychrometric state of one measurement plus its wet bulb.
#[derive(Debug, Clone)]
pub struct StateReport {
    pub air: MoistAirState,
    pub wet_bulb: WetBulbResult,
}

pub fn solve_state(air_temp_c: f64, rel_hum_pct: f64, profile: SolverProfile) -> AppResult<StateReport> {
    let air = MoistAirState::from_measurement(air_temp_c, rel_hum_pct, GAS_CONST_WATER)?;
    let wet_bulb = solve_wet_bulb(air_temp_c, rel_hum_pct, &profile.settings().wet_bulb)?;
    Ok(StateReport { air, wet_bulb })
}
