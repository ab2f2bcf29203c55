use clap::{Parser, Subcommand, ValueEnum};
use ec_app::{
    AppError, AppResult, OutputFormat, RunConfig, RunReport, execute_to_output, load_config,
    save_config, solve_state,
};
use ec_core::{as_bar, as_degc, as_g_per_m3};
use ec_solver::{SolverProfile, WetBulbResult, solve_wet_bulb};
use ec_sweep::Measurement;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evapcool")]
#[command(about = "Evaporative cooling estimator - wet-bulb and dry-bulb sweep", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the wet bulb, sweep durations and write the result table
    Run {
        /// Path to a YAML run file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Solver profile (also picks the default schedule when no run file is given)
        #[arg(long, value_enum)]
        profile: Option<ProfileArg>,
        /// Air temperature in °C
        #[arg(long)]
        air_temp: Option<f64>,
        /// Relative humidity in %
        #[arg(long)]
        rel_hum: Option<f64>,
        /// Evapotranspiration rate in g/m³ per time unit
        #[arg(long)]
        et_rate: Option<f64>,
        /// Output file; "-" writes to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Solve rows on the rayon pool
        #[arg(long)]
        parallel: bool,
        /// Prompt for the measurement on stdin
        #[arg(short, long)]
        interactive: bool,
    },
    /// Solve the wet-bulb temperature only
    WetBulb {
        /// Air temperature in °C
        #[arg(long)]
        air_temp: f64,
        /// Relative humidity in %
        #[arg(long)]
        rel_hum: f64,
        /// Solver profile
        #[arg(long, value_enum, default_value_t = ProfileArg::Production)]
        profile: ProfileArg,
    },
    /// Print the psychrometric state of a measurement
    State {
        /// Air temperature in °C
        #[arg(long)]
        air_temp: f64,
        /// Relative humidity in %
        #[arg(long)]
        rel_hum: f64,
    },
    /// Write a default run file
    InitConfig {
        /// Destination path
        #[arg(default_value = "evapcool.yaml")]
        path: PathBuf,
        /// Profile the defaults are taken from
        #[arg(long, value_enum, default_value_t = ProfileArg::Production)]
        profile: ProfileArg,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    Production,
    Debug,
}

impl From<ProfileArg> for SolverProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Production => SolverProfile::Production,
            ProfileArg::Debug => SolverProfile::Debug,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Csv,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Measurement overrides collected from flags.
struct MeasurementArgs {
    air_temp: Option<f64>,
    rel_hum: Option<f64>,
    et_rate: Option<f64>,
}

fn main() -> AppResult<()> {
    // Logs go to stderr so a table on stdout stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            profile,
            air_temp,
            rel_hum,
            et_rate,
            output,
            format,
            parallel,
            interactive,
        } => cmd_run(
            config.as_deref(),
            profile,
            MeasurementArgs {
                air_temp,
                rel_hum,
                et_rate,
            },
            output,
            format,
            parallel,
            interactive,
        ),
        Commands::WetBulb {
            air_temp,
            rel_hum,
            profile,
        } => cmd_wet_bulb(air_temp, rel_hum, profile.into()),
        Commands::State { air_temp, rel_hum } => cmd_state(air_temp, rel_hum),
        Commands::InitConfig {
            path,
            profile,
            force,
        } => cmd_init_config(&path, profile.into(), force),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    config_path: Option<&Path>,
    profile: Option<ProfileArg>,
    overrides: MeasurementArgs,
    output: Option<PathBuf>,
    format: Option<FormatArg>,
    parallel: bool,
    interactive: bool,
) -> AppResult<()> {
    let mut config = match config_path {
        Some(path) => {
            let mut config = load_config(path)?;
            if let Some(profile) = profile {
                config.apply_profile(profile.into())?;
            }
            config
        }
        None => RunConfig::for_profile(profile.map(Into::into).unwrap_or_default()),
    };

    let m = &mut config.measurement;
    if let Some(v) = overrides.air_temp {
        m.air_temp_c = v;
    }
    if let Some(v) = overrides.rel_hum {
        m.rel_hum_pct = v;
    }
    if let Some(v) = overrides.et_rate {
        m.et_rate = v;
    }
    if interactive {
        *m = prompt_measurement(*m)?;
    }

    if let Some(path) = output {
        config.output.path = if path.as_os_str() == "-" {
            None
        } else {
            Some(path)
        };
    }
    if let Some(format) = format {
        config.output.format = format.into();
    }
    config.parallel |= parallel;

    let report = execute_to_output(&config)?;

    // Table on stdout means the summary goes to stderr
    let mut out: Box<dyn Write> = match &config.output.path {
        Some(path) => {
            let mut stdout = io::stdout();
            writeln!(stdout, "✓ Wrote {}", path.display())?;
            Box::new(stdout)
        }
        None => Box::new(io::stderr()),
    };
    print_run_summary(&mut out, &config, &report)?;
    Ok(())
}

fn cmd_wet_bulb(air_temp: f64, rel_hum: f64, profile: SolverProfile) -> AppResult<()> {
    let m = Measurement::new(air_temp, rel_hum, 0.0)?;
    let settings = profile.settings();
    let result = solve_wet_bulb(m.air_temp_c, m.rel_hum_pct, &settings.wet_bulb)?;
    println!(
        "Wet bulb at {:.4} °C / {:.4} % ({} profile):",
        air_temp, rel_hum, profile
    );
    print_wet_bulb(&result);
    Ok(())
}

fn cmd_state(air_temp: f64, rel_hum: f64) -> AppResult<()> {
    let report = solve_state(air_temp, rel_hum, SolverProfile::Production)?;
    let air = &report.air;
    println!("Moist air state:");
    println!("  Air temperature:      {:.4} °C", as_degc(air.temperature));
    println!("  Relative humidity:    {:.4} %", rel_hum);
    println!(
        "  Saturation pressure:  {:.6} bar",
        as_bar(air.saturation_pressure)
    );
    println!("  Vapor pressure:       {:.6} bar", as_bar(air.vapor_pressure));
    println!(
        "  Max humidity:         {:.4} g/m³",
        as_g_per_m3(air.max_humidity)
    );
    println!(
        "  Absolute humidity:    {:.4} g/m³",
        as_g_per_m3(air.absolute_humidity)
    );
    println!(
        "  Humidity deficit:     {:.4} g/m³",
        as_g_per_m3(air.humidity_deficit())
    );
    print_wet_bulb(&report.wet_bulb);
    Ok(())
}

fn cmd_init_config(path: &Path, profile: SolverProfile, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    save_config(path, &RunConfig::for_profile(profile))?;
    println!("✓ Wrote {} run file: {}", profile, path.display());
    Ok(())
}

fn print_wet_bulb(result: &WetBulbResult) {
    let outcome = &result.outcome;
    println!("  Wet-bulb temperature: {:.6} °C", result.temperature_c);
    println!(
        "  Iterations: {}  residual: {:.3e}  converged: {}",
        outcome.iterations, outcome.residual, outcome.converged
    );
}

fn print_run_summary(out: &mut dyn Write, config: &RunConfig, report: &RunReport) -> io::Result<()> {
    let summary = &report.summary;
    let m = &config.measurement;
    writeln!(out, "\nRun summary ({} profile):", config.profile)?;
    writeln!(
        out,
        "  Measurement: {:.4} °C, {:.4} %, ET rate {} per {}",
        m.air_temp_c,
        m.rel_hum_pct,
        m.et_rate,
        report.time_unit.label()
    )?;
    writeln!(
        out,
        "  Wet bulb:    {:.6} °C ({} iterations, converged: {})",
        report.wet_bulb.temperature_c,
        report.wet_bulb.outcome.iterations,
        report.wet_bulb.outcome.converged
    )?;
    writeln!(
        out,
        "  Rows:        {} (up to {:.0} s of evaporation)",
        summary.rows, report.span_s
    )?;
    if summary.failures > 0 {
        writeln!(out, "  Failed rows: {}", summary.failures)?;
    }
    if summary.not_converged > 0 {
        writeln!(out, "  Not converged: {}", summary.not_converged)?;
    }
    if summary.inversions > 0 || summary.supersaturated > 0 {
        writeln!(
            out,
            "  Flagged:     {} inversion, {} supersaturated (reduce duration)",
            summary.inversions, summary.supersaturated
        )?;
    }
    writeln!(out, "  Solve:       {:.3}s", report.solve_time_s)?;
    Ok(())
}

/// Ask for each measurement value on stdin; an empty line keeps the current one.
fn prompt_measurement(current: Measurement) -> AppResult<Measurement> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let air = prompt_f64(&mut input, "Air temperature [°C]", current.air_temp_c)?;
    let rh = prompt_f64(&mut input, "Relative humidity [%]", current.rel_hum_pct)?;
    let et = prompt_f64(&mut input, "ET rate [g/m³ per time unit]", current.et_rate)?;
    Ok(Measurement::new(air, rh, et)?)
}

fn prompt_f64(input: &mut impl BufRead, label: &str, default: f64) -> AppResult<f64> {
    let mut stderr = io::stderr();
    write!(stderr, "{label} [{default}]: ")?;
    stderr.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        return Ok(default);
    }
    line.parse::<f64>()
        .map_err(|_| AppError::InvalidInput(format!("{label}: cannot parse '{line}'")))
}
