use std::path::PathBuf;
use std::process::ExitCode;

use accel_calibrator::calibration::{calibrate_file, CalibrationReport};
use accel_calibrator::config::{CalibrationConfig, SensorConfig, DEFAULT_ITERATIONS};
use accel_calibrator::error::log_calibration_error;
use accel_calibrator::init_logging;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "accel_calibrate",
    about = "Estimate per-axis accelerometer offset and gain from a resting capture"
)]
struct Cli {
    /// CSV file to parse (x,y,z per row)
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,
    /// Maximum per-axis standard deviation for an epoch to be used
    #[arg(short = 't', long, default_value_t = 0.0, allow_negative_numbers = true)]
    threshold: f64,
    /// Number of estimator iterations per epoch
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS, allow_negative_numbers = true)]
    iterations: i64,
    /// JSON file with sample rate, epoch duration and gravity
    #[arg(long)]
    config: Option<PathBuf>,
    /// Treat the first CSV row as a header
    #[arg(long)]
    has_headers: bool,
    /// Output format for the corrections
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let sensor = cli
        .config
        .as_ref()
        .map(SensorConfig::load_from_file)
        .unwrap_or_default();

    let config = CalibrationConfig {
        input: cli.file,
        threshold: cli.threshold,
        iterations: cli.iterations,
        has_headers: cli.has_headers,
        sensor,
    };

    let validated = config
        .validate()
        .inspect_err(|err| log_calibration_error(err, "argument validation"))
        .context("invalid arguments (see --help)")?;

    let report = calibrate_file(&validated)
        .inspect_err(|err| log_calibration_error(err, "calibration"))
        .with_context(|| format!("calibrating {}", validated.input.display()))?;

    emit_report(&report, cli.format)
}

fn emit_report(report: &CalibrationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", report.render_table()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }
    Ok(())
}
