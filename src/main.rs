//! Command-line entry point.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::error;

use super_recon::config::{ConfigLoader, ReconConfig};
use super_recon::engine::run_reconciliation;
use super_recon::error::{ReconError, ReconResult};
use super_recon::input::read_workbook;
use super_recon::report::{render_json, write_text};
use super_recon::telemetry;

/// General failure.
const EXIT_ERROR: u8 = 1;

/// Usage error: no input given, or the input file is missing.
const EXIT_USAGE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Reconcile superannuation owed on OTE against fund distributions.
#[derive(Debug, Parser)]
#[command(name = "super-recon", version, about)]
struct Cli {
    /// Workbook whose first three sheets are distributions, payments and
    /// payment types.
    file: Option<PathBuf>,

    /// YAML configuration file (rate, OTE label, currency symbol).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = telemetry::init(&cli.log_level) {
        eprintln!("error: {err}");
        return ExitCode::from(EXIT_USAGE);
    }

    let Some(file) = cli.file.as_deref() else {
        println!("Please pass a file path.");
        return ExitCode::from(EXIT_USAGE);
    };

    match run(&cli, file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ReconError::InputNotFound { path }) => {
            error!(path = %path, "Input file not found");
            println!("Could not find file.");
            ExitCode::from(EXIT_USAGE)
        }
        Err(err) => {
            error!(error = %err, "Reconciliation failed");
            eprintln!("error: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: &Cli, file: &std::path::Path) -> ReconResult<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?.into_config(),
        None => ReconConfig::default(),
    };

    let input = read_workbook(file)?;
    let run = run_reconciliation(&input, &config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match cli.format {
        OutputFormat::Text => write_text(&mut out, &run.report, &config),
        OutputFormat::Json => writeln!(out, "{}", render_json(&run)?),
    };
    written
        .and_then(|()| out.flush())
        .map_err(|e| ReconError::RenderError {
            message: e.to_string(),
        })
}
