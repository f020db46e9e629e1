mod cli;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::cli::error::{exit_code_for, report_error};
use crate::cli::{normalize, validate};
use widthnorm::config;

#[derive(Debug, Parser)]
#[command(
    name = "widthnorm",
    version,
    about = "Full-width mapping, whitespace/symbol stripping and phone batch validation"
)]
struct Cli {
    /// TOML file overriding the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize text given as an argument or read line by line from stdin
    Normalize(normalize::NormalizeArgs),
    /// Validate phone numbers and write a CSV report
    Validate(validate::ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        verbose: _,
        command,
    } = cli;

    match command {
        Command::Normalize(args) => normalize::run(args),
        Command::Validate(args) => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if let Some(path) = &config_path {
                debug!(path = %path.display(), "config loaded");
            }
            validate::run(app_config, args)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
