use anyhow::{Context as _, Result};
use clap::Args;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use widthnorm::batch::{BatchRunner, ValidationRequest};
use widthnorm::config::AppConfig;

use crate::cli::error::{CliError, invalid_input};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Fixture file name inside the fixtures directory
    #[arg(long)]
    pub fixture: Option<String>,
    /// Phone number to check; repeatable
    #[arg(long = "phone")]
    pub phones: Vec<String>,
    /// JSON request body (`{"phones": [...], "fixture": "..."}`), `-` for stdin
    #[arg(long, conflicts_with_all = ["fixture", "phones"])]
    pub request: Option<PathBuf>,
    #[arg(long)]
    pub fixtures_dir: Option<PathBuf>,
    #[arg(long)]
    pub results_dir: Option<PathBuf>,
    /// Remove whitespace from every number before checking it
    #[arg(long)]
    pub strip_whitespace: bool,
    /// Exit non-zero when a fixture expectation is not met
    #[arg(long)]
    pub fail_on_mismatch: bool,
}

pub fn run(mut config: AppConfig, args: ValidateArgs) -> Result<()> {
    if let Some(dir) = args.fixtures_dir.clone() {
        config.fixtures_dir = dir;
    }
    if let Some(dir) = args.results_dir.clone() {
        config.results_dir = dir;
    }
    config.strip_whitespace |= args.strip_whitespace;

    let request = build_request(&config, &args)?;
    debug!(?request, "validation request");

    let source = request.into_source()?;
    let summary = BatchRunner::new(&config)
        .run(source)
        .with_context(|| "run validation")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if args.fail_on_mismatch && summary.counts.mismatches > 0 {
        return Err(CliError::ExpectationMismatch(summary.counts.mismatches).into());
    }
    Ok(())
}

fn build_request(config: &AppConfig, args: &ValidateArgs) -> Result<ValidationRequest> {
    if let Some(path) = &args.request {
        let body = read_body(path)?;
        if body.trim().is_empty() {
            return Err(invalid_input("empty request body"));
        }
        let request: ValidationRequest =
            serde_json::from_str(&body).with_context(|| "parse request body")?;
        return Ok(request);
    }

    if args.fixture.is_none() && args.phones.is_empty() {
        return Ok(ValidationRequest {
            phones: None,
            fixture: Some(config.default_fixture.clone()),
        });
    }
    Ok(ValidationRequest {
        phones: (!args.phones.is_empty()).then(|| args.phones.clone()),
        fixture: args.fixture.clone(),
    })
}

fn read_body(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .with_context(|| "read request from stdin")?;
        return Ok(body);
    }
    fs::read_to_string(path).with_context(|| format!("read request {}", path.display()))
}
