use anyhow::Error;
use std::process::ExitCode;
use thiserror::Error as ThisError;
use widthnorm::NormalizeError;
use widthnorm::batch::BatchError;
use widthnorm::config::ConfigError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;
pub const EXIT_EXPECTATION_MISMATCH: u8 = 4;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} result(s) differ from fixture expectations")]
    ExpectationMismatch(usize),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::ExpectationMismatch(_) => EXIT_EXPECTATION_MISMATCH,
            });
        }
        if cause.downcast_ref::<NormalizeError>().is_some() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if let Some(batch_err) = cause.downcast_ref::<BatchError>() {
            return ExitCode::from(batch_exit_code(batch_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if cause.downcast_ref::<serde_json::Error>().is_some() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn batch_exit_code(err: &BatchError) -> u8 {
    match err {
        BatchError::FixtureNotFound(_) => EXIT_NOT_FOUND,
        BatchError::MissingInput | BatchError::InvalidFixtureName(_) => EXIT_INVALID_INPUT,
        BatchError::Io { .. } | BatchError::Csv { .. } => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingConfigFile(_) => EXIT_NOT_FOUND,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::InvalidDefaultFixture(_)
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
        ConfigError::Read { .. } => EXIT_FAILURE,
    }
}
