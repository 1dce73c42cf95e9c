use anyhow::Error;
use std::process::ExitCode;
use thiserror::Error as ThisError;
use tidybook_config::ConfigError;
use tidybook_core::CoreError;
use tidybook_sync::{ExportError, FetchError};

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 3;
pub const EXIT_FETCH_FAILED: u8 = 4;
pub const EXIT_EXPORT_FAILED: u8 = 5;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
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
            });
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(fetch_err) = cause.downcast_ref::<FetchError>() {
            return ExitCode::from(fetch_exit_code(fetch_err));
        }
        if cause.downcast_ref::<ExportError>().is_some() {
            return ExitCode::from(EXIT_EXPORT_FAILED);
        }
        if cause.downcast_ref::<CoreError>().is_some() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidSimilarityThreshold(_)
        | ConfigError::InvalidLargeInputWarning(_)
        | ConfigError::InvalidPerPage(_)
        | ConfigError::InvalidChurchSuiteField { .. }
        | ConfigError::InvalidCsvPath
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn fetch_exit_code(err: &FetchError) -> u8 {
    match err {
        FetchError::MissingSetting(_) | FetchError::Unavailable(_) => EXIT_INVALID_INPUT,
        FetchError::Io(_) | FetchError::Parse(_) | FetchError::Status { .. } => EXIT_FETCH_FAILED,
        #[cfg(feature = "churchsuite")]
        FetchError::Http(_) => EXIT_FETCH_FAILED,
        #[cfg(feature = "churchsuite")]
        FetchError::Url(_) => EXIT_INVALID_INPUT,
    }
}
