//! Error types for lords-cli

use lords::{ApiError, LordsError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lords(#[from] LordsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not allowed: {0}")]
    Forbidden(String),
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Lords(LordsError::Api(e))
    }
}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<lords::export::ExportError> for CliError {
    fn from(e: lords::export::ExportError) -> Self {
        CliError::Lords(LordsError::Export(e))
    }
}
