//! Error types for lords crate

use thiserror::Error;

use crate::api::ApiError;
use crate::export::ExportError;
use crate::session::SessionError;

#[derive(Error, Debug)]
pub enum LordsError {
    #[error("Core error: {0}")]
    Core(#[from] lords_core::CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Build error: {0}")]
    Build(String),
}

impl LordsError {
    /// True when the server rejected the session token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, LordsError::Api(e) if e.is_unauthorized())
    }
}

pub type Result<T> = std::result::Result<T, LordsError>;
