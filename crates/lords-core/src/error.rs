//! Error types for lords-core

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Invalid vote value: {0} (expected 1 or -1)")]
    InvalidVote(i64),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid model id: {0}")]
    InvalidModelId(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
