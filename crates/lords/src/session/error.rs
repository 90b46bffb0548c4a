use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt session file: {0}")]
    Parse(String),

    #[error("Failed to encode session: {0}")]
    Encode(String),

    #[error("Session lock poisoned: {0}")]
    Lock(String),
}
