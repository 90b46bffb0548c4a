use serde::Deserialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single REST call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    /// The session has already been torn down when this is returned
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected ({status}): {message}")]
    Client { status: u16, message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

/// Name used by callers that think in terms of request failures
pub type RequestError = ApiError;

impl ApiError {
    /// Classify a non-success status with the server's message
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ApiError::Unauthorized { message },
            404 => ApiError::NotFound(message),
            400..=499 => ApiError::Client { status, message },
            _ => ApiError::Server { status, message },
        }
    }

    /// HTTP status, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::NotFound(_) => Some(404),
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pull a human-readable message out of an error response body
pub(crate) fn server_message(body: &[u8], fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}
