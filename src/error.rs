//! Error types for the Siege stats library

use thiserror::Error;


pub type Result<T> = std::result::Result<T, SiegeError>;

#[derive(Error, Debug)]
pub enum SiegeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Fetch failed with status {status}: {message}")]
    Fetch { status: u16, message: String },

    #[error("Not found: {name}")]
    NotFound { name: String },

    #[error("Insufficient data for comparison: {message}")]
    InsufficientData { message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Missing required input: {what}")]
    MissingInput { what: &'static str },
}

impl SiegeError {
    /// Classify a transport error, keeping timeouts distinct from other
    /// failures so callers can render differentiated messages.
    pub fn from_request_error(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            SiegeError::Timeout {
                seconds: timeout_secs,
            }
        } else {
            SiegeError::Http(err)
        }
    }
}
