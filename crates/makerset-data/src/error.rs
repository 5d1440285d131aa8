//! HTTP client error types.

use makerset_commerce::checkout::BackendError;
use makerset_commerce::CommerceError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the MakerSet backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request could not be built or dispatched.
    #[error("Request failed: {0}")]
    Request(String),

    /// The server could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// No response within the configured time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with an error.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The response body was not what the endpoint promises.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The request body could not be serialized.
    #[error("JSON error: {0}")]
    Json(String),

    /// Client-side validation rejected the request before sending it.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// HTTP status, for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

impl From<CommerceError> for FetchError {
    fn from(e: CommerceError) -> Self {
        FetchError::InvalidRequest(e.to_string())
    }
}

impl From<FetchError> for BackendError {
    fn from(e: FetchError) -> Self {
        let error = BackendError::new(e.to_string());
        match e.status() {
            Some(status) => error.with_status(status),
            None => error,
        }
    }
}
