//! Completion client error types

use thiserror::Error;

/// Errors surfaced by a completion call
///
/// None of these are retried; each one ends the current stage.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response does not match schema '{name}': {details}")]
    SchemaViolation { name: String, details: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Map an HTTP status and body to an error
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => LlmError::Authentication(message),
            429 => LlmError::RateLimited(message),
            _ => LlmError::Api { status, message },
        }
    }
}
