//! Error types for the analyzer service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm::LlmError;
use crate::pagespeed::PageSpeedError;

/// Result type alias for analyzer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned for any failure that is not a bad URL or missing AI setup
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze website. Please try again.";

/// Message returned for a missing or malformed URL
pub const INVALID_URL_MESSAGE: &str = "Please provide a valid URL";

/// Error types for analyzer operations
#[derive(Debug, Error)]
pub enum Error {
    /// URL missing or not a well-formed absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Measurement service error
    #[error("Measurement error: {0}")]
    PageSpeed(#[from] PageSpeedError),

    /// Text generation error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// A required collaborator is not configured
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to API callers; details stay in the logs
    pub fn public_message(&self) -> &str {
        match self {
            Error::InvalidUrl(_) => INVALID_URL_MESSAGE,
            Error::ServiceUnavailable(message) => message,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Analysis error: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = json!({ "error": self.public_message() });
        (status, Json(body)).into_response()
    }
}
