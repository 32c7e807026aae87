//! PageSpeed Insights client
//!
//! Remote source of real Lighthouse measurements for a URL.

pub mod client;
pub mod types;

pub use client::{PageSpeedClient, PageSpeedConfig, Strategy};
pub use types::PageSpeedResponse;

use thiserror::Error;

/// PageSpeed client errors
#[derive(Debug, Error)]
pub enum PageSpeedError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Service answered with a non-success status
    #[error("PageSpeed API error: {status} - {body}")]
    ApiError { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    ParsingError(String),

    /// Client could not be built from its configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
