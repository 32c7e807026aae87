//! Request validation for the analysis endpoints

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Body of `POST /api/demo` and `POST /api/analyze`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// Normalized target URL, or [`Error::InvalidUrl`]
    pub fn target(&self) -> Result<String> {
        match self.url.as_deref() {
            Some(raw) => parse_target(raw),
            None => Err(Error::InvalidUrl("missing url".to_string())),
        }
    }
}

/// Prefixes `https://` unless the input already names http or https
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// True when `url` parses as an absolute URL
pub fn validate_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Trims, normalizes and validates a user-supplied URL
pub fn parse_target(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidUrl("empty url".to_string()));
    }

    let normalized = normalize_url(raw);
    if validate_url(&normalized) {
        Ok(normalized)
    } else {
        Err(Error::InvalidUrl(raw.to_string()))
    }
}
