//! HTTP client for the PageSpeed Insights `runPagespeed` endpoint

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::types::PageSpeedResponse;
use super::PageSpeedError;
use crate::analysis::analyzer::MeasurementSource;
use crate::analysis::types::WebVitals;

/// Lighthouse categories requested on every run
const CATEGORIES: [&str; 4] = ["performance", "accessibility", "best-practices", "seo"];

/// Device profile Lighthouse emulates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

/// PageSpeed client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpeedConfig {
    /// `runPagespeed` endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Optional API key; anonymous use is rate limited
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
    #[serde(default)]
    pub strategy: Strategy,
    /// Request timeout (seconds); Lighthouse runs routinely take 20s+
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for PageSpeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            strategy: Strategy::default(),
            timeout_secs: default_timeout(),
        }
    }
}

impl PageSpeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full request URL for analysing `target`
    pub fn request_url(&self, target: &str) -> String {
        let mut url = format!("{}?url={}", self.endpoint, urlencoding::encode(target));
        for category in CATEGORIES {
            url.push_str("&category=");
            url.push_str(category);
        }
        url.push_str("&strategy=");
        url.push_str(self.strategy.as_str());
        if let Some(key) = &self.api_key {
            url.push_str("&key=");
            url.push_str(&urlencoding::encode(key.expose_secret()));
        }
        url
    }
}

/// PageSpeed Insights client
pub struct PageSpeedClient {
    config: PageSpeedConfig,
    client: reqwest::Client,
}

impl PageSpeedClient {
    pub fn new(config: PageSpeedConfig) -> Result<Self, PageSpeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PageSpeedError::ConfigurationError(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Runs Lighthouse for `url` and extracts the vitals record
    pub async fn run(&self, url: &str) -> Result<WebVitals, PageSpeedError> {
        debug!("Requesting PageSpeed run for {}", url);

        let response = self
            .client
            .get(self.config.request_url(url))
            .send()
            .await
            .map_err(|e| PageSpeedError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PageSpeedError::ApiError { status, body });
        }

        let body: PageSpeedResponse = response
            .json()
            .await
            .map_err(|e| PageSpeedError::ParsingError(e.to_string()))?;

        Ok(body.into_vitals(url))
    }
}

#[async_trait]
impl MeasurementSource for PageSpeedClient {
    fn name(&self) -> &str {
        "pagespeed"
    }

    async fn measure(&self, url: &str) -> crate::Result<WebVitals> {
        Ok(self.run(url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_target() {
        let config = PageSpeedConfig::default();
        let url = config.request_url("https://example.com/a b?x=1&y=2");

        assert!(url.starts_with("https://www.googleapis.com/pagespeedonline/v5/runPagespeed?url="));
        assert!(url.contains("url=https%3A%2F%2Fexample.com%2Fa%20b%3Fx%3D1%26y%3D2"));
        assert!(url.contains(
            "&category=performance&category=accessibility&category=best-practices&category=seo"
        ));
        assert!(url.ends_with("&strategy=mobile"));
    }

    #[test]
    fn test_request_url_with_key_and_desktop() {
        let config = PageSpeedConfig {
            api_key: Some(SecretString::new("k3y".to_string().into_boxed_str())),
            strategy: Strategy::Desktop,
            ..PageSpeedConfig::default()
        };
        let url = config.request_url("https://example.com");

        assert!(url.contains("&strategy=desktop"));
        assert!(url.ends_with("&key=k3y"));
    }

    #[test]
    fn test_client_creation() {
        let client = PageSpeedClient::new(PageSpeedConfig::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().name(), "pagespeed");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let config = PageSpeedConfig {
            endpoint: "http://127.0.0.1:9/runPagespeed".to_string(),
            timeout_secs: 2,
            ..PageSpeedConfig::default()
        };
        let client = PageSpeedClient::new(config).unwrap();
        let result = client.run("https://example.com").await;
        assert!(matches!(result, Err(PageSpeedError::NetworkError(_))));
    }
}
