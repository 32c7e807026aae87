use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use crate::llm::LlmConfig;
use crate::logging::LogConfig;
use crate::pagespeed::PageSpeedConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LogConfig,
    #[serde(default)]
    pub pagespeed: PageSpeedConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

/// HTTP server and analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Listen address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Simulated processing time for the demo endpoint (ms)
    #[serde(default = "default_demo_delay_ms")]
    pub demo_delay_ms: u64,
    /// Allow any origin
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
    /// Overall deadline for one real analysis (seconds)
    #[serde(default = "default_analysis_timeout")]
    pub analysis_timeout_secs: u64,
    /// Timeout for the HEAD probe of the analysed page (seconds)
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    /// Skip PageSpeed and page probing; analyses use estimates only
    #[serde(default)]
    pub offline: bool,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_demo_delay_ms() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}

fn default_analysis_timeout() -> u64 {
    90
}

fn default_probe_timeout() -> u64 {
    10
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            demo_delay_ms: default_demo_delay_ms(),
            cors_permissive: default_true(),
            analysis_timeout_secs: default_analysis_timeout(),
            probe_timeout_secs: default_probe_timeout(),
            offline: false,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind_addr))
    }

    pub fn demo_delay(&self) -> Duration {
        Duration::from_millis(self.demo_delay_ms)
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl AppConfig {
    /// Checks values the type system cannot
    ///
    /// LLM settings are only checked when a key is present; without one the
    /// analyze endpoint reports the service as unconfigured instead.
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        if self.server.analysis_timeout_secs == 0 {
            bail!("server.analysis_timeout_secs must be greater than 0");
        }
        if self.pagespeed.timeout_secs == 0 {
            bail!("pagespeed.timeout_secs must be greater than 0");
        }

        self.logging.validate()?;

        if self.llm.is_configured() {
            self.llm.validate().context("Invalid [llm] section")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.server.demo_delay(), Duration::from_millis(2000));
        assert_eq!(config.llm.default_model, "gemini-pro");
        assert!(!config.llm.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_bind_addr() {
        let mut config = AppConfig::default();
        config.server.bind_addr = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configured_llm_is_validated() {
        let mut config = AppConfig::default();
        config.llm = LlmConfig::gemini("key", "gemini-pro");
        config.llm.default_temperature = 5.0;
        assert!(config.validate().is_err());
    }
}
