use super::types::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader with builder pattern
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from file; without a path the standard locations
    /// are tried and may be absent
    pub fn load_from_file(mut self, path: Option<&Path>) -> Self {
        self.config_file = path.map(Path::to_path_buf);
        self
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<AppConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&AppConfig::default()).context("Failed to serialize defaults")?,
        );

        if let Some(config_path) = &self.config_file {
            debug!("Loading configuration from {}", config_path.display());
            builder = builder.add_source(File::from(config_path.as_path()).required(true));
        } else {
            builder = builder
                .add_source(File::with_name("pagepulse").required(false))
                .add_source(File::with_name("config/pagepulse").required(false));
        }

        if self.load_env {
            builder = builder.add_source(
                Environment::with_prefix("PAGEPULSE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let mut config: AppConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        if self.load_env {
            apply_plain_env(&mut config);
        }

        Ok(config)
    }
}

/// Well-known variables that fill in settings left unset
fn apply_plain_env(config: &mut AppConfig) {
    if config.llm.api_key.is_none() {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.llm.api_key = Some(SecretString::new(key.into_boxed_str()));
            }
        }
    }

    if config.pagespeed.api_key.is_none() {
        if let Ok(key) = std::env::var("PAGESPEED_API_KEY") {
            if !key.is_empty() {
                config.pagespeed.api_key = Some(SecretString::new(key.into_boxed_str()));
            }
        }
    }

    if let Ok(bind_addr) = std::env::var("BIND_ADDR") {
        config.server.bind_addr = bind_addr;
    }
}

/// Writes a commented sample configuration to `path`
pub fn generate_sample_config(path: &Path) -> Result<()> {
    let toml_content =
        toml::to_string_pretty(&AppConfig::default()).context("Failed to render sample config")?;

    let sample_content = format!(
        r#"# pagepulse configuration
#
# Save as pagepulse.toml (or config/pagepulse.toml).
# Any key can be overridden from the environment, e.g.
#   PAGEPULSE__SERVER__BIND_ADDR=0.0.0.0:3000
#   PAGEPULSE__LLM__API_KEY=...
# GEMINI_API_KEY and BIND_ADDR are also honoured.

{}
# Secrets are never written back out. Add them here or use the environment:
#
# [pagespeed]
# api_key = "your-pagespeed-key"   # optional, raises the anonymous quota
#
# [llm]
# api_key = "your-gemini-key"      # required for /api/analyze
# provider = "gemini"              # gemini | openai | custom
# endpoint = "http://localhost:8080/v1"   # custom (OpenAI-compatible) only
"#,
        toml_content
    );

    std::fs::write(path, sample_content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
bind_addr = "0.0.0.0:8080"
demo_delay_ms = 0

[llm]
api_key = "from-file"
default_model = "gemini-1.5-flash"
"#
        )
        .unwrap();

        let config = ConfigLoader::new()
            .load_from_file(Some(file.path()))
            .build()
            .unwrap();

        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.server.demo_delay_ms, 0);
        assert!(config.server.cors_permissive);
        assert_eq!(config.llm.get_api_key(), Some("from-file"));
        assert_eq!(config.llm.default_model, "gemini-1.5-flash");
        assert_eq!(config.pagespeed.timeout_secs, 60);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = ConfigLoader::new()
            .load_from_file(Some(Path::new("/nonexistent/pagepulse.toml")))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagepulse.toml");
        generate_sample_config(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[server]"));
        assert!(content.contains("GEMINI_API_KEY"));

        let config = ConfigLoader::new().load_from_file(Some(&path)).build().unwrap();
        assert_eq!(config.server.demo_delay_ms, 2000);
        assert!(config.llm.api_key.is_none());
    }
}
