//! Application configuration
//!
//! Layered as defaults, then a TOML file, then `PAGEPULSE__SECTION__KEY`
//! environment variables, then a few well-known plain variables.

pub mod loader;
pub mod types;

pub use loader::{generate_sample_config, ConfigLoader};
pub use types::{AppConfig, ServerSettings};
