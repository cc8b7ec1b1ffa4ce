//! Application configuration loading from config.toml
//!
//! Every section is optional; a missing file or a missing key falls back to
//! the defaults below. Secrets (`DISCORD_BOT_TOKEN`, `DATABASE_URL`) stay in
//! the environment and are never read from this file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Admin API server settings
    pub http: HttpConfig,
    /// Panel autocomplete settings
    pub autocomplete: AutocompleteConfig,
    /// Locale settings
    pub locale: LocaleConfig,
}

/// Admin API server settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    /// Address the admin API listens on
    pub bind: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8169".to_string(),
        }
    }
}

/// Panel autocomplete settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// How long a guild's panel list stays cached, in seconds
    pub ttl_secs: u64,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

impl AutocompleteConfig {
    /// Cache lifetime as a `Duration`.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Locale settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale used when a guild's locale has no bundle
    pub default: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: "en-GB".to_string(),
        }
    }
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from ./config.toml, or defaults when the file does not exist.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    if !path.exists() {
        info!("No config.toml found, using default configuration");
        return Ok(AppConfig::default());
    }
    load_config(path)
}
