use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/catfetch/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("catfetch").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `api.base_url` is an absolute http(s) URL
    /// - `api.image_limit` and `api.page_size` are positive
    /// - timeouts, when set, are positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = Url::parse(&self.api.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("Invalid api.base_url '{}': {}", self.api.base_url, e),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "api.base_url must use http or https, got '{}'",
                    base_url.scheme()
                ),
            });
        }

        if self.api.image_limit == 0 {
            return Err(ConfigError::ValidationError {
                message: "api.image_limit must be greater than 0".to_string(),
            });
        }

        if self.api.page_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "api.page_size must be greater than 0".to_string(),
            });
        }

        for (name, value) in [
            ("fetch.timeout_ms", self.fetch.timeout_ms),
            ("fetch.connect_timeout_ms", self.fetch.connect_timeout_ms),
        ] {
            if value == Some(0) {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must be greater than 0", name),
                });
            }
        }

        Ok(())
    }
}
