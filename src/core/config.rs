//! Configuration management for the customer lookup client.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{LookupError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root URL of the customer backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Lifetime of the auth cookie in seconds
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age_sec: u64,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding durable token storage and the cookie jar
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Live suggestion configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuggestionConfig {
    /// Quiet period after the last keystroke before fetching
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cookie_max_age() -> u64 {
    86_400
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_sec: default_request_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_max_age_sec: default_cookie_max_age(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_sec)
    }
}

impl SuggestionConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LookupError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. CUSTLOOKUP_CONFIG env var
    /// 2. XDG config file (~/.config/custlookup/config.toml)
    /// 3. ./custlookup.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("CUSTLOOKUP_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("custlookup.toml").exists() {
                Self::from_file("custlookup.toml")?
            } else {
                Self::default()
            }
        };

        if env::var("CUSTLOOKUP_DATA_DIR").is_err() && config.storage.data_dir == default_data_dir()
        {
            config.storage.data_dir = xdg.data_dir.clone();
        }

        config.merge_env();
        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(url) = env::var("CUSTLOOKUP_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = env::var("CUSTLOOKUP_REQUEST_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_sec = t;
            }
        }

        if let Ok(max_age) = env::var("CUSTLOOKUP_COOKIE_MAX_AGE_SEC") {
            if let Ok(age) = max_age.parse() {
                self.session.cookie_max_age_sec = age;
            }
        }

        if let Ok(data_dir) = env::var("CUSTLOOKUP_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(debounce) = env::var("CUSTLOOKUP_DEBOUNCE_MS") {
            if let Ok(ms) = debounce.parse() {
                self.suggestions.debounce_ms = ms;
            }
        }
    }

    /// Strip trailing slashes so paths can be appended verbatim
    pub fn normalize(&mut self) {
        let trimmed = self.api.base_url.trim().trim_end_matches('/').to_string();
        self.api.base_url = trimmed;
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(LookupError::ConfigError(
                "API base URL must not be empty".to_string(),
            ));
        }

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(LookupError::ConfigError(format!(
                "API base URL must start with http:// or https://, got '{}'",
                self.api.base_url
            )));
        }

        if self.api.request_timeout_sec == 0 {
            return Err(LookupError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        if self.session.cookie_max_age_sec == 0 {
            return Err(LookupError::ConfigError(
                "Cookie max age must be non-zero".to_string(),
            ));
        }

        if self.suggestions.debounce_ms == 0 {
            return Err(LookupError::ConfigError(
                "Suggestion debounce must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API base URL: {}", self.api.base_url);
        tracing::info!("  Request timeout: {}s", self.api.request_timeout_sec);
        tracing::info!("  Cookie max age: {}s", self.session.cookie_max_age_sec);
        tracing::info!("  Data dir: {:?}", self.storage.data_dir);
        tracing::info!("  Suggestion debounce: {}ms", self.suggestions.debounce_ms);
    }
}
