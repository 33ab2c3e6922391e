use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "ORDER_STORE_CONFIG";

/// Longest accepted progression period: one day.
pub const MAX_TICK_INTERVAL_SECS: u64 = 24 * 60 * 60;

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

/// Runtime settings for the store. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Seconds between order-status progression ticks.
    pub tick_interval_secs: u64,
    /// Capacity of the store's request channel.
    pub buffer_size: usize,
    /// Minutes added to the checkout time for the delivery estimate.
    pub estimated_delivery_minutes: u32,
    /// Profile name before the customer edits it.
    pub guest_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 10,
            buffer_size: 100,
            estimated_delivery_minutes: 30,
            guest_name: "Guest User".to_string(),
        }
    }
}

impl StoreConfig {
    /// Loads the file named by `ORDER_STORE_CONFIG`, or defaults when unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `StoreConfig::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: StoreConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_secs == 0 {
            return Err(ConfigError::ValidationError {
                message: "tick_interval_secs must be greater than zero".to_string(),
            });
        }
        if self.tick_interval_secs > MAX_TICK_INTERVAL_SECS {
            return Err(ConfigError::ValidationError {
                message: format!("tick_interval_secs must be at most {MAX_TICK_INTERVAL_SECS}"),
            });
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "buffer_size must be greater than zero".to_string(),
            });
        }
        if self.guest_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "guest_name must not be blank".to_string(),
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    pub fn delivery_eta(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.estimated_delivery_minutes))
    }
}
