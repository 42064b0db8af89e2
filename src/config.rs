//! Plugin Configuration
//!
//! Loaded from `MACRODOX_*` environment variables or a JSON file.

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Plugin configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Drop a player's record when the host reports a disconnect.
    /// Off by default: records live for the whole plugin session.
    pub forget_on_disconnect: bool,
    /// Single-player query command name.
    pub command_one: String,
    /// All-players query command name.
    pub command_all: String,
    /// Tick rate of the demo host loop (Hz).
    pub tick_rate: u32,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            forget_on_disconnect: false,
            command_one: "macrodox".to_string(),
            command_all: "macrodoxall".to_string(),
            tick_rate: 64,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    /// Config file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl PluginConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let tick_rate = match std::env::var("MACRODOX_TICK_RATE") {
            Ok(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                field: "tick_rate",
                reason: format!("not a number: {}", v),
            })?,
            Err(_) => defaults.tick_rate,
        };

        let config = Self {
            forget_on_disconnect: std::env::var("MACRODOX_FORGET_ON_DISCONNECT")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.forget_on_disconnect),
            command_one: std::env::var("MACRODOX_COMMAND").unwrap_or(defaults.command_one),
            command_all: std::env::var("MACRODOX_COMMAND_ALL").unwrap_or(defaults.command_all),
            tick_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_rate",
                reason: "must be greater than zero".to_string(),
            });
        }
        for (field, name) in [("command_one", &self.command_one), ("command_all", &self.command_all)] {
            if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("'{}' is not a single word", name),
                });
            }
        }
        if self.command_one.eq_ignore_ascii_case(&self.command_all) {
            return Err(ConfigError::InvalidValue {
                field: "command_all",
                reason: "must differ from command_one".to_string(),
            });
        }
        Ok(())
    }
}
