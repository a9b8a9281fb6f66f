//! Configuration loading and management
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! log_level: info
//! validation:
//!   card_number_min_digits: 12
//!   card_number_max_digits: 19
//! events:
//!   capacity: 1024
//! ```

use crate::core::codec::CodecConfig;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "PAYMENTS_CONFIG";

/// Environment variable overriding `server.port`
pub const PORT_ENV: &str = "PAYMENTS_PORT";

/// Configuration values that do not make sense together
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("server.port must not be 0")]
    ZeroPort,

    #[error("invalid {name} override '{value}'")]
    InvalidOverride { name: &'static str, value: String },

    #[error("validation.{min_field} ({min}) is greater than validation.{max_field} ({max})")]
    InvertedBounds {
        min_field: &'static str,
        min: i64,
        max_field: &'static str,
        max: i64,
    },
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Event bus settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast buffer size; 0 disables the bus
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}

/// Complete configuration for the payment service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    pub server: ServerConfig,

    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,

    pub validation: CodecConfig,

    pub events: EventsConfig,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            log_level: "info".to_string(),
            validation: CodecConfig::default(),
            events: EventsConfig::default(),
        }
    }
}

impl PaymentsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `PAYMENTS_CONFIG` if set, else defaults, then apply
    /// environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        if let Ok(port) = std::env::var(PORT_ENV) {
            config.apply_port_override(&port)?;
        }
        config.validate()?;
        Ok(config)
    }

    fn apply_port_override(&mut self, value: &str) -> Result<(), ConfigError> {
        self.server.port = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidOverride {
                name: PORT_ENV,
                value: value.to_string(),
            })?;
        Ok(())
    }

    /// Check that the values are consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ZeroPort);
        }

        let v = &self.validation;
        if v.card_number_min_digits > v.card_number_max_digits {
            return Err(ConfigError::InvertedBounds {
                min_field: "card_number_min_digits",
                min: v.card_number_min_digits as i64,
                max_field: "card_number_max_digits",
                max: v.card_number_max_digits as i64,
            });
        }
        match v.min_expiration_year {
            Some(min_year) if min_year > v.max_expiration_year => {
                Err(ConfigError::InvertedBounds {
                    min_field: "min_expiration_year",
                    min: min_year as i64,
                    max_field: "max_expiration_year",
                    max: v.max_expiration_year as i64,
                })
            }
            _ => Ok(()),
        }
    }
}
