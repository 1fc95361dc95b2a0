//! Configuration management for the contact manager server.
//!
//! This module handles loading and validating configuration from environment
//! variables. It avoids polluting stdout (which MCP uses for communication)
//! by loading the .env file through dotenvy.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the contact manager server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deadline in seconds wrapped around each save/delete call (default: 10)
    pub request_timeout: u64,

    /// Per-subscriber change-signal channel capacity (default: 64)
    pub broadcast_buffer: usize,

    /// Seed the store with sample contacts at startup (default: false)
    pub seed_on_startup: bool,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: save/delete deadline in seconds (default: 10)
    /// - `BROADCAST_BUFFER`: per-subscriber channel capacity (default: 64)
    /// - `SEED_ON_STARTUP`: "true" to seed sample contacts (default: false)
    /// - `LOG_LEVEL`: logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let broadcast_buffer = Self::parse_env_usize("BROADCAST_BUFFER", 64)?;
        let seed_on_startup = Self::parse_env_bool("SEED_ON_STARTUP", false)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }
        if broadcast_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                var: "BROADCAST_BUFFER".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            request_timeout,
            broadcast_buffer,
            seed_on_startup,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as bool with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            request_timeout: 10,
            broadcast_buffer: 64,
            seed_on_startup: false,
            log_level: "error".to_string(),
        }
    }
}
