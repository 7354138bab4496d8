//! Configuration management for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The binary loads a `.env` file into the environment first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;
use todoflow_core::todo::OwnerId;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No owner identifier was configured
    #[error("Please get your user id and set it in the configuration")]
    OwnerNotSet,

    /// A `.env` source could not be parsed
    #[error("Invalid .env file: {0}")]
    EnvFile(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the todo resource (without `/todos`)
    pub api_url: String,
    /// Owner identifier; `0` means not configured
    pub user_id: u64,
    /// How long notices stay visible, in milliseconds
    pub notice_ttl_ms: u64,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            user_id: 0,
            notice_ttl_ms: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TODOFLOW_API_URL` | `http://localhost:3000` |
    /// | `TODOFLOW_USER_ID` | `0` (unset) |
    /// | `TODOFLOW_NOTICE_TTL_MS` | `3000` |
    /// | `TODOFLOW_REQUEST_TIMEOUT_SECS` | `30` |
    ///
    /// Unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            api_url: lookup("TODOFLOW_API_URL").unwrap_or(defaults.api_url),
            user_id: lookup("TODOFLOW_USER_ID")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.user_id),
            notice_ttl_ms: lookup("TODOFLOW_NOTICE_TTL_MS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.notice_ttl_ms),
            request_timeout_secs: lookup("TODOFLOW_REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Load configuration from `.env`-formatted text, ignoring the process
    /// environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvFile`] when a line is not a valid assignment.
    pub fn from_dotenv(reader: impl Read) -> Result<Self, ConfigError> {
        let vars = dotenvy::from_read_iter(reader)
            .collect::<Result<HashMap<String, String>, _>>()
            .map_err(|e| ConfigError::EnvFile(e.to_string()))?;
        Ok(Self::from_lookup(|key| vars.get(key).cloned()))
    }

    /// The configured owner
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OwnerNotSet`] when no owner identifier is configured.
    pub const fn owner(&self) -> Result<OwnerId, ConfigError> {
        let owner = OwnerId::new(self.user_id);
        if owner.is_set() {
            Ok(owner)
        } else {
            Err(ConfigError::OwnerNotSet)
        }
    }

    /// How long notices stay visible
    #[must_use]
    pub const fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    /// HTTP request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
