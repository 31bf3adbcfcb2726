//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PERCH_DATA_DIR` - Directory for the persisted snapshot file
//!   (default: `data`)
//! - `PERCH_TOAST_MS` - Toast display duration in milliseconds
//!   (default: 3000)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_TOAST_MS: u64 = 3000;
const STORAGE_FILE: &str = "storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart subsystem configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory holding the persisted key-value storage file.
    pub data_dir: PathBuf,
    /// How long transient notifications stay on screen. Cosmetic only.
    pub toast_duration: Duration,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir =
            PathBuf::from(get_env_or_default("PERCH_DATA_DIR", DEFAULT_DATA_DIR));
        let toast_duration = match std::env::var("PERCH_TOAST_MS") {
            Ok(value) => parse_toast_ms(&value)?,
            Err(_) => Duration::from_millis(DEFAULT_TOAST_MS),
        };

        Ok(Self {
            data_dir,
            toast_duration,
        })
    }

    /// Path of the key-value storage file inside the data directory.
    #[must_use]
    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a toast duration in milliseconds.
fn parse_toast_ms(value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar("PERCH_TOAST_MS".to_string(), e.to_string()))
}
