//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPWINDOW_API_BASE_URL` - Product API base URL (default: `https://fakestoreapi.com`)
//! - `SHOPWINDOW_DATA_DIR` - Directory for the mirror blob and session flag (default: `.shopwindow`)
//! - `SHOPWINDOW_EXCHANGE_RATE` - Source-to-display currency multiplier (default: 83.5, must be positive)
//! - `SHOPWINDOW_USERNAME` - Expected login username (default: `user`)
//! - `SHOPWINDOW_PASSWORD` - Expected login password (default: `password`)
//!
//! The login credentials gate a single-profile viewer; they are a
//! convenience check, not a security boundary.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::currency::DEFAULT_EXCHANGE_RATE;

const DEFAULT_API_BASE_URL: &str = "https://fakestoreapi.com";
const DEFAULT_DATA_DIR: &str = ".shopwindow";
const DEFAULT_USERNAME: &str = "user";
const DEFAULT_PASSWORD: &str = "password";

const MIRROR_FILE: &str = "products.json";
const SESSION_FILE: &str = "session";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog application configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the remote product API.
    pub api_base_url: Url,
    /// Directory holding the mirror blob and the session flag.
    pub data_dir: PathBuf,
    /// Fixed source-to-display currency multiplier.
    pub exchange_rate: Decimal,
    /// Expected login username.
    pub username: String,
    /// Expected login password.
    pub password: SecretString,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("data_dir", &self.data_dir)
            .field("exchange_rate", &self.exchange_rate)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable cannot be parsed or the
    /// exchange rate is not positive.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("SHOPWINDOW_API_BASE_URL", DEFAULT_API_BASE_URL);
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPWINDOW_API_BASE_URL".to_string(), e.to_string())
        })?;

        let data_dir = PathBuf::from(get_env_or_default("SHOPWINDOW_DATA_DIR", DEFAULT_DATA_DIR));

        let exchange_rate = match std::env::var("SHOPWINDOW_EXCHANGE_RATE") {
            Ok(raw) => {
                let rate = Decimal::from_str(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SHOPWINDOW_EXCHANGE_RATE".to_string(),
                        e.to_string(),
                    )
                })?;
                if rate <= Decimal::ZERO {
                    return Err(ConfigError::InvalidEnvVar(
                        "SHOPWINDOW_EXCHANGE_RATE".to_string(),
                        format!("must be positive (got {rate})"),
                    ));
                }
                rate
            }
            Err(_) => DEFAULT_EXCHANGE_RATE,
        };

        let username = get_env_or_default("SHOPWINDOW_USERNAME", DEFAULT_USERNAME);
        let password = SecretString::from(get_env_or_default(
            "SHOPWINDOW_PASSWORD",
            DEFAULT_PASSWORD,
        ));

        Ok(Self {
            api_base_url,
            data_dir,
            exchange_rate,
            username,
            password,
        })
    }

    /// Path of the mirror blob inside the data directory.
    #[must_use]
    pub fn mirror_path(&self) -> PathBuf {
        self.data_dir.join(MIRROR_FILE)
    }

    /// Path of the session flag inside the data directory.
    ///
    /// Kept in a separate slot from the mirror: the two have independent
    /// lifecycles.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
