//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TABLESIDE_API_URL` - Base URL of the REST API (default: `http://127.0.0.1:3000/api`)
//! - `TABLESIDE_POLL_INTERVAL_SECS` - Refresh period of the sync loop (default: 3)
//! - `TABLESIDE_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `TABLESIDE_CART_PATH` - File the cart is persisted to between runs
//! - `TABLESIDE_PUBLIC_URL` - Public site URL that table QR codes point at (default: `http://localhost:3000`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `http://127.0.0.1:3000/api`
    pub api_url: Url,
    /// Period of the sync loop
    pub poll_interval: Duration,
    /// Timeout applied to every request; expiry counts as a failed fetch
    pub request_timeout: Duration,
    /// Where to keep the cart between runs, if anywhere
    pub cart_path: Option<PathBuf>,
    /// Public site URL used to build table menu links
    pub public_url: Url,
}

impl ClientConfig {
    /// Default settings for the API at `api_url`.
    ///
    /// Menu links point at the API's origin.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        let mut public_url = api_url.clone();
        public_url.set_path("/");
        public_url.set_query(None);
        Self {
            api_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cart_path: None,
            public_url,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            api_url: get_url("TABLESIDE_API_URL", DEFAULT_API_URL)?,
            poll_interval: get_secs("TABLESIDE_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL)?,
            request_timeout: get_secs("TABLESIDE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT)?,
            cart_path: get_optional_env("TABLESIDE_CART_PATH").map(PathBuf::from),
            public_url: get_url("TABLESIDE_PUBLIC_URL", DEFAULT_PUBLIC_URL)?,
        })
    }

    /// Same configuration pointed at another API.
    #[must_use]
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_url(key: &str, default: &str) -> Result<Url, ConfigError> {
    parse_url(key, get_optional_env(key), default)
}

fn get_secs(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    parse_secs(key, get_optional_env(key), default)
}

fn parse_url(key: &str, value: Option<String>, default: &str) -> Result<Url, ConfigError> {
    let value = value.unwrap_or_else(|| default.to_string());
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_secs(
    key: &str,
    value: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1 second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
