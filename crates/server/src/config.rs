//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TABLESIDE_HOST` - Bind address (default: 127.0.0.1)
//! - `TABLESIDE_PORT` - Listen port (default: 3000)
//! - `TABLESIDE_PUBLIC_URL` - Origin customers reach menus on (default: http://localhost:3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_TRACES_SAMPLE_RATE` - Fraction of requests traced (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;
use url::Url;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origin that table QR codes point at
    pub public_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_host(get_optional_env("TABLESIDE_HOST"))?;
        let port = parse_port(get_optional_env("TABLESIDE_PORT"))?;
        let public_url = parse_public_url(get_optional_env("TABLESIDE_PUBLIC_URL"))?;
        let sentry_traces_sample_rate =
            parse_sample_rate(get_optional_env("SENTRY_TRACES_SAMPLE_RATE"))?;

        Ok(Self {
            host,
            port,
            public_url,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_traces_sample_rate,
            ..Self::default()
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_host(value: Option<String>) -> Result<IpAddr, ConfigError> {
    value.map_or(Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)), |v| {
        v.trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| invalid("TABLESIDE_HOST", e))
    })
}

fn parse_port(value: Option<String>) -> Result<u16, ConfigError> {
    value.map_or(Ok(DEFAULT_PORT), |v| {
        v.trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| invalid("TABLESIDE_PORT", e))
    })
}

fn parse_public_url(value: Option<String>) -> Result<String, ConfigError> {
    let raw = value.unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string());
    let url = Url::parse(raw.trim()).map_err(|e| invalid("TABLESIDE_PUBLIC_URL", e))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_sample_rate(value: Option<String>) -> Result<f32, ConfigError> {
    let Some(v) = value else {
        return Ok(0.0);
    };
    let rate: f32 = v
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid("SENTRY_TRACES_SAMPLE_RATE", e))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(invalid("SENTRY_TRACES_SAMPLE_RATE", "must be between 0 and 1"))
    }
}

fn invalid(key: &str, e: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.public_url, "http://localhost:3000");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_parse_host_and_port() {
        assert_eq!(
            parse_host(Some("0.0.0.0".into())).unwrap().to_string(),
            "0.0.0.0"
        );
        assert!(parse_host(Some("localhost".into())).is_err());
        assert_eq!(parse_port(None).unwrap(), 3000);
        assert_eq!(parse_port(Some(" 8080 ".into())).unwrap(), 8080);
        assert!(parse_port(Some("70000".into())).is_err());
    }

    #[test]
    fn test_parse_public_url_trims_trailing_slash() {
        assert_eq!(
            parse_public_url(Some("https://warung.example/".into())).unwrap(),
            "https://warung.example"
        );
        assert!(parse_public_url(Some("not a url".into())).is_err());
    }

    #[test]
    fn test_parse_sample_rate() {
        assert!((parse_sample_rate(None).unwrap() - 0.0).abs() < f32::EPSILON);
        assert!((parse_sample_rate(Some("0.25".into())).unwrap() - 0.25).abs() < f32::EPSILON);
        assert!(parse_sample_rate(Some("2".into())).is_err());
        assert!(parse_sample_rate(Some("half".into())).is_err());
    }
}
