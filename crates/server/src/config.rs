//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PRICEBOOK_DATABASE_URL` - SQLite connection string (falls back to
//!   `DATABASE_URL`, then to `sqlite://data/pricebook.db`)
//! - `PRICEBOOK_HOST` - Bind address (default: 127.0.0.1)
//! - `PRICEBOOK_PORT` - Listen port (default: 8080)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g. "production")

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Connection string used when nothing is configured.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/pricebook.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Pricing server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
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

        let database_url = database_url_from(
            get_optional_env("PRICEBOOK_DATABASE_URL"),
            get_optional_env("DATABASE_URL"),
        );
        let host = get_env_or_default("PRICEBOOK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PRICEBOOK_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PRICEBOOK_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PRICEBOOK_PORT".to_string(), e.to_string()))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resolve the database URL: dedicated variable first, then the generic
/// `DATABASE_URL` (set by most hosting platforms), then the on-disk default.
fn database_url_from(primary: Option<String>, generic: Option<String>) -> SecretString {
    let url = primary
        .or(generic)
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
    SecretString::from(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_database_url_prefers_dedicated_variable() {
        let url = database_url_from(
            Some("sqlite://primary.db".to_string()),
            Some("sqlite://generic.db".to_string()),
        );
        assert_eq!(url.expose_secret(), "sqlite://primary.db");
    }

    #[test]
    fn test_database_url_falls_back_to_generic() {
        let url = database_url_from(None, Some("sqlite://generic.db".to_string()));
        assert_eq!(url.expose_secret(), "sqlite://generic.db");
    }

    #[test]
    fn test_database_url_defaults_to_local_file() {
        let url = database_url_from(None, None);
        assert_eq!(url.expose_secret(), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar("PRICEBOOK_PORT".to_string(), "oops".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid environment variable PRICEBOOK_PORT: oops"
        );
    }
}
