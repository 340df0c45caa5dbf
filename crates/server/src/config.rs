//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SAREE_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `SAREE_HOST` - Bind address (default: 127.0.0.1)
//! - `SAREE_PORT` - Listen port (default: 5000)
//! - `SAREE_BASE_URL` - Public URL (default: http://localhost:5000); an
//!   https URL turns on the Secure cookie flag
//! - `SAREE_SEED_FILE` - YAML seed catalog (default: built-in demo catalog)
//! - `SAREE_ADMIN_USERNAME` / `SAREE_ADMIN_PASSWORD` / `SAREE_ADMIN_EMAIL` -
//!   bootstrap admin account created at startup
//! - `SAREE_ADMIN_FULL_NAME` - display name for the bootstrap admin
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - sampling knobs

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "your-",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Optional YAML seed catalog; the demo catalog is used when unset
    pub seed_file: Option<PathBuf>,
    /// Optional bootstrap admin account
    pub admin: Option<AdminBootstrap>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance trace sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Bootstrap admin credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub full_name: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret fails validation (length, placeholder
    /// detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SAREE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SAREE_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("SAREE_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SAREE_PORT".to_owned(), e.to_string()))?;
        let base_url = get_env_or_default("SAREE_BASE_URL", "http://localhost:5000");

        let session_secret = get_required_secret("SAREE_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "SAREE_SESSION_SECRET")?;

        let seed_file = get_optional_env("SAREE_SEED_FILE").map(PathBuf::from);
        let admin = AdminBootstrap::from_env()?;

        let sentry_sample_rate = parse_rate("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = parse_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            host,
            port,
            base_url,
            session_secret,
            seed_file,
            admin,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the Secure flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl AdminBootstrap {
    /// Load the bootstrap admin from environment, if configured.
    ///
    /// Setting `SAREE_ADMIN_USERNAME` without `SAREE_ADMIN_PASSWORD` or
    /// `SAREE_ADMIN_EMAIL` is an error rather than a silently skipped
    /// account.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(username) = get_optional_env("SAREE_ADMIN_USERNAME") else {
            return Ok(None);
        };

        let password = get_required_secret("SAREE_ADMIN_PASSWORD")?;
        let email = get_required_env("SAREE_ADMIN_EMAIL")?;
        let full_name = get_env_or_default("SAREE_ADMIN_FULL_NAME", "Store Admin");

        Ok(Some(Self {
            username,
            password,
            email,
            full_name,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    get_required_env(key).map(SecretString::from)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an optional sampling rate in `0.0..=1.0`.
fn parse_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_owned(),
            "must be between 0.0 and 1.0".to_owned(),
        ));
    }
    Ok(rate)
}

/// Validate the session secret: length, placeholder blocklist, entropy.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();

    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "must be at least {MIN_SESSION_SECRET_LENGTH} characters (got {})",
                value.len()
            ),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_owned(),
                format!("contains placeholder pattern {pattern:?}"),
            ));
        }
    }

    let entropy = shannon_entropy(value);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need {MIN_ENTROPY_BITS_PER_CHAR:.1}); \
                 use a random value"
            ),
        ));
    }

    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // Secret length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_owned())
    }

    #[test]
    fn test_session_secret_length() {
        let result = validate_session_secret(&secret("too-short"), "TEST");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_session_secret_placeholder_rejected() {
        let result = validate_session_secret(
            &secret("changeme-changeme-changeme-changeme-12"),
            "TEST",
        );
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_session_secret_low_entropy_rejected() {
        let result = validate_session_secret(&secret(&"a".repeat(64)), "TEST");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_session_secret_random_accepted() {
        let result = validate_session_secret(
            &secret("kX9vQ2mRwL7jF4nZcY8tH3bD6pGsA1eU0oIiW5xN"),
            "TEST",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_shannon_entropy() {
        assert!(shannon_entropy("") < f64::EPSILON);
        assert!(shannon_entropy("aaaa") < 0.1);
        assert!(shannon_entropy("kX9vQ2mRwL7jF4nZ") > 3.0);
    }

    #[test]
    fn test_parse_rate_default_when_unset() {
        assert!((parse_rate("SAREE_TEST_RATE_UNSET", 0.5).unwrap() - 0.5).abs() < f32::EPSILON);
    }
}
