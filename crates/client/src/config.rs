//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SWIFTDROP_API_BASE_URL` - Base URL of the managed backend
//! - `SWIFTDROP_API_KEY` - Project API key issued by the backend
//!
//! ## Optional
//! - `SWIFTDROP_SNAPSHOT_PATH` - Where the local session snapshot is stored
//!   (default: `.swiftdrop/session.json`)

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
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

/// SwiftDrop client configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the managed backend.
    pub api_base_url: Url,
    /// Project API key sent with every backend request.
    pub api_key: SecretString,
    /// Path of the local session snapshot file.
    pub snapshot_path: PathBuf,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("snapshot_path", &self.snapshot_path)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the API key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("SWIFTDROP_API_BASE_URL")?;
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SWIFTDROP_API_BASE_URL".to_string(), e.to_string())
        })?;

        let api_key = get_required_env("SWIFTDROP_API_KEY")?;
        validate_api_key(&api_key, "SWIFTDROP_API_KEY")?;

        let snapshot_path = PathBuf::from(get_env_or_default(
            "SWIFTDROP_SNAPSHOT_PATH",
            ".swiftdrop/session.json",
        ));

        Ok(Self {
            api_base_url,
            api_key: SecretString::from(api_key),
            snapshot_path,
        })
    }

    /// Expose the API key for request construction.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that the API key is not empty and not a placeholder.
fn validate_api_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }

    let lower = key.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
