//! Login configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SKYBIOMETRY_API_KEY` - SkyBiometry API key
//! - `SKYBIOMETRY_API_SECRET` - SkyBiometry API secret
//! - `BIOMETRIC_LOGIN_NAMESPACE` - Namespace appended to every user id (no `@`)
//!
//! ## Optional
//! - `SKYBIOMETRY_BASE_URL` - API base URL (default: <https://api.skybiometry.com/fc>)
//! - `SKYBIOMETRY_TIMEOUT_SECS` - HTTP request timeout (default: 30)
//! - `BIOMETRIC_LOGIN_DEBUG` - Log pipeline progress (default: false)

use std::time::Duration;

use biometric_login_core::Namespace;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.skybiometry.com/fc";
const DEFAULT_TIMEOUT_SECS: &str = "30";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    /// A variable is set but its value does not parse.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    /// A credential is empty or looks like a placeholder.
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Options controlling [`BiometricLogin`](crate::BiometricLogin) behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginOptions {
    /// Log pipeline progress checkpoints. Defaults to `false`.
    pub debug: bool,
}

impl LoginOptions {
    /// Options with progress logging switched on.
    #[must_use]
    pub const fn debug() -> Self {
        Self { debug: true }
    }
}

/// SkyBiometry API configuration.
///
/// Implements `Debug` manually to redact the credentials.
#[derive(Clone)]
pub struct SkyBiometryConfig {
    /// API key
    pub api_key: SecretString,
    /// API secret
    pub api_secret: SecretString,
    /// Base URL, e.g. `https://api.skybiometry.com/fc`
    pub base_url: Url,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for SkyBiometryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkyBiometryConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Everything needed to build a SkyBiometry-backed login adapter.
#[derive(Debug, Clone)]
pub struct LoginConfig {
    /// SkyBiometry API configuration
    pub skybiometry: SkyBiometryConfig,
    /// Namespace for user ids
    pub namespace: Namespace,
    /// Adapter options
    pub options: LoginOptions,
}

impl LoginConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if a credential looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            tracing::warn!("Failed to load .env file: {e}");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`LoginConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let namespace_raw = vars.required("BIOMETRIC_LOGIN_NAMESPACE")?;
        let namespace = Namespace::new(namespace_raw).map_err(|e| {
            ConfigError::InvalidEnvVar("BIOMETRIC_LOGIN_NAMESPACE".to_string(), e.to_string())
        })?;

        let debug = parse_bool(
            "BIOMETRIC_LOGIN_DEBUG",
            &vars.or_default("BIOMETRIC_LOGIN_DEBUG", "false"),
        )?;

        Ok(Self {
            skybiometry: SkyBiometryConfig::from_vars(&vars)?,
            namespace,
            options: LoginOptions { debug },
        })
    }
}

impl SkyBiometryConfig {
    fn from_vars(vars: &Vars<'_>) -> Result<Self, ConfigError> {
        let base_url = vars
            .or_default("SKYBIOMETRY_BASE_URL", DEFAULT_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SKYBIOMETRY_BASE_URL".to_string(), e.to_string())
            })?;

        let timeout_secs = vars
            .or_default("SKYBIOMETRY_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SKYBIOMETRY_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_key: vars.validated_secret("SKYBIOMETRY_API_KEY")?,
            api_secret: vars.validated_secret("SKYBIOMETRY_API_SECRET")?,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the required/default/secret helpers.
struct Vars<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Vars<'_> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }

    /// Load a required secret, rejecting placeholders.
    fn validated_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.required(key)?;
        reject_placeholder(&value, key)?;
        Ok(SecretString::from(value))
    }
}

/// Parse `true`/`false`/`1`/`0`/`yes`/`no`.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// Validate that a secret is not empty or a placeholder.
fn reject_placeholder(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.trim().is_empty() {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "is empty".to_string(),
        ));
    }

    let lower = secret.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    Ok(())
}
