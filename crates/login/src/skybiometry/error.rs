//! SkyBiometry-related errors.

use thiserror::Error;

/// Errors that can occur when interacting with the SkyBiometry face API.
#[derive(Debug, Error)]
pub enum SkyBiometryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `status: failure`.
    #[error("SkyBiometry API error {code}: {message}")]
    Api {
        /// Vendor error code.
        code: i64,
        /// Vendor error message.
        message: String,
    },

    /// The API answered with a non-success HTTP status.
    #[error("SkyBiometry returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Invalid API key or secret.
    #[error("unauthorized: invalid SkyBiometry credentials")]
    Unauthorized,

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Client construction failed.
    #[error("SkyBiometry configuration error: {0}")]
    Config(String),
}
