//! Error types for notiflux-token core.

use thiserror::Error;

/// Errors that can occur while building or signing a token.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Scope name outside the closed set.
    #[error("invalid scope: {0} (expected \"broadcast\" or \"subscribe\")")]
    InvalidScope(String),

    /// Key text is not a usable P-256 private key.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Issue time plus validity is past the representable range.
    #[error("expiration overflows the supported time range: {0} days from {1}")]
    ExpiryOverflow(u32, String),

    /// Claims or key could not be serialized.
    #[error("encoding error: {0}")]
    EncodingError(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::EncodingError(e.to_string())
    }
}
