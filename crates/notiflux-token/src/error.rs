//! Error types for the issuer.

use std::path::PathBuf;

use notiflux_token_core::CoreError;
use thiserror::Error;

/// Errors that can occur while issuing a token.
#[derive(Debug, Error)]
pub enum IssueError {
    /// The key file is missing or unreadable.
    #[error("failed to read private key from {}", path.display())]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The inline key is not valid base64.
    #[error("failed to decode base64 private key")]
    KeyDecode(#[from] base64::DecodeError),

    /// The inline key decoded to something other than UTF-8 PEM text.
    #[error("base64 private key does not decode to UTF-8 PEM text")]
    KeyNotUtf8,

    /// Building the claims or signing them failed.
    #[error(transparent)]
    Crypto(#[from] CoreError),

    /// Writing the claims echo or the token failed.
    #[error("failed to write output")]
    Output(#[source] std::io::Error),
}

/// Result type for issuer operations.
pub type Result<T> = std::result::Result<T, IssueError>;
