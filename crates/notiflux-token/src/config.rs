//! Issuer configuration.
//!
//! The CLI layer fills an [`IssuerConfig`] from flags and environment
//! variables and passes it by value into the issuer. Defaults:
//!
//! | Field | Default |
//! |---|---|
//! | `key_source` | `KeySource::Path("private_key.pem")` |
//! | `verbose` | `false` |
//! | `validity_days` | `36500` (100 years) |

use std::fs;
use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine};
use notiflux_token_core::DEFAULT_VALIDITY_DAYS;
use tracing::debug;

use crate::error::{IssueError, Result};

/// Key file read when no path is given.
pub const DEFAULT_PRIVATE_KEY_PATH: &str = "private_key.pem";

/// Where the PEM private key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// A PEM file on disk.
    Path(PathBuf),
    /// Base64 (standard alphabet) of the PEM text, typically from an
    /// environment variable.
    Base64(String),
}

impl KeySource {
    /// Load the PEM text.
    pub fn load(&self) -> Result<String> {
        match self {
            KeySource::Path(path) => {
                debug!(path = %path.display(), "reading private key file");
                fs::read_to_string(path).map_err(|source| IssueError::KeyRead {
                    path: path.clone(),
                    source,
                })
            }
            KeySource::Base64(encoded) => {
                debug!("decoding inline base64 private key");
                let bytes = STANDARD.decode(encoded.trim())?;
                String::from_utf8(bytes).map_err(|_| IssueError::KeyNotUtf8)
            }
        }
    }
}

impl Default for KeySource {
    fn default() -> Self {
        KeySource::Path(PathBuf::from(DEFAULT_PRIVATE_KEY_PATH))
    }
}

/// Configuration for issuing a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerConfig {
    /// Where to read the private key.
    pub key_source: KeySource,
    /// Echo the claims to the output before signing.
    pub verbose: bool,
    /// Days from issuance until `exp`.
    pub validity_days: u32,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            key_source: KeySource::default(),
            verbose: false,
            validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }
}
