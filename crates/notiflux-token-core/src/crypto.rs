//! Cryptographic primitives for notiflux tokens.
//!
//! Wraps ECDSA P-256 / SHA-256 signing (ES256) with strong types.
//! All elliptic-curve arithmetic is done by the RustCrypto `p256` crate.

use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey as EcdsaSigningKey, VerifyingKey};
use p256::pkcs8::{DecodePrivateKey, EncodePublicKey, LineEnding};
use p256::SecretKey;
use rustls_pemfile::Item;
use std::fmt;

use crate::error::CoreError;

/// A 64-byte ES256 signature (`r || s`, big-endian).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Es256Signature(pub [u8; 64]);

impl Es256Signature {
    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Es256Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Es256Sig({:02x?}...)", &self.0[..8])
    }
}

impl AsRef<[u8]> for Es256Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A P-256 private key used to sign tokens.
#[derive(Clone)]
pub struct SigningKey {
    signing_key: EcdsaSigningKey,
}

impl SigningKey {
    /// Parse a private key from PEM text.
    ///
    /// The first `PRIVATE KEY` (PKCS#8) or `EC PRIVATE KEY` (SEC1) block is
    /// used; other blocks such as `EC PARAMETERS` are skipped. The key must be
    /// on the P-256 curve.
    pub fn from_pem(pem: &str) -> Result<Self, CoreError> {
        let mut reader = pem.trim_start_matches('\u{feff}').as_bytes();

        for item in rustls_pemfile::read_all(&mut reader) {
            let item =
                item.map_err(|e| CoreError::InvalidPrivateKey(format!("malformed PEM: {e}")))?;
            match item {
                Item::Pkcs8Key(key) => {
                    let signing_key = EcdsaSigningKey::from_pkcs8_der(key.secret_pkcs8_der())
                        .map_err(|e| CoreError::InvalidPrivateKey(format!("PKCS#8: {e}")))?;
                    return Ok(Self { signing_key });
                }
                Item::Sec1Key(key) => {
                    let secret = SecretKey::from_sec1_der(key.secret_sec1_der())
                        .map_err(|e| CoreError::InvalidPrivateKey(format!("SEC1: {e}")))?;
                    return Ok(Self::from(EcdsaSigningKey::from(secret)));
                }
                Item::Pkcs1Key(_) => {
                    return Err(CoreError::InvalidPrivateKey(
                        "RSA keys are not supported".to_owned(),
                    ));
                }
                _ => {}
            }
        }

        Err(CoreError::InvalidPrivateKey(
            "no EC private key block found".to_owned(),
        ))
    }

    /// Sign a message with ECDSA P-256 / SHA-256.
    ///
    /// Nonces are derived deterministically (RFC 6979), so the same key and
    /// message always give the same signature.
    pub fn sign(&self, message: &[u8]) -> Es256Signature {
        let signature: Signature = self.signing_key.sign(message);
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&signature.to_bytes());
        Es256Signature(bytes)
    }

    /// The matching public key as SPKI PEM.
    pub fn public_key_pem(&self) -> Result<String, CoreError> {
        VerifyingKey::from(&self.signing_key)
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CoreError::EncodingError(e.to_string()))
    }
}

impl From<EcdsaSigningKey> for SigningKey {
    fn from(signing_key: EcdsaSigningKey) -> Self {
        Self { signing_key }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(P-256)")
    }
}
