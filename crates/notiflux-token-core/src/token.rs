//! Compact token encoding.
//!
//! Tokens use the RFC 7519 compact form:
//! - Header: `{"alg":"ES256","typ":"JWT"}`
//! - Payload: [`Claims`] as compact JSON
//! - Signature: ES256 over `base64url(header).base64url(payload)`
//!
//! All three segments are base64url without padding, joined by periods.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use std::fmt;

use crate::claims::Claims;
use crate::crypto::SigningKey;
use crate::error::CoreError;

/// Token header (static for ES256).
pub const TOKEN_HEADER: &str = r#"{"alg":"ES256","typ":"JWT"}"#;

/// A signed, compact token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// The full compact string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the compact string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// `header.payload`, the bytes covered by the signature.
    pub fn signing_input(&self) -> &str {
        // Both periods are present by construction.
        let end = self.0.rfind('.').unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// The base64url header segment.
    pub fn header_segment(&self) -> &str {
        self.segment(0)
    }

    /// The base64url payload segment.
    pub fn payload_segment(&self) -> &str {
        self.segment(1)
    }

    /// The base64url signature segment.
    pub fn signature_segment(&self) -> &str {
        self.segment(2)
    }

    fn segment(&self, index: usize) -> &str {
        self.0.split('.').nth(index).unwrap_or_default()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// Encode and sign a token.
pub fn encode(claims: &Claims, signing_key: &SigningKey) -> Result<Token, CoreError> {
    let header_b64 = URL_SAFE_NO_PAD.encode(TOKEN_HEADER);
    let payload_b64 = URL_SAFE_NO_PAD.encode(claims.to_json()?);

    let signing_input = format!("{header_b64}.{payload_b64}");
    let signature = signing_key.sign(signing_input.as_bytes());
    let signature_b64 = URL_SAFE_NO_PAD.encode(signature.as_bytes());

    Ok(Token(format!("{signing_input}.{signature_b64}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Scope;
    use chrono::DateTime;
    use p256::ecdsa::signature::Verifier;
    use p256::ecdsa::{Signature, SigningKey as EcdsaSigningKey, VerifyingKey};

    fn fixed_claims() -> Claims {
        let now = DateTime::from_timestamp(1_767_225_600, 0).unwrap();
        Claims::with_default_validity(Scope::Broadcast, "weather.alerts", now).unwrap()
    }

    fn random_key() -> (SigningKey, VerifyingKey) {
        let raw = EcdsaSigningKey::random(&mut rand::thread_rng());
        let verifying = VerifyingKey::from(&raw);
        (SigningKey::from(raw), verifying)
    }

    #[test]
    fn test_token_has_three_segments() {
        let (key, _) = random_key();
        let token = encode(&fixed_claims(), &key).unwrap();

        let parts: Vec<&str> = token.as_str().split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| !p.is_empty()));
        assert!(!token.as_str().contains('='));
        assert_eq!(
            token.signing_input(),
            format!("{}.{}", parts[0], parts[1])
        );
    }

    #[test]
    fn test_header_and_payload_segments() {
        let (key, _) = random_key();
        let token = encode(&fixed_claims(), &key).unwrap();

        assert_eq!(token.header_segment(), "eyJhbGciOiJFUzI1NiIsInR5cCI6IkpXVCJ9");

        let payload = URL_SAFE_NO_PAD.decode(token.payload_segment()).unwrap();
        let claims: Claims = serde_json::from_slice(&payload).unwrap();
        assert_eq!(claims, fixed_claims());
    }

    #[test]
    fn test_signature_verifies_over_signing_input() {
        let (key, verifying) = random_key();
        let token = encode(&fixed_claims(), &key).unwrap();

        let sig_bytes = URL_SAFE_NO_PAD.decode(token.signature_segment()).unwrap();
        assert_eq!(sig_bytes.len(), 64);
        let signature = Signature::from_slice(&sig_bytes).unwrap();

        verifying
            .verify(token.signing_input().as_bytes(), &signature)
            .expect("token signature should verify");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let (key, _) = random_key();
        let t1 = encode(&fixed_claims(), &key).unwrap();
        let t2 = encode(&fixed_claims(), &key).unwrap();
        assert_eq!(t1, t2);
    }
}
