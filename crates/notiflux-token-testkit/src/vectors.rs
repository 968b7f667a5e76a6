//! Golden test vectors.
//!
//! The header and payload segments of a token depend only on the scope,
//! topic and issuance time, so they are fixed here byte for byte. The
//! signature segment depends on the key; with the fixed fixture key and
//! RFC 6979 nonces it is deterministic too, and is checked by verification
//! rather than by value.

use chrono::DateTime;
use notiflux_token_core::{encode, Claims, Scope, SigningKey, Token, DEFAULT_VALIDITY_DAYS};

use crate::fixtures::{keys, reference_verify};

/// Base64url of `{"alg":"ES256","typ":"JWT"}`.
pub const HEADER_SEGMENT: &str = "eyJhbGciOiJFUzI1NiIsInR5cCI6IkpXVCJ9";

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Issuance time, seconds since the Unix epoch.
    pub now: i64,
    pub scope: Scope,
    pub topic: &'static str,
    /// Expected `exp` claim.
    pub expected_exp: i64,
    /// Expected base64url payload segment.
    pub expected_payload: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "broadcast weather.alerts",
            now: 1_767_225_600, // 2026-01-01T00:00:00Z
            scope: Scope::Broadcast,
            topic: "weather.alerts",
            expected_exp: 4_920_825_600,
            expected_payload: "eyJzdWIiOiJub3RpZmx1eCIsImV4cCI6NDkyMDgyNTYwMCwidG9waWMiOiJ3ZWF0aGVyLmFsZXJ0cyIsInNjb3BlIjoiYnJvYWRjYXN0In0",
        },
        GoldenVector {
            name: "subscribe weather.alerts",
            now: 1_767_225_600,
            scope: Scope::Subscribe,
            topic: "weather.alerts",
            expected_exp: 4_920_825_600,
            expected_payload: "eyJzdWIiOiJub3RpZmx1eCIsImV4cCI6NDkyMDgyNTYwMCwidG9waWMiOiJ3ZWF0aGVyLmFsZXJ0cyIsInNjb3BlIjoic3Vic2NyaWJlIn0",
        },
        GoldenVector {
            name: "empty topic at epoch",
            now: 0,
            scope: Scope::Subscribe,
            topic: "",
            expected_exp: 3_153_600_000,
            expected_payload: "eyJzdWIiOiJub3RpZmx1eCIsImV4cCI6MzE1MzYwMDAwMCwidG9waWMiOiIiLCJzY29wZSI6InN1YnNjcmliZSJ9",
        },
        GoldenVector {
            name: "unicode and quotes in topic",
            now: 1_700_000_000,
            scope: Scope::Broadcast,
            topic: "café/☕ \"quoted\"",
            expected_exp: 4_853_600_000,
            expected_payload: "eyJzdWIiOiJub3RpZmx1eCIsImV4cCI6NDg1MzYwMDAwMCwidG9waWMiOiJjYWbDqS_imJUgXCJxdW90ZWRcIiIsInNjb3BlIjoiYnJvYWRjYXN0In0",
        },
    ]
}

/// Build the claims described by a vector.
pub fn claims_from_vector(vector: &GoldenVector) -> Claims {
    let now = DateTime::from_timestamp(vector.now, 0).expect("vector time in range");
    Claims::new(vector.scope, vector.topic, now, DEFAULT_VALIDITY_DAYS)
        .expect("vector expiry in range")
}

/// Sign a vector with the fixed P-256 fixture key.
pub fn token_from_vector(vector: &GoldenVector) -> Token {
    let key = SigningKey::from_pem(keys::P256_PKCS8).expect("fixture key parses");
    encode(&claims_from_vector(vector), &key).expect("vector encodes")
}

/// Check every vector: segments match and the signature verifies.
///
/// Returns `(name, matches, payload_segment)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let token = token_from_vector(v);
            let verified = reference_verify(token.as_str(), keys::P256_PUBLIC)
                .map(|claims| claims.exp == v.expected_exp)
                .unwrap_or(false);

            let matches = verified
                && token.header_segment() == HEADER_SEGMENT
                && token.payload_segment() == v.expected_payload;

            (v.name.to_string(), matches, token.payload_segment().to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, payload) in verify_all_vectors() {
            assert!(matches, "vector '{name}' mismatched, payload segment {payload}");
        }
    }

    #[test]
    fn test_vectors_are_deterministic() {
        // Deterministic nonces: the whole token, signature included, repeats.
        for vector in all_vectors() {
            assert_eq!(
                token_from_vector(&vector),
                token_from_vector(&vector),
                "vector '{}' produced different tokens on regeneration",
                vector.name
            );
        }
    }

    #[test]
    fn test_vector_claims() {
        for vector in all_vectors() {
            let claims = claims_from_vector(&vector);
            assert_eq!(claims.sub, "notiflux");
            assert_eq!(claims.topic, vector.topic);
            assert_eq!(claims.scope, vector.scope);
            assert_eq!(claims.exp, vector.expected_exp);
        }
    }

    #[test]
    fn test_sec1_key_signs_identically() {
        // Same scalar in a different container gives the same deterministic signature.
        let sec1 = SigningKey::from_pem(keys::P256_SEC1).unwrap();
        for vector in all_vectors() {
            let token = encode(&claims_from_vector(&vector), &sec1).unwrap();
            assert_eq!(token, token_from_vector(&vector));
        }
    }
}
