//! # notiflux-token testkit
//!
//! Testing utilities for notiflux tokens.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Key fixtures**: fixed P-256 keys in every PEM layout the issuer accepts,
//!   plus keys it must reject
//! - **Reference verifier**: an independent ES256 verifier built on
//!   `jsonwebtoken`
//! - **Generators**: Proptest strategies for property-based testing
//! - **Golden vectors**: expected header and payload segments for fixed inputs
//!
//! ## Test Fixtures
//!
//! ```rust
//! use chrono::Utc;
//! use notiflux_token_core::{encode, Claims, Scope, SigningKey};
//! use notiflux_token_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let key = SigningKey::from_pem(fixture.private_pem()).unwrap();
//! let claims = Claims::with_default_validity(Scope::Broadcast, "news", Utc::now()).unwrap();
//! let token = encode(&claims, &key).unwrap();
//!
//! assert_eq!(fixture.verify(token.as_str()).unwrap(), claims);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use notiflux_token_testkit::generators::IssueParams;
//!
//! proptest! {
//!     #[test]
//!     fn topic_survives_signing(params: IssueParams) {
//!         let claims = params.claims();
//!         prop_assert_eq!(claims.topic, params.topic);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{decode_payload_unverified, reference_verify, tamper_signature, TestFixture};
pub use generators::IssueParams;
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
