//! # notiflux-token core
//!
//! Pure primitives for issuing notiflux authorization tokens: scopes, claims,
//! ES256 signing and compact token encoding.
//!
//! This crate contains no I/O. Reading key files, configuration and the CLI
//! live in the `notiflux-token` crate.
//!
//! ## Key Types
//!
//! - [`Scope`] - What the token holder may do on a topic
//! - [`Claims`] - The token payload (`sub`, `exp`, `topic`, `scope`)
//! - [`SigningKey`] - A P-256 private key parsed from PEM
//! - [`Token`] - A compact, three-segment signed token
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use notiflux_token_core::{encode, Claims, Scope, SigningKey};
//!
//! let pem = std::fs::read_to_string("private_key.pem").unwrap();
//! let key = SigningKey::from_pem(&pem).unwrap();
//! let claims = Claims::with_default_validity(Scope::Broadcast, "weather.alerts", Utc::now()).unwrap();
//! let token = encode(&claims, &key).unwrap();
//! println!("{token}");
//! ```

pub mod claims;
pub mod crypto;
pub mod error;
pub mod scope;
pub mod token;

pub use claims::{Claims, DEFAULT_VALIDITY_DAYS, SUBJECT};
pub use crypto::{Es256Signature, SigningKey};
pub use error::CoreError;
pub use scope::Scope;
pub use token::{encode, Token, TOKEN_HEADER};
