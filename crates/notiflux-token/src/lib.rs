//! # notiflux-token
//!
//! Issues signed authorization tokens for the notiflux publish/subscribe
//! broker.
//!
//! ## Overview
//!
//! A token grants its holder one [`Scope`] on one topic:
//!
//! - **broadcast**: publish messages to the topic
//! - **subscribe**: receive messages from the topic
//!
//! Tokens are compact ES256 JWTs carrying four claims (`sub`, `exp`, `topic`,
//! `scope`) and expire 100 years after issuance unless configured otherwise.
//! Verification happens in the broker, not here.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use notiflux_token::{Issuer, IssuerConfig, KeySource, Scope};
//!
//! let config = IssuerConfig {
//!     key_source: KeySource::Path("private_key.pem".into()),
//!     ..IssuerConfig::default()
//! };
//! let issuer = Issuer::from_config(config).unwrap();
//! let issued = issuer.issue(Scope::Subscribe, "weather.alerts", Utc::now()).unwrap();
//! println!("{}", issued.token);
//! ```
//!
//! ## Re-exports
//!
//! - `notiflux_token::core` - Scopes, claims, signing keys and token encoding

pub mod cli;
pub mod config;
pub mod error;
pub mod issuer;

pub use notiflux_token_core as core;

pub use config::{IssuerConfig, KeySource, DEFAULT_PRIVATE_KEY_PATH};
pub use error::{IssueError, Result};
pub use issuer::{build_claims, run, IssuedToken, Issuer};

pub use notiflux_token_core::{Claims, Scope, SigningKey, Token};
