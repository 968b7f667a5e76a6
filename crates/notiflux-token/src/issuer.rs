//! The token issuer.
//!
//! [`run`] is the whole command: read the key, build the claims, optionally
//! echo them, sign, and print the token. [`Issuer`] is the reusable part for
//! callers that sign more than one token with the same key.

use std::io::Write;

use chrono::{DateTime, Utc};
use notiflux_token_core::{encode, Claims, Scope, SigningKey, Token};
use tracing::{debug, info};

use crate::config::IssuerConfig;
use crate::error::{IssueError, Result};

/// A token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub claims: Claims,
    pub token: Token,
}

/// Build the claims for one issuance.
///
/// Pure: the result depends only on the arguments.
pub fn build_claims(
    config: &IssuerConfig,
    scope: Scope,
    topic: &str,
    now: DateTime<Utc>,
) -> Result<Claims> {
    Ok(Claims::new(scope, topic, now, config.validity_days)?)
}

/// Signs claims with a loaded private key.
#[derive(Debug, Clone)]
pub struct Issuer {
    signing_key: SigningKey,
    config: IssuerConfig,
}

impl Issuer {
    /// Create an issuer from an already parsed key.
    pub fn new(signing_key: SigningKey, config: IssuerConfig) -> Self {
        Self {
            signing_key,
            config,
        }
    }

    /// Load and parse the key named by the configuration.
    pub fn from_config(config: IssuerConfig) -> Result<Self> {
        let pem = config.key_source.load()?;
        Ok(Self::new(parse_signing_key(&pem)?, config))
    }

    /// The configuration this issuer was built with.
    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Sign prepared claims.
    pub fn sign(&self, claims: &Claims) -> Result<Token> {
        let token = encode(claims, &self.signing_key)?;
        info!(scope = %claims.scope, topic = %claims.topic, exp = claims.exp, "issued token");
        Ok(token)
    }

    /// Build claims for `scope` and `topic` at `now`, then sign them.
    pub fn issue(&self, scope: Scope, topic: &str, now: DateTime<Utc>) -> Result<IssuedToken> {
        let claims = build_claims(&self.config, scope, topic, now)?;
        let token = self.sign(&claims)?;
        Ok(IssuedToken { claims, token })
    }
}

fn parse_signing_key(pem: &str) -> Result<SigningKey> {
    let signing_key = SigningKey::from_pem(pem)?;
    let public_key = signing_key.public_key_pem()?;
    debug!(public_key = %public_key.trim_end(), "loaded signing key");
    Ok(signing_key)
}

/// Issue one token and write it to `out`.
///
/// With `verbose`, a `claims=<json>` line precedes the token. A malformed
/// key is only detected after the echo, at signing time.
pub fn run<W: Write>(
    config: IssuerConfig,
    scope: Scope,
    topic: &str,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<Token> {
    let pem = config.key_source.load()?;

    let claims = build_claims(&config, scope, topic, now)?;
    debug!(%claims, "built claims");
    if config.verbose {
        writeln!(out, "claims={claims}").map_err(IssueError::Output)?;
    }

    let issuer = Issuer::new(parse_signing_key(&pem)?, config);
    let token = issuer.sign(&claims)?;

    writeln!(out, "{token}").map_err(IssueError::Output)?;
    out.flush().map_err(IssueError::Output)?;
    Ok(token)
}
