//! Claims: the payload of a notiflux token.
//!
//! Claims are built fresh for every issuance and consumed immediately by
//! the signing step. The current time is always passed in, never read from
//! a global clock, so expirations are reproducible.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::scope::Scope;

/// The issuing system, carried in the `sub` claim.
pub const SUBJECT: &str = "notiflux";

/// Default validity: 100 years of 365 days.
pub const DEFAULT_VALIDITY_DAYS: u32 = 365 * 100;

/// The token payload.
///
/// Field order is the serialized order: `sub`, `exp`, `topic`, `scope`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Always [`SUBJECT`] for claims built by this crate.
    pub sub: String,
    /// Expiration, seconds since the Unix epoch.
    pub exp: i64,
    /// The topic, exactly as the caller supplied it.
    pub topic: String,
    /// What the holder may do on the topic.
    pub scope: Scope,
}

impl Claims {
    /// Build claims expiring `validity_days` after `now`.
    pub fn new(
        scope: Scope,
        topic: impl Into<String>,
        now: DateTime<Utc>,
        validity_days: u32,
    ) -> Result<Self, CoreError> {
        let expires_at = TimeDelta::try_days(i64::from(validity_days))
            .and_then(|validity| now.checked_add_signed(validity))
            .ok_or_else(|| CoreError::ExpiryOverflow(validity_days, now.to_rfc3339()))?;

        Ok(Self {
            sub: SUBJECT.to_owned(),
            exp: expires_at.timestamp(),
            topic: topic.into(),
            scope,
        })
    }

    /// Build claims with the default 100-year validity.
    pub fn with_default_validity(
        scope: Scope,
        topic: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        Self::new(scope, topic, now, DEFAULT_VALIDITY_DAYS)
    }

    /// The expiration as a UTC timestamp.
    ///
    /// Returns `None` only for claims deserialized with an out-of-range `exp`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Compact JSON payload bytes.
    pub fn to_json(&self) -> Result<Vec<u8>, CoreError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl fmt::Display for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
