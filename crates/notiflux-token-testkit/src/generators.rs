//! Proptest generators for property-based testing.

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use notiflux_token_core::{Claims, Scope};

/// Generate a P-256 signing key from random scalar bytes.
pub fn signing_key() -> impl Strategy<Value = p256::ecdsa::SigningKey> {
    any::<[u8; 32]>().prop_filter_map("scalar out of range", |bytes| {
        p256::ecdsa::SigningKey::from_bytes(&bytes.into()).ok()
    })
}

/// Generate a Scope.
pub fn scope() -> impl Strategy<Value = Scope> {
    prop_oneof![Just(Scope::Broadcast), Just(Scope::Subscribe)]
}

/// Generate a topic: mostly dotted names, sometimes arbitrary Unicode.
pub fn topic() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z][a-z0-9_-]{0,15}(\\.[a-z0-9_-]{1,15}){0,3}".prop_map(String::from),
        1 => any::<String>(),
    ]
}

/// Generate an issuance time between 1970 and 2100.
pub fn issued_at() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..=4_102_444_800).prop_map(|secs| {
        DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
    })
}

/// Parameters for one issuance.
#[derive(Debug, Clone)]
pub struct IssueParams {
    pub scope: Scope,
    pub topic: String,
    pub now: DateTime<Utc>,
}

impl IssueParams {
    /// Claims with the default validity.
    pub fn claims(&self) -> Claims {
        Claims::with_default_validity(self.scope, self.topic.clone(), self.now)
            .expect("issuance times before 2100 never overflow")
    }
}

impl Arbitrary for IssueParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (scope(), topic(), issued_at())
            .prop_map(|(scope, topic, now)| IssueParams { scope, topic, now })
            .boxed()
    }
}
