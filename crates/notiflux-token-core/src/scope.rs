//! Token scopes.
//!
//! A scope is a closed set: a token either lets its holder broadcast to a
//! topic or subscribe to it. Anything else is rejected at the parsing
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// What the token holder may do on a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Publish messages to every subscriber of the topic.
    Broadcast,
    /// Receive messages published on the topic.
    Subscribe,
}

impl Scope {
    /// All scopes, in wire-name order.
    pub const ALL: [Scope; 2] = [Scope::Broadcast, Scope::Subscribe];

    /// The wire name carried in the `scope` claim.
    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Broadcast => "broadcast",
            Scope::Subscribe => "subscribe",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "broadcast" => Ok(Scope::Broadcast),
            "subscribe" => Ok(Scope::Subscribe),
            other => Err(CoreError::InvalidScope(other.to_owned())),
        }
    }
}
