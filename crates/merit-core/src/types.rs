//! Common types used across the Merit engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque key under which XP and reward destination are tracked.
///
/// The engine never interprets the contents; it is whatever unique id the
/// chat platform hands us.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from any string-like key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One identity's cumulative standing.
///
/// `xp` is monotonically non-decreasing over the identity's lifetime; the
/// level is derived from it on demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    /// The identity this progress belongs to.
    pub identity: Identity,

    /// Accumulated activity credit.
    pub xp: u64,
}

impl UserProgress {
    /// Fresh progress for a first-seen identity.
    pub fn new(identity: Identity) -> Self {
        Self { identity, xp: 0 }
    }
}

/// Result of a single reward dispatch attempt.
///
/// At most one of these exists per reward-worthy transition; the engine
/// never retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardOutcome {
    /// The payment sender accepted the transfer.
    Paid { amount: u64, receipt_id: String },

    /// The payment sender reported failure. The level-up itself still
    /// stands; acknowledgment and delivery are separate facts.
    Failed { reason: String },
}

impl RewardOutcome {
    /// Returns true if the reward was delivered.
    pub fn is_paid(&self) -> bool {
        matches!(self, RewardOutcome::Paid { .. })
    }
}
