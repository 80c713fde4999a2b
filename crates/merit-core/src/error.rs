//! Error types for the Merit engine.

use thiserror::Error;

use crate::types::Identity;

/// Main error type for Merit operations.
#[derive(Error, Debug, Clone)]
pub enum MeritError {
    /// XP went backwards between two observations of the same identity.
    /// Indicates a ledger or caller bug; detected before any write.
    #[error("invalid transition for {identity}: xp decreased from {old_xp} to {new_xp}")]
    InvalidTransition {
        identity: Identity,
        old_xp: u64,
        new_xp: u64,
    },

    /// The address directory has no payment destination for this identity.
    #[error("no payment address on record for {identity}")]
    AddressNotFound { identity: Identity },

    /// The payment sender reported failure for a dispatch attempt.
    #[error("reward dispatch failed: {reason}")]
    DispatchFailed { reason: String },

    /// The XP ledger could not complete a read or write.
    #[error("ledger unavailable: {message}")]
    LedgerUnavailable { message: String },

    /// The address directory could not be reached at all (distinct from a
    /// successful lookup that found nothing).
    #[error("address directory unavailable: {message}")]
    ResolverUnavailable { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl MeritError {
    /// Returns true if retrying the whole operation later is safe.
    ///
    /// `LedgerUnavailable` is raised before any write commits, so the
    /// triggering activity is simply not yet credited. `DispatchFailed` is
    /// deliberately *not* recoverable here: retrying a payment without an
    /// idempotency key risks paying twice.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MeritError::LedgerUnavailable { .. } | MeritError::ResolverUnavailable { .. }
        )
    }

    /// Returns the identity this error concerns, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            MeritError::InvalidTransition { identity, .. } => Some(identity),
            MeritError::AddressNotFound { identity } => Some(identity),
            _ => None,
        }
    }
}

/// Convenience Result type for Merit operations.
pub type Result<T> = std::result::Result<T, MeritError>;

impl From<serde_json::Error> for MeritError {
    fn from(err: serde_json::Error) -> Self {
        MeritError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_outage_is_recoverable() {
        let err = MeritError::LedgerUnavailable {
            message: "connection refused".to_string(),
        };
        assert!(err.is_recoverable());
    }

    #[test]
    fn dispatch_failure_is_not_recoverable() {
        let err = MeritError::DispatchFailed {
            reason: "broadcast rejected".to_string(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn identity_is_surfaced() {
        let err = MeritError::AddressNotFound {
            identity: Identity::new("fren"),
        };
        assert_eq!(err.identity().map(|i| i.as_str()), Some("fren"));
    }
}
