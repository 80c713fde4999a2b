//! XP ledger implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use merit_core::{Identity, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One identity's stored XP with bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpRecord {
    /// The identity this record belongs to.
    pub identity: Identity,

    /// Accumulated XP. Unsigned by construction, so a negative value can
    /// never be stored.
    pub xp: u64,

    /// Write counter (monotonically increasing across the whole store).
    pub version: u64,

    /// Timestamp of the last write.
    pub updated_at: DateTime<Utc>,
}

/// Contract the engine depends on for XP persistence.
///
/// Implementations must make `set` atomic per identity; callers serialize
/// the surrounding read-modify-write with [`crate::IdentityLocks`]. A
/// failed call maps to `MeritError::LedgerUnavailable` and is raised before
/// anything is considered credited.
#[async_trait]
pub trait XpLedger: Send + Sync {
    /// Current XP for an identity, `0` if never seen.
    async fn get(&self, identity: &Identity) -> Result<u64>;

    /// Store a new XP total for an identity.
    async fn set(&self, identity: &Identity, xp: u64) -> Result<XpRecord>;

    /// The full record, if the identity has ever been written.
    async fn record(&self, identity: &Identity) -> Result<Option<XpRecord>>;

    /// All identities with a stored record.
    async fn identities(&self) -> Result<Vec<Identity>>;
}

/// In-memory implementation of [`XpLedger`].
pub struct InMemoryXpLedger {
    records: Arc<RwLock<HashMap<Identity, XpRecord>>>,
    version: Arc<RwLock<u64>>,
}

impl InMemoryXpLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            version: Arc::new(RwLock::new(0)),
        }
    }

    async fn next_version(&self) -> u64 {
        let mut version = self.version.write().await;
        *version += 1;
        *version
    }
}

impl Default for InMemoryXpLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl XpLedger for InMemoryXpLedger {
    async fn get(&self, identity: &Identity) -> Result<u64> {
        let records = self.records.read().await;
        Ok(records.get(identity).map(|r| r.xp).unwrap_or(0))
    }

    async fn set(&self, identity: &Identity, xp: u64) -> Result<XpRecord> {
        let mut records = self.records.write().await;
        let version = self.next_version().await;

        let record = XpRecord {
            identity: identity.clone(),
            xp,
            version,
            updated_at: Utc::now(),
        };

        records.insert(identity.clone(), record.clone());
        tracing::debug!(identity = %identity, xp, version, "ledger write");

        Ok(record)
    }

    async fn record(&self, identity: &Identity) -> Result<Option<XpRecord>> {
        let records = self.records.read().await;
        Ok(records.get(identity).cloned())
    }

    async fn identities(&self) -> Result<Vec<Identity>> {
        let records = self.records.read().await;
        Ok(records.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_identity_reads_zero() {
        let ledger = InMemoryXpLedger::new();
        let xp = ledger.get(&Identity::new("nobody")).await.unwrap();
        assert_eq!(xp, 0);
    }

    #[tokio::test]
    async fn set_then_get() {
        let ledger = InMemoryXpLedger::new();
        let id = Identity::new("u1");

        ledger.set(&id, 42).await.unwrap();

        assert_eq!(ledger.get(&id).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn versions_increase_across_writes() {
        let ledger = InMemoryXpLedger::new();
        let id = Identity::new("u1");

        let r1 = ledger.set(&id, 10).await.unwrap();
        let r2 = ledger.set(&id, 25).await.unwrap();

        assert!(r2.version > r1.version);
        assert_eq!(ledger.get(&id).await.unwrap(), 25);
    }

    #[tokio::test]
    async fn identities_lists_written_keys() {
        let ledger = InMemoryXpLedger::new();
        ledger.set(&Identity::new("a"), 1).await.unwrap();
        ledger.set(&Identity::new("b"), 2).await.unwrap();

        let mut ids: Vec<String> = ledger
            .identities()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.as_str().to_string())
            .collect();
        ids.sort();

        assert_eq!(ids, vec!["a", "b"]);
    }
}
