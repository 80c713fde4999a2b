//! Per-identity write serialization.

use std::collections::HashMap;
use std::sync::Arc;

use merit_core::Identity;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Registry of per-identity mutexes.
///
/// The ledger read-modify-write for one identity must not interleave with
/// another for the same identity, or a concurrent event would compute its
/// new XP from a stale snapshot and overwrite the other's credit. Holding
/// the guard covers exactly the read → detect → write sequence; reward
/// dispatch happens after the guard is dropped so network latency never
/// blocks the identity's ledger.
///
/// Identities never contend with each other: each gets its own mutex,
/// created on first sight.
#[derive(Clone, Default)]
pub struct IdentityLocks {
    locks: Arc<RwLock<HashMap<Identity, Arc<Mutex<()>>>>>,
}

impl IdentityLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the critical section for one identity, waiting behind any
    /// in-flight update for the same identity.
    pub async fn acquire(&self, identity: &Identity) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.write().await;
            locks
                .entry(identity.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
