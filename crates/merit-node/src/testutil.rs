//! Fake collaborators for engine and API tests.

use std::sync::Arc;

use async_trait::async_trait;
use merit_core::{
    ActivityScorer, Identity, MeritError, ProgressionCurve, Result, RewardSchedule,
};
use merit_dispatch::{AddressResolver, PaymentSender, RewardDispatcher};
use merit_ledger::{InMemoryXpLedger, XpLedger, XpRecord};
use tokio::sync::Mutex;

use crate::engine::Engine;

/// Resolver answering from a fixed script.
pub struct FakeResolver {
    address: Option<String>,
}

impl FakeResolver {
    pub fn with_address(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
        }
    }

    pub fn unresolved() -> Self {
        Self { address: None }
    }
}

#[async_trait]
impl AddressResolver for FakeResolver {
    async fn resolve(&self, _display_name: &str) -> Result<Option<String>> {
        Ok(self.address.clone())
    }
}

/// Sender that records every call and optionally fails each one.
pub struct FakeSender {
    calls: Mutex<Vec<(String, u64)>>,
    fail: bool,
}

impl FakeSender {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail,
        })
    }

    pub async fn calls(&self) -> Vec<(String, u64)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PaymentSender for FakeSender {
    async fn send(&self, destination: &str, amount: u64) -> Result<String> {
        self.calls
            .lock()
            .await
            .push((destination.to_string(), amount));
        if self.fail {
            Err(MeritError::DispatchFailed {
                reason: "broadcast rejected".to_string(),
            })
        } else {
            Ok("receipt-1".to_string())
        }
    }
}

/// In-memory ledger that can be told to fail its next call.
pub struct TestLedger {
    inner: InMemoryXpLedger,
    fail_next: Mutex<bool>,
}

impl TestLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryXpLedger::new(),
            fail_next: Mutex::new(false),
        })
    }

    /// Make the next ledger call return `LedgerUnavailable`.
    pub async fn fail_next(&self) {
        *self.fail_next.lock().await = true;
    }

    async fn maybe_fail(&self) -> Result<()> {
        let mut fail = self.fail_next.lock().await;
        if *fail {
            *fail = false;
            return Err(MeritError::LedgerUnavailable {
                message: "induced outage".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl XpLedger for TestLedger {
    async fn get(&self, identity: &Identity) -> Result<u64> {
        self.maybe_fail().await?;
        self.inner.get(identity).await
    }

    async fn set(&self, identity: &Identity, xp: u64) -> Result<XpRecord> {
        self.maybe_fail().await?;
        self.inner.set(identity, xp).await
    }

    async fn record(&self, identity: &Identity) -> Result<Option<XpRecord>> {
        self.inner.record(identity).await
    }

    async fn identities(&self) -> Result<Vec<Identity>> {
        self.inner.identities().await
    }
}

/// Engine wired to fakes, with the sender and ledger handed back for
/// assertions.
pub fn test_engine(
    resolver: FakeResolver,
    sender_fails: bool,
) -> (Engine, Arc<FakeSender>, Arc<TestLedger>) {
    let ledger = TestLedger::new();
    let sender = FakeSender::new(sender_fails);
    let dispatcher = RewardDispatcher::new(RewardSchedule::default(), sender.clone());

    let engine = Engine::new(
        ledger.clone(),
        ProgressionCurve::default(),
        ActivityScorer::default(),
        dispatcher,
        Arc::new(resolver),
    );

    (engine, sender, ledger)
}
