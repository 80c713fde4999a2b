//! Application state.

use std::sync::Arc;

use merit_core::{ActivityScorer, ProgressionCurve, RewardSchedule};
use merit_dispatch::{HttpAddressResolver, HttpWalletSender, RewardDispatcher};
use merit_ledger::InMemoryXpLedger;

use crate::config::NodeConfig;
use crate::engine::Engine;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The engine all handlers drive.
    pub engine: Arc<Engine>,
}

impl AppState {
    /// Wire the engine to its production collaborators.
    pub fn new(config: &NodeConfig) -> Self {
        let dispatcher = RewardDispatcher::new(
            RewardSchedule::with_unit(config.unit_reward),
            Arc::new(HttpWalletSender::new(config.wallet_url.clone())),
        );

        let engine = Engine::new(
            Arc::new(InMemoryXpLedger::new()),
            ProgressionCurve::with_divisor(config.xp_divisor),
            ActivityScorer::with_min_tokens(config.min_tokens),
            dispatcher,
            Arc::new(HttpAddressResolver::new(config.directory_url.clone())),
        );

        Self::with_engine(engine)
    }

    /// State around an already-assembled engine (used by tests to inject
    /// fake collaborators).
    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
