//! The credit pipeline: activity → ledger → transition → dispatch.

use std::sync::Arc;

use merit_core::{
    ActivityScorer, Identity, LevelTransition, ProgressionCurve, Result, RewardOutcome,
};
use merit_dispatch::{AddressResolver, RewardDispatcher};
use merit_ledger::{IdentityLocks, XpLedger};
use tracing::{error, info};

/// What happened to one activity event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityOutcome {
    /// Scored zero; nothing was written and no transition was checked.
    Ignored,

    /// XP credited without crossing a level boundary.
    Credited { xp: u64, level: u64 },

    /// XP credited and a level boundary was crossed.
    LeveledUp {
        transition: LevelTransition,
        reward: RewardReport,
    },
}

/// How reward delivery went for an acknowledged level-up.
///
/// The level-up itself is already committed by the time this is produced;
/// these are the separate delivery facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardReport {
    /// The payment went through.
    Delivered { amount: u64, receipt_id: String },

    /// The sender was invoked once and reported failure.
    Undelivered { reason: String },

    /// No payment destination could be resolved; the sender was never
    /// invoked.
    AddressNotFound,
}

/// Current standing of one identity, for queries and notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub identity: Identity,
    pub xp: u64,
    pub level: u64,
    pub xp_to_next: u64,
}

/// The core engine composing ledger, detector, and dispatcher.
///
/// The ledger read-modify-write for one identity runs under that
/// identity's lock; reward dispatch runs after the lock is dropped so a
/// slow payment never stalls the identity's ledger, let alone anyone
/// else's.
pub struct Engine {
    ledger: Arc<dyn XpLedger>,
    locks: IdentityLocks,
    curve: ProgressionCurve,
    scorer: ActivityScorer,
    dispatcher: RewardDispatcher,
    resolver: Arc<dyn AddressResolver>,
}

impl Engine {
    /// Assemble an engine from its collaborators.
    pub fn new(
        ledger: Arc<dyn XpLedger>,
        curve: ProgressionCurve,
        scorer: ActivityScorer,
        dispatcher: RewardDispatcher,
        resolver: Arc<dyn AddressResolver>,
    ) -> Self {
        Self {
            ledger,
            locks: IdentityLocks::new(),
            curve,
            scorer,
            dispatcher,
            resolver,
        }
    }

    /// The progression curve in use.
    pub fn curve(&self) -> ProgressionCurve {
        self.curve
    }

    /// Credit one activity event and dispatch a reward if it crossed a
    /// level boundary.
    ///
    /// `display_name` is what the address directory keys on; `identity` is
    /// what the ledger keys on.
    pub async fn credit_activity(
        &self,
        identity: Identity,
        display_name: &str,
        content: &str,
    ) -> Result<ActivityOutcome> {
        let delta = self.scorer.score(content);
        if delta == 0 {
            return Ok(ActivityOutcome::Ignored);
        }

        // Critical section: read → detect → write. Detection runs before
        // the write so an invalid transition can never corrupt the ledger.
        let transition = {
            let _guard = self.locks.acquire(&identity).await;
            let old_xp = self.ledger.get(&identity).await?;
            let new_xp = old_xp + delta;
            let transition = self.curve.detect(identity.clone(), old_xp, new_xp)?;
            self.ledger.set(&identity, new_xp).await?;
            transition
        };

        info!(
            identity = %transition.identity,
            xp = transition.new_xp,
            level = transition.new_level,
            "activity credited"
        );

        if !transition.is_reward_worthy() {
            return Ok(ActivityOutcome::Credited {
                xp: transition.new_xp,
                level: transition.new_level,
            });
        }

        // Dispatch runs outside the critical section; the write is
        // already committed and stays committed whatever happens here.
        let reward = match self
            .resolve_destination(&transition.identity, display_name)
            .await
        {
            Some(address) => {
                Self::report_from(self.dispatcher.dispatch(&transition, &address).await)
            }
            None => RewardReport::AddressNotFound,
        };

        Ok(ActivityOutcome::LeveledUp { transition, reward })
    }

    /// Current XP, level, and distance to the next boundary.
    pub async fn progress(&self, identity: Identity) -> Result<ProgressReport> {
        let xp = self.ledger.get(&identity).await?;
        let level = self.curve.level_of(xp);

        Ok(ProgressReport {
            identity,
            xp,
            level,
            xp_to_next: self.curve.xp_to_next(xp),
        })
    }

    /// On-demand reward dispatch check for an out-of-band notification.
    ///
    /// Re-announces the identity's current standing; when the identity has
    /// reached at least level 1, the reward sized by that level is
    /// dispatched. Returns the standing plus the delivery facts (`None`
    /// below level 1, where there is nothing to reward).
    pub async fn on_demand_check(
        &self,
        identity: Identity,
        display_name: &str,
    ) -> Result<(ProgressReport, Option<RewardReport>)> {
        let report = self.progress(identity).await?;

        if report.level == 0 {
            return Ok((report, None));
        }

        let reward = match self
            .resolve_destination(&report.identity, display_name)
            .await
        {
            Some(address) => Self::report_from(
                self.dispatcher
                    .dispatch_for_level(&report.identity, report.level, &address)
                    .await,
            ),
            None => RewardReport::AddressNotFound,
        };

        Ok((report, Some(reward)))
    }

    /// Resolve an identity's payment destination.
    ///
    /// A directory miss and a directory that cannot be reached both mean
    /// the sender is never invoked; the XP gain stays committed regardless.
    async fn resolve_destination(
        &self,
        identity: &Identity,
        display_name: &str,
    ) -> Option<String> {
        match self.resolver.resolve(display_name).await {
            Ok(address) => address,
            Err(e) => {
                error!(identity = %identity, error = %e, "address resolution failed");
                None
            }
        }
    }

    fn report_from(outcome: RewardOutcome) -> RewardReport {
        match outcome {
            RewardOutcome::Paid { amount, receipt_id } => {
                RewardReport::Delivered { amount, receipt_id }
            }
            RewardOutcome::Failed { reason } => RewardReport::Undelivered { reason },
        }
    }
}
