//! At-most-once reward dispatch.

use std::sync::Arc;

use merit_core::{Identity, LevelTransition, RewardOutcome, RewardSchedule};
use uuid::Uuid;

use crate::sender::PaymentSender;

/// Ties one reward-worthy transition to at most one payment attempt.
///
/// Sizing depends only on the arrival level, so re-deriving a fresh
/// transition and dispatching again attempts the same amount; whether such
/// a retry duplicates a real payment is a property of the payment medium,
/// not of this dispatcher, which never retries on its own.
pub struct RewardDispatcher {
    schedule: RewardSchedule,
    sender: Arc<dyn PaymentSender>,
}

impl RewardDispatcher {
    /// Dispatcher sizing rewards with `schedule` and delivering through
    /// `sender`.
    pub fn new(schedule: RewardSchedule, sender: Arc<dyn PaymentSender>) -> Self {
        Self { schedule, sender }
    }

    /// The schedule in use (for presentation of amounts).
    pub fn schedule(&self) -> RewardSchedule {
        self.schedule
    }

    /// Attempt delivery for a reward-worthy transition.
    ///
    /// Exactly one sender call is made. Any sender failure is captured
    /// into [`RewardOutcome::Failed`] rather than propagated: the level-up
    /// is already committed in the ledger and must stay acknowledged even
    /// when the reward does not arrive.
    pub async fn dispatch(
        &self,
        transition: &LevelTransition,
        destination: &str,
    ) -> RewardOutcome {
        if !transition.is_reward_worthy() {
            return RewardOutcome::Failed {
                reason: "transition did not cross a level boundary".to_string(),
            };
        }

        self.dispatch_for_level(&transition.identity, transition.new_level, destination)
            .await
    }

    /// Attempt delivery sized for a bare level, outside any transition.
    ///
    /// Used by the out-of-band notification path, which re-announces an
    /// identity's standing on demand and has no before/after XP pair to
    /// compare.
    pub async fn dispatch_for_level(
        &self,
        identity: &Identity,
        level: u64,
        destination: &str,
    ) -> RewardOutcome {
        let amount = self.schedule.reward_for(level);
        let attempt_id = Uuid::new_v4();

        tracing::info!(
            %attempt_id,
            identity = %identity,
            level,
            amount,
            "dispatching level-up reward"
        );

        match self.sender.send(destination, amount).await {
            Ok(receipt_id) => {
                tracing::info!(%attempt_id, receipt_id, "reward delivered");
                RewardOutcome::Paid { amount, receipt_id }
            }
            Err(e) => {
                tracing::error!(%attempt_id, error = %e, "reward delivery failed");
                RewardOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use merit_core::{Identity, MeritError, ProgressionCurve, Result};
    use tokio::sync::Mutex;

    /// Sender that records every call and answers from a script.
    struct FakeSender {
        calls: Mutex<Vec<(String, u64)>>,
        fail: bool,
    }

    impl FakeSender {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail,
            })
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

    fn transition(old_xp: u64, new_xp: u64) -> LevelTransition {
        ProgressionCurve::default()
            .detect(Identity::new("fren"), old_xp, new_xp)
            .unwrap()
    }

    #[tokio::test]
    async fn successful_dispatch_pays_arrival_level() {
        let sender = FakeSender::new(false);
        let dispatcher = RewardDispatcher::new(RewardSchedule::default(), sender.clone());

        let outcome = dispatcher.dispatch(&transition(0, 20), "1Addr").await;

        assert_eq!(
            outcome,
            RewardOutcome::Paid {
                amount: 218,
                receipt_id: "receipt-1".to_string()
            }
        );
        assert_eq!(sender.calls.lock().await.as_slice(), &[("1Addr".to_string(), 218)]);
    }

    #[tokio::test]
    async fn multi_level_jump_pays_once_for_arrival_level() {
        let sender = FakeSender::new(false);
        let dispatcher = RewardDispatcher::new(RewardSchedule::default(), sender.clone());

        // Level 1 → 3 in one event: one payment of 3 * 218, not two.
        let outcome = dispatcher.dispatch(&transition(58, 138), "1Addr").await;

        assert!(matches!(outcome, RewardOutcome::Paid { amount: 654, .. }));
        assert_eq!(sender.calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn sender_failure_is_captured_not_propagated() {
        let sender = FakeSender::new(true);
        let dispatcher = RewardDispatcher::new(RewardSchedule::default(), sender.clone());

        let outcome = dispatcher.dispatch(&transition(0, 20), "1Addr").await;

        assert!(matches!(outcome, RewardOutcome::Failed { .. }));
        // Exactly one attempt, no internal retry.
        assert_eq!(sender.calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn non_worthy_transition_never_reaches_sender() {
        let sender = FakeSender::new(false);
        let dispatcher = RewardDispatcher::new(RewardSchedule::default(), sender.clone());

        let outcome = dispatcher.dispatch(&transition(15, 30), "1Addr").await;

        assert!(matches!(outcome, RewardOutcome::Failed { .. }));
        assert!(sender.calls.lock().await.is_empty());
    }
}
