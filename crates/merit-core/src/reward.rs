//! Reward sizing.

use serde::{Deserialize, Serialize};

/// Default payout per level, in smallest payment units.
pub const DEFAULT_UNIT_REWARD: u64 = 218;

/// Pure mapping from an arrival level to a payment amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSchedule {
    /// Smallest-unit payout multiplied by the level reached.
    pub unit: u64,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT_REWARD,
        }
    }
}

impl RewardSchedule {
    /// Schedule with a custom per-level unit.
    pub fn with_unit(unit: u64) -> Self {
        Self { unit }
    }

    /// Amount owed for reaching `level`. Both operands are integers, so
    /// there is no rounding to argue about.
    pub fn reward_for(&self, level: u64) -> u64 {
        level * self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_unit_sizing() {
        let schedule = RewardSchedule::default();
        assert_eq!(schedule.reward_for(1), 218);
        assert_eq!(schedule.reward_for(3), 654);
    }

    #[test]
    fn strictly_increasing_in_level() {
        let schedule = RewardSchedule::default();
        for level in 1..100u64 {
            assert!(schedule.reward_for(level + 1) > schedule.reward_for(level));
        }
    }

    #[test]
    fn custom_unit() {
        let schedule = RewardSchedule::with_unit(10);
        assert_eq!(schedule.reward_for(5), 50);
    }
}
