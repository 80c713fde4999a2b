//! Level transition detection.
//!
//! A transition compares a before/after XP pair for one identity. Detection
//! is pure; it can be exercised in tests without any ledger or network.

use serde::{Deserialize, Serialize};

use crate::curve::ProgressionCurve;
use crate::error::{MeritError, Result};
use crate::types::Identity;

/// The before/after comparison of one ledger update.
///
/// Ephemeral: computed, acted on, and dropped. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTransition {
    /// Whose XP changed.
    pub identity: Identity,

    /// XP before the update.
    pub old_xp: u64,

    /// XP after the update. Always `>= old_xp`.
    pub new_xp: u64,

    /// Level derived from `old_xp`.
    pub old_level: u64,

    /// Level derived from `new_xp`.
    pub new_level: u64,
}

impl LevelTransition {
    /// True when the update crossed at least one level boundary.
    pub fn is_reward_worthy(&self) -> bool {
        self.new_level > self.old_level
    }

    /// How many boundaries the update crossed. A single large activity
    /// event can cross several; the reward is still sized once, for the
    /// arrival level.
    pub fn levels_gained(&self) -> u64 {
        self.new_level - self.old_level
    }
}

impl ProgressionCurve {
    /// Compare a before/after XP pair and derive the level movement.
    ///
    /// Fails with [`MeritError::InvalidTransition`] when `new_xp < old_xp`:
    /// XP must never decrease, and a decrease indicates a ledger or caller
    /// bug that must not reach the dispatch path.
    pub fn detect(&self, identity: Identity, old_xp: u64, new_xp: u64) -> Result<LevelTransition> {
        if new_xp < old_xp {
            return Err(MeritError::InvalidTransition {
                identity,
                old_xp,
                new_xp,
            });
        }

        Ok(LevelTransition {
            old_level: self.level_of(old_xp),
            new_level: self.level_of(new_xp),
            identity,
            old_xp,
            new_xp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> ProgressionCurve {
        ProgressionCurve::default()
    }

    #[test]
    fn crossing_a_boundary_is_reward_worthy() {
        let t = curve().detect(Identity::new("u1"), 0, 20).unwrap();
        assert_eq!(t.old_level, 0);
        assert_eq!(t.new_level, 1);
        assert!(t.is_reward_worthy());
        assert_eq!(t.levels_gained(), 1);
    }

    #[test]
    fn staying_within_a_level_is_not() {
        let t = curve().detect(Identity::new("u1"), 15, 59).unwrap();
        assert_eq!(t.old_level, 1);
        assert_eq!(t.new_level, 1);
        assert!(!t.is_reward_worthy());
    }

    #[test]
    fn multi_level_jump_is_a_single_transition() {
        // 58 XP is level 1; +80 XP lands at 138, level 3.
        let t = curve().detect(Identity::new("u1"), 58, 138).unwrap();
        assert_eq!(t.old_level, 1);
        assert_eq!(t.new_level, 3);
        assert_eq!(t.levels_gained(), 2);
        assert!(t.is_reward_worthy());
    }

    #[test]
    fn detection_is_idempotent() {
        let a = curve().detect(Identity::new("u1"), 40, 90).unwrap();
        let b = curve().detect(Identity::new("u1"), 40, 90).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn decreasing_xp_is_rejected() {
        let err = curve().detect(Identity::new("u1"), 50, 49).unwrap_err();
        assert!(matches!(
            err,
            MeritError::InvalidTransition {
                old_xp: 50,
                new_xp: 49,
                ..
            }
        ));
    }

    #[test]
    fn unchanged_xp_is_a_valid_non_transition() {
        let t = curve().detect(Identity::new("u1"), 30, 30).unwrap();
        assert!(!t.is_reward_worthy());
        assert_eq!(t.levels_gained(), 0);
    }
}
