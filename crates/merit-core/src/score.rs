//! Activity scoring: observed content → XP delta.

use serde::{Deserialize, Serialize};

/// Minimum token count for an activity event to earn any XP.
pub const DEFAULT_MIN_TOKENS: usize = 2;

/// Deterministic scoring rule for one unit of activity.
///
/// Content is split on whitespace; events below the token floor score zero
/// so that bare reactions and one-word replies earn nothing (and trigger no
/// ledger write at all). Command/control messages are filtered by the
/// caller before scoring is ever invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityScorer {
    /// Events with fewer tokens than this score zero.
    pub min_tokens: usize,
}

impl Default for ActivityScorer {
    fn default() -> Self {
        Self {
            min_tokens: DEFAULT_MIN_TOKENS,
        }
    }
}

impl ActivityScorer {
    /// Scorer with a custom token floor.
    pub fn with_min_tokens(min_tokens: usize) -> Self {
        Self { min_tokens }
    }

    /// XP earned by one piece of content: the token count, or zero below
    /// the floor.
    pub fn score(&self, content: &str) -> u64 {
        let tokens = content.split_whitespace().count();
        if tokens < self.min_tokens {
            0
        } else {
            tokens as u64
        }
    }
}
