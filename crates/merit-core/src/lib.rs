//! # Merit Core
//!
//! Pure domain logic for the Merit leveling engine.
//!
//! This crate provides the fundamental building blocks:
//! - [`ProgressionCurve`] - XP → level mapping and its inverse thresholds
//! - [`LevelTransition`] - before/after comparison of a ledger update
//! - [`RewardSchedule`] - level → payment amount sizing
//! - [`ActivityScorer`] - activity content → XP delta
//! - [`MeritError`] - engine error types
//!
//! Everything here is side-effect free. Ledger access, address resolution
//! and payment sending live behind traits in the `merit-ledger` and
//! `merit-dispatch` crates.

pub mod curve;
pub mod error;
pub mod reward;
pub mod score;
pub mod transition;
pub mod types;

// Re-exports for convenience
pub use curve::ProgressionCurve;
pub use error::{MeritError, Result};
pub use reward::RewardSchedule;
pub use score::ActivityScorer;
pub use transition::LevelTransition;
pub use types::{Identity, RewardOutcome, UserProgress};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::curve::ProgressionCurve;
    pub use crate::error::{MeritError, Result};
    pub use crate::reward::RewardSchedule;
    pub use crate::score::ActivityScorer;
    pub use crate::transition::LevelTransition;
    pub use crate::types::{Identity, RewardOutcome, UserProgress};
}
