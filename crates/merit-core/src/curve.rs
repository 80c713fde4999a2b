//! The progression curve: XP → level and its inverse thresholds.

/// Default divisor for the level formula (`level = floor(sqrt(xp / K))`).
pub const DEFAULT_XP_DIVISOR: u64 = 15;

/// Pure mapping between accumulated XP and level.
///
/// `level_of` and `xp_to_reach` are exact inverses at the boundaries: for
/// every level `L >= 1`, `level_of(xp_to_reach(L) - 1) == L - 1` and
/// `level_of(xp_to_reach(L)) == L`. The two functions never disagree about
/// which level a given XP value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionCurve {
    // The `K` in `level = floor(sqrt(xp / K))`. Private: `with_divisor`
    // is the only way to set it, keeping zero unrepresentable.
    divisor: u64,
}

impl Default for ProgressionCurve {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_XP_DIVISOR,
        }
    }
}

impl ProgressionCurve {
    /// Curve with a custom divisor. A larger divisor slows leveling.
    pub fn with_divisor(divisor: u64) -> Self {
        assert!(divisor > 0, "xp divisor must be positive");
        Self { divisor }
    }

    /// The divisor in use.
    pub fn divisor(&self) -> u64 {
        self.divisor
    }

    /// The level a given XP total sits at.
    ///
    /// Integer throughout: `isqrt(xp / K)` equals `floor(sqrt(xp / K))`
    /// exactly, since flooring the radicand before the root cannot change
    /// the floored result.
    pub fn level_of(&self, xp: u64) -> u64 {
        (xp / self.divisor).isqrt()
    }

    /// Minimum XP at which `level_of` first reports `level`.
    pub fn xp_to_reach(&self, level: u64) -> u64 {
        self.divisor * level * level
    }

    /// XP still missing from `xp` to the next level boundary.
    pub fn xp_to_next(&self, xp: u64) -> u64 {
        self.xp_to_reach(self.level_of(xp) + 1) - xp
    }
}
