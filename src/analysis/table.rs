//! Losing-position analysis.
//!
//! ## The table
//!
//! `is_losing[p]` answers: does the player about to move from total `p` lose
//! under optimal play on both sides? Evaluated by dynamic programming from
//! `target - 1` down to `0`: a position is winning iff some legal step lands
//! on a position that is losing for the opponent.
//!
//! ## Win-condition variants
//!
//! The terminal base case encodes the variant. Under last-move-wins the
//! player to move at `target` has just been beaten by the opponent's final
//! move (`winning = false`), so landing on `target` is attractive. Under the
//! default rules the opponent just said the forbidden number
//! (`winning = true`), so landing on `target` is what both sides avoid.
//!
//! Tables are pure functions of the configuration; `TableCache` memoizes
//! them per configuration key.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::GameConfig;

/// Losing-position table for one configuration.
///
/// ```
/// use dontsay::{GameConfig, LosingTable};
///
/// // Race to 13 with steps 1 and 2: multiples of 3 are losing.
/// let table = LosingTable::compute(&GameConfig::default());
/// assert!(table.is_losing(0));
/// assert!(table.is_losing(12));
/// assert!(!table.is_losing(5));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LosingTable {
    target: u32,
    is_losing: Vec<bool>,
}

impl LosingTable {
    /// Compute the table for a validated configuration.
    ///
    /// O(target × steps) time, O(target) memory.
    #[must_use]
    pub fn compute(config: &GameConfig) -> Self {
        let target = config.target() as usize;

        let mut winning = vec![false; target + 1];
        winning[target] = !config.last_move_wins();

        for position in (0..target).rev() {
            winning[position] = config.steps().iter().any(|&step| {
                let next = position + step as usize;
                next <= target && !winning[next]
            });
        }

        trace!(positions = target + 1, "losing table computed");
        Self {
            target: config.target(),
            is_losing: winning.iter().map(|&w| !w).collect(),
        }
    }

    /// Whether the player about to move from `position` loses under optimal
    /// play. `position` must lie within `0..=target`.
    #[must_use]
    pub fn is_losing(&self, position: u32) -> bool {
        self.is_losing[position as usize]
    }

    /// The target this table was computed for.
    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// All entries, index = position.
    #[must_use]
    pub fn entries(&self) -> &[bool] {
        &self.is_losing
    }
}

/// Configuration-keyed memo of computed tables.
///
/// Recomputation happens only when the configuration actually changed
/// (different target, steps, or variant); repeat lookups are O(1).
#[derive(Clone, Debug, Default)]
pub struct TableCache {
    tables: FxHashMap<GameConfig, LosingTable>,
}

impl TableCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the table for `config`, computing it on first use.
    pub fn get_or_compute(&mut self, config: &GameConfig) -> &LosingTable {
        self.tables
            .entry(config.clone())
            .or_insert_with(|| LosingTable::compute(config))
    }

    /// Number of distinct configurations cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether nothing has been computed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
