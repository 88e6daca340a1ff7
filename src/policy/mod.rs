//! Move selection for the automated side.
//!
//! Policies are trait-based so tests and frontends can substitute the
//! opponent. The engine ships two: the perfect-play `OptimalPolicy` the
//! vs-computer mode uses by default, and a deliberately weak `FirstLegal`
//! baseline.

use tracing::debug;

use crate::analysis::LosingTable;
use crate::core::GameState;

/// Chooses the automated side's step.
pub trait MovePolicy {
    /// Select a step to play from the current position, or `None` when no
    /// step is legal (the game is over, or no configured step fits).
    ///
    /// `table` must have been computed for the state's configuration.
    /// Implementations must be deterministic over the configured step order;
    /// reproducibility of vs-computer games depends on it.
    fn choose(&self, state: &GameState, table: &LosingTable) -> Option<u32>;
}

/// Perfect play: hand the opponent a losing position whenever one is
/// reachable.
///
/// Two tiers, first match wins, scanning steps in configured order:
/// 1. a step landing on a position that is losing for the opponent;
/// 2. failing that, any legal step — the game is already decided under
///    optimal opposition, so the choice cannot matter.
#[derive(Clone, Copy, Debug, Default)]
pub struct OptimalPolicy;

impl MovePolicy for OptimalPolicy {
    fn choose(&self, state: &GameState, table: &LosingTable) -> Option<u32> {
        debug_assert_eq!(table.target(), state.config().target());

        if let Some(step) = state
            .legal_steps()
            .find(|&step| table.is_losing(state.position() + step))
        {
            debug!(step, position = state.position(), "winning handoff found");
            return Some(step);
        }

        // Already lost under optimal opposition; any legal step will do.
        state.legal_steps().next()
    }
}

/// Plays the first legal step, ignoring the analysis entirely.
///
/// A predictable punching bag for tests and demos.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl MovePolicy for FirstLegal {
    fn choose(&self, state: &GameState, _table: &LosingTable) -> Option<u32> {
        state.legal_steps().next()
    }
}
