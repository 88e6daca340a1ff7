//! # dontsay
//!
//! Engine for the "Don't Say N!" counting duel: two players alternately add
//! one of a fixed set of step values to a running total, and whoever says
//! the forbidden target number loses — or wins, under the last-move-wins
//! variant.
//!
//! ## Design Principles
//!
//! 1. **Engine only**: no rendering, no input handling. A presentation
//!    layer reads the observable state and forwards events.
//!
//! 2. **Pure transitions**: one `GameState` value, mutated only by
//!    `apply_move`; every rejection is a guaranteed no-op.
//!
//! 3. **Deterministic opponent**: the automated player is a pure function
//!    of position and analysis table, never randomized, so vs-computer
//!    games replay identically.
//!
//! 4. **Cooperative time**: the delayed computer move is a polled, one-shot,
//!    token-keyed timer; the driver owns the clock and tests control it.
//!
//! ## Modules
//!
//! - `core`: seats, modes, configuration, game state, move application
//! - `analysis`: losing-position table and memo cache
//! - `policy`: automated move selection
//! - `schedule`: delayed-turn scheduling
//! - `session`: the configure → mode → play → game-over flow as one facade

pub mod core;
pub mod analysis;
pub mod policy;
pub mod schedule;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameConfig, GameState, Mode, MoveError, MoveOutcome, MoveRecord, Seat, Steps,
};

pub use crate::analysis::{LosingTable, TableCache};

pub use crate::policy::{FirstLegal, MovePolicy, OptimalPolicy};

pub use crate::schedule::{TurnScheduler, TurnToken, DEFAULT_DELAY};

pub use crate::session::{Phase, Session};
