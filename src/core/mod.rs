//! Core engine types: seats, modes, configuration, game state.
//!
//! The fundamental building blocks; `analysis`, `policy`, and `session`
//! build on these.

pub mod config;
pub mod player;
pub mod state;

pub use config::{ConfigError, GameConfig, Steps};
pub use player::{Mode, Seat};
pub use state::{GameState, MoveError, MoveOutcome, MoveRecord};
