//! Live game state and move application.
//!
//! ## GameState
//!
//! The single live instance per game: running total, active seat, outcome,
//! and move history. Mutated only by `apply_move`; everything else is
//! read-only observation for a presentation layer.
//!
//! ## Move results
//!
//! Rejections are discriminated but guaranteed no-ops: a presentation layer
//! that already disables illegal steps can ignore the `Err` arm entirely,
//! while tests assert the precise rejection. Once the outcome is set, every
//! further `apply_move` is refused — game over is monotonic.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::GameConfig;
use super::player::{Mode, Seat};

/// One applied move, for history and strip rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Seat that played the move.
    pub seat: Seat,
    /// Step value added.
    pub step: u32,
    /// Running total after the move.
    pub position: u32,
}

/// Why a move was refused. Every rejection leaves the state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The step is not one of the configured step values.
    StepNotAllowed,
    /// The step would move the total past the target.
    Overshoot,
    /// The game is already over.
    GameOver,
    /// The automated side is to move (session boundary only).
    NotYourTurn,
    /// No game is running (session boundary only).
    NoGame,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::StepNotAllowed => write!(f, "step is not one of the configured steps"),
            MoveError::Overshoot => write!(f, "step would move the total past the target"),
            MoveError::GameOver => write!(f, "the game is already over"),
            MoveError::NotYourTurn => write!(f, "the automated side is to move"),
            MoveError::NoGame => write!(f, "no game is running"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Result of a successfully applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Game continues; the other seat is now active.
    InProgress,
    /// The move reached the target and ended the game.
    GameOver {
        /// Seat that loses under the configured win condition.
        loser: Seat,
    },
}

/// The live game: position, active seat, outcome, and history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    config: GameConfig,
    mode: Mode,
    position: u32,
    active: Seat,
    loser: Option<Seat>,
    history: Vector<MoveRecord>,
}

impl GameState {
    /// Start a game from a validated configuration.
    #[must_use]
    pub fn new(config: GameConfig, mode: Mode) -> Self {
        Self {
            config,
            mode,
            position: 0,
            active: Seat::First,
            loser: None,
            history: Vector::new(),
        }
    }

    // === Observable state ===

    /// The configuration this game was started with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The mode this game was started in.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current running total.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Seat to move next. On a finished game this is still the seat that
    /// played the terminal move.
    #[must_use]
    pub fn active(&self) -> Seat {
        self.active
    }

    /// Display label for the active seat ("Player 1", "Computer", ...).
    #[must_use]
    pub fn active_label(&self) -> &'static str {
        self.mode.label(self.active)
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.loser.is_some()
    }

    /// The losing seat, once the game is over.
    #[must_use]
    pub fn loser(&self) -> Option<Seat> {
        self.loser
    }

    /// The winning seat, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        self.loser.map(Seat::other)
    }

    /// Applied moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Steps playable from the current position, in configured order.
    ///
    /// Empty once the game is over. This is what a presentation layer uses
    /// to enable its step buttons and what the policy's fallback tier scans.
    pub fn legal_steps(&self) -> impl Iterator<Item = u32> + '_ {
        let over = self.is_over();
        let position = self.position;
        let target = self.config.target();
        self.config
            .steps()
            .iter()
            .copied()
            .filter(move |&step| {
                !over && position.checked_add(step).is_some_and(|next| next <= target)
            })
    }

    // === Move application ===

    /// Apply one move for the active seat.
    ///
    /// `step` must be one of the configured steps and must not move the
    /// total past the target. On the terminal move the loser is the mover
    /// unless `last_move_wins`, in which case it is the opponent; the active
    /// seat is left pointing at the mover. Otherwise the active seat
    /// toggles.
    ///
    /// # Errors
    ///
    /// `StepNotAllowed`, `Overshoot`, or `GameOver`; rejections never mutate
    /// state.
    pub fn apply_move(&mut self, step: u32) -> Result<MoveOutcome, MoveError> {
        if self.loser.is_some() {
            return Err(MoveError::GameOver);
        }
        if !self.config.steps().contains(&step) {
            return Err(MoveError::StepNotAllowed);
        }
        let next = match self.position.checked_add(step) {
            Some(next) if next <= self.config.target() => next,
            _ => return Err(MoveError::Overshoot),
        };

        let mover = self.active;
        self.position = next;
        self.history.push_back(MoveRecord {
            seat: mover,
            step,
            position: next,
        });

        if next == self.config.target() {
            let loser = if self.config.last_move_wins() {
                mover.other()
            } else {
                mover
            };
            self.loser = Some(loser);
            debug!(position = next, loser = ?loser, "game over");
            return Ok(MoveOutcome::GameOver { loser });
        }

        self.active = mover.other();
        debug!(step, position = next, next_seat = ?self.active, "move applied");
        Ok(MoveOutcome::InProgress)
    }
}
