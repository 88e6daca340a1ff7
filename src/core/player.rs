//! Seats and game modes.
//!
//! ## Seat
//!
//! The two alternating player identities. Seats are mode-agnostic; what a
//! seat is called on screen depends on the `Mode`.
//!
//! ## Mode
//!
//! Hotseat two-player or versus the automated opponent. Chosen after
//! configuration and fixed for the lifetime of a game.

use serde::{Deserialize, Serialize};

/// One of the two alternating player identities.
///
/// `First` always opens the game. In vs-computer mode the human holds
/// `First` and the automated opponent holds `Second`.
///
/// ```
/// use dontsay::Seat;
///
/// assert_eq!(Seat::First.other(), Seat::Second);
/// assert_eq!(Seat::Second.other(), Seat::First);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The seat that moves first.
    First,
    /// The seat that moves second.
    Second,
}

impl Seat {
    /// The opposing seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// Game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Two humans sharing one device.
    TwoPlayer,
    /// A human in the first seat against the automated opponent.
    VsComputer,
}

impl Mode {
    /// Display label for a seat under this mode.
    #[must_use]
    pub const fn label(self, seat: Seat) -> &'static str {
        match (self, seat) {
            (Mode::TwoPlayer, Seat::First) => "Player 1",
            (Mode::TwoPlayer, Seat::Second) => "Player 2",
            (Mode::VsComputer, Seat::First) => "Player",
            (Mode::VsComputer, Seat::Second) => "Computer",
        }
    }

    /// Whether `seat` is driven by the automated opponent under this mode.
    #[must_use]
    pub const fn is_computer(self, seat: Seat) -> bool {
        matches!((self, seat), (Mode::VsComputer, Seat::Second))
    }
}
