//! Delayed automated turns.
//!
//! The automated side never answers instantly: when its turn begins, the
//! session schedules the policy invocation a fixed delay in the future
//! (700 ms by default, the reference pacing). The scheduler is cooperative —
//! the driver polls it with the current time, nothing spawns threads — and
//! one-shot: at most one decision is pending, and a pending decision fires
//! only if the turn it was scheduled for is still the current one.
//!
//! ## Turn tokens
//!
//! Every turn change bumps the session's `TurnToken`. A pending entry
//! remembers the token it was scheduled under; `fire` compares tokens and
//! drops stale entries unfired, so a reset or a finished game can never be
//! mutated by a leftover timer.

use std::time::{Duration, Instant};

use tracing::debug;

/// Delay before an automated move is applied.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(700);

/// Identifies one turn for staleness checks. Monotonically increasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TurnToken(u64);

impl TurnToken {
    /// The token for the following turn.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    token: TurnToken,
    due: Instant,
}

/// One-shot, cancellable timer for the automated side's move.
#[derive(Clone, Debug)]
pub struct TurnScheduler {
    delay: Duration,
    pending: Option<Pending>,
}

impl TurnScheduler {
    /// Scheduler with the reference delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DELAY)
    }

    /// Scheduler with a custom delay (tests commonly use zero).
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule the automated decision for the turn identified by `token`.
    ///
    /// Replaces any previous entry: at most one decision is ever pending.
    pub fn schedule(&mut self, token: TurnToken, now: Instant) {
        self.pending = Some(Pending {
            token,
            due: now + self.delay,
        });
        debug!(?token, delay_ms = self.delay.as_millis() as u64, "computer move scheduled");
    }

    /// Drop any pending decision.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a decision is pending (stale or not).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Poll the timer. Returns true exactly once per scheduled turn: when
    /// the entry is due and was scheduled for the `current` turn. A pending
    /// entry for a superseded turn is discarded unfired.
    pub fn fire(&mut self, current: TurnToken, now: Instant) -> bool {
        match self.pending {
            Some(pending) if pending.token != current => {
                debug!(scheduled = ?pending.token, ?current, "stale computer move suppressed");
                self.pending = None;
                false
            }
            Some(pending) if now >= pending.due => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new()
    }
}
