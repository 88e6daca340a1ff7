//! The full screen flow as one driveable facade.
//!
//! `Session` owns everything the reference application spreads across its
//! screens: the validated configuration, the live game, the losing-table
//! cache, the turn scheduler, and the automated player's policy. A
//! presentation layer renders the observable state and forwards three kinds
//! of events — configuration submissions, mode selections, and step clicks —
//! plus a periodic `tick(now)` so pending automated moves can fire.
//!
//! ## Flow
//!
//! `Configuring → ModeSelect → InProgress → GameOver`, with `reset` leading
//! back to `Configuring` from anywhere. The previous configuration is not
//! retained across a reset; a fresh configuration cycle runs again.

use std::time::Instant;

use tracing::debug;

use crate::analysis::TableCache;
use crate::core::{ConfigError, GameConfig, GameState, Mode, MoveError, MoveOutcome};
use crate::policy::{MovePolicy, OptimalPolicy};
use crate::schedule::{TurnScheduler, TurnToken};

/// Where the session currently is in the screen flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Awaiting a valid configuration.
    Configuring,
    /// Configured; awaiting a mode choice.
    ModeSelect,
    /// A game is running.
    InProgress,
    /// The game ended; only `reset` leaves this phase.
    GameOver,
}

/// Drives configuration, mode selection, the live game, and the delayed
/// automated opponent.
pub struct Session {
    config: Option<GameConfig>,
    game: Option<GameState>,
    cache: TableCache,
    scheduler: TurnScheduler,
    token: TurnToken,
    policy: Box<dyn MovePolicy>,
}

impl Session {
    /// Session with the optimal opponent and the reference delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(Box::new(OptimalPolicy))
    }

    /// Session with a custom opponent policy.
    #[must_use]
    pub fn with_policy(policy: Box<dyn MovePolicy>) -> Self {
        Self {
            config: None,
            game: None,
            cache: TableCache::new(),
            scheduler: TurnScheduler::new(),
            token: TurnToken::default(),
            policy,
        }
    }

    /// Replace the scheduler (tests shorten or zero the delay).
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: TurnScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    // === Observable state ===

    /// Current phase of the flow.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (&self.config, &self.game) {
            (None, _) => Phase::Configuring,
            (Some(_), None) => Phase::ModeSelect,
            (Some(_), Some(game)) if game.is_over() => Phase::GameOver,
            (Some(_), Some(_)) => Phase::InProgress,
        }
    }

    /// The validated configuration, once accepted.
    #[must_use]
    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    /// The live (or finished) game.
    #[must_use]
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Whether an automated move is waiting on its delay.
    #[must_use]
    pub fn is_computer_thinking(&self) -> bool {
        self.scheduler.is_pending()
    }

    // === Events ===

    /// Validate raw configuration input and, when no game is live, accept
    /// it. Re-submitting while on the mode-select screen replaces the
    /// configuration; a running game keeps its own until `reset`.
    ///
    /// # Errors
    ///
    /// `ConfigError` when the input fails validation; the phase is
    /// unchanged.
    pub fn configure(
        &mut self,
        target_input: &str,
        steps_input: &str,
        last_move_wins: bool,
    ) -> Result<(), ConfigError> {
        let config =
            GameConfig::from_inputs(target_input, steps_input)?.with_last_move_wins(last_move_wins);
        if self.game.is_none() {
            debug!(race_to = config.target(), "configuration accepted");
            self.config = Some(config);
        }
        Ok(())
    }

    /// Choose a mode and start the game.
    ///
    /// Ignored unless a configuration has been accepted and no game is
    /// running. The first seat (the human, in vs-computer mode) opens;
    /// nothing is scheduled until the turn actually passes to the
    /// automated side.
    pub fn select_mode(&mut self, mode: Mode) {
        if self.game.is_some() {
            return;
        }
        let Some(config) = self.config.clone() else {
            return;
        };

        // Warm the table for this configuration up front.
        self.cache.get_or_compute(&config);
        self.game = Some(GameState::new(config, mode));
        self.token = self.token.next();
        self.scheduler.cancel();
        debug!(?mode, "game started");
    }

    /// Apply a step submitted by the presentation layer for the seat whose
    /// turn it is. In vs-computer mode only the human comes through here;
    /// the automated side moves via `tick`.
    ///
    /// # Errors
    ///
    /// `MoveError` per the state machine, plus `NotYourTurn` when the click
    /// lands during the automated side's turn and `NoGame` outside a game.
    /// Every error is a no-op.
    pub fn play(&mut self, step: u32, now: Instant) -> Result<MoveOutcome, MoveError> {
        let Some(game) = self.game.as_mut() else {
            return Err(MoveError::NoGame);
        };
        if game.mode().is_computer(game.active()) {
            return Err(MoveError::NotYourTurn);
        }

        let outcome = game.apply_move(step)?;
        self.advance_turn(now);
        Ok(outcome)
    }

    /// Poll the scheduler; applies the automated move when its delay has
    /// elapsed and the scheduled turn is still current.
    ///
    /// Returns the applied outcome, or `None` when nothing fired.
    pub fn tick(&mut self, now: Instant) -> Option<MoveOutcome> {
        if !self.scheduler.fire(self.token, now) {
            return None;
        }

        let step = {
            let game = self.game.as_ref()?;
            // The token discipline already rules these out; refuse anyway
            // rather than trust it.
            if game.is_over() || !game.mode().is_computer(game.active()) {
                return None;
            }
            let table = self.cache.get_or_compute(game.config());
            self.policy.choose(game, table)?
        };

        let outcome = self.game.as_mut()?.apply_move(step).ok()?;
        debug!(step, "computer move applied");
        self.advance_turn(now);
        Some(outcome)
    }

    /// Abandon everything and return to configuration entry.
    ///
    /// Cancels any pending automated move. Computed tables stay cached for
    /// the next game.
    pub fn reset(&mut self) {
        self.config = None;
        self.game = None;
        self.token = self.token.next();
        self.scheduler.cancel();
        debug!("session reset");
    }

    /// Bump the turn token and (re)arm or disarm the scheduler for the new
    /// turn.
    fn advance_turn(&mut self, now: Instant) {
        self.token = self.token.next();
        let Some(game) = self.game.as_ref() else {
            return;
        };
        if !game.is_over() && game.mode().is_computer(game.active()) {
            self.scheduler.schedule(self.token, now);
        } else {
            self.scheduler.cancel();
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Seat;
    use std::time::Duration;

    fn session() -> Session {
        Session::new().with_scheduler(TurnScheduler::with_delay(Duration::ZERO))
    }

    #[test]
    fn test_phase_flow() {
        let mut session = session();
        let now = Instant::now();
        assert_eq!(session.phase(), Phase::Configuring);

        session.configure("2", "2", false).unwrap();
        assert_eq!(session.phase(), Phase::ModeSelect);

        session.select_mode(Mode::TwoPlayer);
        assert_eq!(session.phase(), Phase::InProgress);

        session.play(2, now).unwrap();
        assert_eq!(session.phase(), Phase::GameOver);

        session.reset();
        assert_eq!(session.phase(), Phase::Configuring);
        assert!(session.config().is_none());
        assert!(session.game().is_none());
    }

    #[test]
    fn test_invalid_configuration_keeps_phase() {
        let mut session = session();
        assert_eq!(
            session.configure("13", "", false),
            Err(ConfigError::InvalidSteps)
        );
        assert_eq!(session.phase(), Phase::Configuring);
    }

    #[test]
    fn test_reconfigure_before_mode_select() {
        let mut session = session();
        session.configure("13", "1,2", false).unwrap();
        session.configure("21", "1,2,3", true).unwrap();

        let config = session.config().unwrap();
        assert_eq!(config.target(), 21);
        assert!(config.last_move_wins());
    }

    #[test]
    fn test_configure_ignored_while_game_live() {
        let mut session = session();
        session.configure("13", "1,2", false).unwrap();
        session.select_mode(Mode::TwoPlayer);

        session.configure("21", "1,2,3", false).unwrap();
        assert_eq!(session.config().unwrap().target(), 13);
        assert_eq!(session.game().unwrap().config().target(), 13);
    }

    #[test]
    fn test_select_mode_requires_config() {
        let mut session = session();
        session.select_mode(Mode::TwoPlayer);
        assert_eq!(session.phase(), Phase::Configuring);
        assert!(session.game().is_none());
    }

    #[test]
    fn test_play_without_game() {
        let mut session = session();
        assert_eq!(
            session.play(1, Instant::now()),
            Err(MoveError::NoGame)
        );
    }

    #[test]
    fn test_human_cannot_move_for_computer() {
        let mut session = session();
        let now = Instant::now();
        session.configure("13", "1,2", false).unwrap();
        session.select_mode(Mode::VsComputer);

        session.play(1, now).unwrap();
        // It is the computer's turn now; a stray click is refused.
        assert_eq!(session.play(1, now), Err(MoveError::NotYourTurn));
        assert_eq!(session.game().unwrap().position(), 1);
    }

    #[test]
    fn test_two_player_mode_never_schedules() {
        let mut session = session();
        let now = Instant::now();
        session.configure("13", "1,2", false).unwrap();
        session.select_mode(Mode::TwoPlayer);

        session.play(1, now).unwrap();
        assert!(!session.is_computer_thinking());
        assert_eq!(session.tick(now), None);
        assert_eq!(session.game().unwrap().position(), 1);
    }

    #[test]
    fn test_computer_answers_after_tick() {
        let mut session = session();
        let now = Instant::now();
        session.configure("13", "1,2", false).unwrap();
        session.select_mode(Mode::VsComputer);

        session.play(1, now).unwrap();
        assert!(session.is_computer_thinking());

        let outcome = session.tick(now).unwrap();
        assert_eq!(outcome, MoveOutcome::InProgress);
        // From 1 the optimal answer is +2, landing on the losing 3.
        assert_eq!(session.game().unwrap().position(), 3);
        assert_eq!(session.game().unwrap().active(), Seat::First);
        assert!(!session.is_computer_thinking());
    }

    #[test]
    fn test_reset_cancels_pending_computer_move() {
        let mut session = session();
        let now = Instant::now();
        session.configure("13", "1,2", false).unwrap();
        session.select_mode(Mode::VsComputer);
        session.play(1, now).unwrap();
        assert!(session.is_computer_thinking());

        session.reset();
        assert!(!session.is_computer_thinking());
        assert_eq!(session.tick(now), None);
        assert!(session.game().is_none());
    }
}
