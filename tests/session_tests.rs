//! Session integration tests.
//!
//! Drives the configure → mode → play → game-over flow the way a
//! presentation layer would: submitting events and polling `tick` with an
//! explicit clock. The delayed automated opponent and its cancellation
//! guarantees are exercised with the real 700 ms delay, simulated by
//! advancing the polled `Instant` rather than sleeping.

use std::time::{Duration, Instant};

use dontsay::{Mode, MoveError, MoveOutcome, Phase, Seat, Session, TurnScheduler, DEFAULT_DELAY};

fn vs_computer_session() -> (Session, Instant) {
    let mut session = Session::new();
    session.configure("13", "1,2", false).unwrap();
    session.select_mode(Mode::VsComputer);
    (session, Instant::now())
}

// =============================================================================
// Delay Semantics
// =============================================================================

#[test]
fn test_computer_waits_out_its_delay() {
    let (mut session, t0) = vs_computer_session();

    session.play(1, t0).unwrap();
    assert!(session.is_computer_thinking());

    // Not yet due: polling is a no-op.
    assert_eq!(session.tick(t0), None);
    assert_eq!(session.tick(t0 + DEFAULT_DELAY - Duration::from_millis(1)), None);
    assert_eq!(session.game().unwrap().position(), 1);

    // Due: the optimal answer (+2, onto the losing 3) lands exactly once.
    let outcome = session.tick(t0 + DEFAULT_DELAY);
    assert_eq!(outcome, Some(MoveOutcome::InProgress));
    assert_eq!(session.game().unwrap().position(), 3);
    assert_eq!(session.tick(t0 + DEFAULT_DELAY), None);
}

#[test]
fn test_full_game_against_the_clock() {
    let (mut session, t0) = vs_computer_session();
    let mut now = t0;

    // 0 is a losing start in the race to 13: however the human plays (here
    // always the first legal step), the computer wins.
    loop {
        let step = session
            .game()
            .unwrap()
            .legal_steps()
            .next()
            .expect("human always has a step in this race");
        now += Duration::from_secs(1);
        if let MoveOutcome::GameOver { .. } = session.play(step, now).unwrap() {
            break;
        }

        now += DEFAULT_DELAY;
        if let Some(MoveOutcome::GameOver { .. }) = session.tick(now) {
            break;
        }
    }

    assert_eq!(session.phase(), Phase::GameOver);
    let game = session.game().unwrap();
    assert_eq!(game.position(), 13);
    assert_eq!(game.loser(), Some(Seat::First), "the human loses");
}

// =============================================================================
// Cancellation Guarantees
// =============================================================================

#[test]
fn test_reset_mid_delay_suppresses_the_move() {
    let (mut session, t0) = vs_computer_session();
    session.play(1, t0).unwrap();

    session.reset();

    assert_eq!(session.tick(t0 + DEFAULT_DELAY), None);
    assert_eq!(session.phase(), Phase::Configuring);
    assert!(session.game().is_none());
}

#[test]
fn test_stale_decision_never_reaches_a_new_game() {
    let (mut session, t0) = vs_computer_session();
    session.play(1, t0).unwrap();

    // Restart and reach the same screen again before the delay elapses.
    session.reset();
    session.configure("13", "1,2", false).unwrap();
    session.select_mode(Mode::VsComputer);

    // The old pending decision must not fire into the fresh game.
    assert_eq!(session.tick(t0 + DEFAULT_DELAY), None);
    assert_eq!(session.game().unwrap().position(), 0);

    // The fresh game schedules and fires on its own timeline.
    let t1 = t0 + Duration::from_secs(5);
    session.play(2, t1).unwrap();
    assert_eq!(session.tick(t1 + DEFAULT_DELAY), Some(MoveOutcome::InProgress));
    // From 2 the optimal answer is +1, onto the losing 3.
    assert_eq!(session.game().unwrap().position(), 3);
}

#[test]
fn test_terminal_human_move_disarms_scheduler() {
    let mut session = Session::new().with_scheduler(TurnScheduler::with_delay(Duration::ZERO));
    let t0 = Instant::now();
    session.configure("3", "1,2", false).unwrap();
    session.select_mode(Mode::VsComputer);

    session.play(1, t0).unwrap();
    session.tick(t0).unwrap(); // computer answers 1 → 2, the losing handoff
    let position = session.game().unwrap().position();
    assert!(position < 3, "game still running at {position}");

    // Human says the forbidden number; nothing may remain scheduled.
    let outcome = session.play(3 - position, t0).unwrap();
    assert!(matches!(outcome, MoveOutcome::GameOver { .. }));
    assert!(!session.is_computer_thinking());
    assert_eq!(session.tick(t0), None);
    assert_eq!(session.phase(), Phase::GameOver);
}

#[test]
fn test_no_move_accepted_after_game_over() {
    let mut session = Session::new().with_scheduler(TurnScheduler::with_delay(Duration::ZERO));
    let t0 = Instant::now();
    session.configure("2", "2", false).unwrap();
    session.select_mode(Mode::TwoPlayer);

    session.play(2, t0).unwrap();
    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.play(2, t0), Err(MoveError::GameOver));
}

// =============================================================================
// Mode Discipline
// =============================================================================

#[test]
fn test_two_player_games_never_think() {
    let mut session = Session::new();
    let t0 = Instant::now();
    session.configure("13", "1,2", false).unwrap();
    session.select_mode(Mode::TwoPlayer);

    session.play(1, t0).unwrap();
    session.play(2, t0).unwrap();
    assert!(!session.is_computer_thinking());
    assert_eq!(session.tick(t0 + DEFAULT_DELAY), None);
    assert_eq!(session.game().unwrap().position(), 3);
}

#[test]
fn test_mode_is_fixed_once_chosen() {
    let (mut session, t0) = vs_computer_session();
    session.play(1, t0).unwrap();

    // A second selection while the game runs is ignored.
    session.select_mode(Mode::TwoPlayer);
    assert_eq!(session.game().unwrap().mode(), Mode::VsComputer);

    // And the pending computer move still fires.
    assert_eq!(session.tick(t0 + DEFAULT_DELAY), Some(MoveOutcome::InProgress));
}
