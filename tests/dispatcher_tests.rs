//! Dispatcher integration tests: key resolution, repeat timing, and the
//! interaction between pause and repeat polling.

use std::time::{Duration, Instant};

use gridfall::engine::{GameEngine, NullAudio};
use gridfall::input::InputDispatcher;
use gridfall::types::{GameAction, InputEvent};

fn started_engine() -> GameEngine {
    let mut engine = GameEngine::new(12345, Box::new(NullAudio::new()));
    engine.start();
    engine
}

// The long auto-release stands in for a key that stays physically held;
// expiry behavior gets its own test below.
fn dispatcher() -> InputDispatcher {
    InputDispatcher::new()
        .with_timing(Duration::from_millis(200), Duration::from_millis(130))
        .with_auto_release(Duration::from_secs(60))
}

#[test]
fn test_default_bindings_cover_the_key_table() {
    let d = dispatcher();
    assert_eq!(d.action_for("Left"), Some(GameAction::MoveLeft));
    assert_eq!(d.action_for("Right"), Some(GameAction::MoveRight));
    assert_eq!(d.action_for("Up"), Some(GameAction::Rotate));
    assert_eq!(d.action_for("Down"), Some(GameAction::SoftDrop));
    assert_eq!(d.action_for("space"), Some(GameAction::HardDrop));
    assert_eq!(d.action_for("p"), Some(GameAction::Pause));
    assert_eq!(d.action_for("m"), Some(GameAction::Mute));
    assert_eq!(d.action_for("r"), Some(GameAction::Restart));
    assert_eq!(d.action_for("Escape"), None);
}

#[test]
fn test_repeat_timing_matches_wall_clock() {
    let mut engine = started_engine();
    let mut d = dispatcher();
    let t0 = Instant::now();

    d.dispatch("Left", InputEvent::Press, &mut engine, t0);

    // 50ms held: before the initial delay, nothing repeats.
    assert!(d.poll_held(&mut engine, t0 + Duration::from_millis(50)).is_empty());

    // 250ms held: past the 200ms delay, exactly one repeat.
    let fired = d.poll_held(&mut engine, t0 + Duration::from_millis(250));
    assert_eq!(fired.len(), 1);

    // 340ms held: the next 130ms interval boundary (200 + 130) has passed,
    // so exactly one more.
    let fired = d.poll_held(&mut engine, t0 + Duration::from_millis(340));
    assert_eq!(fired.len(), 1);
}

#[test]
fn test_repeat_is_frame_rate_independent() {
    // One slow poll must fire the same number of repeats as many fast ones.
    let t0 = Instant::now();
    let end = t0 + Duration::from_millis(600);

    let mut engine_a = started_engine();
    let mut slow = dispatcher();
    slow.dispatch("Right", InputEvent::Press, &mut engine_a, t0);
    let slow_count = slow.poll_held(&mut engine_a, end).len();

    let mut engine_b = started_engine();
    let mut fast = dispatcher();
    fast.dispatch("Right", InputEvent::Press, &mut engine_b, t0);
    let mut fast_count = 0;
    let mut now = t0;
    while now < end {
        now += Duration::from_millis(16);
        fast_count += fast.poll_held(&mut engine_b, now.min(end)).len();
    }

    assert_eq!(slow_count, fast_count);
}

#[test]
fn test_held_rotate_fires_only_on_press() {
    let mut engine = started_engine();
    let mut d = dispatcher();
    let t0 = Instant::now();

    d.dispatch("Up", InputEvent::Press, &mut engine, t0);
    let after_press = engine.active().unwrap().orientation();

    // Hold for a long time: no further rotations.
    for ms in (100..2000).step_by(100) {
        d.dispatch("Up", InputEvent::Held, &mut engine, t0 + Duration::from_millis(ms));
    }
    assert_eq!(engine.active().unwrap().orientation(), after_press);
}

#[test]
fn test_release_of_one_direction_keeps_the_other_repeating() {
    let mut engine = started_engine();
    let mut d = dispatcher();
    let t0 = Instant::now();

    d.dispatch("Left", InputEvent::Press, &mut engine, t0);
    d.dispatch("Down", InputEvent::Press, &mut engine, t0);
    d.dispatch("Left", InputEvent::Release, &mut engine, t0 + Duration::from_millis(10));

    let fired = d.poll_held(&mut engine, t0 + Duration::from_millis(250));
    assert_eq!(fired.as_slice(), &[GameAction::SoftDrop]);
}

#[test]
fn test_soft_drop_repeat_descends_piece() {
    let mut engine = started_engine();
    let mut d = dispatcher();
    let t0 = Instant::now();

    let y0 = engine.active().unwrap().pivot().y;
    d.dispatch("Down", InputEvent::Press, &mut engine, t0);
    d.poll_held(&mut engine, t0 + Duration::from_millis(250));
    // One press + one repeat: two rows down.
    assert_eq!(engine.active().unwrap().pivot().y, y0 + 2);
}

#[test]
fn test_pause_gates_repeats_until_unpaused() {
    let mut engine = started_engine();
    let mut d = dispatcher();
    let t0 = Instant::now();

    d.dispatch("Right", InputEvent::Press, &mut engine, t0);
    d.dispatch("p", InputEvent::Press, &mut engine, t0);

    assert!(d.poll_held(&mut engine, t0 + Duration::from_secs(2)).is_empty());

    // Unpause: the held key is still tracked and resumes repeating.
    d.dispatch("p", InputEvent::Press, &mut engine, t0 + Duration::from_secs(2));
    let fired = d.poll_held(&mut engine, t0 + Duration::from_secs(3));
    assert!(!fired.is_empty());
}

#[test]
fn test_single_tap_does_not_repeat_forever_without_release() {
    // Terminals without key-release support never deliver a Release event.
    // A single tap must go quiet once the auto-release timeout passes, not
    // keep firing for the rest of the game.
    let mut engine = started_engine();
    let mut d =
        InputDispatcher::new().with_timing(Duration::from_millis(200), Duration::from_millis(130));
    let t0 = Instant::now();

    d.dispatch("Right", InputEvent::Press, &mut engine, t0);

    let mut total = 0;
    let mut now = t0;
    let end = t0 + Duration::from_secs(30);
    while now < end {
        now += Duration::from_millis(16);
        total += d.poll_held(&mut engine, now).len();
    }
    assert_eq!(total, 0);
}

#[test]
fn test_held_key_survives_on_terminal_auto_repeat() {
    // With default timing, terminal auto-repeat presses arriving every
    // ~50ms keep the hold alive, and the dispatcher's own timer spaces the
    // repeats.
    let mut engine = started_engine();
    let mut d =
        InputDispatcher::new().with_timing(Duration::from_millis(200), Duration::from_millis(130));
    let t0 = Instant::now();

    d.dispatch("Down", InputEvent::Press, &mut engine, t0);
    let mut total = 0;
    for ms in (50..=650).step_by(50) {
        let now = t0 + Duration::from_millis(ms);
        d.dispatch("Down", InputEvent::Press, &mut engine, now);
        total += d.poll_held(&mut engine, now).len();
    }
    // Boundaries at 200, 330, 460 and 590 ms: four repeats in 650ms.
    assert_eq!(total, 4);
}

#[test]
fn test_mute_toggles_through_dispatch() {
    let mut engine = started_engine();
    let mut d = dispatcher();
    let now = Instant::now();

    assert!(!engine.is_muted());
    assert!(d.dispatch("m", InputEvent::Press, &mut engine, now));
    assert!(engine.is_muted());
    assert!(d.dispatch("m", InputEvent::Press, &mut engine, now));
    assert!(!engine.is_muted());
}

#[test]
fn test_restart_through_dispatch_resets_the_game() {
    let mut engine = started_engine();
    let mut d = dispatcher();
    let now = Instant::now();

    d.dispatch("space", InputEvent::Press, &mut engine, now);
    assert!(engine.board().occupied_count() > 0);

    assert!(d.dispatch("r", InputEvent::Press, &mut engine, now));
    assert_eq!(engine.board().occupied_count(), 0);
    assert_eq!(engine.score(), 0);
}
