//! Input dispatcher: physical keys to logical actions to commands, with a
//! polling-based key-repeat timer.
//!
//! Repeat is pure timestamp arithmetic against instants supplied by the
//! caller, so behavior does not depend on frame rate: once a repeatable key
//! has been held past the initial delay, one repeat is due per interval of
//! elapsed hold time.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use gridfall_engine::{command_for, Command, GameEngine};
use gridfall_types::{
    GameAction, InputEvent, DEFAULT_AUTO_RELEASE_MS, DEFAULT_REPEAT_DELAY_MS,
    DEFAULT_REPEAT_INTERVAL_MS,
};

/// Hold-tracking for one repeatable action.
#[derive(Debug, Clone, Copy)]
struct HeldState {
    pressed_at: Instant,
    last_seen: Instant,
    repeats_fired: u32,
}

/// Maps physical key names to logical actions, owns the command table, and
/// re-executes repeatable actions while their key stays held.
pub struct InputDispatcher {
    bindings: HashMap<String, GameAction>,
    commands: HashMap<GameAction, Box<dyn Command>>,
    repeatable: HashSet<GameAction>,
    held: HashMap<GameAction, HeldState>,
    initial_delay: Duration,
    repeat_interval: Duration,
    auto_release: Duration,
}

impl InputDispatcher {
    /// Dispatcher with the default key table and repeat timing.
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert("Left".to_string(), GameAction::MoveLeft);
        bindings.insert("Right".to_string(), GameAction::MoveRight);
        bindings.insert("Up".to_string(), GameAction::Rotate);
        bindings.insert("Down".to_string(), GameAction::SoftDrop);
        bindings.insert("space".to_string(), GameAction::HardDrop);
        bindings.insert("p".to_string(), GameAction::Pause);
        bindings.insert("m".to_string(), GameAction::Mute);
        bindings.insert("r".to_string(), GameAction::Restart);

        let commands = bindings
            .values()
            .map(|&action| (action, command_for(action)))
            .collect();

        // Only held movement auto-repeats; rotation, hard drop and the
        // toggles re-trigger solely on a fresh press.
        let repeatable = HashSet::from([
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
        ]);

        Self {
            bindings,
            commands,
            repeatable,
            held: HashMap::new(),
            initial_delay: Duration::from_millis(DEFAULT_REPEAT_DELAY_MS),
            repeat_interval: Duration::from_millis(DEFAULT_REPEAT_INTERVAL_MS),
            auto_release: Duration::from_millis(DEFAULT_AUTO_RELEASE_MS),
        }
    }

    /// Override the repeat timing.
    pub fn with_timing(mut self, initial_delay: Duration, repeat_interval: Duration) -> Self {
        self.initial_delay = initial_delay;
        self.repeat_interval = repeat_interval;
        self
    }

    /// Override the auto-release timeout.
    pub fn with_auto_release(mut self, timeout: Duration) -> Self {
        self.auto_release = timeout;
        self
    }

    /// Bind (or rebind) a physical key name to an action.
    pub fn bind(&mut self, key: &str, action: GameAction) {
        self.bindings.insert(key.to_string(), action);
        self.commands
            .entry(action)
            .or_insert_with(|| command_for(action));
    }

    /// Action currently bound to a physical key.
    pub fn action_for(&self, key: &str) -> Option<GameAction> {
        self.bindings.get(key).copied()
    }

    pub fn is_repeatable(&self, action: GameAction) -> bool {
        self.repeatable.contains(&action)
    }

    /// Handle one key event. A press of a key whose action is not already
    /// held resolves it, records a hold timestamp for repeatable actions,
    /// and runs the command once; a press of an already-held action only
    /// refreshes its auto-release timestamp, so terminal auto-repeat
    /// presses keep a hold alive without double-driving the repeat timer.
    /// Releases stop any pending repeat and always succeed. `Held`
    /// refreshes the key's hold and runs the repeat poll.
    pub fn dispatch(
        &mut self,
        key: &str,
        event: InputEvent,
        engine: &mut GameEngine,
        now: Instant,
    ) -> bool {
        match event {
            InputEvent::Press => {
                let Some(action) = self.action_for(key) else {
                    return false;
                };
                if self.repeatable.contains(&action) {
                    if let Some(state) = self.held.get_mut(&action) {
                        if now.saturating_duration_since(state.last_seen) <= self.auto_release {
                            state.last_seen = now;
                            return true;
                        }
                    }
                    // Fresh press, or a hold that already expired.
                    self.held.insert(
                        action,
                        HeldState {
                            pressed_at: now,
                            last_seen: now,
                            repeats_fired: 0,
                        },
                    );
                }
                match self.commands.get(&action) {
                    Some(command) => command.execute(engine),
                    None => false,
                }
            }
            InputEvent::Release => {
                if let Some(action) = self.action_for(key) {
                    self.held.remove(&action);
                }
                true
            }
            InputEvent::Held => {
                if let Some(action) = self.action_for(key) {
                    if let Some(state) = self.held.get_mut(&action) {
                        state.last_seen = now;
                    }
                }
                !self.poll_held(engine, now).is_empty()
            }
        }
    }

    /// Re-execute every held repeatable action that is due, and report
    /// which actions fired. Called once per frame by the host loop.
    ///
    /// A hold that has not been refreshed within the auto-release timeout
    /// is dropped first; terminals without key-release events never send a
    /// release, so expiry is what ends a tap there. For each surviving
    /// hold: no repeats before the initial delay; past it,
    /// `1 + (elapsed - delay) / interval` repeats are due in total, and the
    /// difference against the already-fired count is executed now. While
    /// the engine is paused nothing executes, but the fired counters are
    /// kept caught up so unpausing does not release a burst of repeats
    /// owed across the pause.
    pub fn poll_held(&mut self, engine: &mut GameEngine, now: Instant) -> ArrayVec<GameAction, 16> {
        let mut fired = ArrayVec::new();

        let timeout = self.auto_release;
        self.held
            .retain(|_, state| now.saturating_duration_since(state.last_seen) <= timeout);

        if engine.paused() {
            let (delay, interval) = (self.initial_delay, self.repeat_interval);
            for state in self.held.values_mut() {
                state.repeats_fired = Self::repeats_due(delay, interval, state, now);
            }
            return fired;
        }

        for (&action, state) in self.held.iter_mut() {
            let due = Self::repeats_due(self.initial_delay, self.repeat_interval, state, now);
            while state.repeats_fired < due {
                state.repeats_fired += 1;
                if let Some(command) = self.commands.get(&action) {
                    command.execute(engine);
                }
                if fired.try_push(action).is_err() {
                    return fired;
                }
            }
        }

        fired
    }

    /// Total repeats owed by a hold at `now`: zero before the initial
    /// delay, then one per interval boundary starting at the delay itself.
    fn repeats_due(delay: Duration, interval: Duration, state: &HeldState, now: Instant) -> u32 {
        let Some(elapsed) = now.checked_duration_since(state.pressed_at) else {
            return state.repeats_fired;
        };
        if elapsed < delay {
            return 0;
        }
        1 + ((elapsed - delay).as_millis() / interval.as_millis()) as u32
    }

    /// Drop all held state, e.g. on focus loss.
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
