//! Command layer: one object per logical action.
//!
//! Each command wraps a single engine mutation behind a uniform
//! `execute -> bool` surface so the input dispatcher can hold them in a
//! table without knowing what they do. Movement and rotation go through the
//! engine's candidate-validate-commit path; pause, mute and restart only
//! flip flags or delegate to the audio collaborator and always succeed.

use gridfall_types::GameAction;

use crate::game::GameEngine;

/// A logical action applied to the engine. Returns whether the action took
/// effect; a rejected move or rotation reports `false` without mutating
/// anything.
pub trait Command {
    fn execute(&self, engine: &mut GameEngine) -> bool;
}

/// Shift the active piece one column left.
pub struct MoveLeft;

impl Command for MoveLeft {
    fn execute(&self, engine: &mut GameEngine) -> bool {
        engine.try_shift(-1)
    }
}

/// Shift the active piece one column right.
pub struct MoveRight;

impl Command for MoveRight {
    fn execute(&self, engine: &mut GameEngine) -> bool {
        engine.try_shift(1)
    }
}

/// Advance the active piece one orientation step.
pub struct Rotate;

impl Command for Rotate {
    fn execute(&self, engine: &mut GameEngine) -> bool {
        engine.try_rotate()
    }
}

/// Descend one row.
pub struct SoftDrop;

impl Command for SoftDrop {
    fn execute(&self, engine: &mut GameEngine) -> bool {
        engine.soft_drop()
    }
}

/// Descend until blocked, then lock and spawn.
pub struct HardDrop;

impl Command for HardDrop {
    fn execute(&self, engine: &mut GameEngine) -> bool {
        if engine.game_over() || engine.paused() || engine.active().is_none() {
            return false;
        }
        engine.hard_drop();
        true
    }
}

/// Lock the active piece in place immediately.
pub struct LockPiece;

impl Command for LockPiece {
    fn execute(&self, engine: &mut GameEngine) -> bool {
        engine.lock_active()
    }
}

/// Toggle the pause flag.
pub struct Pause;

impl Command for Pause {
    fn execute(&self, engine: &mut GameEngine) -> bool {
        engine.toggle_pause();
        true
    }
}

/// Toggle audio mute.
pub struct Mute;

impl Command for Mute {
    fn execute(&self, engine: &mut GameEngine) -> bool {
        engine.toggle_mute();
        true
    }
}

/// Reset all state and start over.
pub struct Restart;

impl Command for Restart {
    fn execute(&self, engine: &mut GameEngine) -> bool {
        engine.restart();
        true
    }
}

/// Build the command object for a logical action.
pub fn command_for(action: GameAction) -> Box<dyn Command> {
    match action {
        GameAction::MoveLeft => Box::new(MoveLeft),
        GameAction::MoveRight => Box::new(MoveRight),
        GameAction::Rotate => Box::new(Rotate),
        GameAction::SoftDrop => Box::new(SoftDrop),
        GameAction::HardDrop => Box::new(HardDrop),
        GameAction::Lock => Box::new(LockPiece),
        GameAction::Pause => Box::new(Pause),
        GameAction::Mute => Box::new(Mute),
        GameAction::Restart => Box::new(Restart),
    }
}
