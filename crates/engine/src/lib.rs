//! Engine crate: the game orchestrator, the command layer, and the audio
//! collaborator seam.

pub mod audio;
pub mod command;
pub mod game;

pub use audio::{AudioError, AudioOutput, NullAudio, SoundEffect};
pub use command::{command_for, Command};
pub use game::GameEngine;
