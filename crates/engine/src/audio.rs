//! Audio collaborator interface.
//!
//! The engine never blocks on audio and never lets an audio failure escape:
//! errors are logged at the call site and swallowed. The collaborator is
//! injected into the engine constructor so tests can substitute a recorder.

use std::fmt;

/// Named sound effects the engine triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Rotate,
    LineClear,
    /// Clearing exactly four rows gets its own effect.
    Tetris,
    LevelUp,
    GameOver,
}

/// Failure reported by an audio backend.
#[derive(Debug, Clone)]
pub struct AudioError(pub String);

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audio: {}", self.0)
    }
}

impl std::error::Error for AudioError {}

/// Playback backend. Implementations live outside the core; the engine only
/// ever fires effects and toggles, and treats every error as non-fatal.
pub trait AudioOutput {
    fn initialize(&mut self) -> Result<(), AudioError>;
    fn play_music(&mut self, track: &str, volume: f32, looped: bool) -> Result<(), AudioError>;
    fn pause_music(&mut self) -> Result<(), AudioError>;
    fn resume_music(&mut self) -> Result<(), AudioError>;
    fn stop_music(&mut self) -> Result<(), AudioError>;
    fn play_sound_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
    fn toggle_mute(&mut self) -> bool;
    fn is_muted(&self) -> bool;
    fn cleanup(&mut self);
}

/// Silent backend for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullAudio {
    muted: bool,
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioOutput for NullAudio {
    fn initialize(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_music(&mut self, _track: &str, _volume: f32, _looped: bool) -> Result<(), AudioError> {
        Ok(())
    }

    fn pause_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn resume_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_sound_effect(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn cleanup(&mut self) {}
}
