//! Game engine: owns the board, the active and next pieces, and the
//! score/level/game-over state. Orchestrates gravity ticks, locking,
//! line-clear scoring, and next-piece spawn.
//!
//! Single-threaded and frame-stepped: the host loop calls `tick` with a
//! wall-clock instant; nothing here sleeps or blocks.

use std::time::{Duration, Instant};

use gridfall_core::{
    gravity_interval_ms, level_for_lines, score_for_clear, Board, Piece, PieceBag,
};
use gridfall_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::audio::{AudioOutput, SoundEffect};

const EFFECT_VOLUME: f32 = 1.0;

/// The rules-engine orchestrator.
///
/// Illegal moves and rotations are recoverable: the attempted candidate is
/// discarded and the method reports `false`. The only terminal condition is
/// the `game_over` flag, set when a freshly spawned piece fails placement.
pub struct GameEngine {
    board: Board,
    active: Option<Piece>,
    next: Piece,
    bag: PieceBag,
    audio: Box<dyn AudioOutput>,
    started: bool,
    paused: bool,
    game_over: bool,
    score: u32,
    level: u32,
    lines: u32,
    last_gravity: Option<Instant>,
}

impl GameEngine {
    /// Create an engine over the standard board. The audio collaborator is
    /// injected; pass `NullAudio` for headless use.
    pub fn new(seed: u32, audio: Box<dyn AudioOutput>) -> Self {
        Self::with_board(Board::new(BOARD_WIDTH, BOARD_HEIGHT), seed, audio)
    }

    /// Create an engine over a custom board. Used by tests that need
    /// pre-seeded occupancy.
    pub fn with_board(board: Board, seed: u32, mut audio: Box<dyn AudioOutput>) -> Self {
        if let Err(e) = audio.initialize() {
            log::warn!("audio initialize failed: {e}");
        }
        let mut bag = PieceBag::new(seed);
        let next = Piece::spawn(bag.draw(), board.width());
        Self {
            board,
            active: None,
            next,
            bag,
            audio,
            started: false,
            paused: false,
            game_over: false,
            score: 0,
            level: 1,
            lines: 0,
            last_gravity: None,
        }
    }

    /// Spawn the first piece and begin accepting gravity ticks.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_next();
    }

    /// Reset every piece of state and start a fresh game with the same seed.
    pub fn restart(&mut self) {
        self.board.reset();
        self.bag = PieceBag::new(self.bag.seed());
        self.next = Piece::spawn(self.bag.draw(), self.board.width());
        self.active = None;
        self.paused = false;
        self.game_over = false;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.last_gravity = None;
        self.started = true;
        self.spawn_next();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current gravity interval, derived from the level.
    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(gravity_interval_ms(self.level))
    }

    fn accepting_moves(&self) -> bool {
        self.started && !self.paused && !self.game_over && self.active.is_some()
    }

    fn play_effect(&mut self, effect: SoundEffect) {
        if let Err(e) = self.audio.play_sound_effect(effect, EFFECT_VOLUME) {
            log::warn!("sound effect {effect:?} failed: {e}");
        }
    }

    /// Attempt a horizontal shift of the active piece. The candidate
    /// geometry is validated before anything is committed, so a rejected
    /// move leaves both cells and pivot untouched.
    pub fn try_shift(&mut self, dx: i32) -> bool {
        if !self.accepting_moves() {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let candidate = active.translated(dx, 0);
        if self.board.can_place(&candidate) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Attempt to rotate the active piece. No wall kicks: if the rotated
    /// geometry collides, the rotation fails outright.
    pub fn try_rotate(&mut self) -> bool {
        if !self.accepting_moves() {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let candidate = active.rotated();
        if self.board.can_place(&candidate) {
            self.active = Some(candidate);
            self.play_effect(SoundEffect::Rotate);
            true
        } else {
            false
        }
    }

    fn descend_one(&mut self) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let candidate = active.translated(0, 1);
        if self.board.can_place(&candidate) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Single-row soft drop.
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepting_moves() {
            return false;
        }
        self.descend_one()
    }

    /// Drop the active piece until it rests, then lock it and spawn the
    /// next piece. Returns rows descended.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.accepting_moves() {
            return 0;
        }
        let mut rows = 0;
        while self.descend_one() {
            rows += 1;
        }
        self.lock_active();
        rows
    }

    /// Lock the active piece into the board, clear any completed rows in
    /// the same step, apply scoring, and spawn the queued piece.
    pub fn lock_active(&mut self) -> bool {
        if !self.accepting_moves() {
            return false;
        }
        let Some(piece) = self.active.take() else {
            return false;
        };

        let cleared = match self.board.place_and_clear(&piece) {
            Ok(cleared) => cleared,
            Err(e) => {
                // Gravity only ever moves the piece through validated
                // positions, so this is unreachable in practice. Treat it
                // as the end of the game rather than a crash.
                log::warn!("lock-time placement rejected: {e}");
                self.game_over = true;
                self.play_effect(SoundEffect::GameOver);
                return false;
            }
        };

        if cleared > 0 {
            // Score uses the level in effect at the moment of the clear;
            // the level itself is recomputed afterwards.
            self.score += score_for_clear(cleared, self.level);
            self.lines += cleared as u32;
            self.play_effect(if cleared == 4 {
                SoundEffect::Tetris
            } else {
                SoundEffect::LineClear
            });

            let new_level = level_for_lines(self.lines);
            if new_level > self.level {
                self.level = new_level;
                self.play_effect(SoundEffect::LevelUp);
            }
        }

        self.spawn_next();
        true
    }

    /// Promote the queued piece to active and draw a fresh lookahead.
    ///
    /// The placement attempt itself decides game over: there is no
    /// spawn-area pre-check, because a piece whose cells sit in the buffer
    /// zone can be perfectly placeable even when the top visible rows look
    /// crowded. Game over is declared only after the attempt fails.
    fn spawn_next(&mut self) -> bool {
        let piece = std::mem::replace(
            &mut self.next,
            Piece::spawn(self.bag.draw(), self.board.width()),
        );
        if self.board.can_place(&piece) {
            self.active = Some(piece);
            true
        } else {
            self.active = None;
            self.game_over = true;
            self.play_effect(SoundEffect::GameOver);
            false
        }
    }

    /// Gravity tick, driven by the host loop once per frame. Descends the
    /// active piece one row when the level's interval has elapsed; a failed
    /// descent locks the piece. Returns whether a gravity step ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.accepting_moves() {
            return false;
        }

        let last = *self.last_gravity.get_or_insert(now);
        if now.duration_since(last) < self.gravity_interval() {
            return false;
        }
        self.last_gravity = Some(now);

        if !self.descend_one() {
            self.lock_active();
        }
        true
    }

    /// Toggle the pause flag. Pausing suspends gravity and repeat
    /// processing but never input dispatch itself. Music follows the flag.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        let result = if self.paused {
            self.audio.pause_music()
        } else {
            self.audio.resume_music()
        };
        if let Err(e) = result {
            log::warn!("music toggle failed: {e}");
        }
    }

    /// Toggle audio mute via the collaborator; returns the new muted state.
    pub fn toggle_mute(&mut self) -> bool {
        self.audio.toggle_mute()
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    /// Kind of the next piece, for renderers.
    pub fn next_kind(&self) -> PieceKind {
        self.next.kind()
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        self.audio.cleanup();
    }
}
