//! Core types shared across the workspace.
//! This crate contains pure data types and constants with no dependencies.

/// Board dimensions
pub const BOARD_WIDTH: i32 = 10;
pub const BOARD_HEIGHT: i32 = 20;

/// Frame timing (milliseconds)
pub const TICK_MS: u64 = 16;

/// Gravity intervals by level (milliseconds), indexed by `level - 1`.
/// Levels past the table fall at the floor rate.
pub const GRAVITY_INTERVALS_MS: [u64; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];
pub const GRAVITY_FLOOR_MS: u64 = 120;

/// Line clear scoring, indexed by rows cleared (1-4), multiplied by level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Lines required per level step.
pub const LINES_PER_LEVEL: u32 = 10;

/// Key-repeat timing (milliseconds): delay before the first repeat,
/// then one repeat per interval while the key stays held.
pub const DEFAULT_REPEAT_DELAY_MS: u64 = 200;
pub const DEFAULT_REPEAT_INTERVAL_MS: u64 = 130;

/// In terminals without key-release events, a short timeout prevents a
/// single tap from turning into a sustained "held" state that repeats
/// forever. A genuinely held key keeps its entry alive through the
/// refreshes delivered by terminal auto-repeat.
pub const DEFAULT_AUTO_RELEASE_MS: u64 = 150;

/// An immutable 2D integer coordinate.
///
/// `y` grows downward; rows with `y < 0` form the spawn buffer zone above
/// the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a new position shifted by the given delta.
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Check containment in a `width x height` grid (0-indexed, half-open).
    pub const fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

/// The seven tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in canonical order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// How many distinct orientations this shape cycles through.
    /// O never changes; I, S and Z toggle between two geometries;
    /// T, J and L step through four.
    pub const fn orientation_count(&self) -> u8 {
        match self {
            PieceKind::O => 1,
            PieceKind::I | PieceKind::S | PieceKind::Z => 2,
            PieceKind::T | PieceKind::J | PieceKind::L => 4,
        }
    }
}

/// Logical input actions the dispatcher can resolve a key to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Lock,
    Pause,
    Mute,
    Restart,
}

/// Kind of physical key event handed to the dispatcher.
/// `Held` is polled once per frame by the caller, not an event-driven timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press,
    Release,
    Held,
}
