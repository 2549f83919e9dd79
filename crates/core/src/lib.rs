//! Core game logic: pure rules with no I/O dependencies.
//!
//! Pieces and the board are geometry and occupancy only; orchestration
//! (gravity, locking, scoring state) lives in the engine crate.

pub mod bag;
pub mod board;
pub mod piece;
pub mod scoring;

pub use bag::{PieceBag, SimpleRng};
pub use board::{Board, PlacementError};
pub use piece::Piece;
pub use scoring::{gravity_interval_ms, level_for_lines, score_for_clear};
