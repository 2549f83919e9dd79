//! Scoring, level progression, and the gravity curve.

use gridfall_types::{
    GRAVITY_FLOOR_MS, GRAVITY_INTERVALS_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `rows` rows at the given level:
/// single 100, double 300, triple 500, tetris 800, each times the level.
pub fn score_for_clear(rows: usize, level: u32) -> u32 {
    if rows == 0 || rows > 4 {
        return 0;
    }
    LINE_SCORES[rows] * level
}

/// Level reached after clearing `lines` total lines. One-based: a fresh
/// game is level 1, and every ten lines adds one.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds. Strictly decreasing
/// through the table, then clamped at the floor.
pub fn gravity_interval_ms(level: u32) -> u64 {
    let index = level.saturating_sub(1) as usize;
    if index < GRAVITY_INTERVALS_MS.len() {
        GRAVITY_INTERVALS_MS[index]
    } else {
        GRAVITY_FLOOR_MS
    }
}
