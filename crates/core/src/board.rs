//! Board: a fixed-size grid tracked as an occupancy map.
//!
//! Coordinates: `x` ranges `0..width` left to right, `y` ranges `0..height`
//! top to bottom. Rows with `y < 0` are the spawn buffer zone; they count as
//! in-bounds for placement checks but are never persisted as occupied.

use std::collections::HashMap;
use std::fmt;

use gridfall_types::{PieceKind, Position};

use crate::piece::Piece;

/// Placement failure. A sentinel, not a panic: the engine treats a failed
/// placement of the pending piece as the game-over trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// A cell lies outside `[0, width)` horizontally or at/below the floor.
    OutOfBounds(Position),
    /// A cell collides with an already-occupied position.
    Occupied(Position),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds(p) => {
                write!(f, "cell ({}, {}) is out of bounds", p.x, p.y)
            }
            PlacementError::Occupied(p) => {
                write!(f, "cell ({}, {}) is already occupied", p.x, p.y)
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// The game grid. Occupancy is a map from position to the kind that locked
/// there; the kind exists only so a renderer can color cells, the collision
/// semantics are those of a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    occupied: HashMap<Position, PieceKind>,
}

impl Board {
    /// Create an empty board.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            occupied: HashMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupied.contains_key(&position)
    }

    /// Kind locked at a position, if any. For renderers.
    pub fn cell_kind(&self, position: Position) -> Option<PieceKind> {
        self.occupied.get(&position).copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    /// Check whether a cell can legally hold part of a piece. Buffer-zone
    /// cells (`y < 0`) are always free: they are in bounds for this check
    /// and never stored as occupied.
    fn cell_free(&self, position: Position) -> Result<(), PlacementError> {
        if position.x < 0 || position.x >= self.width || position.y >= self.height {
            return Err(PlacementError::OutOfBounds(position));
        }
        if self.occupied.contains_key(&position) {
            return Err(PlacementError::Occupied(position));
        }
        Ok(())
    }

    /// True iff every cell of the piece could be placed right now.
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&cell| self.cell_free(cell).is_ok())
    }

    /// Lock a piece's cells into the board. Fails without mutating anything
    /// if any cell is illegal. Cells still in the buffer zone are dropped,
    /// preserving the invariant that `occupied` never holds `y < 0`.
    pub fn place(&mut self, piece: &Piece) -> Result<(), PlacementError> {
        for &cell in piece.cells() {
            self.cell_free(cell)?;
        }
        for &cell in piece.cells() {
            if cell.y >= 0 {
                self.occupied.insert(cell, piece.kind());
            }
        }
        Ok(())
    }

    /// Rows that are fully occupied, in ascending order.
    pub fn completed_rows(&self) -> Vec<i32> {
        let mut rows: Vec<i32> = (0..self.height)
            .filter(|&y| (0..self.width).all(|x| self.occupied.contains_key(&Position::new(x, y))))
            .collect();
        rows.sort_unstable();
        rows
    }

    /// Remove the given rows and compact the remainder downward.
    ///
    /// All doomed cells are deleted in one pass, then every surviving cell
    /// drops by the number of removed rows strictly below it. Removing rows
    /// one at a time instead would shift not-yet-examined rows into slots
    /// already scanned and corrupt multi-row clears.
    pub fn clear_rows(&mut self, rows: &[i32]) -> usize {
        if rows.is_empty() {
            return 0;
        }

        let survivors: HashMap<Position, PieceKind> = self
            .occupied
            .drain()
            .filter(|(position, _)| !rows.contains(&position.y))
            .map(|(position, kind)| {
                let below = rows.iter().filter(|&&row| row > position.y).count() as i32;
                (position.translate(0, below), kind)
            })
            .collect();

        self.occupied = survivors;
        rows.len()
    }

    /// Atomic lock-and-clear: place the piece, then detect and remove every
    /// simultaneously-complete row in the same logical step, so no observer
    /// ever sees a complete-but-uncleared row. Returns rows removed, or the
    /// placement error if the piece itself was illegal.
    pub fn place_and_clear(&mut self, piece: &Piece) -> Result<usize, PlacementError> {
        self.place(piece)?;
        let full = self.completed_rows();
        Ok(self.clear_rows(&full))
    }

    /// Drop all locked cells. Used on restart.
    pub fn reset(&mut self) {
        self.occupied.clear();
    }

    /// Occupy a single cell directly, bypassing piece placement. Intended
    /// for scenario setup; the position must be on the visible board.
    pub fn occupy(&mut self, position: Position, kind: PieceKind) {
        debug_assert!(position.in_bounds(self.width, self.height));
        self.occupied.insert(position, kind);
    }

    /// Fill an entire row. Scenario setup helper.
    pub fn fill_row(&mut self, y: i32, kind: PieceKind) {
        for x in 0..self.width {
            self.occupy(Position::new(x, y), kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(10, 20)
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = board();
        assert_eq!(board.occupied_count(), 0);
        assert!(board.completed_rows().is_empty());
    }

    #[test]
    fn test_can_place_respects_walls_and_floor() {
        let board = board();
        let piece = Piece::new(PieceKind::O, Position::new(0, 0));
        assert!(board.can_place(&piece));
        // Push past the left wall.
        assert!(!board.can_place(&piece.translated(-1, 0)));
        // O occupies pivot.x and pivot.x + 1, so x = 8 is the last legal column.
        assert!(board.can_place(&piece.translated(8, 0)));
        assert!(!board.can_place(&piece.translated(9, 0)));
        // Below the floor: O spans pivot.y and pivot.y + 1.
        assert!(board.can_place(&piece.translated(0, 18)));
        assert!(!board.can_place(&piece.translated(0, 19)));
    }

    #[test]
    fn test_buffer_zone_is_in_bounds_and_never_occupied() {
        let mut board = board();
        let piece = Piece::new(PieceKind::O, Position::new(4, -2));
        assert!(board.can_place(&piece));

        board.place(&piece).unwrap();
        // Both rows of the O were above the board, so nothing persists.
        assert_eq!(board.occupied_count(), 0);

        // A piece straddling the top edge persists only its visible cells.
        let straddling = Piece::new(PieceKind::O, Position::new(4, -1));
        board.place(&straddling).unwrap();
        assert_eq!(board.occupied_count(), 2);
        assert!(board.is_occupied(Position::new(4, 0)));
        assert!(board.is_occupied(Position::new(5, 0)));
    }

    #[test]
    fn test_place_collision_is_an_error_and_leaves_board_unchanged() {
        let mut board = board();
        board.occupy(Position::new(4, 10), PieceKind::T);

        let piece = Piece::new(PieceKind::O, Position::new(4, 10));
        let err = board.place(&piece).unwrap_err();
        assert_eq!(err, PlacementError::Occupied(Position::new(4, 10)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_place_out_of_bounds_error() {
        let mut board = board();
        let piece = Piece::new(PieceKind::O, Position::new(9, 0));
        let err = board.place(&piece).unwrap_err();
        assert!(matches!(err, PlacementError::OutOfBounds(_)));
    }

    #[test]
    fn test_completed_rows_ascending() {
        let mut board = board();
        board.fill_row(19, PieceKind::I);
        board.fill_row(5, PieceKind::J);
        assert_eq!(board.completed_rows(), vec![5, 19]);
    }

    #[test]
    fn test_row_missing_one_cell_is_not_complete() {
        let mut board = board();
        for x in 0..9 {
            board.occupy(Position::new(x, 19), PieceKind::I);
        }
        assert!(board.completed_rows().is_empty());
    }

    #[test]
    fn test_clear_single_row_shifts_above() {
        let mut board = board();
        board.fill_row(19, PieceKind::I);
        board.occupy(Position::new(3, 18), PieceKind::T);

        assert_eq!(board.clear_rows(&[19]), 1);
        assert_eq!(board.occupied_count(), 1);
        assert!(board.is_occupied(Position::new(3, 19)));
    }

    #[test]
    fn test_tetris_clear_empties_board() {
        let mut board = board();
        for y in 16..20 {
            board.fill_row(y, PieceKind::I);
        }
        assert_eq!(board.clear_rows(&[16, 17, 18, 19]), 4);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_scattered_multi_row_clear_shifts_exactly() {
        // Rows 15, 17 and 19 full; lone survivors at (3,10), (7,16), (5,18).
        // The survivor at y=10 has three cleared rows below it, the one at
        // y=16 has two (17 and 19), the one at y=18 has one (19).
        let mut board = board();
        for y in [15, 17, 19] {
            board.fill_row(y, PieceKind::I);
        }
        board.occupy(Position::new(3, 10), PieceKind::T);
        board.occupy(Position::new(7, 16), PieceKind::S);
        board.occupy(Position::new(5, 18), PieceKind::Z);

        assert_eq!(board.clear_rows(&[15, 17, 19]), 3);
        assert_eq!(board.occupied_count(), 3);
        assert!(board.is_occupied(Position::new(3, 13)));
        assert!(board.is_occupied(Position::new(7, 18)));
        assert!(board.is_occupied(Position::new(5, 19)));
    }

    #[test]
    fn test_place_and_clear_is_atomic() {
        let mut board = board();
        // Fill the bottom row except where a vertical I will land.
        for x in 0..10 {
            if x != 4 {
                board.occupy(Position::new(x, 19), PieceKind::L);
            }
        }
        let mut piece = Piece::new(PieceKind::I, Position::new(4, 16));
        piece.rotate(); // vertical: rows 15..=18 at x=4
        piece.translate(0, 1); // rows 16..=19

        let cleared = board.place_and_clear(&piece).unwrap();
        assert_eq!(cleared, 1);
        assert!(board.completed_rows().is_empty());
        // The three cells above the cleared row shifted down by one.
        assert!(board.is_occupied(Position::new(4, 17)));
        assert!(board.is_occupied(Position::new(4, 18)));
        assert!(board.is_occupied(Position::new(4, 19)));
    }

    #[test]
    fn test_place_and_clear_propagates_placement_failure() {
        let mut board = board();
        board.occupy(Position::new(4, 10), PieceKind::T);
        let piece = Piece::new(PieceKind::O, Position::new(4, 10));
        assert!(board.place_and_clear(&piece).is_err());
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_clear_rows_empty_input_is_a_no_op() {
        let mut board = board();
        board.occupy(Position::new(3, 10), PieceKind::T);
        assert_eq!(board.clear_rows(&[]), 0);
        assert!(board.is_occupied(Position::new(3, 10)));
    }
}
