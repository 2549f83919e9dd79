//! Piece entity: four cells, a pivot, and an orientation index.
//!
//! Every shape carries a fixed offset table per orientation, anchored at the
//! pivot. Rotation rebuilds the cells from the table for the next orientation
//! (modulo the shape's orientation count); there is no wall-kick system, so a
//! rotation that lands outside the board or on occupied cells simply fails at
//! validation time in the caller.

use gridfall_types::{PieceKind, Position};

/// Per-orientation cell offsets relative to the pivot.
type OffsetTable = [(i32, i32); 4];

/// The active falling piece. Mutable entity: `translate` and `rotate`
/// replace the cells in place. Geometry only; callers validate against the
/// board and keep or discard the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    cells: [Position; 4],
    pivot: Position,
    orientation: u8,
}

/// Offset tables for each shape and orientation.
///
/// O has a single geometry. I, S and Z toggle between a horizontal and a
/// vertical layout. T, J and L cycle N -> E -> S -> W around a pivot that
/// never moves.
fn offsets(kind: PieceKind, orientation: u8) -> OffsetTable {
    match kind {
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::I => match orientation {
            0 => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            _ => [(0, -1), (0, 0), (0, 1), (0, 2)],
        },
        PieceKind::S => match orientation {
            0 => [(0, 0), (1, 0), (-1, 1), (0, 1)],
            _ => [(0, -1), (0, 0), (1, 0), (1, 1)],
        },
        PieceKind::Z => match orientation {
            0 => [(-1, 0), (0, 0), (0, 1), (1, 1)],
            _ => [(1, -1), (0, 0), (1, 0), (0, 1)],
        },
        PieceKind::T => match orientation {
            0 => [(0, -1), (-1, 0), (0, 0), (1, 0)],
            1 => [(0, -1), (0, 0), (1, 0), (0, 1)],
            2 => [(-1, 0), (0, 0), (1, 0), (0, 1)],
            _ => [(0, -1), (-1, 0), (0, 0), (0, 1)],
        },
        PieceKind::J => match orientation {
            0 => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
            1 => [(0, -1), (1, -1), (0, 0), (0, 1)],
            2 => [(-1, 0), (0, 0), (1, 0), (1, 1)],
            _ => [(0, -1), (0, 0), (-1, 1), (0, 1)],
        },
        PieceKind::L => match orientation {
            0 => [(1, -1), (-1, 0), (0, 0), (1, 0)],
            1 => [(0, -1), (0, 0), (0, 1), (1, 1)],
            2 => [(-1, 0), (0, 0), (1, 0), (-1, 1)],
            _ => [(-1, -1), (0, -1), (0, 0), (0, 1)],
        },
    }
}

fn cells_at(kind: PieceKind, orientation: u8, pivot: Position) -> [Position; 4] {
    let table = offsets(kind, orientation);
    [
        pivot.translate(table[0].0, table[0].1),
        pivot.translate(table[1].0, table[1].1),
        pivot.translate(table[2].0, table[2].1),
        pivot.translate(table[3].0, table[3].1),
    ]
}

impl Piece {
    /// Create a piece with the given pivot in its spawn orientation.
    pub fn new(kind: PieceKind, pivot: Position) -> Self {
        Self {
            kind,
            cells: cells_at(kind, 0, pivot),
            pivot,
            orientation: 0,
        }
    }

    /// Create a piece at the top-center spawn point of a board of the given
    /// width. Shapes with a top row at `dy = -1` legally start in the buffer
    /// zone above the visible board.
    pub fn spawn(kind: PieceKind, board_width: i32) -> Self {
        Self::new(kind, Position::new(board_width / 2 - 1, 0))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn cells(&self) -> &[Position; 4] {
        &self.cells
    }

    pub fn pivot(&self) -> Position {
        self.pivot
    }

    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Shift all cells and the pivot by the same delta, in place.
    /// Purely geometric; no validation.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for cell in &mut self.cells {
            *cell = cell.translate(dx, dy);
        }
        self.pivot = self.pivot.translate(dx, dy);
    }

    /// Return a translated copy, leaving `self` untouched. Used by callers
    /// that validate the candidate before committing it.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let mut candidate = self.clone();
        candidate.translate(dx, dy);
        candidate
    }

    /// Advance the orientation one step and rebuild the cells from the
    /// shape's offset table. Rotating O is a no-op.
    pub fn rotate(&mut self) {
        let count = self.kind.orientation_count();
        self.orientation = (self.orientation + 1) % count;
        self.cells = cells_at(self.kind, self.orientation, self.pivot);
    }

    /// Return a rotated copy, leaving `self` untouched.
    pub fn rotated(&self) -> Self {
        let mut candidate = self.clone();
        candidate.rotate();
        candidate
    }

    /// Lowest (largest-`y`) row any cell occupies.
    pub fn bottom_row(&self) -> i32 {
        self.cells.iter().map(|c| c.y).max().unwrap_or(self.pivot.y)
    }
}
