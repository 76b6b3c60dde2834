//! Active piece - the falling shape and its origin.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::catalog::PieceTemplate;
use crate::shape::{Shape, MAX_SHAPE};
use crate::types::{Color, PieceKind, SPAWN_COL, SPAWN_ROW};

/// Absolute board cells covered by a shape, `(row, col)`.
pub type PieceCells = ArrayVec<(i8, i8), { MAX_SHAPE * MAX_SHAPE }>;

/// The currently falling piece: a copied (possibly rotated) shape anchored
/// at its top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl ActivePiece {
    /// Copy a template to the spawn origin.
    pub fn spawn(template: &PieceTemplate) -> Self {
        Self {
            kind: template.kind,
            color: template.color,
            shape: template.shape,
            row: SPAWN_ROW,
            col: SPAWN_COL,
        }
    }

    pub fn translated(&self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..*self
        }
    }

    pub fn with_shape(&self, shape: Shape) -> Self {
        Self { shape, ..*self }
    }

    /// Absolute board coordinates of every filled cell.
    pub fn cells(&self) -> PieceCells {
        absolute_cells(&self.shape, self.row, self.col)
    }

    pub fn collides(&self, board: &Board) -> bool {
        check_collision(board, &self.shape, self.row, self.col)
    }
}

fn absolute_cells(shape: &Shape, row: i8, col: i8) -> PieceCells {
    shape
        .offsets()
        .map(|(dr, dc)| (row + dr, col + dc))
        .collect()
}

/// Whether `shape` anchored at `(row, col)` hits a wall, the floor or an
/// occupied cell. Cells above the grid never collide.
pub fn check_collision(board: &Board, shape: &Shape, row: i8, col: i8) -> bool {
    absolute_cells(shape, row, col)
        .iter()
        .any(|&(r, c)| board.is_occupied(r, c))
}
