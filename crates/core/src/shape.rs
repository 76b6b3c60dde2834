//! Shape matrices and the naive clockwise rotation.
//!
//! A shape is a small boolean matrix (at most 4x4). The matrix is rectangular:
//! the I piece is 1x4, the O piece 2x2, the rest 2x3. Rotation builds a new
//! matrix and never edits the source.

/// Largest side of any shape matrix.
pub const MAX_SHAPE: usize = 4;

/// Offset of an occupied cell from the shape's top-left corner, `(row, col)`.
pub type CellOffset = (i8, i8);

/// A rectangular boolean shape matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    /// Unused cells outside `rows x cols` stay `false`, so derived equality
    /// compares only the live region.
    cells: [[bool; MAX_SHAPE]; MAX_SHAPE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// All rows must have the same length and fit in a 4x4 box.
    pub const fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        let mut r = 0;
        while r < rows.len() {
            let mut c = 0;
            while c < rows[r].len() {
                cells[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: rows.len() as u8,
            cols: rows[0].len() as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether `(row, col)` inside the matrix is filled.
    pub fn filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Offsets of every filled cell, in row-major order.
    pub fn offsets(&self) -> impl Iterator<Item = CellOffset> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i8, c as i8))
        })
    }

    /// Number of filled cells.
    pub fn len(&self) -> usize {
        self.offsets().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 90° clockwise rotation inside the shape's own bounding box.
    ///
    /// Transposes the matrix and reverses each resulting row:
    /// `out[i][j] = self[rows - 1 - j][i]`. The origin does not move, so a
    /// rotated piece keeps its top-left anchor.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE]; MAX_SHAPE];
        for (i, out_row) in cells.iter_mut().enumerate().take(cols) {
            for (j, out) in out_row.iter_mut().enumerate().take(rows) {
                *out = self.cells[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_rotates_to_column() {
        let bar = Shape::from_rows(&[&[1, 1, 1, 1]]);
        let col = bar.rotated_cw();
        assert_eq!((col.rows(), col.cols()), (4, 1));
        assert_eq!(col.offsets().collect::<Vec<_>>(), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn t_rotation_matches_transpose_then_reverse() {
        // .#.      #.
        // ###  ->  ##
        //          #.
        let t = Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]);
        let expected = Shape::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]);
        assert_eq!(t.rotated_cw(), expected);
    }

    #[test]
    fn rotation_does_not_touch_source() {
        let l = Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]);
        let copy = l;
        let _ = l.rotated_cw();
        assert_eq!(l, copy);
    }
}
