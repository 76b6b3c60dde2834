//! Board module - the authoritative occupancy grid
//!
//! The board is a 20x10 grid where each cell is either empty or holds the color
//! of the piece that locked there. Storage is a flat row-major array.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 is the left edge.
//!
//! Rows above the grid (`row < 0`) are open space: pieces may spawn partially
//! above the visible area. Everything else outside the grid is a wall.

use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get the cell at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the cell at `(row, col)`. Returns false if out of range.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision view of a coordinate.
    ///
    /// Rows above the grid are never occupied. Rows at or below the floor and
    /// columns outside `[0, width)` always are.
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        if row < 0 {
            return col < 0 || col >= BOARD_WIDTH as i8;
        }
        match self.get(row, col) {
            Some(cell) => cell.is_some(),
            None => true,
        }
    }

    /// Mark every given `(row, col, color)` cell occupied.
    ///
    /// Cells outside the grid are skipped; returns how many were written.
    pub fn commit<I>(&mut self, cells: I) -> usize
    where
        I: IntoIterator<Item = (i8, i8, Color)>,
    {
        let mut written = 0;
        for (row, col, color) in cells {
            if self.set(row, col, Some(color)) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no occupied cells
    pub fn is_row_empty(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_none())
    }

    /// Remove `row`, shift every row above it down by one and insert an
    /// empty row at the top.
    pub fn clear_row(&mut self, row: usize) {
        if row >= HEIGHT {
            return;
        }

        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..row * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(None);
    }

    /// Borrow one row as a slice.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Copy the board into a 2D grid.
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill one row completely with `color`.
    pub fn fill_row(&mut self, row: usize, color: Color) {
        if row >= HEIGHT {
            return;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].fill(Some(color));
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
