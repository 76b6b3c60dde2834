use crate::piece::ActivePiece;
use crate::shape::Shape;
use crate::types::{Cell, Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Rows of color-or-empty, top to bottom.
pub type Grid = [[Cell; WIDTH]; HEIGHT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            shape: value.shape,
            row: value.row,
            col: value.col,
        }
    }
}

/// Read-only view of a session handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells only.
    pub board: Grid,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lives: u32,
    pub timer: u32,
    pub lines: u32,
    pub pieces: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; WIDTH]; HEIGHT];
        self.active = None;
        self.score = 0;
        self.lives = 0;
        self.timer = 0;
        self.lines = 0;
        self.pieces = 0;
        self.paused = false;
        self.game_over = false;
    }

    /// Board with the active piece drawn over it. Cells above the grid are
    /// dropped.
    pub fn composite(&self) -> Grid {
        let mut grid = self.board;
        if let Some(active) = self.active {
            for (dr, dc) in active.shape.offsets() {
                let r = active.row + dr;
                let c = active.col + dc;
                if (0..HEIGHT as i8).contains(&r) && (0..WIDTH as i8).contains(&c) {
                    grid[r as usize][c as usize] = Some(active.color);
                }
            }
        }
        grid
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; WIDTH]; HEIGHT],
            active: None,
            score: 0,
            lives: 0,
            timer: 0,
            lines: 0,
            pieces: 0,
            paused: false,
            game_over: false,
        }
    }
}
