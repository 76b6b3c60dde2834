//! Line resolver - removes completed rows and prices them.
//!
//! Scoring is linear: every removed row is worth `LINE_CLEAR_POINTS`, with
//! no multi-line bonus.

use crate::board::Board;
use crate::types::LINE_CLEAR_POINTS;

/// Remove every full row, bottom to top, and return how many were removed.
///
/// After a removal the rows above have shifted down by one, so the same index
/// is checked again before the scan moves up.
pub fn resolve(board: &mut Board) -> u32 {
    let mut cleared = 0;
    let mut row = board.height() as usize;
    while row > 0 {
        if board.is_row_full(row - 1) {
            board.clear_row(row - 1);
            cleared += 1;
        } else {
            row -= 1;
        }
    }
    cleared
}

/// Score for clearing `lines` rows in one resolution.
pub fn score_delta(lines: u32) -> u32 {
    lines.saturating_mul(LINE_CLEAR_POINTS)
}
