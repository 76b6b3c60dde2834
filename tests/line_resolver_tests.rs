//! Line resolver tests

use falltris::core::{lines, Board, GameState, NoopHook, RecordingHook, RenderEvent, ScriptedRng};
use falltris::types::{Color, GameConfig, BOARD_HEIGHT, BOARD_WIDTH, LINE_CLEAR_POINTS};

#[test]
fn test_single_full_row_is_removed_and_priced() {
    let mut board = Board::new();
    board.fill_row(15, Color::Cyan);
    board.set(14, 3, Some(Color::Red));
    board.set(16, 6, Some(Color::Green));

    let cleared = lines::resolve(&mut board);

    assert_eq!(cleared, 1);
    assert_eq!(lines::score_delta(cleared), LINE_CLEAR_POINTS);
    // Above moved down one; below stayed put.
    assert_eq!(board.get(15, 3), Some(Some(Color::Red)));
    assert_eq!(board.get(16, 6), Some(Some(Color::Green)));
    assert!(board.is_row_empty(0));
    assert_eq!(board.occupied_count(), 2);
}

#[test]
fn test_full_board_clears_every_row() {
    let mut board = Board::new();
    for row in 0..BOARD_HEIGHT as usize {
        board.fill_row(row, Color::Orange);
    }

    assert_eq!(lines::resolve(&mut board), BOARD_HEIGHT as u32);
    assert_eq!(board, Board::new());
}

#[test]
fn test_score_is_linear() {
    assert_eq!(lines::score_delta(0), 0);
    assert_eq!(lines::score_delta(4), 400);
    assert_eq!(lines::score_delta(u32::MAX), u32::MAX);
}

#[test]
fn test_locking_piece_completes_row() {
    // Bottom row full except the two cells an O at column 4 fills.
    let mut board = Board::new();
    for row in 18..20 {
        for col in 0..BOARD_WIDTH as i8 {
            if col != 4 && col != 5 {
                board.set(row, col, Some(Color::Blue));
            }
        }
    }
    let mut game = GameState::with_rng(GameConfig::default(), ScriptedRng::new(vec![1]))
        .with_board(board);
    let mut hook = RecordingHook::new();
    game.start(&mut hook);

    assert!(game.apply_command(falltris::types::Command::HardDrop, &mut hook));

    assert_eq!(game.score(), 200);
    assert_eq!(game.lines(), 2);
    assert_eq!(game.board().occupied_count(), 0);
    assert!(hook.events.contains(&RenderEvent::LinesCleared(2)));
}

#[test]
fn test_resolve_without_full_rows_keeps_score() {
    let mut game = GameState::new(GameConfig::default());
    assert_eq!(game.resolve_lines(&mut NoopHook), 0);
    assert_eq!(game.score(), 0);
}
