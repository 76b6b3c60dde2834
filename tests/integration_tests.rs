//! Integration tests for the game loop: engine, clock, commands and hook.

use std::time::Duration;

use falltris::core::{Board, GameState, Phase, RecordingHook, RenderEvent, ScriptedRng};
use falltris::engine::{Engine, ManualClock};
use falltris::types::{Color, Command, GameConfig, PieceKind, INITIAL_LIVES};

type TestEngine = Engine<ManualClock, RecordingHook>;

/// Engine whose every piece is drawn from `script` (indices into the catalog).
fn scripted(script: Vec<u32>) -> TestEngine {
    let state = GameState::with_rng(GameConfig::default(), ScriptedRng::new(script));
    Engine::with_state(state, ManualClock::new(), RecordingHook::new())
}

fn second() -> Duration {
    Duration::from_millis(1000)
}

#[test]
fn test_game_lifecycle() {
    let mut engine = scripted(vec![2]);
    assert_eq!(engine.state().phase(), Phase::Spawning);

    engine.start();
    let state = engine.state();
    assert_eq!(state.phase(), Phase::Falling);
    assert_eq!(state.active().map(|p| p.kind), Some(PieceKind::T));
    assert_eq!(state.lives(), INITIAL_LIVES);
    assert!(!state.paused());
}

#[test]
fn test_gravity_moves_piece_and_counts_time() {
    let mut engine = scripted(vec![2]);
    engine.start();

    engine.advance(second() * 5);

    let piece = engine.state().active().unwrap();
    assert_eq!(piece.row, 5);
    assert_eq!(engine.state().timer(), 5);
}

#[test]
fn test_commands_move_the_piece() {
    let mut engine = scripted(vec![1]);
    engine.start();

    assert!(engine.dispatch(Command::MoveLeft));
    assert!(engine.dispatch(Command::MoveLeft));
    assert!(engine.dispatch(Command::SoftDrop));
    let piece = engine.state().active().unwrap();
    assert_eq!((piece.row, piece.col), (1, 2));

    // Walk into the left wall.
    while engine.dispatch(Command::MoveLeft) {}
    assert_eq!(engine.state().active().unwrap().col, 0);
}

#[test]
fn test_rejected_move_does_not_render() {
    let mut engine = scripted(vec![1]);
    engine.start();
    while engine.dispatch(Command::MoveRight) {}
    engine.hook_mut().take_events();

    assert!(!engine.dispatch(Command::MoveRight));
    assert!(engine.hook().events.is_empty());
}

#[test]
fn test_rotation_keeps_origin() {
    let mut engine = scripted(vec![0]);
    engine.start();

    assert!(engine.dispatch(Command::Rotate));
    let piece = engine.state().active().unwrap();
    assert_eq!((piece.row, piece.col), (0, 4));
    assert_eq!((piece.shape.rows(), piece.shape.cols()), (4, 1));
}

#[test]
fn test_rotation_blocked_by_stack_reverts() {
    let mut board = Board::new();
    board.set(2, 4, Some(Color::Red));
    let state = GameState::with_rng(GameConfig::default(), ScriptedRng::new(vec![0]))
        .with_board(board);
    let mut engine = Engine::with_state(state, ManualClock::new(), RecordingHook::new());
    engine.start();
    let before = engine.state().active().unwrap();

    assert!(!engine.dispatch(Command::Rotate));
    assert_eq!(engine.state().active(), Some(before));
}

#[test]
fn test_hard_drop_locks_and_spawns() {
    let mut engine = scripted(vec![1, 2]);
    engine.start();
    engine.hook_mut().take_events();

    assert!(engine.dispatch(Command::HardDrop));

    let board = engine.state().board();
    for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
        assert_eq!(board.get(row, col), Some(Some(Color::Yellow)));
    }
    assert_eq!(engine.state().active().map(|p| p.kind), Some(PieceKind::T));
    assert_eq!(engine.state().pieces(), 2);
    assert_eq!(
        engine.hook().events,
        vec![RenderEvent::Locked, RenderEvent::Spawned]
    );
}

#[test]
fn test_soft_drop_on_floor_locks() {
    let mut engine = scripted(vec![1]);
    engine.start();
    for _ in 0..18 {
        assert!(engine.dispatch(Command::SoftDrop));
    }
    assert_eq!(engine.state().board().occupied_count(), 0);

    assert!(engine.dispatch(Command::SoftDrop));
    assert_eq!(engine.state().board().occupied_count(), 4);
    assert_eq!(engine.state().active().unwrap().row, 0);
}

#[test]
fn test_pause_freezes_time_and_input() {
    let mut engine = scripted(vec![2]);
    engine.start();
    engine.advance(second());

    assert!(engine.dispatch(Command::TogglePause));
    assert!(engine.snapshot().paused);
    let frozen = engine.snapshot();

    engine.advance(second() * 3);
    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::HardDrop,
    ] {
        assert!(!engine.dispatch(command), "{command:?} accepted while paused");
    }
    assert_eq!(engine.snapshot(), frozen);

    // Continue.
    assert!(engine.dispatch(Command::TogglePause));
    engine.advance(second());
    assert_eq!(engine.state().timer(), 2);
}

#[test]
fn test_restart_clears_session() {
    let mut engine = scripted(vec![0, 1, 2]);
    engine.start();
    engine.advance(second() * 4);
    engine.dispatch(Command::HardDrop);
    engine.dispatch(Command::TogglePause);

    engine.restart();

    let state = engine.state();
    assert_eq!(state.board().occupied_count(), 0);
    assert_eq!(state.score(), 0);
    assert_eq!(state.timer(), 0);
    assert_eq!(state.lives(), INITIAL_LIVES);
    assert!(!state.paused());
    assert_eq!(state.phase(), Phase::Falling);
    assert_eq!(engine.scheduler().active_timers(), 1);
}

#[test]
fn test_top_out_ends_and_restarts_game() {
    // Stack two-wide column under the spawn point, leaving only row 0 free.
    let mut board = Board::new();
    for row in 1..20 {
        board.set(row, 4, Some(Color::Blue));
        board.set(row, 5, Some(Color::Blue));
    }
    let config = GameConfig {
        tick_interval_ms: 100,
        ..GameConfig::default()
    };
    // I piece fits in row 0, then cannot fall, locks, and the next I
    // collides with it on spawn.
    let state = GameState::with_rng(config, ScriptedRng::new(vec![0])).with_board(board);
    let mut engine = Engine::with_state(state, ManualClock::new(), RecordingHook::new());
    engine.start();

    engine.advance(Duration::from_millis(100));

    assert_eq!(engine.hook().game_overs, 1);
    assert_eq!(engine.game_overs(), 1);
    assert_eq!(engine.state().board().occupied_count(), 0);
    assert_eq!(engine.state().timer(), 0);
    assert_eq!(engine.state().phase(), Phase::Falling);

    // The fresh session keeps ticking on a new timer.
    engine.advance(Duration::from_millis(100));
    assert_eq!(engine.state().timer(), 1);
}

#[test]
fn test_game_over_locks_before_reset() {
    let mut board = Board::new();
    for row in 1..20 {
        board.set(row, 4, Some(Color::Blue));
    }
    let state = GameState::with_rng(GameConfig::default(), ScriptedRng::new(vec![0]))
        .with_board(board);
    let mut engine = Engine::with_state(state, ManualClock::new(), RecordingHook::new());
    engine.start();

    engine.dispatch(Command::HardDrop);

    assert_eq!(engine.hook().game_overs, 1);
    let reset_at = engine
        .hook()
        .events
        .iter()
        .position(|e| *e == RenderEvent::Reset)
        .unwrap();
    let locked_at = engine
        .hook()
        .events
        .iter()
        .position(|e| *e == RenderEvent::Locked)
        .unwrap();
    assert!(locked_at < reset_at);

    let signal = engine.hook().game_over_marks[0];
    let cleared_at = engine
        .hook()
        .events
        .iter()
        .position(|e| *e == RenderEvent::GridCleared)
        .unwrap();
    assert!(cleared_at < signal);
    assert!(signal <= reset_at);
}
