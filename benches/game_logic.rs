use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use falltris::core::{lines, Board, GameState, NoopHook};
use falltris::engine::{Engine, ManualClock};
use falltris::types::{Color, Command, GameConfig};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::default());
    state.start(&mut NoopHook);

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if !state.tick(&mut NoopHook) {
                state.reset(&mut NoopHook);
                state.start(&mut NoopHook);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for row in 16..20 {
                board.fill_row(row, Color::Cyan);
            }
            black_box(lines::resolve(&mut board))
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::default());
    state.start(&mut NoopHook);

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            state.apply_command(black_box(Command::MoveLeft), &mut NoopHook);
            state.apply_command(black_box(Command::MoveRight), &mut NoopHook);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(GameConfig::default());
    state.start(&mut NoopHook);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate(&mut NoopHook);
        })
    });
}

fn bench_engine_second(c: &mut Criterion) {
    let mut engine = Engine::new(GameConfig::default(), ManualClock::new(), NoopHook);
    engine.start();

    c.bench_function("engine_hard_drop_and_tick", |b| {
        b.iter(|| {
            engine.dispatch(Command::HardDrop);
            engine.advance(black_box(Duration::from_millis(1000)));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_move,
    bench_rotate,
    bench_engine_second
);
criterion_main!(benches);
