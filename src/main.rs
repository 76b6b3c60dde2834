//! Terminal runner (default binary).
//!
//! Drives the engine from the wall clock and crossterm key events, and draws
//! through the framebuffer renderer whenever the render hook reports a change.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::prelude::*;

use falltris::config::Cli;
use falltris::core::GameSnapshot;
use falltris::engine::{Engine, IntervalClock};
use falltris::input::{handle_key_event, should_quit, should_restart};
use falltris::term::{FrameBuffer, GameView, TermHook, TerminalRenderer, Viewport};

/// Poll timeout when no gravity tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cli);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    // stdout belongs to the game screen; only log when given somewhere else.
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(cli.log_level()))
        .init();
    Ok(())
}

fn current_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

fn run(term: &mut TerminalRenderer, cli: &Cli) -> Result<()> {
    let config = cli.game_config();
    info!(
        seed = config.seed,
        tick_ms = config.tick_interval_ms,
        lives = config.initial_lives,
        "starting"
    );

    let mut engine = Engine::new(config, IntervalClock::new(), TermHook::new());
    engine.start();

    let view = GameView::default();
    let mut viewport = current_viewport();
    let mut frame = FrameBuffer::new(viewport.width, viewport.height);
    let mut shown = GameSnapshot::default();

    loop {
        if engine.hook().pending_game_over().is_none() {
            engine.pump();
        }
        let over = engine.hook().pending_game_over().is_some();

        if let Some(snap) = engine.hook_mut().take_frame() {
            shown = snap;
            view.render_into(&shown, viewport, &mut frame);
            term.present(&mut frame)?;
        }

        let timeout = if over {
            IDLE_POLL
        } else {
            engine
                .scheduler()
                .time_until_next(Instant::now())
                .unwrap_or(IDLE_POLL)
        };
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    info!(score = shown.score, "quit");
                    return Ok(());
                }
                if over {
                    // Any key dismisses the game-over screen. The engine has
                    // already restarted; ticks that piled up while waiting
                    // are dropped.
                    engine.hook_mut().acknowledge_game_over();
                    engine.rearm_clock();
                } else if should_restart(key) {
                    engine.restart();
                } else if let Some(command) = handle_key_event(key) {
                    engine.dispatch(command);
                }
            }
            Event::Resize(w, h) => {
                viewport = Viewport::new(w, h);
                term.invalidate();
                view.render_into(&shown, viewport, &mut frame);
                term.present(&mut frame)?;
            }
            _ => {}
        }
    }
}
