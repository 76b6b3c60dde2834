//! Game state module - the piece/grid state machine
//!
//! Ties together the board, the catalog, the active piece and the line
//! resolver. Every mutating operation takes the render hook and calls it
//! synchronously once the mutation is complete.
//!
//! Phases: `Spawning -> Falling -> Locking -> Falling (next piece)`, with
//! `GameOver` terminal when a fresh piece collides on spawn. Restarting the
//! session is the clock owner's job; [`GameState::reset`] only clears state.

use std::fmt;

use tracing::{debug, info};

use crate::board::Board;
use crate::catalog::{random_template, PieceTemplate};
use crate::hook::{RenderEvent, RenderHook};
use crate::lines;
use crate::piece::ActivePiece;
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, GameConfig};

/// Lifecycle of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No piece yet; waiting for `start` or a spawn.
    Spawning,
    /// A piece is falling and accepts input.
    Falling,
    /// The piece is being committed to the board.
    Locking,
    /// The last spawn collided. Terminal until `reset`.
    GameOver,
}

/// Result of a translation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved.
    Moved,
    /// The move was rejected; nothing changed.
    Blocked,
    /// A downward move was rejected, so the piece locked. Carries the number
    /// of rows the lock cleared.
    Locked { lines: u32 },
}

/// Complete game state for one session
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    phase: Phase,
    rng: Box<dyn RandomSource + Send>,
    score: u32,
    lives: u32,
    /// Gravity ticks taken while unpaused.
    timer: u32,
    /// Total rows cleared this session.
    lines: u32,
    /// Pieces spawned this session.
    pieces: u32,
    paused: bool,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("score", &self.score)
            .field("lives", &self.lives)
            .field("timer", &self.timer)
            .field("lines", &self.lines)
            .field("pieces", &self.pieces)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Create a session seeded from `config.seed`.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, SimpleRng::new(config.seed))
    }

    /// Create a session drawing pieces from a custom random source.
    pub fn with_rng<R>(config: GameConfig, rng: R) -> Self
    where
        R: RandomSource + Send + 'static,
    {
        Self {
            config,
            board: Board::new(),
            active: None,
            phase: Phase::Spawning,
            rng: Box::new(rng),
            score: 0,
            lives: config.initial_lives,
            timer: 0,
            lines: 0,
            pieces: 0,
            paused: false,
        }
    }

    /// Replace the board before the game starts (scenario setup).
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.lives = self.lives;
        out.timer = self.timer;
        out.lines = self.lines;
        out.pieces = self.pieces;
        out.paused = self.paused;
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn notify<H: RenderHook + ?Sized>(&self, hook: &mut H, event: RenderEvent) {
        hook.render(event, &self.snapshot());
    }

    /// Spawn the first piece. No-op unless the session is in `Spawning`.
    pub fn start<H: RenderHook + ?Sized>(&mut self, hook: &mut H) -> bool {
        if self.phase != Phase::Spawning {
            return false;
        }
        self.spawn_next(hook)
    }

    /// Spawn a piece drawn from the random source.
    pub fn spawn_next<H: RenderHook + ?Sized>(&mut self, hook: &mut H) -> bool {
        let template = random_template(&mut *self.rng);
        self.spawn(template, hook)
    }

    /// Place a copy of `template` at the spawn origin.
    ///
    /// If it collides immediately the session moves to `GameOver` and the
    /// board is left as it was.
    pub fn spawn<H: RenderHook + ?Sized>(&mut self, template: &PieceTemplate, hook: &mut H) -> bool {
        let piece = ActivePiece::spawn(template);
        if piece.collides(&self.board) {
            self.active = None;
            self.phase = Phase::GameOver;
            info!(kind = template.kind.as_str(), score = self.score, "spawn blocked, game over");
            return false;
        }

        self.active = Some(piece);
        self.phase = Phase::Falling;
        self.pieces = self.pieces.wrapping_add(1);
        debug!(kind = template.kind.as_str(), piece = self.pieces, "spawned");
        self.notify(hook, RenderEvent::Spawned);
        true
    }

    /// Translate the active piece by `(d_row, d_col)`.
    ///
    /// A rejected move leaves the piece where it was. If the rejected move
    /// was exactly one row down, the piece locks, full rows resolve and the
    /// next piece spawns.
    pub fn move_piece<H: RenderHook + ?Sized>(
        &mut self,
        d_row: i8,
        d_col: i8,
        hook: &mut H,
    ) -> MoveOutcome {
        let Some(active) = self.falling() else {
            return MoveOutcome::Blocked;
        };

        let candidate = active.translated(d_row, d_col);
        if !candidate.collides(&self.board) {
            self.active = Some(candidate);
            self.notify(hook, RenderEvent::Moved);
            return MoveOutcome::Moved;
        }

        if (d_row, d_col) == (1, 0) {
            let lines = self.lock_and_respawn(hook);
            return MoveOutcome::Locked { lines };
        }

        MoveOutcome::Blocked
    }

    /// Rotate the active piece 90° clockwise around its own bounding box.
    ///
    /// The origin never moves; a colliding rotation is discarded.
    pub fn rotate<H: RenderHook + ?Sized>(&mut self, hook: &mut H) -> bool {
        let Some(active) = self.falling() else {
            return false;
        };

        let candidate = active.with_shape(active.shape.rotated_cw());
        if candidate.collides(&self.board) {
            return false;
        }

        self.active = Some(candidate);
        self.notify(hook, RenderEvent::Rotated);
        true
    }

    /// Drop the active piece to its lowest valid row and lock it there.
    pub fn hard_drop<H: RenderHook + ?Sized>(&mut self, hook: &mut H) -> MoveOutcome {
        let Some(mut piece) = self.falling() else {
            return MoveOutcome::Blocked;
        };

        // Terminates: the floor collides after at most `height` steps.
        loop {
            let below = piece.translated(1, 0);
            if below.collides(&self.board) {
                break;
            }
            piece = below;
        }

        self.active = Some(piece);
        let lines = self.lock_and_respawn(hook);
        MoveOutcome::Locked { lines }
    }

    /// Commit the active piece's cells to the board.
    pub fn lock<H: RenderHook + ?Sized>(&mut self, hook: &mut H) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        self.phase = Phase::Locking;
        let color = active.color;
        let written = self
            .board
            .commit(active.cells().into_iter().map(|(r, c)| (r, c, color)));
        debug!(kind = active.kind.as_str(), row = active.row, col = active.col, written, "locked");
        self.notify(hook, RenderEvent::Locked);
        true
    }

    /// Clear full rows and add the score delta.
    pub fn resolve_lines<H: RenderHook + ?Sized>(&mut self, hook: &mut H) -> u32 {
        let cleared = lines::resolve(&mut self.board);
        self.score = self.score.saturating_add(lines::score_delta(cleared));
        self.lines = self.lines.saturating_add(cleared);
        if cleared > 0 {
            debug!(cleared, score = self.score, "lines cleared");
            self.notify(hook, RenderEvent::LinesCleared(cleared));
        }
        cleared
    }

    fn lock_and_respawn<H: RenderHook + ?Sized>(&mut self, hook: &mut H) -> u32 {
        self.lock(hook);
        let cleared = self.resolve_lines(hook);
        self.spawn_next(hook);
        cleared
    }

    /// One gravity tick: move down one row and advance the timer.
    ///
    /// Does nothing while paused or when no piece is falling. A tick that
    /// ends the game does not count.
    pub fn tick<H: RenderHook + ?Sized>(&mut self, hook: &mut H) -> bool {
        if self.paused || self.phase != Phase::Falling {
            return false;
        }

        self.move_piece(1, 0, hook);
        if self.is_game_over() {
            return true;
        }

        self.timer = self.timer.wrapping_add(1);
        self.notify(hook, RenderEvent::Ticked);
        true
    }

    pub fn toggle_pause<H: RenderHook + ?Sized>(&mut self, hook: &mut H) {
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        self.notify(hook, RenderEvent::PauseToggled(self.paused));
    }

    /// Apply one input command. Returns whether the state changed.
    ///
    /// While paused everything except `TogglePause` is rejected.
    pub fn apply_command<H: RenderHook + ?Sized>(&mut self, command: Command, hook: &mut H) -> bool {
        match command {
            Command::TogglePause => {
                self.toggle_pause(hook);
                true
            }
            _ if self.paused => false,
            Command::MoveLeft => self.move_piece(0, -1, hook) == MoveOutcome::Moved,
            Command::MoveRight => self.move_piece(0, 1, hook) == MoveOutcome::Moved,
            Command::SoftDrop => self.move_piece(1, 0, hook) != MoveOutcome::Blocked,
            Command::Rotate => self.rotate(hook),
            Command::HardDrop => self.hard_drop(hook) != MoveOutcome::Blocked,
        }
    }

    /// Empty the board and restore every readout to its initial value.
    ///
    /// Leaves the session in `Spawning`; call [`GameState::start`] to play.
    pub fn reset<H: RenderHook + ?Sized>(&mut self, hook: &mut H) {
        self.board.clear();
        self.active = None;
        self.phase = Phase::Spawning;
        self.score = 0;
        self.lives = self.config.initial_lives;
        self.timer = 0;
        self.lines = 0;
        self.pieces = 0;
        self.paused = false;
        self.notify(hook, RenderEvent::Reset);
    }

    fn falling(&self) -> Option<ActivePiece> {
        if self.phase != Phase::Falling {
            return None;
        }
        self.active
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
