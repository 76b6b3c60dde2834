//! Render hook for the terminal front end.
//!
//! The engine calls hooks synchronously from inside its handlers, so this hook
//! only records what to draw; the main loop drains it between events.

use crate::core::{GameSnapshot, RenderEvent, RenderHook};

#[derive(Debug, Clone, Default)]
pub struct TermHook {
    latest: GameSnapshot,
    dirty: bool,
    /// Final state of a finished game, held until the player acknowledges.
    game_over: Option<GameSnapshot>,
    frames_requested: u64,
}

impl TermHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> &GameSnapshot {
        &self.latest
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Snapshot to draw, if anything changed since the last call.
    pub fn take_frame(&mut self) -> Option<GameSnapshot> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.game_over.unwrap_or(self.latest))
    }

    pub fn pending_game_over(&self) -> Option<&GameSnapshot> {
        self.game_over.as_ref()
    }

    /// Dismiss the game-over screen and show the fresh session.
    pub fn acknowledge_game_over(&mut self) -> Option<GameSnapshot> {
        let finished = self.game_over.take();
        if finished.is_some() {
            self.dirty = true;
        }
        finished
    }

    /// Number of render requests received.
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }
}

impl RenderHook for TermHook {
    fn render(&mut self, _event: RenderEvent, snapshot: &GameSnapshot) {
        self.latest = *snapshot;
        self.dirty = true;
        self.frames_requested += 1;
    }

    fn game_over(&mut self, snapshot: &GameSnapshot) {
        let mut finished = *snapshot;
        finished.game_over = true;
        self.game_over = Some(finished);
        self.dirty = true;
    }
}
