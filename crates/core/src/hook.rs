//! Render hook - how the simulation tells the presentation layer to redraw.
//!
//! Hooks are called synchronously right after each accepted mutation, with a
//! snapshot of the state at that moment.

use crate::snapshot::GameSnapshot;

/// What just changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    /// A new piece entered the board.
    Spawned,
    /// The active piece moved (any direction).
    Moved,
    /// The active piece rotated.
    Rotated,
    /// The active piece was committed to the board.
    Locked,
    /// Rows were removed; carries the count.
    LinesCleared(u32),
    /// A gravity tick advanced the timer.
    Ticked,
    /// Pause was toggled; carries the new paused flag.
    PauseToggled(bool),
    /// The whole session was reset.
    Reset,
    /// The game ended: wipe the drawn grid. Sent before
    /// [`RenderHook::game_over`] with the final snapshot.
    GridCleared,
}

/// Presentation-side callbacks.
pub trait RenderHook {
    fn render(&mut self, event: RenderEvent, snapshot: &GameSnapshot);

    /// One-shot game-over signal. Returning acknowledges it; the engine
    /// restarts afterwards.
    fn game_over(&mut self, _snapshot: &GameSnapshot) {}
}

/// Hook that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl RenderHook for NoopHook {
    fn render(&mut self, _event: RenderEvent, _snapshot: &GameSnapshot) {}
}

/// Hook that records every call, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingHook {
    pub events: Vec<RenderEvent>,
    pub last: Option<GameSnapshot>,
    pub game_overs: u32,
    /// `events.len()` at each game-over signal.
    pub game_over_marks: Vec<usize>,
}

impl RecordingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_events(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }
}

impl RenderHook for RecordingHook {
    fn render(&mut self, event: RenderEvent, snapshot: &GameSnapshot) {
        self.events.push(event);
        self.last = Some(*snapshot);
    }

    fn game_over(&mut self, snapshot: &GameSnapshot) {
        self.game_overs += 1;
        self.game_over_marks.push(self.events.len());
        self.last = Some(*snapshot);
    }
}

impl<H: RenderHook + ?Sized> RenderHook for &mut H {
    fn render(&mut self, event: RenderEvent, snapshot: &GameSnapshot) {
        (**self).render(event, snapshot);
    }

    fn game_over(&mut self, snapshot: &GameSnapshot) {
        (**self).game_over(snapshot);
    }
}
