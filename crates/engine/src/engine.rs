//! Engine - game loop glue between the clock, the state and the hook.
//!
//! Owns one [`GameState`], one scheduler and one render hook. Gravity ticks
//! arrive as fired [`TimerId`]s; input arrives as [`Command`]s. Both run to
//! completion before the next event is handled.

use std::time::Duration;

use tracing::{debug, info, trace};

use crate::clock::{IntervalClock, ManualClock, Scheduler, TimerId};
use crate::core::{GameSnapshot, GameState, RenderEvent, RenderHook};
use crate::types::{Command, GameConfig};

pub struct Engine<S: Scheduler, H: RenderHook> {
    state: GameState,
    scheduler: S,
    hook: H,
    /// The only timer whose ticks are honored.
    timer: Option<TimerId>,
    /// Completed restarts (manual or after game over).
    restarts: u32,
    game_overs: u32,
}

impl<S: Scheduler, H: RenderHook> Engine<S, H> {
    pub fn new(config: GameConfig, scheduler: S, hook: H) -> Self {
        Self::with_state(GameState::new(config), scheduler, hook)
    }

    /// Wrap an already-built state (custom board or random source).
    pub fn with_state(state: GameState, scheduler: S, hook: H) -> Self {
        Self {
            state,
            scheduler,
            hook,
            timer: None,
            restarts: 0,
            game_overs: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Timer currently driving gravity.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn game_overs(&self) -> u32 {
        self.game_overs
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.config().tick_interval_ms)
    }

    fn stop_clock(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Spawn the first piece and start the gravity clock.
    ///
    /// Calling it on a running engine replaces the timer; the state is only
    /// spawned into if it has no piece yet.
    pub fn start(&mut self) {
        self.stop_clock();
        self.state.start(&mut self.hook);
        let id = self.scheduler.schedule_repeating(self.tick_interval());
        self.timer = Some(id);
        info!(timer = id.raw(), interval_ms = self.state.config().tick_interval_ms, "clock started");
        self.settle();
    }

    /// Handle a fired timer. Ticks from cancelled timers are ignored.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            trace!(timer = id.raw(), "stale tick ignored");
            return false;
        }
        let changed = self.state.tick(&mut self.hook);
        self.settle();
        changed
    }

    /// Handle one input command.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let changed = self.state.apply_command(command, &mut self.hook);
        self.settle();
        changed
    }

    /// Stop the clock, wipe the session and start a fresh one.
    pub fn restart(&mut self) {
        self.stop_clock();
        self.state.reset(&mut self.hook);
        self.restarts = self.restarts.wrapping_add(1);
        info!(restarts = self.restarts, "session restarted");
        self.start();
    }

    /// Stop the clock, clear the visual grid, signal game over, restart.
    ///
    /// Both hook calls carry the final state.
    pub fn game_over(&mut self) {
        self.stop_clock();
        self.game_overs = self.game_overs.wrapping_add(1);
        let snapshot = self.state.snapshot();
        info!(score = snapshot.score, timer = snapshot.timer, lines = snapshot.lines, "game over");
        self.hook.render(RenderEvent::GridCleared, &snapshot);
        self.hook.game_over(&snapshot);
        self.restart();
    }

    /// Replace the gravity timer without touching the session.
    ///
    /// For callers that stopped delivering ticks for a while (e.g. while a
    /// game-over screen waited for a key) and must not replay the backlog.
    pub fn rearm_clock(&mut self) {
        self.stop_clock();
        let id = self.scheduler.schedule_repeating(self.tick_interval());
        self.timer = Some(id);
        debug!(timer = id.raw(), "clock re-armed");
    }

    fn settle(&mut self) {
        // A fresh session spawns into an empty board, so this cannot recurse.
        if self.state.is_game_over() {
            self.game_over();
        }
    }
}

impl<H: RenderHook> Engine<ManualClock, H> {
    /// Advance the manual clock and deliver every tick that fires.
    ///
    /// Returns how many ticks changed state.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        let mut changed = 0;
        for id in self.scheduler.advance(dt) {
            if self.on_timer(id) {
                changed += 1;
            }
        }
        changed
    }
}

impl<H: RenderHook> Engine<IntervalClock, H> {
    /// Deliver every tick that is due on the wall clock.
    pub fn pump(&mut self) -> u32 {
        let mut changed = 0;
        while let Some(id) = self.scheduler.poll() {
            if self.on_timer(id) {
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, RecordingHook, ScriptedRng};
    use crate::types::Color;

    fn manual(config: GameConfig) -> Engine<ManualClock, RecordingHook> {
        Engine::new(config, ManualClock::new(), RecordingHook::new())
    }

    #[test]
    fn start_schedules_one_timer() {
        let mut engine = manual(GameConfig::default());
        engine.start();
        assert!(engine.is_running());
        assert_eq!(engine.scheduler().active_timers(), 1);
        assert_eq!(engine.hook().events, vec![RenderEvent::Spawned]);
    }

    #[test]
    fn ticks_follow_the_interval() {
        let mut engine = manual(GameConfig {
            tick_interval_ms: 250,
            ..GameConfig::default()
        });
        engine.start();

        assert_eq!(engine.advance(Duration::from_millis(249)), 0);
        assert_eq!(engine.advance(Duration::from_millis(751)), 4);
        assert_eq!(engine.state().timer(), 4);
    }

    #[test]
    fn stale_timer_is_ignored_after_restart() {
        let mut engine = manual(GameConfig::default());
        engine.start();
        let old = engine.timer().unwrap();

        engine.restart();
        assert_ne!(engine.timer(), Some(old));
        assert_eq!(engine.scheduler().active_timers(), 1);

        assert!(!engine.on_timer(old));
        assert_eq!(engine.state().timer(), 0);
    }

    #[test]
    fn game_over_signals_then_restarts() {
        // Column 4 blocked just under the spawn row: the first O fits, the
        // second cannot spawn once the first locks on top of the stack.
        let mut board = Board::new();
        for row in 2..20 {
            board.set(row, 4, Some(Color::Red));
        }
        let state = GameState::with_rng(GameConfig::default(), ScriptedRng::new(vec![1]))
            .with_board(board);
        let mut engine = Engine::with_state(state, ManualClock::new(), RecordingHook::new());
        engine.start();
        let first_timer = engine.timer();

        assert!(engine.dispatch(Command::SoftDrop));

        assert_eq!(engine.hook().game_overs, 1);
        assert_eq!(engine.game_overs(), 1);
        assert_eq!(engine.restarts(), 1);
        assert_ne!(engine.timer(), first_timer);
        assert_eq!(engine.state().board().occupied_count(), 0);
        assert_eq!(engine.state().score(), 0);
        assert!(engine.state().active().is_some());
        assert!(engine.hook().events.contains(&RenderEvent::Reset));
    }

    #[test]
    fn grid_clears_before_game_over_signal() {
        let mut board = Board::new();
        for row in 1..20 {
            board.set(row, 4, Some(Color::Blue));
        }
        let state = GameState::with_rng(GameConfig::default(), ScriptedRng::new(vec![0]))
            .with_board(board);
        let mut engine = Engine::with_state(state, ManualClock::new(), RecordingHook::new());
        engine.start();
        engine.hook_mut().take_events();

        engine.dispatch(Command::HardDrop);

        let hook = engine.hook();
        assert_eq!(hook.game_over_marks.len(), 1);
        let signal = hook.game_over_marks[0];
        assert_eq!(
            &hook.events[..signal],
            &[RenderEvent::Locked, RenderEvent::GridCleared]
        );
        assert_eq!(
            &hook.events[signal..],
            &[RenderEvent::Reset, RenderEvent::Spawned]
        );
    }

    #[test]
    fn rearm_clock_keeps_session_and_restart_count() {
        let mut engine = manual(GameConfig::default());
        engine.start();
        engine.advance(Duration::from_millis(2500));
        let before = engine.snapshot();
        let old = engine.timer();

        engine.rearm_clock();

        assert_ne!(engine.timer(), old);
        assert_eq!(engine.scheduler().active_timers(), 1);
        assert_eq!(engine.restarts(), 0);
        assert_eq!(engine.snapshot(), before);
        // A full interval from now, not from the old schedule.
        assert_eq!(engine.advance(Duration::from_millis(999)), 0);
        assert_eq!(engine.advance(Duration::from_millis(1)), 1);
    }
}
