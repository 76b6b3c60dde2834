//! Clock module - repeating timers behind an injectable scheduler.
//!
//! The engine never sleeps or spawns threads. It asks a [`Scheduler`] for a
//! repeating timer and receives the fired [`TimerId`]s back from whoever
//! drives the loop: [`ManualClock`] in tests, [`IntervalClock`] in the
//! terminal runner.

use std::time::{Duration, Instant};

/// Handle for a scheduled repeating timer. Doubles as the cancel token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Something that can schedule and cancel repeating timers.
pub trait Scheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Cancel a timer. Returns false if it was not scheduled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// Shortest interval a timer may repeat at.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy)]
struct Timer {
    id: TimerId,
    interval: Duration,
    next_due: Duration,
}

/// Timers keyed by offsets from a clock-specific zero.
#[derive(Debug, Clone, Default)]
struct TimerTable {
    next_id: u64,
    timers: Vec<Timer>,
}

impl TimerTable {
    fn schedule(&mut self, now: Duration, interval: Duration) -> TimerId {
        let interval = interval.max(MIN_INTERVAL);
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer {
            id,
            interval,
            next_due: now + interval,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.next_due).min()
    }

    /// Fire the earliest timer due at or before `now`, rescheduling it.
    fn pop_due(&mut self, now: Duration) -> Option<TimerId> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due <= now)
            .min_by_key(|t| t.next_due)?;
        timer.next_due += timer.interval;
        Some(timer.id)
    }

    fn len(&self) -> usize {
        self.timers.len()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
    table: TimerTable,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move time forward and return every timer firing in that span, in
    /// firing order.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        self.now += dt;
        let mut fired = Vec::new();
        while let Some(id) = self.table.pop_due(self.now) {
            fired.push(id);
        }
        fired
    }

    pub fn active_timers(&self) -> usize {
        self.table.len()
    }
}

impl Scheduler for ManualClock {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        self.table.schedule(self.now, interval)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.table.cancel(id)
    }
}

/// Wall-clock timers for interactive play.
#[derive(Debug, Clone)]
pub struct IntervalClock {
    origin: Instant,
    table: TimerTable,
}

impl IntervalClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            table: TimerTable::default(),
        }
    }

    fn offset(&self, at: Instant) -> Duration {
        at.saturating_duration_since(self.origin)
    }

    /// Next timer due at or before `at`, if any.
    pub fn poll_at(&mut self, at: Instant) -> Option<TimerId> {
        let now = self.offset(at);
        self.table.pop_due(now)
    }

    pub fn poll(&mut self) -> Option<TimerId> {
        self.poll_at(Instant::now())
    }

    /// How long until the next timer fires, measured from `at`.
    ///
    /// Zero when one is already overdue; `None` with no timers scheduled.
    pub fn time_until_next(&self, at: Instant) -> Option<Duration> {
        let now = self.offset(at);
        self.table.next_due().map(|due| due.saturating_sub(now))
    }

    pub fn active_timers(&self) -> usize {
        self.table.len()
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for IntervalClock {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        let now = self.offset(Instant::now());
        self.table.schedule(now, interval)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.table.cancel(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_fires_on_interval() {
        let mut clock = ManualClock::new();
        let id = clock.schedule_repeating(Duration::from_millis(1000));

        assert!(clock.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(clock.advance(Duration::from_millis(1)), vec![id]);
        assert_eq!(clock.advance(Duration::from_millis(2500)), vec![id, id]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut clock = ManualClock::new();
        let id = clock.schedule_repeating(Duration::from_millis(10));
        assert!(clock.cancel(id));
        assert!(!clock.cancel(id));
        assert!(clock.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn timers_interleave_in_due_order() {
        let mut clock = ManualClock::new();
        let slow = clock.schedule_repeating(Duration::from_millis(30));
        let fast = clock.schedule_repeating(Duration::from_millis(20));

        let fired = clock.advance(Duration::from_millis(60));
        assert_eq!(fired, vec![fast, slow, fast, slow, fast]);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut clock = ManualClock::new();
        let id = clock.schedule_repeating(Duration::ZERO);
        assert_eq!(clock.advance(Duration::from_millis(3)), vec![id, id, id]);
    }

    #[test]
    fn interval_clock_reports_time_until_next() {
        let mut clock = IntervalClock::new();
        assert_eq!(clock.time_until_next(Instant::now()), None);

        let before = Instant::now();
        let id = clock.schedule_repeating(Duration::from_secs(60));
        let start = Instant::now();
        // The deadline is read after `before`, so it may sit slightly past
        // `before + 60s` but never past `start + 60s`.
        let wait = clock.time_until_next(start).unwrap();
        assert!(wait <= Duration::from_secs(60));
        assert!(wait > Duration::from_secs(59));
        assert!(clock.time_until_next(before).unwrap() >= wait);
        assert!(clock.poll_at(start).is_none());
        assert_eq!(clock.poll_at(start + Duration::from_secs(61)), Some(id));
    }
}
