//! Game loop and clock.
//!
//! [`Engine`] drives a [`falltris_core::GameState`] from a repeating gravity
//! timer and a stream of input commands, and owns the restart and game-over
//! sequences. Timers come from a [`Scheduler`], so tests step time by hand
//! with [`ManualClock`] while the terminal runner uses [`IntervalClock`].
//!
//! ```
//! use std::time::Duration;
//!
//! use falltris_core::RecordingHook;
//! use falltris_engine::{Engine, ManualClock};
//! use falltris_types::GameConfig;
//!
//! let mut engine = Engine::new(GameConfig::default(), ManualClock::new(), RecordingHook::new());
//! engine.start();
//! engine.advance(Duration::from_secs(3));
//! assert_eq!(engine.state().timer(), 3);
//! ```

pub mod clock;
pub mod engine;

pub use falltris_core as core;
pub use falltris_types as types;

pub use clock::{IntervalClock, ManualClock, Scheduler, TimerId};
pub use engine::Engine;
