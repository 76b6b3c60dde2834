//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::Command`]. Each key press
//! yields at most one command; repeats are whatever the terminal delivers.

pub mod map;

pub use falltris_types as types;

pub use map::{handle_key_event, should_quit, should_restart};
