//! Terminal front end.
//!
//! Renders game snapshots into a framebuffer and flushes it to the terminal
//! with crossterm. No widget toolkit: the board is drawn glyph by glyph so
//! each cell can be two columns wide.

pub mod fb;
pub mod game_view;
pub mod hook;
pub mod renderer;

pub use falltris_core as core;
pub use falltris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{color_rgb, GameView, Viewport};
pub use hook::TermHook;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
