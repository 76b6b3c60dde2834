//! Falltris (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and hosts the command
//! line configuration shared by the binary and its tests.

pub mod config;

pub use falltris_core as core;
pub use falltris_engine as engine;
pub use falltris_input as input;
pub use falltris_term as term;
pub use falltris_types as types;
