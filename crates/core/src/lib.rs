//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole piece/grid simulation. It has no clock, no
//! terminal and no I/O: time arrives as explicit [`GameState::tick`] calls and
//! the presentation layer only sees state through [`RenderHook`] snapshots.
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 occupancy grid with collision queries and row removal
//! - [`shape`]: boolean shape matrices and the clockwise rotation
//! - [`catalog`]: the seven immutable piece templates
//! - [`rng`]: injectable random source for template selection
//! - [`piece`]: the active piece and the collision check
//! - [`lines`]: the line resolver and its scoring
//! - [`game_state`]: the session state machine
//! - [`hook`]: render hook trait and stock hooks
//! - [`snapshot`]: read-only state handed to the presentation layer
//!
//! # Game Rules
//!
//! - Pieces spawn at row 0, column 4 and fall one row per gravity tick
//! - Rotation is a plain 90° clockwise turn of the shape matrix, no wall kicks
//! - A piece locks when a one-row downward move is blocked
//! - Each cleared row is worth 100 points
//! - A piece that collides on spawn ends the game
//!
//! # Example
//!
//! ```
//! use falltris_core::{GameState, NoopHook};
//! use falltris_types::{Command, GameConfig};
//!
//! let mut game = GameState::new(GameConfig::default());
//! let mut hook = NoopHook;
//! game.start(&mut hook);
//!
//! game.apply_command(Command::MoveLeft, &mut hook);
//! game.apply_command(Command::Rotate, &mut hook);
//! game.apply_command(Command::HardDrop, &mut hook);
//!
//! // The dropped piece is on the board and a new one is falling.
//! assert_eq!(game.board().occupied_count(), 4);
//! assert_eq!(game.pieces(), 2);
//! ```

pub mod board;
pub mod catalog;
pub mod game_state;
pub mod hook;
pub mod lines;
pub mod piece;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use falltris_types as types;

pub use board::Board;
pub use catalog::{random_template, template, PieceTemplate, TEMPLATES};
pub use game_state::{GameState, MoveOutcome, Phase};
pub use hook::{NoopHook, RecordingHook, RenderEvent, RenderHook};
pub use piece::{check_collision, ActivePiece};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot, Grid};
