//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and no I/O at all. Time comes in as
//! caller-supplied milliseconds and randomness comes from seeded sources, so the same
//! inputs always replay the same game.
//!
//! # Module Structure
//!
//! - [`pieces`]: 17 shape masks (7 standard, 10 extended) and their rotation states
//! - [`board`]: 10x20 grid with legality checks and row clearing
//! - [`rng`]: seeded LCG and the [`PieceSource`] abstraction
//! - [`difficulty`]: per-tier tuning table
//! - [`scoring`]: line, drop and level arithmetic
//! - [`game_state`]: the single-player state machine
//! - [`game`]: a state machine bundled with its own random stream
//! - [`snapshot`]: read-only views for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_core::types::{Difficulty, GameAction};
//!
//! let mut game = Game::new(Difficulty::Normal, 12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.state().score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`] with a monotonic timestamp, typically every 16ms. Each
//! call moves the piece down at most one row once the current fall interval has
//! elapsed.

pub mod board;
pub mod difficulty;
pub mod game;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Grid};
pub use difficulty::DifficultyConfig;
pub use game::Game;
pub use game_state::{GameState, LockEvent, Phase};
pub use pieces::{get_mask, rotations_for, ShapeMask, Tetromino};
pub use rng::{PieceSource, RandomSource, SequenceSource, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score};
pub use snapshot::{GameSnapshot, PieceSnapshot};
