//! Multiplayer coordination on top of `blockfall-core`.
//!
//! - [`queue`]: the shared, append-only piece sequence and per-player cursors
//! - [`multiplayer`]: [`Match`], which runs 2-4 sessions and decides the winner
//! - [`place`]: one-shot "rotate, move, drop" placement with typed errors
//! - [`autopilot`]: greedy placement search for headless play

pub mod autopilot;
pub mod multiplayer;
pub mod place;
pub mod queue;

pub use autopilot::{best_placement, Placement};
pub use multiplayer::{LeaderboardEntry, Match, PlayerSnapshot};
pub use place::{apply_place, PlaceError};
pub use queue::{QueueCursor, SharedPieceQueue};
