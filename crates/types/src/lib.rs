//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond parsing and lookup, making them
//! usable from the simulation core, the multiplayer coordinator, and any presentation layer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (4, 0), rotation 0
//!
//! Rows above the field (y < 0) are legal for an active piece but never hold blocks.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_SCORES` | 0/100/300/500/800 | Base points for 0-4 cleared rows |
//! | `DROP_POINTS_PER_ROW` | 5 | Base points per row of soft or hard drop |
//!
//! Every award is scaled by the difficulty's score multiplier and truncated.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Difficulty, GameAction, Rotation, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert!(ShapeKind::H.is_extended());
//!
//! assert_eq!(Rotation::R0.rotate_cw(), Rotation::R90);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! let difficulty: Difficulty = "insane".parse().unwrap();
//! assert_eq!(difficulty, Difficulty::Insane);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column of a piece's mask origin
pub const SPAWN_X: i8 = 4;

/// Spawn row of a piece's mask origin
pub const SPAWN_Y: i8 = 0;

/// Largest rotation mask edge (the I piece is 4x4)
pub const MAX_MASK_SIZE: usize = 4;

/// Upper bound on occupied cells of any shape (a full 3x3 mask)
pub const MAX_PIECE_CELLS: usize = 9;

/// Largest preview count of any difficulty tier
pub const MAX_PREVIEW: usize = 3;

/// Line clear scoring table, indexed by rows cleared in one lock
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Base points per row moved by a soft drop or hard drop
pub const DROP_POINTS_PER_ROW: u32 = 5;

/// Percent chance that an Expert/Insane draw comes from the extended set
pub const EXTENDED_DRAW_PERCENT: u32 = 30;

/// Pieces appended to a shared multiplayer queue per generation
pub const SHARED_QUEUE_BATCH: usize = 50;

/// Smallest local multiplayer match
pub const MIN_PLAYERS: usize = 2;

/// Largest local multiplayer match
pub const MAX_PLAYERS: usize = 4;

/// Fixed timestep used by drivers that tick on a cadence (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Player number within a match (1-based)
pub type PlayerId = u8;

/// A cell on the playfield
///
/// - `None`: empty
/// - `Some(kind)`: settled block, colored like the shape that produced it
pub type Cell = Option<ShapeKind>;

/// Display color as an RGB triple
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Every piece shape: the 7 standard tetrominoes plus the 10 extended shapes
/// that appear in Expert and Insane.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    U,
    X,
    W,
    F,
    P,
    N,
    Y,
    V,
    C,
    H,
}

impl ShapeKind {
    /// The standard tetromino set
    pub const STANDARD: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// The hard-mode set
    pub const EXTENDED: [ShapeKind; 10] = [
        ShapeKind::U,
        ShapeKind::X,
        ShapeKind::W,
        ShapeKind::F,
        ShapeKind::P,
        ShapeKind::N,
        ShapeKind::Y,
        ShapeKind::V,
        ShapeKind::C,
        ShapeKind::H,
    ];

    /// All shapes in declaration order (matches [`ShapeKind::index`])
    pub const ALL: [ShapeKind; 17] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::U,
        ShapeKind::X,
        ShapeKind::W,
        ShapeKind::F,
        ShapeKind::P,
        ShapeKind::N,
        ShapeKind::Y,
        ShapeKind::V,
        ShapeKind::C,
        ShapeKind::H,
    ];

    /// Dense index into [`ShapeKind::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_extended(self) -> bool {
        self.index() >= Self::STANDARD.len()
    }

    /// Parse shape tag from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("V"), Some(ShapeKind::V));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::U => "u",
            ShapeKind::X => "x",
            ShapeKind::W => "w",
            ShapeKind::F => "f",
            ShapeKind::P => "p",
            ShapeKind::N => "n",
            ShapeKind::Y => "y",
            ShapeKind::V => "v",
            ShapeKind::C => "c",
            ShapeKind::H => "h",
        }
    }

    /// Neon palette color of the shape
    pub const fn color(self) -> Rgb {
        match self {
            ShapeKind::I => Rgb::new(0, 255, 255),
            ShapeKind::O => Rgb::new(255, 255, 0),
            ShapeKind::T => Rgb::new(255, 0, 255),
            ShapeKind::S => Rgb::new(0, 255, 0),
            ShapeKind::Z => Rgb::new(255, 0, 0),
            ShapeKind::J => Rgb::new(0, 0, 255),
            ShapeKind::L => Rgb::new(255, 165, 0),
            ShapeKind::U => Rgb::new(255, 100, 255),
            ShapeKind::X => Rgb::new(100, 255, 100),
            ShapeKind::W => Rgb::new(255, 200, 0),
            ShapeKind::F => Rgb::new(255, 150, 150),
            ShapeKind::P => Rgb::new(150, 150, 255),
            ShapeKind::N => Rgb::new(255, 100, 100),
            ShapeKind::Y => Rgb::new(100, 255, 255),
            ShapeKind::V => Rgb::new(255, 255, 100),
            ShapeKind::C => Rgb::new(255, 150, 0),
            ShapeKind::H => Rgb::new(200, 100, 255),
        }
    }
}

/// Rotation states, in clockwise quarter turns from the canonical orientation
///
/// The cycle goes: R0 → R90 → R180 → R270 → R0
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::R0.rotate_cw(), Rotation::R90);
    /// assert_eq!(Rotation::R270.rotate_cw(), Rotation::R0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Step one quarter turn in the given direction
    pub fn turn(&self, direction: Direction) -> Self {
        match direction {
            Direction::Cw => self.rotate_cw(),
            Direction::Ccw => self.rotate_ccw(),
        }
    }

    /// Rotation index 0-3
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Build from any index, reduced mod 4
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::R0,
            1 => Rotation::R90,
            2 => Rotation::R180,
            _ => Rotation::R270,
        }
    }
}

/// Rotation direction for the rotate command
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Cw,
    Ccw,
}

/// Discrete player commands
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Pause,
    Restart,
}

impl GameAction {
    /// Parse action from camelCase string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCcw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "moveLeft" => Some(GameAction::MoveLeft),
            "moveRight" => Some(GameAction::MoveRight),
            "softDrop" => Some(GameAction::SoftDrop),
            "hardDrop" => Some(GameAction::HardDrop),
            "rotateCw" => Some(GameAction::RotateCw),
            "rotateCcw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Difficulty tiers
///
/// Each tier maps to an immutable tuning record (fall speed, level pace, score
/// multiplier, ghost and preview settings) in `blockfall_core::difficulty`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
    Insane,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::Insane,
    ];

    /// Upper-case tag used by leaderboards and config files
    pub fn tag(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
            Difficulty::Expert => "EXPERT",
            Difficulty::Insane => "INSANE",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
            Difficulty::Insane => "Insane",
        }
    }

    /// Whether draws may come from the extended shape set
    pub fn uses_extended_shapes(&self) -> bool {
        matches!(self, Difficulty::Expert | Difficulty::Insane)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    /// Accepts the tag or the name, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.tag().eq_ignore_ascii_case(s))
            .ok_or(ConfigError::UnknownDifficulty)
    }
}

/// Construction-time configuration failures
///
/// Objects are never created in an invalid state; these surface from parsers
/// and constructors instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    UnknownDifficulty,
    PlayerCount(usize),
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::UnknownDifficulty => "unknown_difficulty",
            ConfigError::PlayerCount(_) => "invalid_player_count",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::UnknownDifficulty => "difficulty must be one of easy, normal, hard, expert, insane",
            ConfigError::PlayerCount(_) => "number of players must be between 2 and 4",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PlayerCount(n) => write!(f, "{} (got {})", self.message(), n),
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for ConfigError {}
