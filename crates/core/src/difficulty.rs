//! Difficulty module - per-tier tuning
//!
//! | Tier   | Base fall | Speed mult | Lines/level | Score mult | Ghost | Previews |
//! |--------|-----------|------------|-------------|------------|-------|----------|
//! | Easy   | 1500ms    | 0.95       | 15          | 0.5x       | yes   | 3        |
//! | Normal | 1000ms    | 0.90       | 10          | 1.0x       | yes   | 1        |
//! | Hard   | 700ms     | 0.85       | 8           | 1.5x       | yes   | 1        |
//! | Expert | 500ms     | 0.80       | 6           | 2.0x       | no    | 0        |
//! | Insane | 300ms     | 0.75       | 5           | 3.0x       | no    | 0        |
//!
//! Score multipliers are stored as integer percentages so that every award is an
//! exact integer computation.

use crate::scoring::{calculate_level, fall_interval_ms};
use crate::types::Difficulty;

/// Immutable tuning record of one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyConfig {
    pub difficulty: Difficulty,
    /// Gravity interval at level 1
    pub base_fall_ms: u32,
    /// Interval factor applied once per level above 1
    pub speed_multiplier: f64,
    pub lines_per_level: u32,
    /// Score multiplier in percent (100 = 1.0x)
    pub score_percent: u32,
    pub ghost_piece: bool,
    /// Pieces shown after the next piece
    pub preview_pieces: usize,
}

impl DifficultyConfig {
    pub const fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                base_fall_ms: 1500,
                speed_multiplier: 0.95,
                lines_per_level: 15,
                score_percent: 50,
                ghost_piece: true,
                preview_pieces: 3,
            },
            Difficulty::Normal => Self {
                difficulty,
                base_fall_ms: 1000,
                speed_multiplier: 0.9,
                lines_per_level: 10,
                score_percent: 100,
                ghost_piece: true,
                preview_pieces: 1,
            },
            Difficulty::Hard => Self {
                difficulty,
                base_fall_ms: 700,
                speed_multiplier: 0.85,
                lines_per_level: 8,
                score_percent: 150,
                ghost_piece: true,
                preview_pieces: 1,
            },
            Difficulty::Expert => Self {
                difficulty,
                base_fall_ms: 500,
                speed_multiplier: 0.8,
                lines_per_level: 6,
                score_percent: 200,
                ghost_piece: false,
                preview_pieces: 0,
            },
            Difficulty::Insane => Self {
                difficulty,
                base_fall_ms: 300,
                speed_multiplier: 0.75,
                lines_per_level: 5,
                score_percent: 300,
                ghost_piece: false,
                preview_pieces: 0,
            },
        }
    }

    pub fn score_multiplier(&self) -> f64 {
        self.score_percent as f64 / 100.0
    }

    /// Gravity interval at `level`
    pub fn fall_interval_ms(&self, level: u32) -> u32 {
        fall_interval_ms(self.base_fall_ms, self.speed_multiplier, level)
    }

    /// Level reached after clearing `total_lines`
    pub fn level_for_lines(&self, total_lines: u32) -> u32 {
        calculate_level(total_lines, self.lines_per_level)
    }
}

impl From<Difficulty> for DifficultyConfig {
    fn from(difficulty: Difficulty) -> Self {
        Self::for_difficulty(difficulty)
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}
