//! Scoring module - line clear, drop and level rules
//!
//! - Line clears use a fixed table (1→100, 2→300, 3→500, 4→800).
//! - Soft and hard drops earn 5 points per row moved.
//! - Every award is scaled by the difficulty's score multiplier and truncated.
//! - Level starts at 1 and rises once per `lines_per_level` cleared rows.

use crate::types::{DROP_POINTS_PER_ROW, LINE_SCORES};

/// Apply a percentage multiplier, truncating toward zero
pub fn scale_points(points: u32, score_percent: u32) -> u32 {
    let scaled = points as u64 * score_percent as u64 / 100;
    scaled.min(u32::MAX as u64) as u32
}

/// Calculate line clear score
/// lines: number of rows cleared by one lock (anything outside 1-4 scores nothing)
pub fn calculate_line_score(lines: u32, score_percent: u32) -> u32 {
    match LINE_SCORES.get(lines as usize) {
        Some(&base) => scale_points(base, score_percent),
        None => 0,
    }
}

/// Calculate drop score for `rows` traveled by a soft or hard drop
pub fn calculate_drop_score(rows: u32, score_percent: u32) -> u32 {
    scale_points(rows.saturating_mul(DROP_POINTS_PER_ROW), score_percent)
}

/// Level after `total_lines` cleared rows (1-based)
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1) + 1
}

/// Gravity interval: `base × speed_multiplier^(level − 1)`, truncated to whole
/// milliseconds and never below 1ms
pub fn fall_interval_ms(base_ms: u32, speed_multiplier: f64, level: u32) -> u32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let interval = base_ms as f64 * speed_multiplier.powi(exponent);
    (interval as u32).max(1)
}
