//! Scoring module - Guideline line, drop, and level rules
//!
//! Line clears are worth the base table value times the current level (levels start at 1).
//! Drops are worth a fixed number of points per row descended.

use crate::types::{
    BASE_FALL_SPEED_MS, FALL_SPEED_MULTIPLIER, HARD_DROP_POINTS, INITIAL_LEVEL, LINES_PER_LEVEL,
    LINE_SCORES, SOFT_DROP_POINTS,
};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Calculate drop score
/// distance: rows descended (non-positive distances score nothing)
pub fn calculate_drop_score(distance: i32, is_hard: bool) -> u32 {
    if distance <= 0 {
        return 0;
    }
    let per_row = if is_hard {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    (distance as u32).saturating_mul(per_row)
}

/// Gravity interval in milliseconds: `1000 * 0.9^(level - 1)`
pub fn calculate_fall_speed(level: u32) -> f64 {
    let exponent = level.saturating_sub(INITIAL_LEVEL) as i32;
    BASE_FALL_SPEED_MS * FALL_SPEED_MULTIPLIER.powi(exponent)
}

/// Level reached after clearing `lines` lines in total
pub fn get_level(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + INITIAL_LEVEL
}

/// Whether `lines` total cleared lines put the player above `level`
pub fn should_level_up(lines: u32, level: u32) -> bool {
    get_level(lines) > level
}
