//! Scoring module - line-clear points, drop points and the level curve
//!
//! Rules:
//! - A lock that clears `n` rows scores `LINE_SCORES[min(n, 4)] * level`.
//! - Every 10 cleared lines raise the level by one, starting from level 1.
//! - Gravity starts at 500ms and speeds up 50ms per level, never below 100ms.
//! - Soft drop earns 1 point per row actually moved; hard drop earns 2 per
//!   row travelled. Locking itself earns nothing beyond line clears.

use crate::types::{
    BASE_FALL_INTERVAL_MS, FALL_INTERVAL_FLOOR_MS, FALL_INTERVAL_STEP_MS, HARD_DROP_POINTS_PER_ROW,
    LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS,
};

/// Points for clearing `lines` rows at `level`.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_SCORES[lines.min(4)].saturating_mul(level)
}

/// Points for `rows` of drop movement.
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows * HARD_DROP_POINTS_PER_ROW
    } else {
        rows * SOFT_DROP_POINTS
    }
}

/// Level for a running total of cleared lines (1-based).
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds.
pub fn get_fall_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(FALL_INTERVAL_STEP_MS);
    BASE_FALL_INTERVAL_MS
        .saturating_sub(speedup)
        .max(FALL_INTERVAL_FLOOR_MS)
}

/// Score, level and gravity for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: BASE_FALL_INTERVAL_MS,
        }
    }

    /// Apply one clear event of `lines` rows and return the points awarded.
    ///
    /// Points use the level in effect before the clear. Level and gravity are
    /// only recomputed here, never per tick.
    pub fn record_line_clear(&mut self, lines: usize) -> u32 {
        if lines == 0 {
            return 0;
        }
        let points = calculate_line_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines as u32);
        self.level = calculate_level(self.lines);
        self.fall_interval_ms = get_fall_interval_ms(self.level);
        points
    }

    /// Add drop points and return them.
    pub fn record_drop(&mut self, rows: u32, is_hard_drop: bool) -> u32 {
        let points = calculate_drop_score(rows, is_hard_drop);
        self.score = self.score.saturating_add(points);
        points
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
