#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Game timing
pub const DROP_INTERVAL_MS: u64 = 1000; // Gravity step, strictly exceeded before the piece falls

// Line clear scoring: lines² × LINE_CLEAR_POINTS
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Points awarded for clearing `lines` rows with a single lock.
#[must_use]
pub fn line_clear_points(lines: u32) -> u32 {
    lines * lines * LINE_CLEAR_POINTS
}
