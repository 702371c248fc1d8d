//! Trailside - hike runner and jigsaw puzzle minigames
//!
//! Core modules:
//! - `hike`: Deterministic runner simulation (jumps, obstacles, collisions)
//! - `puzzle`: Jigsaw board with disjoint-set piece grouping
//! - `persistence`: Key/value storage with fail-closed JSON decoding
//! - `platform`: Browser/native differences (seeds, localStorage)
//! - `scene`: Scene controllers wired to the host engine's scene manager
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod hike;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod puzzle;
pub mod scene;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HikeHighscore;
pub use progress::PuzzleProgress;
pub use tuning::{HikeTuning, PuzzleTuning, Viewport};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (host timer cadence)
    pub const TICK_MS: u32 = 20;
    /// Ticks per unit of score
    pub const TICKS_PER_SCORE: f32 = 20.0;
    /// Metres shown per unit of score
    pub const METRES_PER_SCORE: u64 = 10;

    /// Number of avatars in the hiking party
    pub const PLAYER_COUNT: usize = 3;
    /// Slots in the lagged pointer history
    pub const POINTER_HISTORY_LEN: usize = 10;

    /// Jigsaw layout: 3 columns x 4 rows
    pub const PUZZLE_COLUMNS: usize = 3;
    pub const PUZZLE_ROWS: usize = 4;
    pub const PIECE_COUNT: usize = PUZZLE_COLUMNS * PUZZLE_ROWS;
}

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    if t < 0.0 {
        return start;
    }
    if t > 1.0 {
        return end;
    }
    (1.0 - t) * start + t * end
}

/// Oscillates between -1 and 1 with period 2π, flatter at the peaks than a sine.
#[inline]
pub fn rounded_square_wave(x: f32) -> f32 {
    (x.sin() * 10.0).atan() * 2.0 / std::f32::consts::PI
}
