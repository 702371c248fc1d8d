//! Data-driven game balance
//!
//! Defaults carry the shipped values. Every struct is `#[serde(default)]` so a
//! partial JSON document only overrides the fields it names.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_COUNT;

/// Logical canvas size the host engine renders at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 540.0,
            height: 960.0,
        }
    }
}

/// Runner balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HikeTuning {
    pub viewport: Viewport,
    /// Sprite sizes, back of the line first (Klara, Gabriela, Erik)
    pub player_sizes: [Vec2; PLAYER_COUNT],
    /// Max-jump line as a fraction of viewport height (bottom edge stops here)
    pub max_jump_fraction: f32,
    /// Ground line as a fraction of viewport height (centre of the tallest avatar)
    pub ground_fraction: f32,
    /// Rise speed per tick (negative is up)
    pub jump_speed: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Fall velocity the avatars start the run with
    pub initial_fall_velocity: f32,
    /// Input delay in ticks per avatar while the whole party is alive
    pub jump_delays: [usize; PLAYER_COUNT],
    /// Bounding-box inset used by the overlap test
    pub collision_leniency: f32,
    /// Obstacle width as a fraction of viewport width (before kind multiplier)
    pub obstacle_width_fraction: f32,
    /// Obstacle spawn height as a fraction of viewport height
    pub obstacle_base_y_fraction: f32,
    /// How far right of the viewport obstacles appear
    pub spawn_offset_x: f32,
    /// First spawn delay range (ms, inclusive)
    pub first_spawn_ms: (u32, u32),
    /// Follow-up spawn delay range at difficulty 1 (ms, inclusive)
    pub spawn_delay_ms: (u32, u32),
    /// Visible distance after which the friends cameo may appear
    pub friends_distance: u64,
    /// Upper bound on live obstacles
    pub max_obstacles: usize,
    /// Ticks per full day/night cycle
    pub day_night_period_ticks: f32,
}

impl Default for HikeTuning {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            player_sizes: [
                Vec2::new(48.0, 72.0),
                Vec2::new(56.0, 90.0),
                Vec2::new(60.0, 100.0),
            ],
            max_jump_fraction: 0.40,
            ground_fraction: 0.84,
            jump_speed: -10.0,
            gravity: 0.2,
            initial_fall_velocity: 5.0,
            jump_delays: [6, 3, 0],
            collision_leniency: 0.8,
            obstacle_width_fraction: 0.15,
            obstacle_base_y_fraction: 0.73,
            spawn_offset_x: 50.0,
            first_spawn_ms: (500, 1000),
            spawn_delay_ms: (100, 3000),
            friends_distance: 2000,
            max_obstacles: 32,
            day_night_period_ticks: 8000.0,
        }
    }
}

impl HikeTuning {
    /// Bottom-edge y of the max-jump line
    pub fn max_jump_line(&self) -> f32 {
        self.viewport.height * self.max_jump_fraction
    }

    /// Base obstacle width before the per-kind multiplier
    pub fn obstacle_base_width(&self) -> f32 {
        self.viewport.width * self.obstacle_width_fraction
    }
}

/// Puzzle layout balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleTuning {
    /// Top-left of the scatter area
    pub start: Vec2,
    /// Offset between grid cells inside the source image
    pub piece_size: f32,
    /// Vertical gap between scatter slots
    pub slot_gap: f32,
    /// Horizontal distance between scatter columns
    pub column_spacing: f32,
    /// Scatter slots per column
    pub slots_per_column: usize,
    /// Manhattan distance (px) under which neighbours snap together
    pub snap_tolerance: f32,
}

impl Default for PuzzleTuning {
    fn default() -> Self {
        Self {
            start: Vec2::new(150.0, 170.0),
            piece_size: 67.0,
            slot_gap: 30.0,
            column_spacing: 200.0,
            slots_per_column: 6,
            snap_tolerance: 10.0,
        }
    }
}

/// Complete balance document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub hike: HikeTuning,
    pub puzzle: PuzzleTuning,
}

impl Tuning {
    /// Parse a tuning document, falling back to defaults if it is malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({e}), using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{"hike": {"gravity": 0.5, "viewport": {"width": 800}}}"#);
        assert_eq!(tuning.hike.gravity, 0.5);
        assert_eq!(tuning.hike.viewport.width, 800.0);
        assert_eq!(tuning.hike.viewport.height, Viewport::default().height);
        assert_eq!(tuning.puzzle, PuzzleTuning::default());
    }

    #[test]
    fn test_malformed_falls_back() {
        let tuning = Tuning::from_json("{not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_max_jump_line() {
        let tuning = HikeTuning::default();
        assert!((tuning.max_jump_line() - 384.0).abs() < 1e-3);
    }
}
