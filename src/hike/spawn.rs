//! Obstacle spawning
//!
//! Kinds are drawn from a weighted table, each kind configuring its own size,
//! height and motion. The next spawn is scheduled after a random delay whose
//! range shrinks as difficulty rises.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, HikeState, Obstacle, ObstacleKind};
use crate::tuning::HikeTuning;

/// Integer in `[min, max]` (bounds may be fractional), uniformly distributed.
pub fn random_between<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    (rng.random::<f32>() * (max - min + 1.0) + min).floor()
}

/// Countdown to the next spawn, in milliseconds of simulated time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub remaining_ms: f32,
    /// Cleared when the run ends; nothing further is scheduled
    pub active: bool,
}

impl SpawnScheduler {
    /// Schedule the opening spawn
    pub fn first<R: Rng>(rng: &mut R, range_ms: (u32, u32)) -> Self {
        Self {
            remaining_ms: random_between(rng, range_ms.0 as f32, range_ms.1 as f32),
            active: true,
        }
    }

    /// Advance by `dt_ms`. Returns true when a spawn is due.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining_ms -= dt_ms;
        self.remaining_ms <= 0.0
    }

    /// Schedule the follow-up spawn; faster difficulty means shorter gaps
    pub fn reschedule<R: Rng>(&mut self, rng: &mut R, range_ms: (u32, u32), difficulty: f32) {
        let min = range_ms.0 as f32 / difficulty;
        let max = range_ms.1 as f32 / difficulty;
        self.remaining_ms = random_between(rng, min, max);
    }

    pub fn stop(&mut self) {
        self.active = false;
    }
}

/// Roll a kind from the spawn table
pub fn roll_kind<R: Rng>(rng: &mut R) -> ObstacleKind {
    ObstacleKind::SPAWN_TABLE
        .choose_weighted(rng, |&(_, weight)| weight)
        .map(|&(kind, _)| kind)
        .unwrap_or(ObstacleKind::Dino)
}

/// Build and register a new obstacle just off the right edge
pub fn spawn_obstacle(state: &mut HikeState, tuning: &HikeTuning) -> u32 {
    let mut kind = roll_kind(&mut state.rng);
    if !state.friends_seen
        && state.visible_distance() > tuning.friends_distance
        && kind == ObstacleKind::Rock
    {
        kind = ObstacleKind::Friends;
        state.friends_seen = true;
        log::info!("Friends cameo at {}m", state.visible_distance());
    }

    let height = tuning.viewport.height;
    let mut pos = Vec2::new(
        tuning.viewport.width + tuning.spawn_offset_x,
        height * tuning.obstacle_base_y_fraction,
    );
    let mut scale = 1.0;
    let mut vel = Vec2::new(-6.0, 2.0);
    let mut rotation_speed = 0.0;
    let mut hopping = false;

    match kind {
        ObstacleKind::Friends => {
            scale = 1.5;
            pos.y -= 20.0;
        }
        ObstacleKind::Tree => {
            scale = 2.0;
            pos.y -= 20.0;
        }
        ObstacleKind::Rock => rotation_speed = -8.0,
        ObstacleKind::GeometryDash => {
            scale = 0.5;
            pos.y -= 5.0;
            hopping = true;
        }
        ObstacleKind::Funicular => {
            scale = 2.0;
            pos.y = random_between(&mut state.rng, height * 0.2, height * 0.45) - 20.0;
        }
        ObstacleKind::Dino => {
            // Rare big one
            if state.rng.random_bool(0.1) {
                scale = 2.0;
            }
        }
        ObstacleKind::Pterodactyl => {
            pos.y = random_between(&mut state.rng, height * 0.2, height * 0.5);
            vel = Vec2::new(-3.0, 0.0);
        }
        ObstacleKind::TreeStump => {}
    }

    let width = tuning.obstacle_base_width() * scale;
    let size = Vec2::new(width, width * kind.aspect_ratio());

    let id = state.next_entity_id();
    let mut obstacle = Obstacle::new(id, kind, pos, size);
    obstacle.vel = vel;
    obstacle.rotation_speed = rotation_speed;
    obstacle.hopping = hopping;
    state.obstacles.push(obstacle);

    if state.obstacles.len() > tuning.max_obstacles {
        let excess = state.obstacles.len() - tuning.max_obstacles;
        state.obstacles.drain(..excess);
        log::debug!("Obstacle cap reached, dropped {} oldest", excess);
    }

    log::debug!("Spawned {:?} #{} at y={:.0}", kind, id, pos.y);
    state.push_event(GameEvent::Spawned { id, kind });
    id
}

/// Vertical offset added by the hop at tick `t` (never positive)
#[inline]
pub fn hop_displacement(t: f32) -> f32 {
    -40.0 * (t / 8.0).sin().max(0.0)
}
