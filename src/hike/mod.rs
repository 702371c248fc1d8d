//! Hike runner simulation
//!
//! All runner gameplay lives here. This module must be pure and deterministic:
//! - Fixed 20 ms timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use difficulty::{day_night_tint, difficulty};
pub use spawn::{SpawnScheduler, hop_displacement, random_between, roll_kind, spawn_obstacle};
pub use state::{GameEvent, GamePhase, HikeState, Obstacle, ObstacleKind, Player, PointerHistory};
pub use tick::{TickInput, jump_delays, tick};
