//! Runner state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn::SpawnScheduler;
use crate::consts::*;
use crate::tuning::HikeTuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Party is hiking
    Playing,
    /// Every avatar has been knocked out
    GameOver,
}

/// Something the scene layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new obstacle entered from the right
    Spawned { id: u32, kind: ObstacleKind },
    /// An avatar hit an obstacle and left the party
    PlayerDown { index: usize },
    /// Last avatar went down
    RunEnded { distance: u64 },
}

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Dino,
    Pterodactyl,
    Rock,
    TreeStump,
    Tree,
    Funicular,
    GeometryDash,
    /// One-off cameo that replaces a rock late in the run
    Friends,
}

impl ObstacleKind {
    /// Weighted spawn table. `Friends` is never rolled directly.
    pub const SPAWN_TABLE: [(ObstacleKind, u32); 7] = [
        (ObstacleKind::Dino, 100),
        (ObstacleKind::Pterodactyl, 30),
        (ObstacleKind::Rock, 100),
        (ObstacleKind::TreeStump, 100),
        (ObstacleKind::Tree, 30),
        (ObstacleKind::Funicular, 3),
        (ObstacleKind::GeometryDash, 3),
    ];

    /// Texture key the host engine loads for this kind
    pub fn sprite_key(&self) -> &'static str {
        match self {
            ObstacleKind::Dino => "hike_dino",
            ObstacleKind::Pterodactyl => "hike_pterodactyl",
            ObstacleKind::Rock => "hike_rock",
            ObstacleKind::TreeStump => "hike_treestump",
            ObstacleKind::Tree => "hike_tree",
            ObstacleKind::Funicular => "hike_funicular",
            ObstacleKind::GeometryDash => "hike_geometry_dash",
            ObstacleKind::Friends => "hike_friends",
        }
    }

    /// Sprite height / width
    pub fn aspect_ratio(&self) -> f32 {
        match self {
            ObstacleKind::Dino => 0.9,
            ObstacleKind::Pterodactyl => 0.6,
            ObstacleKind::Rock => 1.0,
            ObstacleKind::TreeStump => 0.7,
            ObstacleKind::Tree => 1.6,
            ObstacleKind::Funicular => 0.8,
            ObstacleKind::GeometryDash => 1.0,
            ObstacleKind::Friends => 0.8,
        }
    }
}

/// One member of the hiking party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Sprite centre
    pub pos: Vec2,
    pub size: Vec2,
    /// Where the avatar stands when grounded
    pub rest_pos: Vec2,
    /// Carried vertical velocity (positive is down)
    pub velocity: f32,
    pub jumping: bool,
    pub active: bool,
    pub visible: bool,
}

impl Player {
    pub fn new(rest_pos: Vec2, size: Vec2, initial_velocity: f32) -> Self {
        Self {
            pos: rest_pos,
            size,
            rest_pos,
            velocity: initial_velocity,
            jumping: false,
            active: true,
            visible: true,
        }
    }

    /// Y of the bottom edge (screen space, down is positive)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Remove from the party after a collision
    pub fn knock_out(&mut self) {
        self.active = false;
        self.visible = false;
    }
}

/// A moving obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Sprite centre
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity per tick at difficulty 1
    pub vel: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Degrees per tick (0 = no roll)
    pub rotation_speed: f32,
    /// Adds a periodic hop to the vertical motion
    pub hopping: bool,
    /// Set after the first movement tick
    pub started_moving: bool,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            vel: Vec2::new(-6.0, 2.0),
            rotation: 0.0,
            rotation_speed: 0.0,
            hopping: false,
            started_moving: false,
        }
    }

    /// Axis-aligned bounds of the (possibly rotated) sprite
    pub fn bounds(&self) -> Rect {
        Rect::rotated(self.pos, self.size, self.rotation)
    }
}

/// Lagged record of whether the pointer was held, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointerHistory {
    samples: [bool; POINTER_HISTORY_LEN],
    head: usize,
}

impl PointerHistory {
    /// Record this tick's sample, evicting the oldest
    pub fn push(&mut self, held: bool) {
        self.head = (self.head + POINTER_HISTORY_LEN - 1) % POINTER_HISTORY_LEN;
        self.samples[self.head] = held;
    }

    /// Sample from `delay` ticks ago (0 = this tick). Delays past the window read as released.
    pub fn held(&self, delay: usize) -> bool {
        if delay >= POINTER_HISTORY_LEN {
            return false;
        }
        self.samples[(self.head + delay) % POINTER_HISTORY_LEN]
    }
}

/// Complete runner state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct HikeState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// `time_ticks / 20`
    pub score: f32,
    /// Current difficulty multiplier
    pub difficulty: f32,
    /// Background tint (0xRRGGBB) for the day/night cycle
    pub tint: u32,
    pub phase: GamePhase,
    /// Back of the line first
    pub players: [Player; PLAYER_COUNT],
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub pointer_history: PointerHistory,
    pub spawner: SpawnScheduler,
    /// Whether the friends cameo has already appeared
    pub friends_seen: bool,
    /// Bottom-edge y at which avatars count as grounded
    pub ground_line: f32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl HikeState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, tuning: &HikeTuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = SpawnScheduler::first(&mut rng, tuning.first_spawn_ms);

        // Line the party up left to right; the front avatar sets the ground line
        // and the others share its resting bottom edge.
        let [back, middle, front] = tuning.player_sizes;
        let front_center_y = tuning.viewport.height * tuning.ground_fraction;
        let back_x = back.x / 2.0;
        let middle_x = back_x + back.x / 2.0 + middle.x / 2.0;
        let front_x = middle_x + middle.x / 2.0 + front.x / 2.0 - 5.0;
        let rest_y = |size: Vec2| front_center_y + (front.y - size.y) / 2.0;
        let front_pos = Vec2::new(front_x, front_center_y - 5.0);
        let ground_line = front_pos.y + front.y / 2.0;

        let v0 = tuning.initial_fall_velocity;
        let players = [
            Player::new(Vec2::new(back_x, rest_y(back)), back, v0),
            Player::new(Vec2::new(middle_x, rest_y(middle)), middle, v0),
            Player::new(front_pos, front, v0),
        ];

        Self {
            seed,
            rng,
            time_ticks: 0,
            score: 0.0,
            difficulty: super::difficulty::difficulty(0.0),
            tint: super::difficulty::day_night_tint(0, tuning.day_night_period_ticks),
            phase: GamePhase::Playing,
            players,
            obstacles: Vec::new(),
            pointer_history: PointerHistory::default(),
            spawner,
            friends_seen: false,
            ground_line,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Distance in metres as shown to the player
    pub fn visible_distance(&self) -> u64 {
        self.score.floor() as u64 * METRES_PER_SCORE
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn active_players(&self) -> usize {
        self.players.iter().filter(|p| p.active).count()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_history_lag() {
        let mut history = PointerHistory::default();
        history.push(true);
        history.push(false);
        history.push(false);
        assert!(!history.held(0));
        assert!(history.held(2));
        assert!(!history.held(3));

        // Ten more releases push the press out of the window
        for _ in 0..POINTER_HISTORY_LEN {
            history.push(false);
        }
        assert!((0..POINTER_HISTORY_LEN).all(|d| !history.held(d)));
        assert!(!history.held(POINTER_HISTORY_LEN + 3));
    }

    #[test]
    fn test_party_starts_grounded() {
        let tuning = HikeTuning::default();
        let state = HikeState::new(7, &tuning);
        for player in &state.players {
            assert!(player.bottom() >= state.ground_line);
            assert!(player.active && player.visible);
        }
        // Front avatar stands exactly on the ground line
        assert!((state.players[2].bottom() - state.ground_line).abs() < 1e-3);
        // Party is ordered left to right
        assert!(state.players[0].pos.x < state.players[1].pos.x);
        assert!(state.players[1].pos.x < state.players[2].pos.x);
    }

    #[test]
    fn test_visible_distance() {
        let tuning = HikeTuning::default();
        let mut state = HikeState::new(1, &tuning);
        state.score = 12.95;
        assert_eq!(state.visible_distance(), 120);
    }
}
