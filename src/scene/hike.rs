//! Hike runner scene

use serde::Serialize;

use super::{Overlay, SceneContext, SceneKey};
use crate::highscores::HikeHighscore;
use crate::hike::{GameEvent, HikeState, Obstacle, Player, TickInput, tick};
use crate::tuning::HikeTuning;

/// Famous climbs the final distance is compared against, lowest first
pub const MOUNTAINS: [(u64, &str); 10] = [
    (0, "Lidingöbron"),
    (233, "Mount Inari"),
    (870, "Uetliberg"),
    (1136, "Lone Pine Peak"),
    (1372, "Mount Doom"),
    (1437, "Andermatt"),
    (1905, "Riederalp"),
    (3776, "Mount Fuji"),
    (4412, "Mount Whitney"),
    (8849, "Mount Everest"),
];

/// What the page needs to draw one frame
#[derive(Debug, Serialize)]
pub struct HikeFrame<'a> {
    pub score: String,
    pub tint: u32,
    pub over: bool,
    pub players: &'a [Player],
    pub obstacles: Vec<ObstacleFrame<'a>>,
}

/// An obstacle plus the texture it is drawn with
#[derive(Debug, Serialize)]
pub struct ObstacleFrame<'a> {
    pub sprite: &'static str,
    #[serde(flatten)]
    pub obstacle: &'a Obstacle,
}

impl<'a> From<&'a Obstacle> for ObstacleFrame<'a> {
    fn from(obstacle: &'a Obstacle) -> Self {
        Self {
            sprite: obstacle.kind.sprite_key(),
            obstacle,
        }
    }
}

pub struct HikeScene {
    pub state: HikeState,
    tuning: HikeTuning,
    input: TickInput,
}

impl HikeScene {
    pub const KEY: SceneKey = SceneKey::Hike;

    /// Start a run. Unless `restart` is set the intro overlay is shown first
    /// and the scene pauses behind it.
    pub fn create(seed: u64, tuning: HikeTuning, restart: bool, ctx: &mut SceneContext) -> Self {
        let state = HikeState::new(seed, &tuning);
        log::info!("Hike started with seed: {}", seed);

        if !restart {
            let best = HikeHighscore::load(ctx.store).best;
            ctx.host.launch(SceneKey::Intro, Overlay::text(intro_text(best)));
            ctx.host.pause(Self::KEY);
        }

        Self {
            state,
            tuning,
            input: TickInput::default(),
        }
    }

    pub fn tuning(&self) -> &HikeTuning {
        &self.tuning
    }

    pub fn pointer_down(&mut self) {
        self.input.pointer_held = true;
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer_held = false;
    }

    /// One 20 ms timer callback
    pub fn update(&mut self, ctx: &mut SceneContext) {
        tick(&mut self.state, &self.input, &self.tuning);

        for event in self.state.drain_events() {
            if let GameEvent::RunEnded { distance } = event {
                self.game_over(distance, ctx);
            }
        }
    }

    /// Score label, e.g. "120m"
    pub fn score_text(&self) -> String {
        format!("{}m", self.state.visible_distance())
    }

    /// Snapshot for drawing
    pub fn frame(&self) -> HikeFrame<'_> {
        HikeFrame {
            score: self.score_text(),
            tint: self.state.tint,
            over: self.state.is_over(),
            players: &self.state.players,
            obstacles: self.state.obstacles.iter().map(ObstacleFrame::from).collect(),
        }
    }

    /// Back button
    pub fn back_to_menu(&self, ctx: &mut SceneContext) {
        ctx.host.start(SceneKey::Menu);
        ctx.host.stop(Self::KEY);
    }

    fn game_over(&mut self, distance: u64, ctx: &mut SceneContext) {
        let mut highscore = HikeHighscore::load(ctx.store);
        let new_record = highscore.record(distance);
        highscore.save(ctx.store);

        let text = game_over_text(distance, highscore.best, new_record);
        ctx.host.launch(SceneKey::GameOver, Overlay::text(text));
        ctx.host.pause(Self::KEY);
    }
}

pub fn intro_text(best: u64) -> String {
    let mut msg = String::from(
        "On weekends, Erik and Gabriela go for adventures. \n\nHelp them jump over obstacles.",
    );
    if best > 0 {
        msg.push_str(&format!("\n\nHighscore: {}m", best));
    }
    msg
}

/// Highest landmark at or below `distance`
pub fn climbing_text(distance: u64) -> String {
    MOUNTAINS
        .iter()
        .rev()
        .find(|(height, _)| distance >= *height)
        .map(|(_, name)| format!("This is higher than {}.", name))
        .unwrap_or_else(|| "You can do better than that.".to_string())
}

pub fn game_over_text(distance: u64, best: u64, new_record: bool) -> String {
    let mut msg = format!(
        "You helped the family hike {}m.\n\n{}",
        distance,
        climbing_text(distance)
    );
    if new_record {
        msg.push_str("\n\nNEW HIGHSCORE!");
    } else {
        msg.push_str(&format!("\n\nHighscore: {}m", best));
    }
    msg
}
