//! Jigsaw puzzle scene

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{Overlay, SceneContext, SceneKey};
use crate::progress::{PUZZLE_CATALOG, PuzzleProgress};
use crate::puzzle::{Board, DropOutcome};
use crate::tuning::PuzzleTuning;

/// Opacity of the finished image behind the game-over text
const SOLVED_IMAGE_ALPHA: f32 = 0.98;

pub struct PuzzleScene {
    pub board: Board,
    image: &'static str,
    solved: bool,
}

impl PuzzleScene {
    pub const KEY: SceneKey = SceneKey::Puzzle;

    /// Pick an unplayed image and scatter its pieces. Unless `restart` is set
    /// the intro overlay is shown first and the scene pauses behind it.
    pub fn create(seed: u64, tuning: &PuzzleTuning, restart: bool, ctx: &mut SceneContext) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut progress = PuzzleProgress::load(ctx.store);
        let played_before = progress.played.len();
        let image = progress.pick(&mut rng);
        if progress.played.len() != played_before {
            progress.save(ctx.store);
        }
        let board = Board::new(&mut rng, tuning);
        log::info!("Puzzle {} started with seed: {}", image, seed);

        if !restart {
            ctx.host
                .launch(SceneKey::Intro, Overlay::text(intro_text(progress.done_ever())));
            ctx.host.pause(Self::KEY);
        }

        Self {
            board,
            image,
            solved: false,
        }
    }

    /// Texture key of the image being assembled
    pub fn image(&self) -> &'static str {
        self.image
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Drag callback: the whole group follows the pointer
    pub fn drag(&mut self, piece: usize, pos: Vec2) {
        self.board.drag(piece, pos);
    }

    /// Drag-end callback: merge with neighbours and finish if complete
    pub fn drag_end(&mut self, piece: usize, ctx: &mut SceneContext) -> DropOutcome {
        let outcome = self.board.drop_piece(piece);
        if outcome.complete && !self.solved {
            self.game_over(ctx);
        }
        outcome
    }

    /// Back button
    pub fn back_to_menu(&self, ctx: &mut SceneContext) {
        ctx.host.start(SceneKey::Menu);
        ctx.host.stop(Self::KEY);
    }

    fn game_over(&mut self, ctx: &mut SceneContext) {
        self.solved = true;

        let mut progress = PuzzleProgress::load(ctx.store);
        let done = progress.record_completion(self.image);
        progress.save(ctx.store);
        log::info!("Puzzle {} solved ({} of {})", self.image, done, PUZZLE_CATALOG.len());

        ctx.host.launch(
            SceneKey::GameOver,
            Overlay {
                text: game_over_text(done),
                image: Some(self.image.to_string()),
                alpha: Some(SOLVED_IMAGE_ALPHA),
            },
        );
        ctx.host.pause(Self::KEY);
    }
}

pub fn intro_text(done: u64) -> String {
    format!(
        "Klara loves to do puzzles. Especially with some help.\n\n\
         You have helped Klara solve {} out of {} puzzles.",
        done,
        PUZZLE_CATALOG.len()
    )
}

pub fn game_over_text(done: u64) -> String {
    let total = PUZZLE_CATALOG.len() as u64;
    if done < total {
        format!(
            "You have helped Klara solve {} out of {} puzzles. Try another!",
            done, total
        )
    } else {
        "You have solved all of Klara's puzzles!".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PIECE_COUNT;
    use crate::persistence::MemoryStore;
    use crate::scene::{HostCall, RecordingHost};

    fn solve(scene: &mut PuzzleScene, ctx: &mut SceneContext) -> DropOutcome {
        let spot = scene.board.pieces()[0].pos;
        for i in 1..PIECE_COUNT {
            scene.drag(i, spot);
        }
        scene.drag_end(0, ctx)
    }

    #[test]
    fn test_intro_reports_progress() {
        let mut store = MemoryStore::new();
        let mut host = RecordingHost::new();
        let mut ctx = SceneContext::new(&mut store, &mut host);
        PuzzleScene::create(3, &PuzzleTuning::default(), false, &mut ctx);
        drop(ctx);

        let intros = host.overlays(SceneKey::Intro);
        assert_eq!(intros.len(), 1);
        assert!(intros[0].text.ends_with("solve 0 out of 10 puzzles."));
        assert_eq!(host.calls.last(), Some(&HostCall::Pause(SceneKey::Puzzle)));
    }

    #[test]
    fn test_drag_piece_zero_onto_one() {
        let mut store = MemoryStore::new();
        let mut host = RecordingHost::new();
        let mut ctx = SceneContext::new(&mut store, &mut host);
        let mut scene = PuzzleScene::create(3, &PuzzleTuning::default(), true, &mut ctx);

        let target = scene.board.pieces()[1].pos;
        scene.drag(0, target + Vec2::new(3.0, -2.0));
        let outcome = scene.drag_end(0, &mut ctx);

        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(scene.board.group_of(0), 1);
        assert_eq!(scene.board.group_of(1), 1);
        assert!(!scene.is_solved());
    }

    #[test]
    fn test_solving_records_progress_once() {
        let mut store = MemoryStore::new();
        let mut host = RecordingHost::new();
        let mut ctx = SceneContext::new(&mut store, &mut host);
        let mut scene = PuzzleScene::create(9, &PuzzleTuning::default(), true, &mut ctx);

        let outcome = solve(&mut scene, &mut ctx);
        assert!(outcome.complete);
        assert!(scene.is_solved());

        // Dropping again does not record twice
        scene.drag_end(5, &mut ctx);
        drop(ctx);

        let progress = PuzzleProgress::load(&store);
        assert_eq!(progress.played, vec![scene.image().to_string()]);
        let overlays = host.overlays(SceneKey::GameOver);
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].image.as_deref(), Some(scene.image()));
        assert_eq!(overlays[0].alpha, Some(SOLVED_IMAGE_ALPHA));
        assert!(overlays[0].text.contains("1 out of 10"));
    }

    #[test]
    fn test_full_catalog_cycle() {
        let mut store = MemoryStore::new();
        let mut seen = Vec::new();
        for round in 0..PUZZLE_CATALOG.len() {
            let mut host = RecordingHost::new();
            let mut ctx = SceneContext::new(&mut store, &mut host);
            let tuning = PuzzleTuning::default();
            let mut scene = PuzzleScene::create(round as u64, &tuning, true, &mut ctx);
            assert!(!seen.contains(&scene.image()), "image repeated within a cycle");
            seen.push(scene.image());
            solve(&mut scene, &mut ctx);
            drop(ctx);

            let text = &host.overlays(SceneKey::GameOver)[0].text;
            if round + 1 == PUZZLE_CATALOG.len() {
                assert_eq!(text, "You have solved all of Klara's puzzles!");
            } else {
                assert!(text.ends_with("Try another!"));
            }
        }

        let progress = PuzzleProgress::load(&store);
        assert!(progress.played.is_empty());
        assert_eq!(progress.done_ever(), 10);
    }

    #[test]
    fn test_game_over_text() {
        assert_eq!(
            game_over_text(3),
            "You have helped Klara solve 3 out of 10 puzzles. Try another!"
        );
        assert_eq!(game_over_text(10), "You have solved all of Klara's puzzles!");
    }
}
