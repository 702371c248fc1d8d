//! Trailside entry point
//!
//! On the web the page drives the exported scene wrappers and this binary is
//! unused. Natively it plays one idle hike and one auto-solved puzzle against
//! in-memory storage, printing what the scene manager would have shown.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Trailside (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(trailside::platform::time_seed);

    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use trailside::consts::PIECE_COUNT;
    use trailside::persistence::MemoryStore;
    use trailside::scene::{HikeScene, PuzzleScene, RecordingHost, SceneContext, SceneKey};
    use trailside::{HikeTuning, PuzzleTuning};

    /// Upper bound on ticks for the idle hike (about an hour of play)
    const MAX_TICKS: u64 = 180_000;

    pub fn run(seed: u64) {
        let mut store = MemoryStore::new();
        hike(seed, &mut store);
        puzzle(seed, &mut store);
    }

    fn hike(seed: u64, store: &mut MemoryStore) {
        let mut host = RecordingHost::new();
        let mut ctx = SceneContext::new(store, &mut host);
        let mut scene = HikeScene::create(seed, HikeTuning::default(), true, &mut ctx);

        while !scene.state.is_over() && scene.state.time_ticks < MAX_TICKS {
            scene.update(&mut ctx);
        }
        drop(ctx);

        println!("\nHike (seed {seed}): {}", scene.score_text());
        for overlay in host.overlays(SceneKey::GameOver) {
            println!("{}", overlay.text);
        }
    }

    fn puzzle(seed: u64, store: &mut MemoryStore) {
        let mut host = RecordingHost::new();
        let mut ctx = SceneContext::new(store, &mut host);
        let mut scene = PuzzleScene::create(seed, &PuzzleTuning::default(), true, &mut ctx);

        // Walk the pieces onto piece 0 in id order, so each drop lands next
        // to an already assembled neighbour
        let spot = scene.board.pieces()[0].pos;
        for piece in 1..PIECE_COUNT {
            scene.drag(piece, spot);
            let outcome = scene.drag_end(piece, &mut ctx);
            log::debug!("Dropped piece {piece}: {} merges", outcome.merges.len());
        }
        drop(ctx);

        println!("\nPuzzle {}: solved = {}", scene.image(), scene.is_solved());
        for overlay in host.overlays(SceneKey::GameOver) {
            println!("{}", overlay.text);
        }
    }
}
