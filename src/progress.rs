//! Puzzle progress
//!
//! Tracks which catalog images have been solved in the current cycle
//! (`playedPuzzles`) and how many distinct images were ever solved
//! (`numDonePuzzlesEver`). The cycle starts over once every image is done.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_or_default, save_or_log};

/// Puzzle images, by texture key
pub const PUZZLE_CATALOG: [&str; 10] = [
    "puzzle_e0",
    "puzzle_e1",
    "puzzle_eg0",
    "puzzle_eg1",
    "puzzle_k0",
    "puzzle_k1",
    "puzzle_g0",
    "puzzle_j0",
    "puzzle_bam",
    "puzzle_death_valley",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PuzzleProgress {
    /// Solved in the current cycle, no duplicates
    pub played: Vec<String>,
    /// Most images ever solved
    pub lifetime: u64,
}

impl PuzzleProgress {
    const PLAYED_KEY: &'static str = "playedPuzzles";
    const LIFETIME_KEY: &'static str = "numDonePuzzlesEver";

    /// Load from storage, dropping duplicates and unknown ids
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let stored: Vec<String> = load_or_default(store, Self::PLAYED_KEY);
        let mut played: Vec<String> = Vec::with_capacity(stored.len());
        for id in stored {
            if PUZZLE_CATALOG.contains(&id.as_str()) && !played.contains(&id) {
                played.push(id);
            }
        }

        let raw: f64 = load_or_default(store, Self::LIFETIME_KEY);
        let lifetime = if raw.is_finite() && raw > 0.0 {
            raw.floor() as u64
        } else {
            0
        };

        log::info!("Loaded puzzle progress: {} played, {} ever", played.len(), lifetime);
        Self { played, lifetime }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        save_or_log(store, Self::PLAYED_KEY, &self.played);
        save_or_log(store, Self::LIFETIME_KEY, &self.lifetime);
    }

    /// Distinct images solved so far
    pub fn done_ever(&self) -> u64 {
        self.lifetime.max(self.played.len() as u64)
    }

    pub fn is_played(&self, id: &str) -> bool {
        self.played.iter().any(|p| p == id)
    }

    /// Catalog entries not yet solved this cycle
    pub fn unplayed(&self) -> Vec<&'static str> {
        PUZZLE_CATALOG
            .iter()
            .copied()
            .filter(|id| !self.is_played(id))
            .collect()
    }

    /// Choose an unplayed image. If everything has been played the cycle
    /// restarts and any image may come up.
    pub fn pick<R: Rng>(&mut self, rng: &mut R) -> &'static str {
        let mut candidates = self.unplayed();
        if candidates.is_empty() {
            log::info!("All puzzles played, starting a new cycle");
            self.played.clear();
            candidates = PUZZLE_CATALOG.to_vec();
        }
        candidates.choose(rng).copied().unwrap_or(PUZZLE_CATALOG[0])
    }

    /// Mark `id` solved. Returns the distinct count after recording.
    pub fn record_completion(&mut self, id: &str) -> u64 {
        if !self.is_played(id) {
            self.played.push(id.to_string());
        }
        self.lifetime = self.done_ever();
        if self.played.len() >= PUZZLE_CATALOG.len() {
            self.played.clear();
        }
        self.lifetime
    }

    /// Every image has been solved at least once
    pub fn all_done(&self) -> bool {
        self.done_ever() >= PUZZLE_CATALOG.len() as u64
    }
}
