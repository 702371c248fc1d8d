//! Best hiking distance
//!
//! Persisted under `highscore_hike` as a bare JSON number of metres.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_or_default, save_or_log};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HikeHighscore {
    /// Best visible distance in metres (0 = no run recorded)
    pub best: u64,
}

impl HikeHighscore {
    const STORAGE_KEY: &'static str = "highscore_hike";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Load from storage. Anything that is not a finite positive number reads as 0.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw: f64 = load_or_default(store, Self::STORAGE_KEY);
        let best = if raw.is_finite() && raw > 0.0 {
            raw.floor() as u64
        } else {
            0
        };
        log::info!("Loaded hike highscore: {}m", best);
        Self { best }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        save_or_log(store, Self::STORAGE_KEY, &self.best);
        log::info!("Hike highscore saved ({}m)", self.best);
    }

    /// Check if a distance beats the record
    pub fn qualifies(&self, distance: u64) -> bool {
        distance > self.best
    }

    /// Fold a finished run into the record. Returns true on a new record.
    pub fn record(&mut self, distance: u64) -> bool {
        let new_record = self.qualifies(distance);
        self.best = self.best.max(distance);
        new_record
    }
}
