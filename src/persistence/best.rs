//! Best-score persistence
//!
//! One whole-number best per game, stored as a JSON number.

use super::KvStore;

/// Cake Run best score key
pub const CAKE_RUN_BEST_KEY: &str = "ax_best";
/// Drive best score key
pub const DRIVE_BEST_KEY: &str = "axodriver_best";

/// What a session needs from persistence
pub trait ScoreStore {
    /// Stored best, or 0 when missing or unreadable
    fn load_best(&self) -> u64;
    /// Persist a new best. Failures are logged, never surfaced.
    fn save_best(&mut self, best: u64);
}

/// Parse a stored best. Negative and malformed values are rejected; fractions
/// are floored.
fn parse_best(raw: &str) -> Option<u64> {
    let value: f64 = serde_json::from_str(raw.trim()).ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value.floor() as u64)
    } else {
        None
    }
}

/// Best score kept under one key of a [`KvStore`]
#[derive(Debug, Clone)]
pub struct BestScore<K: KvStore> {
    store: K,
    key: &'static str,
}

impl<K: KvStore> BestScore<K> {
    pub fn new(store: K, key: &'static str) -> Self {
        Self { store, key }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut K {
        &mut self.store
    }
}

impl<K: KvStore> ScoreStore for BestScore<K> {
    fn load_best(&self) -> u64 {
        match self.store.get(self.key) {
            Ok(Some(raw)) => parse_best(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring unreadable best score {raw:?} under {}", self.key);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not load best score: {e}");
                0
            }
        }
    }

    fn save_best(&mut self, best: u64) {
        match self.store.set(self.key, &best.to_string()) {
            Ok(()) => log::info!("Best score saved ({best})"),
            Err(e) => log::warn!("Could not save best score: {e}"),
        }
    }
}
