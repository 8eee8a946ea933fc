//! Player settings and preferences
//!
//! Persisted separately from best scores through the key-value store.

use serde::{Deserialize, Serialize};

use crate::persistence::{KvStore, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Accessibility ===
    /// Reduced motion (no sprite bobbing, no flashing crash banner)
    pub reduced_motion: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Focus ===
    /// Also auto-pause when the window loses focus, not only when hidden
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            show_fps: false,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "axolotl_arcade_settings";

    /// Load settings, falling back to defaults on any problem
    pub fn load<K: KvStore + ?Sized>(store: &K) -> Self {
        match load_json(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from storage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save<K: KvStore + ?Sized>(&self, store: &mut K) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {e}"),
        }
    }
}
