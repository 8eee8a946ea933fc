//! Axolotl Arcade - canvas mini-games on a shared real-time entity loop
//!
//! Core modules:
//! - `sim`: Simulation (geometry, physics, both games)
//! - `session`: Frame driver and phase state machine
//! - `renderer`: Display-list renderer and the Canvas 2D backend
//! - `platform`: Input mapping, frame clock, animation-frame handle
//! - `persistence`: Key-value store and best-score collaborator
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod error;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::StoreError;
pub use session::Session;
pub use settings::Settings;
pub use tuning::{CakeRunTuning, DriveTuning};

/// Loop configuration constants
pub mod consts {
    /// Largest simulated step (seconds). Longer frames are clamped to this.
    pub const MAX_DT: f32 = 1.0 / 30.0;
    /// Wall-clock gap (ms) above which a frame is rendered but not simulated
    pub const RESUME_GLITCH_MS: f64 = 250.0;
    /// Nominal display refresh used for the first frame and friction scaling
    pub const NOMINAL_HZ: f32 = 60.0;
}

/// Floor a running score for display and persistence. Negative and non-finite
/// scores read as zero.
#[inline]
pub fn display_score(score: f32) -> u64 {
    if score.is_finite() && score > 0.0 {
        score.floor() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_score_floors() {
        assert_eq!(display_score(12.9), 12);
        assert_eq!(display_score(0.0), 0);
        assert_eq!(display_score(-3.0), 0);
        assert_eq!(display_score(f32::NAN), 0);
    }
}
