//! What every game exposes to the session loop

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Cake Run: fell onto the spike floor
    Spikes,
    /// Drive: left the road
    Wall,
    /// Drive: rammed a block
    Block,
    /// Drive: fuel reached zero
    OutOfFuel,
}

impl fmt::Display for CrashCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spikes => write!(f, "touched the spikes"),
            Self::Wall => write!(f, "hit the wall"),
            Self::Block => write!(f, "hit a block"),
            Self::OutOfFuel => write!(f, "ran out of fuel"),
        }
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for an explicit start
    Idle,
    /// Active gameplay
    Running,
    /// Frozen until an explicit resume
    Paused,
    /// Run ended, waiting for restart
    Crashed(CrashCause),
}

impl Phase {
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running)
    }
}

/// Input the simulation reads for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Jump edge (Cake Run)
    pub jump: bool,
    /// Steering axis in [-1, 1] (Drive)
    pub steer: f32,
}

/// A game the session can drive
pub trait Game {
    /// Logical playfield size in pixels
    fn size(&self) -> Vec2;

    /// Rebuild every entity collection from scratch for a new run
    fn reset(&mut self, seed: u64);

    /// Advance one sanitized step. Returns the cause when the step was fatal.
    fn step(&mut self, dt: f32, input: &TickInput) -> Option<CrashCause>;

    /// Running score (may be fractional)
    fn score(&self) -> f32;
}
