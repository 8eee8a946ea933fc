//! Drive: a top-down lane dodger
//!
//! Steer between road blocks and pick up fuel cans before the tank runs dry.
//! The score is the number of seconds survived.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

pub use state::{Block, Car, DriveStore, FuelCan};

use crate::sim::game::{CrashCause, Game, TickInput};
use crate::tuning::DriveTuning;

#[derive(Debug, Clone)]
pub struct Drive {
    pub tuning: DriveTuning,
    pub store: DriveStore,
    rng: Pcg32,
    seed: u64,
}

impl Drive {
    pub fn new(tuning: DriveTuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        let mut game = Self {
            store: DriveStore::new(&tuning),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            seed,
        };
        game.reset(seed);
        game
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Game for Drive {
    fn size(&self) -> Vec2 {
        Vec2::new(self.tuning.width, self.tuning.height)
    }

    fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.store = DriveStore::new(&self.tuning);
        log::info!("Drive reset (seed {seed})");
    }

    fn step(&mut self, dt: f32, input: &TickInput) -> Option<CrashCause> {
        tick::tick(&mut self.store, &self.tuning, &mut self.rng, input, dt)
    }

    fn score(&self) -> f32 {
        self.store.elapsed
    }
}
