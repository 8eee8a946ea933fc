//! Timed block and fuel-can spawning

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Block, DriveStore, FuelCan};
use crate::tuning::DriveTuning;

const BLOCK_MIN_WIDTH: f32 = 60.0;
const BLOCK_WIDTH_RANGE: f32 = 40.0;
const BLOCK_MIN_HEIGHT: f32 = 40.0;
const BLOCK_HEIGHT_RANGE: f32 = 60.0;
/// Fuel cans appear just above the top edge
const FUEL_SPAWN_Y: f32 = -30.0;

/// Count a timer down, treating NaN and negatives as already expired
#[inline]
fn countdown(timer: f32, dt: f32) -> f32 {
    let timer = if timer.is_finite() { timer } else { 0.0 };
    (timer - dt).max(0.0)
}

fn random_lane(tuning: &DriveTuning, rng: &mut Pcg32) -> f32 {
    let lane = rng.random_range(0..tuning.lanes.max(1));
    tuning.lane_center(lane)
}

pub fn spawn_block(store: &mut DriveStore, tuning: &DriveTuning, rng: &mut Pcg32) {
    let x = random_lane(tuning, rng);
    let w = BLOCK_MIN_WIDTH + rng.random::<f32>() * BLOCK_WIDTH_RANGE;
    let h = BLOCK_MIN_HEIGHT + rng.random::<f32>() * BLOCK_HEIGHT_RANGE;
    store.blocks.push(Block {
        pos: Vec2::new(x, -h),
        size: Vec2::new(w, h),
    });
}

pub fn spawn_fuel(store: &mut DriveStore, tuning: &DriveTuning, rng: &mut Pcg32) {
    let x = random_lane(tuning, rng);
    store.fuel_cans.push(FuelCan {
        pos: Vec2::new(x, FUEL_SPAWN_Y),
        radii: Vec2::new(tuning.fuel_radius_x, tuning.fuel_radius_y),
        refill: tuning.fuel_refill,
    });
}

/// Interval until the next block; shrinks as the run goes on
pub fn block_interval(tuning: &DriveTuning, elapsed: f32) -> f32 {
    (tuning.block_interval_start - elapsed * tuning.block_interval_decay)
        .max(tuning.block_interval_floor)
}

/// Remove everything that scrolled off the bottom edge
pub fn cull(store: &mut DriveStore, tuning: &DriveTuning) {
    let limit = tuning.height + tuning.cull_margin;
    store.blocks.retain(|b| b.rect().y <= limit);
    store.fuel_cans.retain(|c| c.top() <= limit);
}

/// Run both spawn timers
pub fn advance(store: &mut DriveStore, tuning: &DriveTuning, rng: &mut Pcg32, dt: f32) {
    store.block_timer = countdown(store.block_timer, dt);
    if store.block_timer == 0.0 {
        spawn_block(store, tuning, rng);
        store.block_timer = block_interval(tuning, store.elapsed);
    }

    store.fuel_timer = countdown(store.fuel_timer, dt);
    if store.fuel_timer == 0.0 {
        spawn_fuel(store, tuning, rng);
        store.fuel_timer =
            tuning.fuel_interval_min + rng.random::<f32>() * tuning.fuel_interval_range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_countdown_survives_nan() {
        assert_eq!(countdown(f32::NAN, 0.016), 0.0);
        assert_eq!(countdown(-3.0, 0.016), 0.0);
        assert!((countdown(1.0, 0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_block_interval_tightens() {
        let t = DriveTuning::default();
        assert!((block_interval(&t, 0.0) - 1.2).abs() < 1e-6);
        assert!((block_interval(&t, 10.0) - 1.0).abs() < 1e-6);
        assert_eq!(block_interval(&t, 1000.0), t.block_interval_floor);
    }

    #[test]
    fn test_spawns_land_in_lanes() {
        let t = DriveTuning::default();
        let mut store = DriveStore::new(&t);
        let mut rng = Pcg32::seed_from_u64(4);
        let lanes = [t.lane_center(0), t.lane_center(1), t.lane_center(2)];
        for _ in 0..50 {
            spawn_block(&mut store, &t, &mut rng);
            spawn_fuel(&mut store, &t, &mut rng);
        }
        assert!(store.blocks.iter().all(|b| lanes.contains(&b.pos.x)));
        assert!(store.fuel_cans.iter().all(|c| lanes.contains(&c.pos.x)));
        assert!(store.blocks.iter().all(|b| b.pos.y < 0.0));
    }

    #[test]
    fn test_timers_spawn_immediately_then_wait() {
        let t = DriveTuning::default();
        let mut store = DriveStore::new(&t);
        let mut rng = Pcg32::seed_from_u64(8);

        advance(&mut store, &t, &mut rng, 0.016);
        assert_eq!(store.blocks.len(), 1);
        assert_eq!(store.fuel_cans.len(), 1);
        assert!(store.fuel_timer >= t.fuel_interval_min);

        advance(&mut store, &t, &mut rng, 0.016);
        assert_eq!(store.blocks.len(), 1);
        assert_eq!(store.fuel_cans.len(), 1);
    }

    #[test]
    fn test_cull_past_bottom() {
        let t = DriveTuning::default();
        let mut store = DriveStore::new(&t);
        store.blocks.push(Block {
            pos: Vec2::new(140.0, t.height + 200.0),
            size: Vec2::new(60.0, 40.0),
        });
        store.blocks.push(Block {
            pos: Vec2::new(140.0, t.height),
            size: Vec2::new(60.0, 40.0),
        });
        cull(&mut store, &t);
        assert_eq!(store.blocks.len(), 1);
        assert_eq!(store.blocks[0].pos.y, t.height);
    }
}
