//! Wall, block and fuel-can tests for Drive

use super::state::{Car, DriveStore};
use crate::sim::geom::{aabb_overlap, ellipse_overlap};
use crate::tuning::DriveTuning;

/// Clearance kept between the car body and the road edge
const WALL_CLEARANCE: f32 = 2.0;

/// Allowed range for the car's center x
pub fn lane_bounds(car: &Car, tuning: &DriveTuning) -> (f32, f32) {
    let min = tuning.road_x() + car.size.x * 0.5 + WALL_CLEARANCE;
    let max = tuning.road_x() + tuning.road_width - car.size.x * 0.5 - WALL_CLEARANCE;
    (min, max)
}

pub fn hit_wall(car: &Car, tuning: &DriveTuning) -> bool {
    let (min, max) = lane_bounds(car, tuning);
    car.pos.x < min || car.pos.x > max
}

pub fn hit_block(store: &DriveStore) -> bool {
    let car = store.car.rect();
    store.blocks.iter().any(|b| aabb_overlap(&car, &b.rect()))
}

/// Refuel from every can the car's center is inside. Returns cans collected.
pub fn collect_fuel(store: &mut DriveStore) -> usize {
    let center = store.car.pos;
    let before = store.fuel_cans.len();
    let mut fuel = store.fuel;
    store.fuel_cans.retain(|can| {
        if ellipse_overlap(center, can.pos, can.radii) {
            fuel = (fuel + can.refill).clamp(0.0, 1.0);
            false
        } else {
            true
        }
    });
    store.fuel = fuel;
    before - store.fuel_cans.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::drive::state::{Block, FuelCan};
    use glam::Vec2;

    #[test]
    fn test_lane_bounds() {
        let t = DriveTuning::default();
        let car = Car::new(&t);
        assert_eq!(lane_bounds(&car, &t), (112.0, 408.0));
        assert!(!hit_wall(&car, &t));

        let mut car = car;
        car.pos.x = 111.0;
        assert!(hit_wall(&car, &t));
        car.pos.x = 409.0;
        assert!(hit_wall(&car, &t));
    }

    #[test]
    fn test_block_is_fatal() {
        let t = DriveTuning::default();
        let mut store = DriveStore::new(&t);
        store.blocks.push(Block {
            pos: store.car.pos + Vec2::new(0.0, -60.0),
            size: Vec2::new(60.0, 40.0),
        });
        assert!(hit_block(&store));
    }

    #[test]
    fn test_block_in_other_lane_is_safe() {
        let t = DriveTuning::default();
        let mut store = DriveStore::new(&t);
        store.blocks.push(Block {
            pos: Vec2::new(t.lane_center(0), store.car.pos.y),
            size: Vec2::new(60.0, 40.0),
        });
        assert!(!hit_block(&store));
    }

    #[test]
    fn test_fuel_refill_is_clamped() {
        let t = DriveTuning::default();
        let mut store = DriveStore::new(&t);
        store.fuel = 0.8;
        store.fuel_cans.push(FuelCan {
            pos: store.car.pos,
            radii: Vec2::new(26.0, 20.0),
            refill: 0.4,
        });
        assert_eq!(collect_fuel(&mut store), 1);
        assert_eq!(store.fuel, 1.0);
        assert!(store.fuel_cans.is_empty());
    }

    #[test]
    fn test_can_off_center_is_missed() {
        let t = DriveTuning::default();
        let mut store = DriveStore::new(&t);
        store.fuel = 0.5;
        store.fuel_cans.push(FuelCan {
            pos: store.car.pos + Vec2::new(20.0, 18.0),
            radii: Vec2::new(26.0, 20.0),
            refill: 0.4,
        });
        assert_eq!(collect_fuel(&mut store), 0);
        assert_eq!(store.fuel, 0.5);
    }
}
