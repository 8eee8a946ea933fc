//! Drive step

use rand_pcg::Pcg32;

use super::collision::{collect_fuel, hit_block, hit_wall};
use super::spawn;
use super::state::DriveStore;
use crate::consts::NOMINAL_HZ;
use crate::sim::game::{CrashCause, TickInput};
use crate::sim::physics::damping;
use crate::tuning::DriveTuning;

/// Steer the car and scroll the road
pub fn physics_step(store: &mut DriveStore, tuning: &DriveTuning, steer: f32, dt: f32) {
    let steer = if steer.is_finite() { steer.clamp(-1.0, 1.0) } else { 0.0 };
    let car = &mut store.car;
    car.vel_x += steer * tuning.steer_accel * dt;
    car.vel_x *= damping(tuning.turn_friction, dt, NOMINAL_HZ);
    car.pos.x += car.vel_x * dt;

    for block in &mut store.blocks {
        block.pos.y += store.speed * dt;
    }
    let can_speed = store.speed * tuning.fuel_speed_factor;
    for can in &mut store.fuel_cans {
        can.pos.y += can_speed * dt;
    }
}

/// Advance Drive by one sanitized step
pub fn tick(
    store: &mut DriveStore,
    tuning: &DriveTuning,
    rng: &mut Pcg32,
    input: &TickInput,
    dt: f32,
) -> Option<CrashCause> {
    store.elapsed += dt;
    store.speed = (store.speed + tuning.speed_ramp * dt).min(tuning.max_speed);

    store.fuel = (store.fuel - tuning.fuel_drain * dt).clamp(0.0, 1.0);
    if store.fuel <= 0.0 {
        return Some(CrashCause::OutOfFuel);
    }

    physics_step(store, tuning, input.steer, dt);
    if hit_wall(&store.car, tuning) {
        log::debug!("car left the road at x={:.1}", store.car.pos.x);
        return Some(CrashCause::Wall);
    }

    spawn::cull(store, tuning);
    spawn::advance(store, tuning, rng, dt);

    if hit_block(store) {
        return Some(CrashCause::Block);
    }

    let refills = collect_fuel(store);
    if refills > 0 {
        log::trace!("refueled x{refills}, tank {:.2}", store.fuel);
    }
    None
}
