//! Cake Run step
//!
//! Physics, then spawner, then collisions, once per frame.

use rand_pcg::Pcg32;

use super::collision::{collect_treats, is_dead, resolve_landing};
use super::spawn;
use super::state::EntityStore;
use crate::sim::game::{CrashCause, TickInput};
use crate::sim::physics::integrate_axis;
use crate::tuning::CakeRunTuning;

/// Move the player under gravity and scroll the platforms
pub fn physics_step(store: &mut EntityStore, tuning: &CakeRunTuning, dt: f32) {
    let player = &mut store.player;
    integrate_axis(&mut player.pos.y, &mut player.vel_y, tuning.gravity, dt);
    player.anim_time += dt;

    for platform in &mut store.platforms {
        platform.pos.x += platform.vel_x * dt;
    }
}

/// Advance Cake Run by one sanitized step
pub fn tick(
    store: &mut EntityStore,
    tuning: &CakeRunTuning,
    rng: &mut Pcg32,
    input: &TickInput,
    dt: f32,
) -> Option<CrashCause> {
    if input.jump {
        store.player.vel_y = -tuning.jump_impulse;
    }

    physics_step(store, tuning, dt);

    spawn::cull(store, tuning);
    spawn::advance(store, tuning, rng, dt);

    let grounded = resolve_landing(&mut store.player, &store.platforms);
    if is_dead(&store.player, grounded, tuning) {
        log::debug!(
            "player fell: y={:.1} vy={:.1} platforms={}",
            store.player.pos.y,
            store.player.vel_y,
            store.platforms.len()
        );
        return Some(CrashCause::Spikes);
    }

    let pickups = collect_treats(store, tuning);
    if pickups != Default::default() {
        log::trace!("collected {:?}, score {:.0}", pickups, store.score);
    }

    store.score += tuning.trickle_per_sec * dt;
    None
}
