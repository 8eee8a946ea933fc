//! Landing, death and treat pickup for Cake Run

use glam::Vec2;

use super::state::{EntityStore, Platform, Player, TreatKind};
use crate::sim::geom::{Rect, aabb_overlap};
use crate::tuning::CakeRunTuning;

/// Feet probe: a thin strip across the bottom of the sprite
const FEET_HALF_WIDTH: f32 = 18.0;
const FEET_HEIGHT: f32 = 8.0;
/// Probe starts this far above the sprite's bottom edge
const FEET_INSET: f32 = 4.0;
/// Top strip of a platform that counts as a landing surface
const TOP_STRIP_ABOVE: f32 = 8.0;
const TOP_STRIP_HEIGHT: f32 = 12.0;
/// Treat pickup box, larger than the sprite to feel fair
const HITBOX_SIZE: f32 = 56.0;

/// What the treat pass collected this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pickups {
    pub cakes: u32,
    pub peppers: u32,
    pub cones: u32,
}

pub fn feet_probe(player: &Player) -> Rect {
    Rect::new(
        player.pos.x - FEET_HALF_WIDTH,
        player.bottom() - FEET_INSET,
        FEET_HALF_WIDTH * 2.0,
        FEET_HEIGHT,
    )
}

pub fn top_strip(platform: &Platform) -> Rect {
    Rect::new(
        platform.pos.x,
        platform.pos.y - TOP_STRIP_ABOVE,
        platform.size.x,
        TOP_STRIP_HEIGHT,
    )
}

pub fn player_hitbox(player: &Player) -> Rect {
    Rect::from_center(player.pos, Vec2::splat(HITBOX_SIZE))
}

/// Land the player on the first platform whose top strip the feet touch while
/// falling. Returns true when grounded this step.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform]) -> bool {
    if player.vel_y < 0.0 {
        return false;
    }
    let feet = feet_probe(player);
    for platform in platforms {
        if aabb_overlap(&feet, &top_strip(platform)) {
            player.pos.y = platform.pos.y - player.size.y / 2.0;
            player.vel_y = 0.0;
            return true;
        }
    }
    false
}

/// Has an airborne player sunk past the spike line (plus margin)?
pub fn is_dead(player: &Player, grounded: bool, tuning: &CakeRunTuning) -> bool {
    !grounded && player.pos.y > tuning.ground_y - player.size.y / 2.0 + tuning.death_margin
}

/// Score after collecting one treat. Peppers never push the score below zero.
pub fn apply_treat(score: f32, kind: TreatKind, tuning: &CakeRunTuning) -> f32 {
    match kind {
        TreatKind::Cake => score + tuning.cake_points,
        TreatKind::Pepper => (score - tuning.pepper_penalty).max(0.0),
        TreatKind::Cone => score + tuning.cone_points,
    }
}

/// Remove every treat under the player's hit-box and apply its score delta
pub fn collect_treats(store: &mut EntityStore, tuning: &CakeRunTuning) -> Pickups {
    let hitbox = player_hitbox(&store.player);
    let mut pickups = Pickups::default();
    let mut score = store.score;

    let mut kept = Vec::with_capacity(store.treats.len());
    for treat in store.treats.drain(..) {
        let hit = store
            .platforms
            .binary_search_by_key(&treat.parent, |p| p.id)
            .ok()
            .map(|i| Rect::from_center(store.platforms[i].pos + treat.offset, treat.size))
            .is_some_and(|r| aabb_overlap(&hitbox, &r));
        if !hit {
            kept.push(treat);
            continue;
        }
        score = apply_treat(score, treat.kind, tuning);
        match treat.kind {
            TreatKind::Cake => pickups.cakes += 1,
            TreatKind::Pepper => pickups.peppers += 1,
            TreatKind::Cone => pickups.cones += 1,
        }
    }
    store.treats = kept;
    store.score = score;
    pickups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::cake_run::state::{PlatformId, Treat};

    fn tuning() -> CakeRunTuning {
        CakeRunTuning::default()
    }

    fn platform(id: u32, x: f32, y: f32) -> Platform {
        Platform {
            id: PlatformId(id),
            pos: Vec2::new(x, y),
            size: Vec2::new(200.0, 16.0),
            vel_x: -260.0,
        }
    }

    #[test]
    fn test_landing_snaps_to_surface() {
        let mut player = Player::new(&tuning());
        let p = platform(1, 100.0, 300.0);
        player.pos.y = p.pos.y - player.size.y / 2.0 + 2.0;
        player.vel_y = 120.0;

        assert!(resolve_landing(&mut player, std::slice::from_ref(&p)));
        assert_eq!(player.pos.y, p.pos.y - player.size.y / 2.0);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_landing_from_rest_counts() {
        let mut player = Player::new(&tuning());
        let p = platform(1, 100.0, 300.0);
        player.pos.y = p.pos.y - player.size.y / 2.0;
        player.vel_y = 0.0;
        assert!(resolve_landing(&mut player, std::slice::from_ref(&p)));
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_rising_player_passes_through() {
        let mut player = Player::new(&tuning());
        let p = platform(1, 100.0, 300.0);
        player.pos.y = p.pos.y - player.size.y / 2.0 + 2.0;
        player.vel_y = -400.0;
        let y = player.pos.y;

        assert!(!resolve_landing(&mut player, std::slice::from_ref(&p)));
        assert_eq!(player.pos.y, y);
        assert_eq!(player.vel_y, -400.0);
    }

    #[test]
    fn test_first_platform_wins() {
        let mut player = Player::new(&tuning());
        let a = platform(1, 100.0, 300.0);
        let b = platform(2, 100.0, 304.0);
        player.pos.y = 300.0 - player.size.y / 2.0 + 1.0;
        player.vel_y = 10.0;

        assert!(resolve_landing(&mut player, &[a.clone(), b]));
        assert_eq!(player.pos.y, a.pos.y - player.size.y / 2.0);
    }

    #[test]
    fn test_miss_when_off_the_edge() {
        let mut player = Player::new(&tuning());
        let p = platform(1, 400.0, 300.0);
        player.pos.y = p.pos.y - player.size.y / 2.0;
        player.vel_y = 50.0;
        assert!(!resolve_landing(&mut player, &[p]));
    }

    #[test]
    fn test_death_line_and_margin() {
        let t = tuning();
        let mut player = Player::new(&t);
        let line = t.ground_y - player.size.y / 2.0;

        player.pos.y = line + t.death_margin;
        assert!(!is_dead(&player, false, &t));

        player.pos.y = line + t.death_margin + 0.5;
        assert!(is_dead(&player, false, &t));
        assert!(!is_dead(&player, true, &t));
    }

    #[test]
    fn test_pepper_floors_score_at_zero() {
        let t = tuning();
        assert_eq!(apply_treat(30.0, TreatKind::Pepper, &t), 0.0);
        assert_eq!(apply_treat(80.0, TreatKind::Pepper, &t), 30.0);
        assert_eq!(apply_treat(0.0, TreatKind::Cake, &t), 10.0);
        assert_eq!(apply_treat(0.0, TreatKind::Cone, &t), 100.0);
    }

    #[test]
    fn test_collect_treats_removes_hits_only() {
        let t = tuning();
        let mut store = EntityStore::new(&t);
        let id = store.next_platform_id();
        store.platforms.push(Platform {
            id,
            pos: Vec2::new(100.0, 300.0),
            size: Vec2::new(300.0, 16.0),
            vel_x: -260.0,
        });
        store.player.pos = Vec2::new(150.0, 274.0);
        store.score = 30.0;

        let near = Treat {
            kind: TreatKind::Pepper,
            parent: id,
            offset: Vec2::new(50.0, -26.0),
            size: Vec2::splat(40.0),
        };
        let far = Treat {
            kind: TreatKind::Cake,
            parent: id,
            offset: Vec2::new(280.0, -26.0),
            size: Vec2::splat(40.0),
        };
        store.treats = vec![near, far.clone()];

        let got = collect_treats(&mut store, &t);
        assert_eq!(got.peppers, 1);
        assert_eq!(store.score, 0.0);
        assert_eq!(store.treats, vec![far]);
    }
}
