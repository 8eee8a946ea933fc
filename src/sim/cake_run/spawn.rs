//! Procedural platform generation and culling
//!
//! The spawn cursor is the world x where the next platform begins. It scrolls
//! with the level and a new platform is laid down whenever it comes within
//! `spawn_ahead` of the right edge.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{EntityStore, Platform, PlatformId, Treat, TreatKind};
use crate::tuning::CakeRunTuning;

/// Treat sprite size
pub const TREAT_SIZE: f32 = 40.0;
/// Height of the lowest treat above the platform top
const TREAT_BASE_OFFSET: f32 = -26.0;
/// Vertical spacing of stacked treats
const TREAT_STACK_STEP: f32 = 30.0;
/// Treats keep this far from platform ends
const TREAT_EDGE_MARGIN: f32 = 20.0;

/// Starting x of the first platform in a fresh layout
const LAYOUT_START_X: f32 = 120.0;
/// Horizontal advance between starts of the opening platforms
const LAYOUT_STEP_MIN: f32 = 120.0;
const LAYOUT_STEP_RANGE: f32 = 120.0;

/// Most platforms laid down in a single tick
pub const MAX_SPAWNS_PER_TICK: usize = 16;

#[inline]
fn uniform(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// Gap to leave after a platform, never wider than one jump can cover
pub fn next_gap(tuning: &CakeRunTuning, rng: &mut Pcg32) -> f32 {
    let hi = tuning.gap_max.min(tuning.max_jumpable_gap()).max(0.0);
    let lo = tuning.gap_min.clamp(0.0, hi);
    uniform(rng, lo, hi)
}

/// Weighted treat roll: mostly cake, some pepper, rare cone
pub fn roll_treat_kind(tuning: &CakeRunTuning, rng: &mut Pcg32) -> TreatKind {
    let roll: f32 = rng.random();
    if roll > tuning.cone_threshold {
        TreatKind::Cone
    } else if roll < tuning.pepper_chance {
        TreatKind::Pepper
    } else {
        TreatKind::Cake
    }
}

/// Create a platform starting at `x` along with its treats
pub fn spawn_platform(
    store: &mut EntityStore,
    tuning: &CakeRunTuning,
    rng: &mut Pcg32,
    x: f32,
) -> PlatformId {
    let w = uniform(rng, tuning.platform_min_width, tuning.platform_max_width);
    let y = tuning.height - uniform(rng, tuning.platform_rise_min, tuning.platform_rise_min + tuning.platform_rise_range);
    let id = store.next_platform_id();
    store.platforms.push(Platform {
        id,
        pos: Vec2::new(x, y),
        size: Vec2::new(w, tuning.platform_height),
        vel_x: -tuning.scroll_speed,
    });

    let cols = rng.random_range(1..=3u32);
    for _ in 0..cols {
        let ox = uniform(rng, TREAT_EDGE_MARGIN, (w - TREAT_EDGE_MARGIN).max(TREAT_EDGE_MARGIN));
        let stacked = rng.random::<f32>() < tuning.stack_chance;
        let stack = if stacked { 1 + rng.random_range(1..=2u32) } else { 1 };
        for s in 0..stack {
            store.treats.push(Treat {
                kind: roll_treat_kind(tuning, rng),
                parent: id,
                offset: Vec2::new(ox, TREAT_BASE_OFFSET - s as f32 * TREAT_STACK_STEP),
                size: Vec2::splat(TREAT_SIZE),
            });
        }
    }

    log::trace!("spawned platform {:?} at x={:.0} w={:.0} y={:.0}", id, x, w, y);
    id
}

/// Lay out the opening platforms and park the player on the first one
pub fn initial_layout(store: &mut EntityStore, tuning: &CakeRunTuning, rng: &mut Pcg32) {
    let rows = rng.random_range(4..=5u32);
    let mut x = LAYOUT_START_X;
    for _ in 0..rows {
        spawn_platform(store, tuning, rng, x);
        x += uniform(rng, LAYOUT_STEP_MIN, LAYOUT_STEP_MIN + LAYOUT_STEP_RANGE);
    }

    if let Some(first) = store.platforms.first() {
        store.player.pos.y = first.pos.y - store.player.size.y / 2.0;
    }
    if let Some(last) = store.platforms.last() {
        store.spawn_cursor = last.right() + next_gap(tuning, rng);
    }
}

/// Drop platforms that scrolled past the cull line, then their treats
pub fn cull(store: &mut EntityStore, tuning: &CakeRunTuning) {
    let before = store.platforms.len();
    store.platforms.retain(|p| p.right() >= tuning.cull_x);
    if store.platforms.len() == before {
        return;
    }
    let platforms = &store.platforms;
    store
        .treats
        .retain(|t| platforms.binary_search_by_key(&t.parent, |p| p.id).is_ok());
    debug_assert!(store.has_no_orphans());
}

/// Scroll the cursor and spawn until it is back beyond the lookahead line.
/// Returns how many platforms were created.
pub fn advance(store: &mut EntityStore, tuning: &CakeRunTuning, rng: &mut Pcg32, dt: f32) -> usize {
    store.spawn_cursor -= tuning.scroll_speed * dt;
    let horizon = tuning.width + tuning.spawn_ahead;
    let mut spawned = 0;
    while store.spawn_cursor < horizon {
        if spawned == MAX_SPAWNS_PER_TICK {
            log::warn!("Spawn cap reached with cursor at {:.1}", store.spawn_cursor);
            break;
        }
        let x = store.spawn_cursor;
        let id = spawn_platform(store, tuning, rng, x);
        let right = store.platform(id).map_or(x, |p| p.right());
        let next = right + next_gap(tuning, rng);
        spawned += 1;
        // The cursor must move forward or the loop never reaches the horizon
        if next.is_nan() || next <= x {
            log::warn!("Platform at {x:.1} did not advance the spawn cursor");
            break;
        }
        store.spawn_cursor = next;
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    #[test]
    fn test_gaps_always_jumpable() {
        let tuning = CakeRunTuning::default();
        let max = tuning.max_jumpable_gap();
        let mut rng = rng(7);
        for _ in 0..1000 {
            let gap = next_gap(&tuning, &mut rng);
            assert!(gap <= max, "gap {gap} exceeds {max}");
            assert!(gap >= tuning.gap_min);
        }
    }

    #[test]
    fn test_zero_width_platforms_cannot_stall_spawning() {
        let tuning = CakeRunTuning {
            platform_min_width: 0.0,
            platform_max_width: 0.0,
            gap_min: 0.0,
            gap_max: 0.0,
            ..Default::default()
        };
        let mut store = EntityStore::new(&tuning);
        let mut rng = rng(1);
        let spawned = advance(&mut store, &tuning, &mut rng, 1.0 / 60.0);
        assert!(spawned <= MAX_SPAWNS_PER_TICK);
        assert!(store.platforms.len() <= MAX_SPAWNS_PER_TICK);
    }

    #[test]
    fn test_gaps_jumpable_even_with_bad_tuning() {
        let tuning = CakeRunTuning {
            gap_min: 300.0,
            gap_max: 900.0,
            ..Default::default()
        };
        let max = tuning.max_jumpable_gap();
        let mut rng = rng(11);
        for _ in 0..1000 {
            assert!(next_gap(&tuning, &mut rng) <= max);
        }
    }

    #[test]
    fn test_spawned_platforms_are_spaced_by_jumpable_gaps() {
        let tuning = CakeRunTuning::default();
        let max = tuning.max_jumpable_gap();
        let mut store = EntityStore::new(&tuning);
        let mut rng = rng(3);
        initial_layout(&mut store, &tuning, &mut rng);
        let opening = store.platforms.len();

        let dt = 1.0 / 60.0;
        for _ in 0..3000 {
            for p in &mut store.platforms {
                p.pos.x += p.vel_x * dt;
            }
            advance(&mut store, &tuning, &mut rng, dt);
            cull(&mut store, &tuning);
        }

        assert!(store.platforms.len() > 1);
        let spawned: Vec<_> = store.platforms.iter().filter(|p| p.id.0 as usize > opening).collect();
        for pair in spawned.windows(2) {
            let gap = pair[1].pos.x - pair[0].right();
            assert!(gap <= max + 0.01, "gap {gap} exceeds {max}");
            assert!(gap >= 0.0);
        }
    }

    #[test]
    fn test_treat_weights() {
        let tuning = CakeRunTuning::default();
        let mut rng = rng(99);
        let (mut cake, mut pepper, mut cone) = (0, 0, 0);
        for _ in 0..10_000 {
            match roll_treat_kind(&tuning, &mut rng) {
                TreatKind::Cake => cake += 1,
                TreatKind::Pepper => pepper += 1,
                TreatKind::Cone => cone += 1,
            }
        }
        assert!(cake > pepper && pepper > cone && cone > 0);
    }

    #[test]
    fn test_initial_layout_rests_player_on_first_platform() {
        let tuning = CakeRunTuning::default();
        let mut store = EntityStore::new(&tuning);
        initial_layout(&mut store, &tuning, &mut rng(5));

        assert!((4..=5).contains(&store.platforms.len()));
        let first = &store.platforms[0];
        assert!((store.player.bottom() - first.pos.y).abs() < 1e-3);
        assert!(store.spawn_cursor > store.platforms.last().unwrap().right());
        assert!(!store.treats.is_empty());
        assert!(store.has_no_orphans());
    }

    #[test]
    fn test_cull_removes_children_with_parent() {
        let tuning = CakeRunTuning::default();
        let mut store = EntityStore::new(&tuning);
        let mut rng = rng(21);
        let doomed = spawn_platform(&mut store, &tuning, &mut rng, -2000.0);
        let kept = spawn_platform(&mut store, &tuning, &mut rng, 400.0);

        cull(&mut store, &tuning);

        assert!(store.platform(doomed).is_none());
        assert!(store.platform(kept).is_some());
        assert!(store.treats.iter().all(|t| t.parent == kept));
        assert!(!store.treats.is_empty());
    }

    #[test]
    fn test_stack_layout() {
        let tuning = CakeRunTuning {
            stack_chance: 1.0,
            ..Default::default()
        };
        let mut store = EntityStore::new(&tuning);
        spawn_platform(&mut store, &tuning, &mut rng(1), 0.0);
        for t in &store.treats {
            let level = (TREAT_BASE_OFFSET - t.offset.y) / TREAT_STACK_STEP;
            assert!(level >= 0.0 && level < 3.0);
            assert!(t.offset.x >= TREAT_EDGE_MARGIN);
        }
        // Every column is at least two high when stacking is forced
        assert!(store.treats.len() >= 2);
    }
}
