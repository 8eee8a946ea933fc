//! Cake Run entities
//!
//! Treats ride on platforms by id + offset, never by reference. When a platform
//! leaves the screen its treats go with it in the same cull pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::geom::Rect;
use crate::tuning::CakeRunTuning;

/// Stable platform handle. Ids only grow, so `platforms` stays sorted by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

/// The axolotl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
    pub size: Vec2,
    /// Seconds alive, drives the idle bob
    pub anim_time: f32,
}

impl Player {
    pub fn new(tuning: &CakeRunTuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.height * 0.4),
            vel_y: 0.0,
            size: Vec2::splat(tuning.player_size),
            anim_time: 0.0,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }
}

/// A scrolling platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity (negative = scrolling left)
    pub vel_x: f32,
}

impl Platform {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Treat types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreatKind {
    /// Common reward
    Cake,
    /// Penalty
    Pepper,
    /// Rare bonus
    Cone,
}

/// A collectible riding on a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treat {
    pub kind: TreatKind,
    pub parent: PlatformId,
    /// Center offset from the parent's top-left corner
    pub offset: Vec2,
    pub size: Vec2,
}

/// Every mutable entity of a Cake Run session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    pub player: Player,
    /// Sorted by id
    pub platforms: Vec<Platform>,
    pub treats: Vec<Treat>,
    /// World x where the next spawned platform starts
    pub spawn_cursor: f32,
    /// Running score (fractional because of the time trickle)
    pub score: f32,
    next_id: u32,
}

impl EntityStore {
    /// Empty store with the player in its start pose
    pub fn new(tuning: &CakeRunTuning) -> Self {
        Self {
            player: Player::new(tuning),
            platforms: Vec::new(),
            treats: Vec::new(),
            spawn_cursor: tuning.width + tuning.spawn_ahead,
            score: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new platform id
    pub fn next_platform_id(&mut self) -> PlatformId {
        let id = PlatformId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Look up a platform by id
    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|i| &self.platforms[i])
    }

    /// World-space center of a treat, `None` when its parent is gone
    pub fn treat_center(&self, treat: &Treat) -> Option<Vec2> {
        self.platform(treat.parent).map(|p| p.pos + treat.offset)
    }

    pub fn treat_rect(&self, treat: &Treat) -> Option<Rect> {
        self.treat_center(treat)
            .map(|c| Rect::from_center(c, treat.size))
    }

    /// True when every treat points at a live platform
    pub fn has_no_orphans(&self) -> bool {
        self.treats.iter().all(|t| self.platform(t.parent).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(store: &mut EntityStore, x: f32) -> PlatformId {
        let id = store.next_platform_id();
        store.platforms.push(Platform {
            id,
            pos: Vec2::new(x, 300.0),
            size: Vec2::new(200.0, 16.0),
            vel_x: -260.0,
        });
        id
    }

    #[test]
    fn test_treat_follows_parent() {
        let tuning = CakeRunTuning::default();
        let mut store = EntityStore::new(&tuning);
        let id = platform(&mut store, 100.0);
        let treat = Treat {
            kind: TreatKind::Cake,
            parent: id,
            offset: Vec2::new(40.0, -26.0),
            size: Vec2::splat(40.0),
        };
        assert_eq!(store.treat_center(&treat), Some(Vec2::new(140.0, 274.0)));

        store.platforms[0].pos.x -= 50.0;
        assert_eq!(store.treat_center(&treat), Some(Vec2::new(90.0, 274.0)));
    }

    #[test]
    fn test_lookup_after_removal() {
        let tuning = CakeRunTuning::default();
        let mut store = EntityStore::new(&tuning);
        let a = platform(&mut store, 0.0);
        let b = platform(&mut store, 300.0);
        let c = platform(&mut store, 600.0);
        store.platforms.retain(|p| p.id != b);

        assert!(store.platform(a).is_some());
        assert!(store.platform(b).is_none());
        assert_eq!(store.platform(c).map(|p| p.pos.x), Some(600.0));
    }

    #[test]
    fn test_orphan_detection() {
        let tuning = CakeRunTuning::default();
        let mut store = EntityStore::new(&tuning);
        let id = platform(&mut store, 0.0);
        store.treats.push(Treat {
            kind: TreatKind::Pepper,
            parent: id,
            offset: Vec2::ZERO,
            size: Vec2::splat(40.0),
        });
        assert!(store.has_no_orphans());
        store.platforms.clear();
        assert!(!store.has_no_orphans());
    }
}
