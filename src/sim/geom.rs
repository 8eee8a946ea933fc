//! Axis-aligned boxes and ellipse hit tests
//!
//! Everything here is a pure function of its inputs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        aabb_overlap(self, other)
    }
}

/// Open-interval overlap on both axes. Boxes that only share an edge do not
/// overlap.
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Normalized-distance test: is `point` inside the ellipse at `center` with
/// semi-axes `radii`? Degenerate radii never hit.
#[inline]
pub fn ellipse_overlap(point: Vec2, center: Vec2, radii: Vec2) -> bool {
    if !(radii.x > 0.0 && radii.y > 0.0) || !radii.is_finite() {
        return false;
    }
    let d = point - center;
    (d.x * d.x) / (radii.x * radii.x) + (d.y * d.y) / (radii.y * radii.y) <= 1.0
}
