//! Axis-aligned rectangles and circles
//!
//! Collisions are point tests: a ball's centre point is tested
//! against brick rectangles, and against warp-block circles. Two overlap
//! conventions exist: `rect_overlaps` (strict, touching edges do not count)
//! and `rect_touches` (inclusive). Brick placement uses the inclusive one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner (y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A circle in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        circle_contains(self.center, self.radius, point)
    }
}

/// Strict overlap: rectangles sharing only an edge or corner do not overlap
pub fn rect_overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Inclusive overlap: touching rectangles count as overlapping
pub fn rect_touches(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.x || a.x > b.right() || a.bottom() < b.y || a.y > b.bottom())
}

/// Strict interior containment (points on the border are outside)
#[inline]
pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    rect.x < point.x && point.x < rect.right() && rect.y < point.y && point.y < rect.bottom()
}

/// Euclidean distance from `center` to `point` strictly less than `radius`
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance(point) < radius
}
