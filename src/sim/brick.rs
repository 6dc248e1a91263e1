//! Bricks and warp blocks
//!
//! The brick variants form a closed set, so behaviour is a `match` over
//! [`BrickKind`] instead of a trait object per variant.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::geometry::{Circle, Rect, point_in_rect, rect_touches};
use crate::palette;

/// Brick variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrickKind {
    /// 1-3 hits, scores on destruction
    #[default]
    Breakable,
    /// Absorbs hits, never destroyed, never scores
    Unbreakable,
    /// Same behaviour as `Unbreakable`, drawn in its own colour
    Permanent,
    /// One-hit brick that spawns extra balls on every contact
    Multiplier,
}

impl BrickKind {
    /// Immune bricks ignore hits and do not count for stage clear
    #[inline]
    pub fn is_immune(self) -> bool {
        matches!(self, BrickKind::Unbreakable | BrickKind::Permanent)
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub kind: BrickKind,
    pub rect: Rect,
    pub health: i32,
    /// Health at creation, used for scoring
    pub initial_health: i32,
}

impl Brick {
    /// Build a brick of `kind` at `(x, y)`. `health` only matters for breakables.
    pub fn new(id: u32, kind: BrickKind, x: f32, y: f32, size: Vec2, health: i32) -> Self {
        let health = match kind {
            BrickKind::Breakable => health,
            BrickKind::Multiplier => 1,
            BrickKind::Unbreakable | BrickKind::Permanent => 0,
        };
        Self {
            id,
            kind,
            rect: Rect::new(x, y, size.x, size.y),
            health,
            initial_health: health,
        }
    }

    #[inline]
    pub fn is_immune(&self) -> bool {
        self.kind.is_immune()
    }

    /// Ball centre strictly inside the brick
    #[inline]
    pub fn check_collision(&self, ball: &Ball) -> bool {
        point_in_rect(ball.pos, &self.rect)
    }

    /// Take one hit; immune bricks ignore it
    pub fn hit(&mut self) {
        if !self.is_immune() {
            self.health -= 1;
        }
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        !self.is_immune() && self.health <= 0
    }

    /// Placement test: touching bricks count as overlapping
    #[inline]
    pub fn is_overlapping(&self, other: &Brick) -> bool {
        rect_touches(&self.rect, &other.rect)
    }

    /// Palette colour: fixed for the special variants, by health otherwise
    pub fn color(&self) -> u8 {
        match self.kind {
            BrickKind::Unbreakable => palette::UNBREAKABLE,
            BrickKind::Permanent => palette::PERMANENT,
            BrickKind::Multiplier if self.health > 0 => palette::MULTIPLIER,
            BrickKind::Multiplier | BrickKind::Breakable => health_color(self.health),
        }
    }
}

/// Colour for a breakable brick's current health
pub fn health_color(health: i32) -> u8 {
    match health {
        1 => palette::HEALTH_ONE,
        2 => palette::HEALTH_TWO,
        3 => palette::HEALTH_THREE,
        _ => palette::DEFAULT,
    }
}

/// A stationary teleport trigger; always part of a set of two or more
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarpBlock {
    pub id: u32,
    pub circle: Circle,
}

impl WarpBlock {
    pub fn new(id: u32, center: Vec2, radius: f32) -> Self {
        Self {
            id,
            circle: Circle::new(center, radius),
        }
    }

    #[inline]
    pub fn check_collision(&self, ball: &Ball) -> bool {
        self.circle.contains(ball.pos)
    }

    pub fn color(&self) -> u8 {
        palette::WARP
    }
}
