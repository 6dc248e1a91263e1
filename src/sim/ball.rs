//! Ball and pad entities
//!
//! Motion is a unit-timestep Euler step. Every collision response is a pure
//! vertical bounce regardless of hit side or approach angle.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::brick::WarpBlock;
use crate::tuning::Tuning;

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Nominal speed; only ever scaled up
    pub speed: f32,
    /// Warp block the ball arrived at and has not yet left
    #[serde(default)]
    pub warp_lock: Option<u32>,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            speed: vel.length(),
            warp_lock: None,
        }
    }

    /// Spawn a ball at `pos` heading in a random upward-biased direction
    pub fn launch(id: u32, pos: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let degrees = rng.random_range(tuning.launch_angle_min_deg..=tuning.launch_angle_max_deg);
        let angle = degrees.to_radians();
        // Screen y grows downward, so "up" is negative y
        let vel = Vec2::new(angle.cos(), -angle.sin()) * tuning.ball_start_speed;
        Self {
            speed: tuning.ball_start_speed,
            ..Self::new(id, pos, vel, tuning.ball_radius)
        }
    }

    /// Advance one tick and reflect off the side and top walls.
    ///
    /// There is no floor: a ball past the bottom edge is lost, not bounced.
    pub fn step(&mut self, arena_width: f32) {
        self.pos += self.vel;

        if self.pos.x < 0.0 {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > arena_width {
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y < 0.0 {
            self.vel.y = self.vel.y.abs();
        }
    }

    #[inline]
    pub fn bounce_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Scale velocity and speed by `factor`; factors below 1.0 count as 1.0
    pub fn increase_speed(&mut self, factor: f32) {
        let factor = factor.max(1.0);
        self.vel *= factor;
        self.speed *= factor;
    }

    /// Teleport to a randomly chosen warp block other than `from`.
    ///
    /// Returns the destination id, or `None` when there is no sibling.
    pub fn warp(&mut self, warps: &[WarpBlock], from: usize, rng: &mut impl Rng) -> Option<u32> {
        if warps.len() < 2 || from >= warps.len() {
            return None;
        }
        let mut pick = rng.random_range(0..warps.len() - 1);
        if pick >= from {
            pick += 1;
        }
        let target = &warps[pick];
        self.pos = target.circle.center;
        self.warp_lock = Some(target.id);
        Some(target.id)
    }

    /// True once the ball has dropped past the bottom edge
    #[inline]
    pub fn is_lost(&self, arena_height: f32) -> bool {
        self.pos.y > arena_height
    }
}

/// The player's pad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pad {
    /// Centre x
    pub x: f32,
    pub width: u32,
}

impl Pad {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.arena_width / 2.0,
            width: tuning.pad_base_width,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width as f32 / 2.0
    }

    /// Follow the pointer, shrinking for the stage and staying inside the arena
    pub fn move_toward(&mut self, stage: u32, pointer_x: f32, tuning: &Tuning) {
        self.width = tuning.pad_width(stage);
        let half = self.half_width();
        // max/min rather than clamp: never panics, and a NaN pointer lands on an edge
        self.x = pointer_x.max(half).min(tuning.arena_width - half);
    }

    /// Whether the pad catches a descending ball this tick
    pub fn catch(&self, ball: &Ball, tuning: &Tuning) -> bool {
        let lower_edge = ball.pos.y + ball.radius;
        let band_top = tuning.arena_height - tuning.catch_band_top;
        let band_bottom = tuning.arena_height - tuning.catch_band_bottom;
        let half = self.half_width();

        ball.vel.y > 0.0
            && (band_top..=band_bottom).contains(&lower_edge)
            && (self.x - half..=self.x + half).contains(&ball.pos.x)
    }
}
