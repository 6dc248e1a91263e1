//! Data-driven game balance
//!
//! Every constant the simulation uses is carried by [`Tuning`]. The default
//! reproduces the reference game; a JSON file can override any subset of
//! fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug)]
pub enum TuningError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file is not valid tuning JSON
    Parse(serde_json::Error),
    /// The values parse but describe an unplayable game
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start_speed: f32,
    /// Launch angle range in degrees from the horizontal
    pub launch_angle_min_deg: f32,
    pub launch_angle_max_deg: f32,
    pub speed_up_interval_ticks: u64,
    pub speed_up_factor: f32,

    // === Pad ===
    pub pad_base_width: u32,
    pub pad_shrink_per_stage: u32,
    pub pad_min_width: u32,
    /// Catch band for the ball's lower edge, as distances up from the arena bottom
    pub catch_band_top: f32,
    pub catch_band_bottom: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_min_x: f32,
    pub brick_max_x: f32,
    pub brick_min_y: f32,
    pub brick_max_y: f32,
    pub breakable_base_count: u32,
    pub breakable_per_stage: u32,
    pub unbreakable_count: u32,
    pub permanent_count: u32,
    pub multiplier_count: u32,
    pub max_brick_health: i32,
    pub max_placement_attempts: u32,

    // === Warp blocks ===
    pub warp_count: u32,
    pub warp_radius: f32,
    pub warp_min_x: f32,
    pub warp_max_x: f32,
    pub warp_min_y: f32,
    pub warp_max_y: f32,

    // === Scoring ===
    pub multiplier_spawn: u32,
    pub points_per_health: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_start_speed: BALL_START_SPEED,
            launch_angle_min_deg: LAUNCH_ANGLE_MIN_DEG,
            launch_angle_max_deg: LAUNCH_ANGLE_MAX_DEG,
            speed_up_interval_ticks: SPEED_UP_INTERVAL_TICKS,
            speed_up_factor: SPEED_UP_FACTOR,

            pad_base_width: PAD_BASE_WIDTH,
            pad_shrink_per_stage: PAD_SHRINK_PER_STAGE,
            pad_min_width: PAD_MIN_WIDTH,
            catch_band_top: CATCH_BAND_TOP,
            catch_band_bottom: CATCH_BAND_BOTTOM,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_min_x: BRICK_MIN_X,
            brick_max_x: BRICK_MAX_X,
            brick_min_y: BRICK_MIN_Y,
            brick_max_y: BRICK_MAX_Y,
            breakable_base_count: BREAKABLE_BASE_COUNT,
            breakable_per_stage: BREAKABLE_PER_STAGE,
            unbreakable_count: UNBREAKABLE_COUNT,
            permanent_count: PERMANENT_COUNT,
            multiplier_count: MULTIPLIER_COUNT,
            max_brick_health: MAX_BRICK_HEALTH,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,

            warp_count: WARP_COUNT,
            warp_radius: WARP_RADIUS,
            warp_min_x: WARP_MIN_X,
            warp_max_x: WARP_MAX_X,
            warp_min_y: WARP_MIN_Y,
            warp_max_y: WARP_MAX_Y,

            multiplier_spawn: MULTIPLIER_SPAWN,
            points_per_health: POINTS_PER_HEALTH,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would make the simulation misbehave
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid =
            |reason: &str| -> Result<(), TuningError> { Err(TuningError::Invalid(reason.to_string())) };

        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return invalid("arena dimensions must be positive");
        }
        if self.ball_radius <= 0.0 || self.ball_start_speed <= 0.0 {
            return invalid("ball radius and start speed must be positive");
        }
        if self.launch_angle_min_deg < 0.0
            || self.launch_angle_max_deg > 180.0
            || self.launch_angle_min_deg > self.launch_angle_max_deg
        {
            return invalid("launch angle range must lie within 0..=180 degrees");
        }
        if self.speed_up_factor < 1.0 {
            return invalid("speed_up_factor below 1.0 would slow balls down");
        }
        if self.speed_up_interval_ticks == 0 {
            return invalid("speed_up_interval_ticks must be at least 1");
        }
        if self.pad_min_width == 0 || self.pad_min_width > self.pad_base_width {
            return invalid("pad_min_width must be in 1..=pad_base_width");
        }
        if self.pad_base_width as f32 > self.arena_width {
            return invalid("pad_base_width exceeds the arena width");
        }
        if self.catch_band_bottom > self.catch_band_top {
            return invalid("catch band bottom lies above its top");
        }
        if self.brick_width <= 0.0 || self.brick_height <= 0.0 {
            return invalid("brick dimensions must be positive");
        }
        if self.brick_min_x > self.brick_max_x || self.brick_min_y > self.brick_max_y {
            return invalid("brick placement range is empty");
        }
        if self.max_brick_health < 1 {
            return invalid("max_brick_health must be at least 1");
        }
        if self.max_placement_attempts == 0 {
            return invalid("max_placement_attempts must be at least 1");
        }
        if self.warp_count == 1 {
            return invalid("warp blocks come in sets of two or more");
        }
        if self.warp_radius <= 0.0 {
            return invalid("warp_radius must be positive");
        }
        if self.warp_min_x > self.warp_max_x || self.warp_min_y > self.warp_max_y {
            return invalid("warp placement range is empty");
        }
        Ok(())
    }

    /// Repair out-of-range values so the simulation can run on any tuning.
    ///
    /// Bad sizes fall back to the defaults, inverted ranges collapse onto
    /// their lower bound and the remaining limits are clamped. A valid tuning
    /// comes back unchanged.
    pub fn clamped(&self) -> Self {
        let defaults = Tuning::default();
        let positive = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        let finite = |value: f32, fallback: f32| {
            if value.is_finite() { value } else { fallback }
        };

        let mut t = self.clone();

        t.arena_width = positive(t.arena_width, defaults.arena_width);
        t.arena_height = positive(t.arena_height, defaults.arena_height);

        t.ball_radius = positive(t.ball_radius, defaults.ball_radius);
        t.ball_start_speed = positive(t.ball_start_speed, defaults.ball_start_speed);
        t.launch_angle_min_deg =
            finite(t.launch_angle_min_deg, defaults.launch_angle_min_deg).clamp(0.0, 180.0);
        t.launch_angle_max_deg = finite(t.launch_angle_max_deg, defaults.launch_angle_max_deg)
            .clamp(t.launch_angle_min_deg, 180.0);
        t.speed_up_factor = finite(t.speed_up_factor, defaults.speed_up_factor).max(1.0);
        t.speed_up_interval_ticks = t.speed_up_interval_ticks.max(1);

        t.pad_base_width = t.pad_base_width.min(t.arena_width as u32).max(1);
        t.pad_min_width = t.pad_min_width.clamp(1, t.pad_base_width);
        t.catch_band_top = finite(t.catch_band_top, defaults.catch_band_top);
        t.catch_band_bottom =
            finite(t.catch_band_bottom, defaults.catch_band_bottom).min(t.catch_band_top);

        t.brick_width = positive(t.brick_width, defaults.brick_width);
        t.brick_height = positive(t.brick_height, defaults.brick_height);
        t.brick_min_x = finite(t.brick_min_x, defaults.brick_min_x);
        t.brick_max_x = finite(t.brick_max_x, defaults.brick_max_x).max(t.brick_min_x);
        t.brick_min_y = finite(t.brick_min_y, defaults.brick_min_y);
        t.brick_max_y = finite(t.brick_max_y, defaults.brick_max_y).max(t.brick_min_y);
        t.max_brick_health = t.max_brick_health.max(1);
        t.max_placement_attempts = t.max_placement_attempts.max(1);

        if t.warp_count == 1 {
            t.warp_count = 2;
        }
        t.warp_radius = positive(t.warp_radius, defaults.warp_radius);
        t.warp_min_x = finite(t.warp_min_x, defaults.warp_min_x);
        t.warp_max_x = finite(t.warp_max_x, defaults.warp_max_x).max(t.warp_min_x);
        t.warp_min_y = finite(t.warp_min_y, defaults.warp_min_y);
        t.warp_max_y = finite(t.warp_max_y, defaults.warp_max_y).max(t.warp_min_y);

        if t != *self {
            log::warn!("Tuning out of range, clamped to playable values");
        }
        t
    }

    /// Breakable-brick target for a stage: base + per_stage * (stage - 1)
    pub fn breakable_target(&self, stage: u32) -> u32 {
        self.breakable_base_count + self.breakable_per_stage * stage.max(1).saturating_sub(1)
    }

    /// Pad width for a stage, never below the minimum
    pub fn pad_width(&self, stage: u32) -> u32 {
        let shrink = self.pad_shrink_per_stage * stage.max(1).saturating_sub(1);
        self.pad_base_width
            .saturating_sub(shrink)
            .max(self.pad_min_width)
    }
}
