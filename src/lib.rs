//! Brick Breaker - A single-screen brick breaker simulation
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (entities, collisions, field generation, game state)
//! - `tuning`: Data-driven game balance, loadable from JSON
//!
//! Windowing, drawing and audio playback are left to the shell; it feeds a
//! pointer position into [`sim::tick`] and draws [`sim::Snapshot`]s.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (reference balance, see [`Tuning::default`])
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 200.0;
    pub const ARENA_HEIGHT: f32 = 200.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    pub const BALL_START_SPEED: f32 = 2.0;
    /// Launch angle range, degrees from the horizontal (upward biased)
    pub const LAUNCH_ANGLE_MIN_DEG: f32 = 30.0;
    pub const LAUNCH_ANGLE_MAX_DEG: f32 = 150.0;

    /// Periodic speed-up (ticks are fixed-rate, so this is a fixed time interval)
    pub const SPEED_UP_INTERVAL_TICKS: u64 = 600;
    pub const SPEED_UP_FACTOR: f32 = 1.1;

    /// Pad defaults - shrinks by 5 per stage down to 20
    pub const PAD_BASE_WIDTH: u32 = 40;
    pub const PAD_SHRINK_PER_STAGE: u32 = 5;
    pub const PAD_MIN_WIDTH: u32 = 20;
    /// Catch band for the ball's lower edge, measured up from the arena bottom
    pub const CATCH_BAND_TOP: f32 = 10.0;
    pub const CATCH_BAND_BOTTOM: f32 = 0.0;

    /// Brick geometry
    pub const BRICK_WIDTH: f32 = 28.0;
    pub const BRICK_HEIGHT: f32 = 10.0;
    /// Placement box for a brick's top-left corner
    pub const BRICK_MIN_X: f32 = 10.0;
    pub const BRICK_MAX_X: f32 = 172.0;
    pub const BRICK_MIN_Y: f32 = 10.0;
    pub const BRICK_MAX_Y: f32 = 100.0;

    /// Field composition
    pub const BREAKABLE_BASE_COUNT: u32 = 8;
    pub const BREAKABLE_PER_STAGE: u32 = 5;
    pub const UNBREAKABLE_COUNT: u32 = 5;
    pub const PERMANENT_COUNT: u32 = 5;
    pub const MULTIPLIER_COUNT: u32 = 3;
    pub const MAX_BRICK_HEALTH: i32 = 3;
    /// Draws allowed per candidate brick before its quota is abandoned
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 500;

    /// Warp blocks (only from stage 2 on)
    pub const WARP_COUNT: u32 = 2;
    pub const WARP_RADIUS: f32 = 10.0;
    pub const WARP_MIN_X: f32 = 30.0;
    pub const WARP_MAX_X: f32 = 170.0;
    pub const WARP_MIN_Y: f32 = 30.0;
    pub const WARP_MAX_Y: f32 = 150.0;

    /// Balls spawned by every multiplier contact
    pub const MULTIPLIER_SPAWN: u32 = 2;
    /// Score per point of initial health on destruction
    pub const POINTS_PER_HEALTH: u64 = 10;

    /// Number of background palette entries
    pub const PALETTE_SIZE: u8 = 16;
}

/// Palette indices shared with the shell (16-colour retro palette)
pub mod palette {
    /// Brick with an unexpected health value, and warp blocks
    pub const DEFAULT: u8 = 0;
    pub const HEALTH_ONE: u8 = 6;
    pub const HEALTH_TWO: u8 = 10;
    pub const HEALTH_THREE: u8 = 14;
    pub const UNBREAKABLE: u8 = 7;
    pub const MULTIPLIER: u8 = 13;
    pub const PERMANENT: u8 = 15;
    pub const WARP: u8 = 0;
}
