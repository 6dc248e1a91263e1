//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - One unit timestep per tick
//! - A single RNG owned by the game state
//! - Entity collections mutated only through the tick
//! - No rendering or platform dependencies

pub mod ball;
pub mod brick;
pub mod field;
pub mod geometry;
pub mod state;
pub mod tick;

pub use ball::{Ball, Pad};
pub use brick::{Brick, BrickKind, WarpBlock};
pub use field::{FieldQuota, FieldSummary, generate_field};
pub use geometry::{Circle, Rect, circle_contains, point_in_rect, rect_overlaps, rect_touches};
pub use state::{
    BallView, BrickView, EventSink, GameEvent, GamePhase, GameState, NullSink, PadView, Snapshot,
    WarpView,
};
pub use tick::{TickInput, tick};
