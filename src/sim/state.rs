//! Game state and core simulation types
//!
//! The game state owns every entity collection; only the tick and the field
//! generator mutate them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, Pad};
use super::brick::{Brick, WarpBlock};
use super::field::generate_field;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// All balls lost (terminal)
    GameOver,
}

/// Fire-and-forget notifications for the shell (audio cues, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A ball hit the pad or a brick (the impact sound)
    Impact,
    /// A ball dropped out of the bottom
    BallLost,
    /// A multiplier brick spawned extra balls
    MultiBall { spawned: u32 },
    /// A ball was relocated by a warp block
    Warped,
    /// Stage cleared; `stage` is the new stage number
    StageCleared { stage: u32 },
    /// The last ball was lost
    GameOver { score: u64 },
}

/// Receiver for [`GameEvent`]s emitted during a tick
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance and geometry in effect for this run
    pub tuning: Tuning,
    /// Current stage (1-based)
    pub stage: u32,
    /// Score
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Background palette index
    pub background: u8,
    /// Player pad
    pub pad: Pad,
    /// Live balls
    pub balls: Vec<Ball>,
    /// Bricks still on the field
    pub bricks: Vec<Brick>,
    /// Warp blocks for the current stage
    pub warps: Vec<WarpBlock>,
    /// Shared random source (placement, launch angles, warp targets)
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a new game with a free-running random source
    pub fn new(tuning: Tuning) -> Self {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::with_rng(tuning, rng)
    }

    /// Start a new game from a fixed seed
    pub fn with_seed(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    /// Out-of-range tuning values are clamped first (see [`Tuning::clamped`])
    fn with_rng(tuning: Tuning, rng: Pcg32) -> Self {
        let tuning = tuning.clamped();
        let pad = Pad::new(&tuning);
        let mut state = Self {
            tuning,
            stage: 1,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            background: 0,
            pad,
            balls: Vec::new(),
            bricks: Vec::new(),
            warps: Vec::new(),
            rng,
            next_id: 1,
        };

        generate_field(&mut state);

        // Initial ball launches from the arena centre
        let center = Vec2::new(state.tuning.arena_width / 2.0, state.tuning.arena_height / 2.0);
        state.spawn_ball_at(center);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Launch a new ball from `pos` in a random upward direction
    pub fn spawn_ball_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let ball = Ball::launch(id, pos, &self.tuning, &mut self.rng);
        self.balls.push(ball);
        id
    }

    /// Pick a new random background colour
    pub fn roll_background(&mut self) {
        self.background = self.rng.random_range(0..crate::consts::PALETTE_SIZE);
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// True when nothing left on the field needs to be broken
    pub fn stage_cleared(&self) -> bool {
        self.bricks.iter().all(Brick::is_immune)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pad: PadView {
                x: self.pad.x,
                width: self.pad.width,
            },
            balls: self
                .balls
                .iter()
                .map(|b| BallView {
                    x: b.pos.x,
                    y: b.pos.y,
                    radius: b.radius,
                })
                .collect(),
            bricks: self
                .bricks
                .iter()
                .map(|b| BrickView {
                    x: b.rect.x,
                    y: b.rect.y,
                    width: b.rect.width,
                    height: b.rect.height,
                    color: b.color(),
                })
                .collect(),
            warps: self
                .warps
                .iter()
                .map(|w| WarpView {
                    x: w.circle.center.x,
                    y: w.circle.center.y,
                    radius: w.circle.radius,
                    color: w.color(),
                })
                .collect(),
            score: self.score,
            stage: self.stage,
            game_over: self.is_game_over(),
            background: self.background,
        }
    }
}

/// Pad as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PadView {
    pub x: f32,
    pub width: u32,
}

/// Ball as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Brick as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: u8,
}

/// Warp block as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WarpView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: u8,
}

/// Everything the shell needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub pad: PadView,
    pub balls: Vec<BallView>,
    pub bricks: Vec<BrickView>,
    pub warps: Vec<WarpView>,
    pub score: u64,
    pub stage: u32,
    pub game_over: bool,
    pub background: u8,
}
