//! Stage field generation
//!
//! Bricks are placed by rejection sampling: a candidate at a uniformly random
//! position is kept only if it touches no brick already placed. Each candidate
//! gets a bounded number of draws; when they run out the field is considered
//! saturated and the rest of that kind's quota is dropped.
//!
//! Fixed-count kinds go first so their counts survive saturation; breakables
//! fill whatever room is left. Warp blocks ignore the bricks entirely.

use glam::Vec2;
use rand::Rng;

use super::brick::{Brick, BrickKind, WarpBlock};
use super::state::GameState;
use crate::Tuning;

/// How many of each entity a stage asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldQuota {
    pub breakable: u32,
    pub unbreakable: u32,
    pub permanent: u32,
    pub multiplier: u32,
    /// Zero on stage 1 (the previous warp set, if any, is kept)
    pub warps: u32,
}

impl FieldQuota {
    pub fn for_stage(tuning: &Tuning, stage: u32) -> Self {
        Self {
            breakable: tuning.breakable_target(stage),
            unbreakable: tuning.unbreakable_count,
            permanent: tuning.permanent_count,
            multiplier: tuning.multiplier_count,
            warps: if stage > 1 { tuning.warp_count } else { 0 },
        }
    }

    pub fn total_bricks(&self) -> u32 {
        self.breakable + self.unbreakable + self.permanent + self.multiplier
    }

    /// Kinds in placement order
    fn placement_order(&self) -> [(BrickKind, u32); 4] {
        [
            (BrickKind::Unbreakable, self.unbreakable),
            (BrickKind::Permanent, self.permanent),
            (BrickKind::Multiplier, self.multiplier),
            (BrickKind::Breakable, self.breakable),
        ]
    }
}

/// What a generation pass actually placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSummary {
    pub breakable: u32,
    pub unbreakable: u32,
    pub permanent: u32,
    pub multiplier: u32,
    pub warps: u32,
}

impl FieldSummary {
    pub fn count(&self, kind: BrickKind) -> u32 {
        match kind {
            BrickKind::Breakable => self.breakable,
            BrickKind::Unbreakable => self.unbreakable,
            BrickKind::Permanent => self.permanent,
            BrickKind::Multiplier => self.multiplier,
        }
    }

    fn record(&mut self, kind: BrickKind) {
        match kind {
            BrickKind::Breakable => self.breakable += 1,
            BrickKind::Unbreakable => self.unbreakable += 1,
            BrickKind::Permanent => self.permanent += 1,
            BrickKind::Multiplier => self.multiplier += 1,
        }
    }

    /// Bricks the quota asked for but the field could not fit
    pub fn shortfall(&self, quota: &FieldQuota) -> u32 {
        quota.total_bricks()
            - (self.breakable + self.unbreakable + self.permanent + self.multiplier)
    }
}

/// Replace the brick field (and, after stage 1, the warp set) for `state.stage`
pub fn generate_field(state: &mut GameState) -> FieldSummary {
    let stage = state.stage;
    let quota = FieldQuota::for_stage(&state.tuning, stage);

    let mut bricks: Vec<Brick> = Vec::with_capacity(quota.total_bricks() as usize);
    let mut summary = FieldSummary::default();

    for (kind, target) in quota.placement_order() {
        for placed in 0..target {
            match place_brick(state, &bricks, kind) {
                Some(mut brick) => {
                    brick.id = state.next_entity_id();
                    bricks.push(brick);
                    summary.record(kind);
                }
                None => {
                    log::warn!(
                        "Stage {}: field saturated, placed {}/{} {:?} bricks",
                        stage,
                        placed,
                        target,
                        kind
                    );
                    break;
                }
            }
        }
    }
    state.bricks = bricks;

    if stage > 1 {
        let warps: Vec<WarpBlock> = (0..quota.warps).map(|_| place_warp(state)).collect();
        state.warps = warps;
    }
    summary.warps = state.warps.len() as u32;

    log::info!(
        "Stage {}: {} breakable, {} unbreakable, {} permanent, {} multiplier, {} warps",
        stage,
        summary.breakable,
        summary.unbreakable,
        summary.permanent,
        summary.multiplier,
        summary.warps
    );

    summary
}

/// Draw candidates until one fits, up to the retry cap. The id is left at 0.
fn place_brick(state: &mut GameState, placed: &[Brick], kind: BrickKind) -> Option<Brick> {
    let tuning = &state.tuning;
    let rng = &mut state.rng;
    let size = Vec2::new(tuning.brick_width, tuning.brick_height);

    let health = match kind {
        BrickKind::Breakable => rng.random_range(1..=tuning.max_brick_health),
        _ => 0,
    };

    for _ in 0..tuning.max_placement_attempts {
        let x = rng.random_range(tuning.brick_min_x..=tuning.brick_max_x);
        let y = rng.random_range(tuning.brick_min_y..=tuning.brick_max_y);
        let candidate = Brick::new(0, kind, x, y, size, health);
        if !placed.iter().any(|brick| candidate.is_overlapping(brick)) {
            return Some(candidate);
        }
    }
    None
}

fn place_warp(state: &mut GameState) -> WarpBlock {
    let x = state
        .rng
        .random_range(state.tuning.warp_min_x..=state.tuning.warp_max_x);
    let y = state
        .rng
        .random_range(state.tuning.warp_min_y..=state.tuning.warp_max_y);
    let id = state.next_entity_id();
    WarpBlock::new(id, Vec2::new(x, y), state.tuning.warp_radius)
}
