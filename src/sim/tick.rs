//! Fixed-step simulation tick
//!
//! Core game loop that advances the simulation by one unit timestep.
//! Each ball is moved and resolved against the pad, every brick and every
//! warp block in turn; balls spawned by multiplier bricks join after the pass
//! and are first moved on the next tick.

use glam::Vec2;
use rand::Rng;

use super::ball::Ball;
use super::brick::{BrickKind, WarpBlock};
use super::field::generate_field;
use super::state::{EventSink, GameEvent, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x in arena coordinates (clamped by the pad)
    pub pointer_x: f32,
    /// Demo mode - the pad chases the most urgent ball instead of the pointer
    pub autopilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, events: &mut impl EventSink) {
    // Game over is terminal
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // Periodic speed-up (tick rate is constant, so this is a fixed interval)
    if state
        .time_ticks
        .is_multiple_of(state.tuning.speed_up_interval_ticks)
    {
        let factor = state.tuning.speed_up_factor;
        for ball in &mut state.balls {
            ball.increase_speed(factor);
        }
        log::debug!("Tick {}: balls sped up x{}", state.time_ticks, factor);
    }

    let pointer_x = if input.autopilot {
        autopilot_target(state).unwrap_or(input.pointer_x)
    } else {
        input.pointer_x
    };
    state.pad.move_toward(state.stage, pointer_x, &state.tuning);

    let spawn_points = resolve_balls(state, events);
    for pos in spawn_points {
        for _ in 0..state.tuning.multiplier_spawn {
            state.spawn_ball_at(pos);
        }
    }

    if state.balls.is_empty() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} at stage {} after {} ticks",
            state.score,
            state.stage,
            state.time_ticks
        );
        events.emit(GameEvent::GameOver { score: state.score });
        return;
    }

    if state.stage_cleared() {
        advance_stage(state, events);
    }
}

/// Move every live ball and resolve its collisions.
///
/// Returns the positions where multiplier bricks asked for new balls.
fn resolve_balls(state: &mut GameState, events: &mut impl EventSink) -> Vec<Vec2> {
    let GameState {
        tuning,
        pad,
        balls,
        bricks,
        warps,
        score,
        rng,
        ..
    } = state;
    let tuning = &*tuning;
    let mut spawn_points = Vec::new();

    balls.retain_mut(|ball| {
        ball.step(tuning.arena_width);

        if pad.catch(ball, tuning) {
            ball.bounce_y();
            events.emit(GameEvent::Impact);
        }

        bricks.retain_mut(|brick| {
            if !brick.check_collision(ball) {
                return true;
            }
            ball.bounce_y();
            events.emit(GameEvent::Impact);

            if brick.is_immune() {
                return true;
            }
            if brick.kind == BrickKind::Multiplier {
                spawn_points.push(ball.pos);
                events.emit(GameEvent::MultiBall {
                    spawned: tuning.multiplier_spawn,
                });
                log::debug!("Multiplier {} hit at {:?}", brick.id, ball.pos);
            }

            brick.hit();
            if brick.is_destroyed() {
                *score += tuning.points_per_health * brick.initial_health.max(0) as u64;
                false
            } else {
                true
            }
        });

        apply_warps(ball, warps, rng, events);

        if ball.is_lost(tuning.arena_height) {
            log::debug!("Ball {} lost at x={:.1}", ball.id, ball.pos.x);
            events.emit(GameEvent::BallLost);
            false
        } else {
            true
        }
    });

    spawn_points
}

/// Relocate a ball that entered a warp block. One warp per ball per tick;
/// the destination stays locked until the ball leaves it.
fn apply_warps(
    ball: &mut Ball,
    warps: &[WarpBlock],
    rng: &mut impl Rng,
    events: &mut impl EventSink,
) {
    let mut warped = false;
    for (idx, warp) in warps.iter().enumerate() {
        let inside = warp.check_collision(ball);

        if ball.warp_lock == Some(warp.id) {
            if !inside {
                ball.warp_lock = None;
            }
            continue;
        }

        if inside && !warped && ball.warp(warps, idx, rng).is_some() {
            warped = true;
            events.emit(GameEvent::Warped);
        }
    }
}

/// Every breakable brick is gone: next stage, new colour, new field
fn advance_stage(state: &mut GameState, events: &mut impl EventSink) {
    log::info!("Stage {} cleared with score {}", state.stage, state.score);
    state.stage += 1;
    state.roll_background();
    generate_field(state);
    events.emit(GameEvent::StageCleared { stage: state.stage });
}

/// Pad target for demo mode: the lowest descending ball, led by one step
fn autopilot_target(state: &GameState) -> Option<f32> {
    let lowest = |descending: bool| {
        state
            .balls
            .iter()
            .filter(|b| !descending || b.vel.y > 0.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    };
    lowest(true)
        .or_else(|| lowest(false))
        .map(|ball| ball.pos.x + ball.vel.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::{Brick, BrickKind, WarpBlock};
    use glam::Vec2;

    const BRICK: Vec2 = Vec2::new(28.0, 10.0);

    /// A playing state with no balls, no warps and one far-away brick
    /// that keeps the stage from clearing.
    fn bare_state() -> GameState {
        let mut state = GameState::with_seed(Tuning::default(), 1234);
        state.balls.clear();
        state.warps.clear();
        state.bricks.clear();
        add_brick(&mut state, BrickKind::Breakable, 160.0, 10.0, 3);
        state
    }

    fn add_ball(state: &mut GameState, x: f32, y: f32, vx: f32, vy: f32) -> u32 {
        let id = state.next_entity_id();
        state
            .balls
            .push(Ball::new(id, Vec2::new(x, y), Vec2::new(vx, vy), 5.0));
        id
    }

    fn add_brick(state: &mut GameState, kind: BrickKind, x: f32, y: f32, health: i32) -> u32 {
        let id = state.next_entity_id();
        state.bricks.push(Brick::new(id, kind, x, y, BRICK, health));
        id
    }

    fn run(state: &mut GameState, pointer_x: f32) -> Vec<GameEvent> {
        let input = TickInput {
            pointer_x,
            ..Default::default()
        };
        let mut events: Vec<GameEvent> = Vec::new();
        tick(state, &input, &mut events);
        events
    }

    #[test]
    fn test_pad_bounces_falling_ball() {
        let mut state = bare_state();
        add_ball(&mut state, 100.0, 190.0, 0.0, 2.0);

        let events = run(&mut state, 100.0);
        assert_eq!(state.balls[0].vel.y, -2.0);
        assert_eq!(state.balls[0].pos.y, 192.0);
        assert!(events.contains(&GameEvent::Impact));

        run(&mut state, 100.0);
        assert_eq!(state.balls[0].pos.y, 190.0);
        run(&mut state, 100.0);
        assert_eq!(state.balls[0].pos.y, 188.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_multiplier_spawns_two_and_scores() {
        let mut state = bare_state();
        add_brick(&mut state, BrickKind::Multiplier, 50.0, 50.0, 1);
        add_ball(&mut state, 55.0, 52.0, 0.0, 0.5);

        let events = run(&mut state, 180.0);

        assert_eq!(state.balls.len(), 3);
        let origin = state.balls[0].pos;
        assert_eq!(origin, Vec2::new(55.0, 52.5));
        assert!(state.balls[1..].iter().all(|b| b.pos == origin));
        assert_eq!(state.balls[0].vel.y, -0.5);

        assert_eq!(state.score, 10);
        assert!(!state.bricks.iter().any(|b| b.kind == BrickKind::Multiplier));
        assert!(events.contains(&GameEvent::MultiBall { spawned: 2 }));
        assert!(events.contains(&GameEvent::Impact));
    }

    #[test]
    fn test_immune_bricks_absorb_hits() {
        for kind in [BrickKind::Unbreakable, BrickKind::Permanent] {
            let mut state = bare_state();
            let id = add_brick(&mut state, kind, 50.0, 50.0, 0);
            add_ball(&mut state, 60.0, 52.0, 0.0, 0.5);

            let events = run(&mut state, 180.0);

            assert_eq!(state.score, 0);
            assert!(state.bricks.iter().any(|b| b.id == id));
            assert_eq!(state.balls.len(), 1);
            assert_eq!(state.balls[0].vel.y, -0.5);
            assert_eq!(events, vec![GameEvent::Impact]);
        }
    }

    #[test]
    fn test_breakable_scores_initial_health_on_destruction() {
        let mut state = bare_state();
        let id = add_brick(&mut state, BrickKind::Breakable, 50.0, 50.0, 2);
        add_ball(&mut state, 60.0, 52.0, 0.0, 0.5);

        run(&mut state, 180.0);
        let brick = state.bricks.iter().find(|b| b.id == id).unwrap();
        assert_eq!(brick.health, 1);
        assert_eq!(state.score, 0);

        // Bounced ball is still inside on the next step
        run(&mut state, 180.0);
        assert!(state.bricks.iter().all(|b| b.id != id));
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_pad_and_brick_bounces_compose() {
        let mut state = bare_state();
        add_brick(&mut state, BrickKind::Breakable, 90.0, 183.0, 1);
        add_ball(&mut state, 100.0, 186.0, 0.0, 2.0);

        let events = run(&mut state, 100.0);

        // Pad flips it up, the brick flips it back down
        assert_eq!(state.balls[0].vel.y, 2.0);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::Impact).count(),
            2
        );
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_stage_advances_once_when_only_immune_left() {
        let mut state = bare_state();
        state.bricks.clear();
        add_brick(&mut state, BrickKind::Unbreakable, 10.0, 10.0, 0);
        add_brick(&mut state, BrickKind::Permanent, 60.0, 10.0, 0);
        add_ball(&mut state, 100.0, 150.0, 0.0, -1.0);

        let events = run(&mut state, 100.0);
        assert_eq!(state.stage, 2);
        assert!(events.contains(&GameEvent::StageCleared { stage: 2 }));

        let count = |kind: BrickKind| state.bricks.iter().filter(|b| b.kind == kind).count();
        assert_eq!(count(BrickKind::Breakable), 13);
        assert_eq!(count(BrickKind::Unbreakable), 5);
        assert_eq!(count(BrickKind::Permanent), 5);
        assert_eq!(count(BrickKind::Multiplier), 3);
        assert_eq!(state.warps.len(), 2);
        for (i, a) in state.bricks.iter().enumerate() {
            for b in &state.bricks[i + 1..] {
                assert!(!a.is_overlapping(b));
            }
        }

        run(&mut state, 100.0);
        assert_eq!(state.stage, 2);
        assert_eq!(state.pad.width, 35);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = bare_state();
        state.score = 70;
        add_ball(&mut state, 100.0, 198.0, 0.0, 5.0);

        let events = run(&mut state, 10.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.balls.is_empty());
        assert!(events.contains(&GameEvent::BallLost));
        assert!(events.contains(&GameEvent::GameOver { score: 70 }));

        let ticks = state.time_ticks;
        for _ in 0..10 {
            let events = run(&mut state, 100.0);
            assert!(events.is_empty());
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.snapshot().game_over);
    }

    #[test]
    fn test_periodic_speed_up() {
        let mut state = bare_state();
        add_ball(&mut state, 100.0, 100.0, 1.0, -1.0);
        state.time_ticks = 598;

        run(&mut state, 100.0);
        assert_eq!(state.balls[0].vel, Vec2::new(1.0, -1.0));

        run(&mut state, 100.0);
        assert_eq!(state.time_ticks, 600);
        assert!((state.balls[0].vel.x - 1.1).abs() < 1e-5);
        assert!((state.balls[0].speed - 1.1 * 2f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_speed_up_never_slows_balls() {
        let mut state = bare_state();
        state.tuning.speed_up_factor = 0.5;
        state.tuning.speed_up_interval_ticks = 1;
        add_ball(&mut state, 100.0, 100.0, 1.0, -1.0);
        let before = state.balls[0].speed;

        run(&mut state, 100.0);
        assert!(state.balls[0].speed >= before);
        assert_eq!(state.balls[0].vel, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_ball_after_a_lost_one_is_still_resolved() {
        let mut state = bare_state();
        let brick = add_brick(&mut state, BrickKind::Breakable, 50.0, 50.0, 1);
        add_ball(&mut state, 100.0, 198.0, 0.0, 5.0);
        let survivor = add_ball(&mut state, 60.0, 52.0, 0.0, 0.5);

        let events = run(&mut state, 180.0);

        assert_eq!(state.balls.len(), 1);
        let ball = &state.balls[0];
        assert_eq!(ball.id, survivor);
        // Moved exactly once and bounced by the brick
        assert_eq!(ball.pos, Vec2::new(60.0, 52.5));
        assert_eq!(ball.vel.y, -0.5);
        assert!(state.bricks.iter().all(|b| b.id != brick));
        assert_eq!(state.score, 10);
        assert_eq!(events, vec![GameEvent::BallLost, GameEvent::Impact]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_warp_relocates_and_locks() {
        let mut state = bare_state();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        state.warps = vec![
            WarpBlock::new(a, Vec2::new(50.0, 120.0), 10.0),
            WarpBlock::new(b, Vec2::new(150.0, 120.0), 10.0),
        ];
        add_ball(&mut state, 50.0, 119.0, 0.0, 1.0);

        let events = run(&mut state, 100.0);
        assert_eq!(state.balls[0].pos, Vec2::new(150.0, 120.0));
        assert_eq!(state.balls[0].warp_lock, Some(b));
        assert_eq!(state.balls[0].vel, Vec2::new(0.0, 1.0));
        assert_eq!(events, vec![GameEvent::Warped]);

        // Still inside the destination: no ping-pong back
        let events = run(&mut state, 100.0);
        assert_eq!(state.balls[0].pos, Vec2::new(150.0, 121.0));
        assert!(events.is_empty());

        for _ in 0..10 {
            run(&mut state, 100.0);
        }
        assert_eq!(state.balls[0].pos.x, 150.0);
        assert_eq!(state.balls[0].warp_lock, None);
    }

    #[test]
    fn test_autopilot_tracks_lowest_falling_ball() {
        let mut state = bare_state();
        add_ball(&mut state, 60.0, 150.0, 1.0, 1.0);
        add_ball(&mut state, 170.0, 180.0, 0.0, -1.0);

        let input = TickInput {
            pointer_x: 0.0,
            autopilot: true,
        };
        tick(&mut state, &input, &mut crate::sim::NullSink);
        assert_eq!(state.pad.x, 61.0);
    }

    #[test]
    fn test_ball_count_only_changes_through_loss_and_spawn() {
        let mut state = GameState::with_seed(Tuning::default(), 77);
        let input = TickInput {
            pointer_x: 100.0,
            autopilot: true,
        };

        for _ in 0..20_000 {
            if state.is_game_over() {
                break;
            }
            let before = state.balls.len();
            let score = state.score;
            let stage = state.stage;
            let mut events: Vec<GameEvent> = Vec::new();
            tick(&mut state, &input, &mut events);

            let lost = events.iter().filter(|e| **e == GameEvent::BallLost).count();
            let spawned: usize = events
                .iter()
                .map(|e| match e {
                    GameEvent::MultiBall { spawned } => *spawned as usize,
                    _ => 0,
                })
                .sum();
            assert_eq!(state.balls.len(), before + spawned - lost);
            assert!(state.score >= score);
            assert!(state.stage >= stage);
        }
    }
}
