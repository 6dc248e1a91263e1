//! Brick Breaker headless runner
//!
//! Drives the simulation without a window: the pad either follows a fixed
//! pointer or plays itself, and progress goes to the log (`RUST_LOG=info`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use brick_breaker::Tuning;
use brick_breaker::sim::{GameEvent, GameState, TickInput, tick};

#[derive(Parser, Debug)]
#[command(name = "brick-breaker", about = "Run the brick breaker simulation headless")]
struct Args {
    /// Maximum ticks to simulate (60 per second of game time)
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// Seed for the random source (free-running when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding tuning values
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Hold the pointer at this x instead of letting the pad play itself
    #[arg(long)]
    pointer: Option<f32>,

    /// Print the final frame snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut state = match args.seed {
        Some(seed) => GameState::with_seed(tuning, seed),
        None => GameState::new(tuning),
    };
    let input = TickInput {
        pointer_x: args.pointer.unwrap_or(state.tuning.arena_width / 2.0),
        autopilot: args.pointer.is_none(),
    };
    log::info!(
        "Brick Breaker starting ({} ticks, autopilot: {})",
        args.ticks,
        input.autopilot
    );

    let mut events: Vec<GameEvent> = Vec::new();
    let mut impacts = 0u64;
    let mut peak_balls = state.balls.len();

    for _ in 0..args.ticks {
        tick(&mut state, &input, &mut events);
        for event in events.drain(..) {
            match event {
                GameEvent::Impact => impacts += 1,
                GameEvent::StageCleared { stage } => {
                    log::info!("Reached stage {} (score {})", stage, state.score)
                }
                _ => {}
            }
        }
        peak_balls = peak_balls.max(state.balls.len());
        if state.is_game_over() {
            break;
        }
    }

    println!(
        "{} after {} ticks: score {}, stage {}, {} impacts, peak {} balls",
        if state.is_game_over() { "Game over" } else { "Stopped" },
        state.time_ticks,
        state.score,
        state.stage,
        impacts,
        peak_balls
    );

    if args.snapshot {
        let json =
            serde_json::to_string_pretty(&state.snapshot()).context("serializing snapshot")?;
        println!("{}", json);
    }

    Ok(())
}
