//! Ridge Runner headless entry point
//!
//! Runs the simulation against a synthetic frame clock with a simple
//! autopilot, for smoke testing levels and tuning without a display.

use std::path::PathBuf;

use clap::Parser;

use ridge_runner::persistence::{JsonFileStore, MemoryStore, RecordStore};
use ridge_runner::sim::{FACTS, GameEvent, GamePhase, SimulationContext};
use ridge_runner::{Game, Levels, Tuning};

#[derive(Debug, Parser)]
#[command(name = "ridge-runner", about = "Headless Ridge Runner simulation")]
struct Args {
    /// Level to play
    #[arg(long, default_value = ridge_runner::levels::DEFAULT_LEVEL)]
    level: String,
    /// Session seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 300.0)]
    seconds: f64,
    /// Simulated display refresh rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Records file (best time + leaderboard); kept in memory if omitted
    #[arg(long)]
    records: Option<PathBuf>,
    /// Extra levels JSON, merged over the built-ins
    #[arg(long)]
    levels: Option<PathBuf>,
    /// Tuning JSON
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Disable the autopilot (the runner never jumps)
    #[arg(long)]
    no_autopilot: bool,
}

/// Jump when a ground obstacle is about to reach the runner
fn autopilot_wants_jump(ctx: &SimulationContext) -> bool {
    let runner = &ctx.character;
    if runner.airborne {
        return false;
    }
    let front = runner.pos.x + runner.size.x;
    let lookahead = ctx.tier.scroll_speed * 0.22;
    ctx.obstacles.iter().any(|o| {
        !o.hit
            && !o.kind.is_airborne()
            && o.pos.x + o.size.x > runner.pos.x
            && o.pos.x - front < lookahead
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    log::info!("Ridge Runner (headless) starting...");

    let levels = match &args.levels {
        Some(path) => Levels::load(path)?,
        None => Levels::default(),
    };
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let store: Box<dyn RecordStore> = match &args.records {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::default()),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Session seed: {seed}");

    let mut game = Game::new(levels, tuning, store, seed);
    let frame_dt = 1.0 / args.fps.max(1.0);
    let mut now = 0.0;
    game.start(&args.level, now)?;

    while now < args.seconds {
        now += frame_dt;
        if !args.no_autopilot && game.snapshot().is_some_and(autopilot_wants_jump) {
            game.jump();
        }
        for event in game.frame(now) {
            match event {
                GameEvent::MilestoneReached { threshold } => println!("milestone {threshold}"),
                GameEvent::GameOver {
                    final_score,
                    reason,
                    fact,
                } => {
                    println!("game over ({reason:?}) with score {final_score}");
                    println!("did you know? {}", FACTS[fact]);
                }
                GameEvent::Win { final_score, elapsed } => {
                    println!("won with score {final_score} in {elapsed:.2}s")
                }
                GameEvent::FactChanged { index } => println!("fact: {}", FACTS[index]),
                GameEvent::ScoreChanged { .. } => {}
            }
        }
        if matches!(game.phase(), GamePhase::Won | GamePhase::GameOver) {
            break;
        }
    }

    if game.phase() == GamePhase::Running {
        let score = game.snapshot().map(|c| c.score.value()).unwrap_or(0);
        println!("time limit reached with score {score}");
    }
    if let (Some(best), board) = (game.records().best_time.get(), game.records().leaderboard.entries()) {
        println!("best time {best:.2}s, leaderboard {board:?}");
    }
    Ok(())
}
