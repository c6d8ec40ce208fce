//! Whole-run behaviour through the `Game` command surface

use std::collections::HashSet;

use ridge_runner::highscores::{BestTime, Leaderboard, Records};
use ridge_runner::persistence::{MemoryStore, RecordStore};
use ridge_runner::sim::{EndReason, FACTS, GameEvent, GamePhase, TickInput};
use ridge_runner::{Game, Levels, Tuning};

const FRAME: f64 = 1.0 / 60.0;

/// Flat ground, every pickup a ground-row jerry can, no obstacles
fn collecting_game(store: Box<dyn RecordStore>) -> Game {
    let tuning = Tuning {
        min_ground_height: 50.0,
        max_ground_height: 50.0,
        baseline_height: 50.0,
        rare_chance: 1.0,
        ..Tuning::default()
    };
    let levels = Levels::from_json(
        r#"{
            "calm": {
                "scroll_speed_base": 420.0,
                "speed_step": 120.0,
                "max_speed_steps": 4,
                "score_band": 20,
                "obstacle_interval_min": 10000.0,
                "obstacle_interval_max": 10000.0,
                "obstacle_width": [20.0, 40.0],
                "obstacle_height": [30.0, 50.0]
            }
        }"#,
    )
    .unwrap();
    Game::new(levels, tuning, store, 2024)
}

/// Drive frames until the run ends; returns all events
fn play_out(game: &mut Game, mut now: f64, limit: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while now < limit && game.phase() == GamePhase::Running {
        now += FRAME;
        events.extend(game.frame(now));
    }
    events
}

#[test]
fn win_updates_best_time_and_leaderboard() {
    let store = MemoryStore {
        records: Some(Records {
            best_time: BestTime(Some(45.0)),
            leaderboard: Leaderboard::from_entries(vec![45.0, 46.0, 47.0, 48.0, 49.0]),
        }),
        fail_writes: false,
    };
    let mut game = collecting_game(Box::new(store));
    game.start("calm", 0.0).unwrap();

    let events = play_out(&mut game, 0.0, 600.0);
    assert_eq!(game.phase(), GamePhase::Won);

    let wins: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Win { final_score, elapsed } => Some((*final_score, *elapsed)),
            _ => None,
        })
        .collect();
    assert_eq!(wins.len(), 1);
    let (score, elapsed) = wins[0];
    assert!(score >= 100);
    assert!(elapsed < 45.0, "run took {elapsed}s");

    let milestones = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MilestoneReached { threshold: 50 }))
        .count();
    assert_eq!(milestones, 1);

    // Scores only rise on a run without obstacles
    let scores: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ScoreChanged { score } => Some(*score),
            _ => None,
        })
        .collect();
    assert_eq!(scores.first(), Some(&0));
    assert!(scores.windows(2).all(|w| w[0] < w[1]));

    let records = game.records();
    let best = records.best_time.get().unwrap();
    assert!(best < 45.0);
    assert!((best - f64::from(elapsed)).abs() < 0.01);
    let board = records.leaderboard.entries();
    assert_eq!(board.len(), 5);
    assert_eq!(board[0], best);
    assert!(board.windows(2).all(|w| w[0] <= w[1]));
    assert!(!board.contains(&49.0));

    let win = game.last_win().unwrap();
    assert!(win.new_best);
    assert_eq!(win.rank, Some(1));

    // No further frames are scheduled after the win
    assert!(!game.is_scheduled());
    assert!(game.frame(1000.0).is_empty());
}

#[test]
fn slower_win_keeps_best_time() {
    let store = MemoryStore {
        records: Some(Records {
            best_time: BestTime(Some(1.0)),
            leaderboard: Leaderboard::new(),
        }),
        fail_writes: false,
    };
    let mut game = collecting_game(Box::new(store));
    game.start("calm", 0.0).unwrap();
    play_out(&mut game, 0.0, 600.0);

    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.records().best_time.get(), Some(1.0));
    assert_eq!(game.records().leaderboard.entries().len(), 1);
    assert!(!game.last_win().unwrap().new_best);
}

#[test]
fn failed_record_write_does_not_disturb_play() {
    let store = MemoryStore {
        records: None,
        fail_writes: true,
    };
    let mut game = collecting_game(Box::new(store));
    game.start("calm", 0.0).unwrap();
    let events = play_out(&mut game, 0.0, 600.0);

    assert_eq!(game.phase(), GamePhase::Won);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Win { .. })));
    assert!(game.last_win().is_some());

    // A new run starts normally afterwards
    game.start("calm", 0.0).unwrap();
    assert_eq!(game.phase(), GamePhase::Running);
}

#[test]
fn pause_excludes_wall_time() {
    let mut game = Game::with_defaults(5);
    game.start("easy", 0.0).unwrap();
    let mut now = 0.0;
    for _ in 0..30 {
        now += FRAME;
        game.frame(now);
    }
    let before = game.snapshot().unwrap().elapsed;

    game.pause();
    assert_eq!(game.phase(), GamePhase::Paused);
    assert!(!game.jump());
    for i in 0..100 {
        assert!(game.frame(now + i as f64).is_empty());
    }
    assert_eq!(game.snapshot().unwrap().elapsed, before);

    game.resume(500.0);
    assert_eq!(game.phase(), GamePhase::Running);
    game.frame(500.0 + FRAME);
    let after = game.snapshot().unwrap().elapsed;
    assert!((after - before - FRAME as f32).abs() < 1e-3);
}

#[test]
fn long_run_keeps_invariants() {
    let mut game = Game::with_defaults(77);
    game.start("normal", 0.0).unwrap();
    let mut hit_ids = HashSet::new();
    let mut ticks = 0;

    for i in 0..6000 {
        // Periodic jumps: some obstacles are cleared, others are hit
        game.step(&TickInput { jump: i % 37 == 0 }, FRAME as f32);
        let Some(ctx) = game.snapshot() else { break };
        ticks += 1;

        let margin = ctx.tuning.frontier_margin;
        assert!(ctx.terrain.frontier() >= ctx.viewport.x + margin);
        assert!(ctx.terrain.segments[0].start_x <= 0.0);
        for pair in ctx.terrain.segments.windows(2) {
            assert_eq!(pair[0].end_x, pair[1].start_x);
            assert!((pair[1].height - pair[0].height).abs() <= ctx.tuning.max_height_delta + 1e-3);
        }
        for o in &ctx.obstacles {
            assert!(o.pos.x + o.size.x >= 0.0);
            if hit_ids.contains(&o.id) {
                assert!(o.hit);
            }
            if o.hit {
                hit_ids.insert(o.id);
            }
        }
        assert!(ctx.collectibles.iter().all(|c| c.pos.x + c.size.x >= 0.0));

        if ctx.phase != GamePhase::Running {
            assert_eq!(ctx.phase, GamePhase::Won);
            break;
        }
    }

    // Obstacles are only costly on `normal`, so the run lasts
    assert!(ticks >= 600, "run ended after {ticks} ticks");
    let ctx = game.snapshot().unwrap();
    let live: HashSet<u32> = ctx.obstacles.iter().map(|o| o.id).collect();
    assert!(
        hit_ids.iter().any(|id| !live.contains(id)),
        "no hit obstacle scrolled off"
    );
}

#[test]
fn hard_run_ends_on_first_contact() {
    let mut game = Game::with_defaults(77);
    game.start("hard", 0.0).unwrap();
    let mut events = Vec::new();
    for _ in 0..6000 {
        events.extend(game.step(&TickInput::default(), FRAME as f32));
        if game.phase() != GamePhase::Running {
            break;
        }
    }

    assert_eq!(game.phase(), GamePhase::GameOver);
    let last_score = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ScoreChanged { score } => Some(*score),
            _ => None,
        })
        .last();
    let over: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::GameOver {
                final_score,
                reason,
                fact,
            } => Some((*final_score, *reason, *fact)),
            _ => None,
        })
        .collect();
    assert_eq!(over.len(), 1);
    let (final_score, reason, fact) = over[0];
    assert_eq!(reason, EndReason::Obstacle);
    assert!(fact < FACTS.len());
    // The lethal contact carries no penalty
    assert_eq!(Some(final_score), last_score);
    assert!(!game.is_scheduled());
}

#[test]
fn same_seed_same_session() {
    let run = |seed| {
        let mut game = Game::with_defaults(seed);
        game.start("normal", 0.0).unwrap();
        let mut events = Vec::new();
        for i in 0..1200 {
            events.extend(game.step(&TickInput { jump: i % 50 == 0 }, FRAME as f32));
        }
        events
    };
    assert_eq!(run(11), run(11));
}
