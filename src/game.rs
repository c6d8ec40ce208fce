//! Game session: commands in, events out
//!
//! Wraps one `SimulationContext` at a time, the frame clock that drives it,
//! and the records collaborator that is written when a run is won.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::error::ConfigError;
use crate::highscores::{Records, WinRecord};
use crate::levels::Levels;
use crate::persistence::{MemoryStore, RecordStore};
use crate::sim::{FrameClock, GameEvent, GamePhase, SimulationContext, TickInput, physics, tick};
use crate::tuning::Tuning;

pub struct Game {
    levels: Levels,
    tuning: Tuning,
    store: Box<dyn RecordStore>,
    records: Records,
    clock: FrameClock,
    /// Source of per-run seeds
    seeds: Pcg32,
    viewport: Vec2,
    ctx: Option<SimulationContext>,
    last_win: Option<WinRecord>,
}

impl Game {
    /// Create a session; records are loaded once here (empty if unavailable)
    pub fn new(levels: Levels, tuning: Tuning, mut store: Box<dyn RecordStore>, seed: u64) -> Self {
        let records = store.load_records().unwrap_or_else(|e| {
            log::warn!("Could not load records, starting fresh: {e}");
            Records::default()
        });
        Self {
            levels,
            tuning,
            store,
            records,
            clock: FrameClock::new(),
            seeds: Pcg32::seed_from_u64(seed),
            viewport: Vec2::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            ctx: None,
            last_win: None,
        }
    }

    /// Built-in levels and tuning, records kept in memory
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(
            Levels::default(),
            Tuning::default(),
            Box::new(MemoryStore::default()),
            seed,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.ctx.as_ref().map(|c| c.phase).unwrap_or(GamePhase::Idle)
    }

    /// Read-only view of the live run for renderers and UI
    pub fn snapshot(&self) -> Option<&SimulationContext> {
        self.ctx.as_ref()
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Outcome of the most recent win's record update
    pub fn last_win(&self) -> Option<WinRecord> {
        self.last_win
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport.x
    }

    /// Discard any run and start a fresh one on the named level.
    /// Configuration that skipped JSON loading is validated here.
    pub fn start(&mut self, level_name: &str, now: f64) -> Result<(), ConfigError> {
        self.tuning.validate()?;
        let level = self.levels.get(level_name)?.clone();
        level.validate(level_name)?;
        let seed = self.seeds.random::<u64>();
        log::info!("Starting run: level={level_name} seed={seed}");

        self.ctx = Some(SimulationContext::new(
            seed,
            level_name,
            level,
            self.tuning.clone(),
            self.viewport,
        ));
        self.last_win = None;
        self.clock.start(now);
        Ok(())
    }

    /// Jump if a run is active and the character is on the ground
    pub fn jump(&mut self) -> bool {
        match self.ctx.as_mut() {
            Some(ctx) if ctx.is_running() => physics::jump(&mut ctx.character, ctx.tuning.jump_impulse),
            _ => false,
        }
    }

    /// Stop scheduling frames
    pub fn pause(&mut self) {
        if let Some(ctx) = self.ctx.as_mut().filter(|c| c.phase == GamePhase::Running) {
            ctx.phase = GamePhase::Paused;
            self.clock.stop();
            log::info!("Paused at {:.2}s", ctx.elapsed);
        }
    }

    /// Schedule frames again, measuring from `now`
    pub fn resume(&mut self, now: f64) {
        if let Some(ctx) = self.ctx.as_mut().filter(|c| c.phase == GamePhase::Paused) {
            ctx.phase = GamePhase::Running;
            self.clock.resume(now);
            log::info!("Resumed at {:.2}s", ctx.elapsed);
        }
    }

    /// Back to idle; all run state is dropped
    pub fn reset(&mut self) {
        self.clock.stop();
        if self.ctx.take().is_some() {
            log::info!("Run reset");
        }
    }

    /// Viewport changed; a live run regenerates its terrain
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.resize(self.viewport);
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.clock.is_running()
    }

    /// Display-refresh callback. Ticks once if frames are scheduled and
    /// returns every event raised since the last call.
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        if let Some(dt) = self.clock.advance(now) {
            if let Some(ctx) = self.ctx.as_mut() {
                tick(ctx, &TickInput::default(), dt);
            }
        }
        self.collect_events()
    }

    /// Tick with an explicit input and dt, bypassing the frame clock
    pub fn step(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        if let Some(ctx) = self.ctx.as_mut() {
            tick(ctx, input, dt);
        }
        self.collect_events()
    }

    fn collect_events(&mut self) -> Vec<GameEvent> {
        let Some(ctx) = self.ctx.as_mut() else {
            return Vec::new();
        };
        let events = ctx.drain_events();
        if matches!(ctx.phase, GamePhase::Won | GamePhase::GameOver) {
            self.clock.stop();
        }
        for event in &events {
            if let GameEvent::Win { elapsed, .. } = *event {
                self.finish_win(elapsed);
            }
        }
        events
    }

    /// Update and persist records; a failed save is logged and dropped
    fn finish_win(&mut self, elapsed: f32) {
        // Centisecond resolution, as shown to players
        let time = (f64::from(elapsed) * 100.0).round() / 100.0;
        let result = self.records.record_win(time);
        log::info!(
            "Winning time {:.2}s (new best: {}, rank: {:?})",
            time,
            result.new_best,
            result.rank
        );
        self.last_win = Some(result);

        if let Err(e) = self.store.save_records(&self.records) {
            log::warn!("Failed to save records: {e}");
        }
    }
}
