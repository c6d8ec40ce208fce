//! Simulation state and entity types
//!
//! One `SimulationContext` owns every piece of mutable run state. It is
//! created on `start`, mutated only by `tick`, and dropped on reset.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyTier, tier_for};
use super::facts::FactTicker;
use super::score::ScoreState;
use super::spawner::SpawnTimers;
use super::terrain::{Terrain, TerrainParams};
use crate::levels::LevelConfig;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run in progress
    Idle,
    /// Active gameplay
    Running,
    /// Run suspended, no ticks are scheduled
    Paused,
    /// Target score reached
    Won,
    /// Run ended
    GameOver,
}

/// Why a run ended without a win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Hit an obstacle on a level where obstacles are lethal
    Obstacle,
    /// Fell into a gap or drifted off-screen
    Stuck,
}

/// Notifications for rendering, audio, persistence and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { score: u32 },
    MilestoneReached { threshold: u32 },
    /// `fact` indexes `FACTS`, picked for the game-over screen
    GameOver {
        final_score: u32,
        reason: EndReason,
        fact: usize,
    },
    Win { final_score: u32, elapsed: f32 },
    /// The awareness ticker moved on to `FACTS[index]`
    FactChanged { index: usize },
}

/// Discrete vertical spawn lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Row {
    Ground,
    Middle,
    Top,
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Top-left corner (screen space, y down)
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub airborne: bool,
}

impl Character {
    /// Character standing on the ground surface at `surface_y`
    pub fn standing(x: f32, surface_y: f32, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(x, surface_y - size.y),
            size,
            velocity_y: 0.0,
            airborne: false,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Obstacle subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Bush,
    Pipe,
    Rock,
    /// Flies at the middle or top row
    Seagull,
}

impl ObstacleKind {
    /// Relative spawn weights, in partition order
    pub const WEIGHTS: [(ObstacleKind, u32); 4] = [
        (ObstacleKind::Bush, 35),
        (ObstacleKind::Pipe, 30),
        (ObstacleKind::Rock, 15),
        (ObstacleKind::Seagull, 20),
    ];

    pub fn is_airborne(&self) -> bool {
        matches!(self, ObstacleKind::Seagull)
    }
}

/// An obstacle. `hit` flips once and never back: the penalty applies once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub hit: bool,
}

/// Collectible subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Low value, any row
    Drop,
    /// High value, ground row only
    JerryCan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub value: u32,
}

/// Complete run state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct SimulationContext {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub level_name: String,
    pub level: LevelConfig,
    pub tuning: Tuning,
    /// Viewport width/height in pixels
    pub viewport: Vec2,
    pub phase: GamePhase,
    /// Simulated run time in seconds (paused time excluded)
    pub elapsed: f32,
    pub terrain: Terrain,
    pub character: Character,
    /// Live obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Live collectibles (spawn order)
    pub collectibles: Vec<Collectible>,
    pub timers: SpawnTimers,
    pub score: ScoreState,
    pub tier: DifficultyTier,
    pub facts: FactTicker,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationContext {
    /// Fresh run: terrain filled, character standing on the baseline ground
    pub fn new(seed: u64, level_name: &str, level: LevelConfig, tuning: Tuning, viewport: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut terrain = Terrain::new(TerrainParams::from(&tuning));
        terrain.fill(viewport.x, &mut rng);

        let size = Vec2::new(tuning.character_width, tuning.character_height);
        let ground = terrain
            .height_at(tuning.character_x + size.x / 2.0)
            .unwrap_or(tuning.baseline_height);
        let character = Character::standing(tuning.character_x, viewport.y - ground, size);

        let tier = tier_for(0, &level);
        let timers = SpawnTimers::new(0.0, &tier, &mut rng);

        let mut ctx = Self {
            seed,
            rng,
            level_name: level_name.to_string(),
            score: ScoreState::new(tuning.target_score),
            level,
            tuning,
            viewport,
            phase: GamePhase::Running,
            elapsed: 0.0,
            terrain,
            character,
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            timers,
            tier,
            facts: FactTicker::new(),
            events: Vec::new(),
            next_id: 1,
        };
        ctx.events.push(GameEvent::ScoreChanged { score: 0 });
        ctx
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ground surface y (screen space) at world x, `None` over a gap
    pub fn surface_y(&self, x: f32) -> Option<f32> {
        self.terrain.height_at(x).map(|h| self.viewport.y - h)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Change viewport size; terrain is regenerated from x = 0
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.terrain.rebuild(viewport.x, &mut self.rng);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
