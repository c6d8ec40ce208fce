//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (one `Pcg32` per run)
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod facts;
pub mod physics;
pub mod score;
pub mod spawner;
pub mod state;
pub mod terrain;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{DeltaSource, ScoreDelta, aabb_overlap, resolve};
pub use difficulty::{DifficultyTier, tier_for};
pub use facts::{FACTS, FactTicker};
pub use physics::{Footing, jump};
pub use score::ScoreState;
pub use spawner::{SpawnOutcome, SpawnTimer, SpawnTimers, maybe_spawn_collectible, maybe_spawn_obstacle};
pub use state::{
    Character, Collectible, CollectibleKind, EndReason, GameEvent, GamePhase, Obstacle,
    ObstacleKind, Row, SimulationContext,
};
pub use terrain::{GroundSegment, Terrain, TerrainParams};
pub use tick::{TickInput, tick};
