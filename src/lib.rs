//! Ridge Runner - A side-scrolling runner over procedural terrain
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, spawning, physics, collisions, scoring)
//! - `game`: Command/event surface driving the simulation from a frame clock
//! - `levels`: Named difficulty levels
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best time and leaderboard records
//! - `persistence`: Record storage backends

pub mod error;
pub mod game;
pub mod highscores;
pub mod levels;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, StorageError};
pub use game::Game;
pub use highscores::{BestTime, Leaderboard, Records};
pub use levels::{LevelConfig, Levels};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal display refresh interval (used for the first frame after start/resume)
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame the simulation will integrate in one tick
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default viewport dimensions
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 960.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 540.0;

    /// Leaderboard capacity (fastest winning runs)
    pub const MAX_LEADERBOARD_ENTRIES: usize = 5;
}
