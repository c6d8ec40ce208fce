//! Data-driven game balance
//!
//! Everything that is level-independent lives here. Loaded from JSON when a
//! tuning file is supplied, missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Level-independent balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Character physics ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Upward velocity applied by a jump (px/s, negative = up)
    pub jump_impulse: f32,
    /// Fixed horizontal position of the character's left edge
    pub character_x: f32,
    pub character_width: f32,
    pub character_height: f32,
    /// How far below the viewport the character may fall before the run is stuck
    pub stuck_tolerance: f32,

    // === Terrain ===
    pub min_ground_height: f32,
    pub max_ground_height: f32,
    pub segment_width_min: f32,
    pub segment_width_max: f32,
    /// Largest height step between adjacent segments
    pub max_height_delta: f32,
    /// Height of the very first segment of a run
    pub baseline_height: f32,
    /// Terrain is generated until the frontier reaches viewport width + margin
    pub frontier_margin: f32,

    // === Spawn rows (offsets above the local ground surface) ===
    /// Gap between a ground-row item and the surface
    pub ground_row_gap: f32,
    pub middle_row_offset: f32,
    pub top_row_offset: f32,

    // === Collectibles ===
    pub collectible_width: f32,
    pub collectible_height: f32,
    pub common_value: u32,
    pub rare_value: u32,
    /// Probability that a collectible spawn is the rare (ground-only) kind
    pub rare_chance: f32,

    // === Scoring ===
    pub obstacle_penalty: u32,
    pub target_score: u32,
    pub milestone_threshold: u32,

    // === Awareness facts ===
    /// Seconds of run time each fact stays on screen
    pub fact_interval: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Per-frame values at 60 Hz, scaled to per-second
            gravity: 1800.0,
            jump_impulse: -720.0,
            character_x: 80.0,
            character_width: 40.0,
            character_height: 60.0,
            stuck_tolerance: 50.0,

            min_ground_height: 50.0,
            max_ground_height: 150.0,
            segment_width_min: 200.0,
            segment_width_max: 500.0,
            max_height_delta: 70.0,
            baseline_height: 50.0,
            frontier_margin: 100.0,

            ground_row_gap: 2.0,
            middle_row_offset: 110.0,
            top_row_offset: 180.0,

            collectible_width: 28.0,
            collectible_height: 36.0,
            common_value: 1,
            rare_value: 5,
            rare_chance: 0.33,

            obstacle_penalty: 3,
            target_score: 100,
            milestone_threshold: 50,

            fact_interval: 8.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, filling omitted fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall terrain generation or make draws ill-defined
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.segment_width_min > 0.0) || self.segment_width_min > self.segment_width_max {
            return Err(ConfigError::InvalidTuning("segment width must be positive with min <= max"));
        }
        if self.min_ground_height > self.max_ground_height || self.max_height_delta < 0.0 {
            return Err(ConfigError::InvalidTuning("ground height range is empty"));
        }
        if !(self.min_ground_height..=self.max_ground_height).contains(&self.baseline_height) {
            return Err(ConfigError::InvalidTuning("baseline height outside ground range"));
        }
        if !(self.fact_interval > 0.0) {
            return Err(ConfigError::InvalidTuning("fact interval must be positive"));
        }
        if !(0.0..=1.0).contains(&self.rare_chance) {
            return Err(ConfigError::InvalidTuning("rare chance must be a probability"));
        }
        Ok(())
    }

    /// Load tuning from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
