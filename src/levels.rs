//! Named difficulty levels
//!
//! The simulation consumes a level by name at `start`. Built-in levels can be
//! overridden or extended from JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Level used when none is requested
pub const DEFAULT_LEVEL: &str = "normal";

/// Per-level difficulty parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Scroll speed at score 0 (px/s)
    pub scroll_speed_base: f32,
    /// Speed added per score band
    pub speed_step: f32,
    /// Number of bands after which speed stops increasing
    pub max_speed_steps: u32,
    /// Width of one score band (points)
    pub score_band: u32,
    /// Obstacle spawn interval range at band 0 (seconds)
    pub obstacle_interval_min: f32,
    pub obstacle_interval_max: f32,
    /// Fraction the obstacle interval shrinks per band
    #[serde(default)]
    pub interval_shrink: f32,
    /// Obstacle width range `[min, max]`
    pub obstacle_width: [f32; 2],
    /// Obstacle height range `[min, max]`
    pub obstacle_height: [f32; 2],
    #[serde(default = "default_collectible_min")]
    pub collectible_interval_min: f32,
    #[serde(default = "default_collectible_max")]
    pub collectible_interval_max: f32,
    /// Hitting an obstacle ends the run instead of only costing points
    #[serde(default)]
    pub obstacle_ends_run: bool,
}

fn default_collectible_min() -> f32 {
    0.5
}

fn default_collectible_max() -> f32 {
    1.2
}

impl LevelConfig {
    pub fn easy() -> Self {
        Self {
            scroll_speed_base: 360.0,
            speed_step: 90.0,
            max_speed_steps: 4,
            score_band: 20,
            obstacle_interval_min: 1.0,
            obstacle_interval_max: 2.2,
            interval_shrink: 0.0,
            obstacle_width: [20.0, 36.0],
            obstacle_height: [28.0, 44.0],
            collectible_interval_min: 0.45,
            collectible_interval_max: 1.0,
            obstacle_ends_run: false,
        }
    }

    pub fn normal() -> Self {
        Self {
            scroll_speed_base: 420.0,
            speed_step: 120.0,
            max_speed_steps: 4,
            score_band: 20,
            obstacle_interval_min: 0.8,
            obstacle_interval_max: 1.8,
            interval_shrink: 0.0,
            obstacle_width: [20.0, 40.0],
            obstacle_height: [30.0, 50.0],
            collectible_interval_min: default_collectible_min(),
            collectible_interval_max: default_collectible_max(),
            obstacle_ends_run: false,
        }
    }

    pub fn hard() -> Self {
        Self {
            scroll_speed_base: 480.0,
            speed_step: 120.0,
            max_speed_steps: 5,
            score_band: 20,
            obstacle_interval_min: 0.6,
            obstacle_interval_max: 1.4,
            interval_shrink: 0.08,
            obstacle_width: [24.0, 44.0],
            obstacle_height: [34.0, 56.0],
            collectible_interval_min: default_collectible_min(),
            collectible_interval_max: default_collectible_max(),
            obstacle_ends_run: true,
        }
    }

    /// Reject configurations that would make random draws ill-defined
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidLevel {
            level: name.to_string(),
            reason,
        };

        if !(self.scroll_speed_base > 0.0) || self.speed_step < 0.0 {
            return Err(invalid("scroll speed must be positive and non-decreasing"));
        }
        if self.score_band == 0 {
            return Err(invalid("score band must be at least one point"));
        }
        if !(self.obstacle_interval_min > 0.0)
            || self.obstacle_interval_min > self.obstacle_interval_max
        {
            return Err(invalid("obstacle interval must be positive with min <= max"));
        }
        if !(self.collectible_interval_min > 0.0)
            || self.collectible_interval_min > self.collectible_interval_max
        {
            return Err(invalid("collectible interval must be positive with min <= max"));
        }
        if !(0.0..1.0).contains(&self.interval_shrink) {
            return Err(invalid("interval shrink must be in [0, 1)"));
        }
        for [min, max] in [self.obstacle_width, self.obstacle_height] {
            if !(min > 0.0) || min > max {
                return Err(invalid("obstacle size must be positive with min <= max"));
            }
        }
        Ok(())
    }
}

/// Table of levels keyed by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Levels {
    levels: BTreeMap<String, LevelConfig>,
}

impl Default for Levels {
    fn default() -> Self {
        let mut levels = BTreeMap::new();
        levels.insert("easy".to_string(), LevelConfig::easy());
        levels.insert("normal".to_string(), LevelConfig::normal());
        levels.insert("hard".to_string(), LevelConfig::hard());
        Self { levels }
    }
}

impl Levels {
    /// Parse a JSON object of levels and merge it over the built-in table
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: BTreeMap<String, LevelConfig> = serde_json::from_str(json)?;
        let mut table = Self::default();
        for (name, level) in overrides {
            level.validate(&name)?;
            table.levels.insert(name, level);
        }
        Ok(table)
    }

    /// Load a JSON levels file (merged over the built-ins)
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a level by name
    pub fn get(&self, name: &str) -> Result<&LevelConfig, ConfigError> {
        self.levels
            .get(name)
            .ok_or_else(|| ConfigError::UnknownLevel(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }
}
