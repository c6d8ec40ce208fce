//! Score-driven difficulty tiers
//!
//! A tier is a pure step function of the score: every `score_band` points the
//! scroll speed rises by the level's step, up to a cap. No easing between tiers.

use serde::{Deserialize, Serialize};

use crate::levels::LevelConfig;

/// Obstacle intervals never shrink below this fraction of the level's base
const MIN_INTERVAL_SCALE: f32 = 0.5;

/// Current speed and spawn-interval parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// Band index this tier was derived from
    pub step: u32,
    /// Scroll speed (px/s)
    pub scroll_speed: f32,
    pub obstacle_interval_min: f32,
    pub obstacle_interval_max: f32,
    pub collectible_interval_min: f32,
    pub collectible_interval_max: f32,
    /// Obstacle width range `[min, max]`
    pub obstacle_width: [f32; 2],
    /// Obstacle height range `[min, max]`
    pub obstacle_height: [f32; 2],
}

/// Band index for a score: scores 0..=band are step 0, each later band adds one
pub fn step_for(score: u32, level: &LevelConfig) -> u32 {
    let band = level.score_band.max(1);
    let step = score.div_ceil(band).saturating_sub(1);
    step.min(level.max_speed_steps)
}

/// Tier for a score within a level
pub fn tier_for(score: u32, level: &LevelConfig) -> DifficultyTier {
    let step = step_for(score, level);
    let interval_scale = (1.0 - step as f32 * level.interval_shrink).max(MIN_INTERVAL_SCALE);

    DifficultyTier {
        step,
        scroll_speed: level.scroll_speed_base + step as f32 * level.speed_step,
        obstacle_interval_min: level.obstacle_interval_min * interval_scale,
        obstacle_interval_max: level.obstacle_interval_max * interval_scale,
        collectible_interval_min: level.collectible_interval_min,
        collectible_interval_max: level.collectible_interval_max,
        obstacle_width: level.obstacle_width,
        obstacle_height: level.obstacle_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_speed_table() {
        let level = LevelConfig::normal();
        let speeds: Vec<f32> = [0, 20, 21, 40, 41, 60, 61, 80, 81, 100, 500]
            .iter()
            .map(|&s| tier_for(s, &level).scroll_speed)
            .collect();
        assert_eq!(
            speeds,
            vec![420.0, 420.0, 540.0, 540.0, 660.0, 660.0, 780.0, 780.0, 900.0, 900.0, 900.0]
        );
    }

    #[test]
    fn test_rare_pickup_from_zero_keeps_tier() {
        let level = LevelConfig::normal();
        assert_eq!(tier_for(0, &level), tier_for(5, &level));
    }

    #[test]
    fn test_interval_shrink_is_floored() {
        let mut level = LevelConfig::hard();
        level.interval_shrink = 0.3;
        level.max_speed_steps = 10;
        let tier = tier_for(1000, &level);
        assert_eq!(tier.obstacle_interval_min, level.obstacle_interval_min * MIN_INTERVAL_SCALE);
    }

    proptest! {
        #[test]
        fn prop_tier_lookup_is_idempotent(score in 0u32..10_000) {
            let level = LevelConfig::hard();
            prop_assert_eq!(tier_for(score, &level), tier_for(score, &level));
        }

        #[test]
        fn prop_speed_non_decreasing(a in 0u32..10_000, b in 0u32..10_000) {
            let level = LevelConfig::hard();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let slow = tier_for(lo, &level);
            let fast = tier_for(hi, &level);
            prop_assert!(slow.scroll_speed <= fast.scroll_speed);
            prop_assert!(slow.obstacle_interval_max >= fast.obstacle_interval_max);
        }
    }
}
