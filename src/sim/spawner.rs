//! Timed obstacle and collectible spawning
//!
//! Each category has its own timer. When a timer is due the spawner checks the
//! ground at the right edge of the viewport; over a gap it waits for the next
//! tick without resetting the timer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyTier;
use super::state::{Collectible, CollectibleKind, Obstacle, ObstacleKind, Row, SimulationContext};
use crate::tuning::Tuning;

/// Spawn cadence for one entity category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Run time of the last successful spawn
    pub last_spawn: f32,
    /// Seconds that must pass before the next spawn
    pub threshold: f32,
}

impl SpawnTimer {
    pub fn new(now: f32, min: f32, max: f32, rng: &mut impl Rng) -> Self {
        let mut timer = Self {
            last_spawn: now,
            threshold: 0.0,
        };
        timer.rearm(now, min, max, rng);
        timer
    }

    #[inline]
    pub fn is_due(&self, now: f32) -> bool {
        now - self.last_spawn > self.threshold
    }

    /// Record a spawn at `now` and draw the next threshold
    pub fn rearm(&mut self, now: f32, min: f32, max: f32, rng: &mut impl Rng) {
        self.last_spawn = now;
        self.threshold = rng.random_range(min..=max);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub obstacle: SpawnTimer,
    pub collectible: SpawnTimer,
}

impl SpawnTimers {
    pub fn new(now: f32, tier: &DifficultyTier, rng: &mut impl Rng) -> Self {
        Self {
            obstacle: SpawnTimer::new(now, tier.obstacle_interval_min, tier.obstacle_interval_max, rng),
            collectible: SpawnTimer::new(
                now,
                tier.collectible_interval_min,
                tier.collectible_interval_max,
                rng,
            ),
        }
    }
}

/// What a spawn attempt did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Timer not due yet
    Waiting,
    /// Timer due but no ground at the spawn site
    Skipped,
    /// Entity created with this id
    Spawned(u32),
}

/// Y of an item's top edge for a row, given the ground surface y below it
pub fn row_y(row: Row, surface_y: f32, item_height: f32, tuning: &Tuning) -> f32 {
    match row {
        Row::Ground => surface_y - item_height - tuning.ground_row_gap,
        Row::Middle => surface_y - tuning.middle_row_offset,
        Row::Top => surface_y - tuning.top_row_offset,
    }
}

/// Weighted pick over the obstacle partition
pub fn pick_obstacle_kind(rng: &mut impl Rng) -> ObstacleKind {
    let total: u32 = ObstacleKind::WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for (kind, weight) in ObstacleKind::WEIGHTS {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    ObstacleKind::Bush
}

fn air_row(rng: &mut impl Rng) -> Row {
    if rng.random_bool(0.5) { Row::Middle } else { Row::Top }
}

/// Collectible kind and row: rare items sit on the ground, common ones anywhere
pub fn pick_collectible(rare_chance: f32, rng: &mut impl Rng) -> (CollectibleKind, Row) {
    if rng.random::<f32>() < rare_chance {
        return (CollectibleKind::JerryCan, Row::Ground);
    }
    let row = match rng.random_range(0..3) {
        0 => Row::Ground,
        1 => Row::Middle,
        _ => Row::Top,
    };
    (CollectibleKind::Drop, row)
}

/// Spawn an obstacle at the right edge if its timer is due
pub fn maybe_spawn_obstacle(ctx: &mut SimulationContext, now: f32) -> SpawnOutcome {
    if !ctx.timers.obstacle.is_due(now) {
        return SpawnOutcome::Waiting;
    }
    let spawn_x = ctx.viewport.x;
    let Some(surface) = ctx.surface_y(spawn_x) else {
        log::debug!("Obstacle spawn skipped: no ground at x={spawn_x}");
        return SpawnOutcome::Skipped;
    };

    let tier = ctx.tier;
    let rng = &mut ctx.rng;
    let [w_min, w_max] = tier.obstacle_width;
    let [h_min, h_max] = tier.obstacle_height;
    let size = Vec2::new(rng.random_range(w_min..=w_max), rng.random_range(h_min..=h_max));

    let kind = pick_obstacle_kind(rng);
    let y = if kind.is_airborne() {
        row_y(air_row(rng), surface, size.y, &ctx.tuning)
    } else {
        surface - size.y
    };

    ctx.timers
        .obstacle
        .rearm(now, tier.obstacle_interval_min, tier.obstacle_interval_max, rng);

    let id = ctx.next_entity_id();
    ctx.obstacles.push(Obstacle {
        id,
        kind,
        pos: Vec2::new(spawn_x, y),
        size,
        hit: false,
    });
    SpawnOutcome::Spawned(id)
}

/// Spawn a collectible at the right edge if its timer is due
pub fn maybe_spawn_collectible(ctx: &mut SimulationContext, now: f32) -> SpawnOutcome {
    if !ctx.timers.collectible.is_due(now) {
        return SpawnOutcome::Waiting;
    }
    let spawn_x = ctx.viewport.x;
    let Some(surface) = ctx.surface_y(spawn_x) else {
        log::debug!("Collectible spawn skipped: no ground at x={spawn_x}");
        return SpawnOutcome::Skipped;
    };

    let tier = ctx.tier;
    let tuning = &ctx.tuning;
    let rng = &mut ctx.rng;
    let (kind, row) = pick_collectible(tuning.rare_chance, rng);
    let size = Vec2::new(tuning.collectible_width, tuning.collectible_height);
    let value = match kind {
        CollectibleKind::Drop => tuning.common_value,
        CollectibleKind::JerryCan => tuning.rare_value,
    };
    let pos = Vec2::new(spawn_x, row_y(row, surface, size.y, tuning));

    ctx.timers.collectible.rearm(
        now,
        tier.collectible_interval_min,
        tier.collectible_interval_max,
        rng,
    );

    let id = ctx.next_entity_id();
    ctx.collectibles.push(Collectible {
        id,
        kind,
        pos,
        size,
        value,
    });
    SpawnOutcome::Spawned(id)
}
