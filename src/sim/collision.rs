//! Character vs. entity overlap and score deltas
//!
//! Obstacles are flagged on first contact and keep scrolling until they leave
//! the screen. Collectibles are removed on contact; removal is their
//! at-most-once guard.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Character, Collectible, CollectibleKind, Obstacle, ObstacleKind};

/// What produced a score change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaSource {
    Obstacle { id: u32, kind: ObstacleKind },
    Collectible { id: u32, kind: CollectibleKind },
}

/// A signed score change produced by a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub amount: i32,
    pub source: DeltaSource,
}

/// Axis-aligned box overlap (touching edges do not count)
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Detect contacts, flag hit obstacles, remove collected items, and prune
/// everything whose right edge has passed the left viewport edge
pub fn resolve(
    character: &Character,
    obstacles: &mut Vec<Obstacle>,
    collectibles: &mut Vec<Collectible>,
    obstacle_penalty: u32,
) -> Vec<ScoreDelta> {
    let mut deltas = Vec::new();
    let penalty = i32::try_from(obstacle_penalty).unwrap_or(i32::MAX);

    for obstacle in obstacles.iter_mut() {
        if !obstacle.hit && aabb_overlap(character.pos, character.size, obstacle.pos, obstacle.size)
        {
            obstacle.hit = true;
            deltas.push(ScoreDelta {
                amount: -penalty,
                source: DeltaSource::Obstacle {
                    id: obstacle.id,
                    kind: obstacle.kind,
                },
            });
        }
    }
    obstacles.retain(|o| o.pos.x + o.size.x >= 0.0);

    collectibles.retain(|item| {
        if aabb_overlap(character.pos, character.size, item.pos, item.size) {
            deltas.push(ScoreDelta {
                amount: i32::try_from(item.value).unwrap_or(i32::MAX),
                source: DeltaSource::Collectible {
                    id: item.id,
                    kind: item.kind,
                },
            });
            return false;
        }
        item.pos.x + item.size.x >= 0.0
    });

    deltas
}

/// Scroll entities left by `distance`
pub fn scroll_entities(obstacles: &mut [Obstacle], collectibles: &mut [Collectible], distance: f32) {
    for obstacle in obstacles {
        obstacle.pos.x -= distance;
    }
    for item in collectibles {
        item.pos.x -= distance;
    }
}
