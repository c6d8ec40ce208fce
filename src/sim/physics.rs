//! Character vertical motion
//!
//! Semi-implicit Euler against the terrain height query. The character never
//! moves horizontally on its own; the world scrolls under it.

use serde::{Deserialize, Serialize};

use super::state::Character;
use super::terrain::Terrain;
use crate::tuning::Tuning;

/// Where the character ended up after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Footing {
    Grounded,
    Airborne,
    /// Fell below the viewport or drifted off its left edge; the run is over
    Stuck,
}

/// Advance the character by `dt` seconds
pub fn update(
    character: &mut Character,
    terrain: &Terrain,
    viewport_height: f32,
    tuning: &Tuning,
    dt: f32,
) -> Footing {
    character.velocity_y += tuning.gravity * dt;
    character.pos.y += character.velocity_y * dt;

    let surface = terrain
        .height_at(character.center_x())
        .map(|h| viewport_height - h);

    let footing = match surface {
        Some(surface_y) if character.bottom() >= surface_y => {
            character.pos.y = surface_y - character.size.y;
            character.velocity_y = 0.0;
            character.airborne = false;
            Footing::Grounded
        }
        // Over a gap or above the ground
        _ => {
            character.airborne = true;
            Footing::Airborne
        }
    };

    let fell = character.pos.y > viewport_height + tuning.stuck_tolerance;
    let drifted = character.pos.x < -character.size.x;
    if fell || drifted {
        return Footing::Stuck;
    }
    footing
}

/// Start a jump if standing on the ground. Returns whether the jump happened.
pub fn jump(character: &mut Character, impulse: f32) -> bool {
    if character.airborne {
        return false;
    }
    character.velocity_y = impulse;
    character.airborne = true;
    true
}
