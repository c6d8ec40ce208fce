//! Per-frame simulation step
//!
//! Composes the subsystems in a fixed order: terrain, character physics,
//! spawning, entity motion and collisions, scoring, difficulty, win check.

use super::collision::{self, DeltaSource, ScoreDelta};
use super::difficulty::tier_for;
use super::facts;
use super::physics::{self, Footing};
use super::spawner;
use super::state::{EndReason, GameEvent, GamePhase, SimulationContext};
use crate::consts::MAX_FRAME_DT;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (ignored while airborne)
    pub jump: bool,
}

/// Advance the run by one frame of `dt` seconds
pub fn tick(ctx: &mut SimulationContext, input: &TickInput, dt: f32) {
    // Don't tick if paused or finished
    if ctx.phase != GamePhase::Running {
        return;
    }

    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    ctx.elapsed += dt;
    let now = ctx.elapsed;

    if let Some(index) = ctx.facts.advance(dt, ctx.tuning.fact_interval) {
        log::debug!("Fact ticker -> {index}");
        ctx.events.push(GameEvent::FactChanged { index });
    }

    if input.jump {
        physics::jump(&mut ctx.character, ctx.tuning.jump_impulse);
    }

    // Speed is fixed for the whole tick; score changes apply from the next one
    let speed = ctx.tier.scroll_speed;
    ctx.terrain.advance(dt, speed, ctx.viewport.x, &mut ctx.rng);

    let footing = physics::update(
        &mut ctx.character,
        &ctx.terrain,
        ctx.viewport.y,
        &ctx.tuning,
        dt,
    );
    if footing == Footing::Stuck {
        end_run(ctx, EndReason::Stuck);
        return;
    }

    spawner::maybe_spawn_obstacle(ctx, now);
    spawner::maybe_spawn_collectible(ctx, now);

    collision::scroll_entities(&mut ctx.obstacles, &mut ctx.collectibles, speed * dt);
    let deltas = collision::resolve(
        &ctx.character,
        &mut ctx.obstacles,
        &mut ctx.collectibles,
        ctx.tuning.obstacle_penalty,
    );
    if deltas.is_empty() {
        return;
    }

    for delta in deltas {
        if ctx.level.obstacle_ends_run && matches!(delta.source, DeltaSource::Obstacle { .. }) {
            end_run(ctx, EndReason::Obstacle);
            return;
        }
        apply_delta(ctx, delta);
    }

    let threshold = ctx.tuning.milestone_threshold;
    if ctx.score.check_milestone(threshold) {
        log::info!("Milestone reached: {threshold}");
        ctx.events.push(GameEvent::MilestoneReached { threshold });
    }

    refresh_tier(ctx);

    if ctx.score.has_won() {
        ctx.phase = GamePhase::Won;
        log::info!(
            "Run won: score={} elapsed={:.2}s",
            ctx.score.value(),
            ctx.elapsed
        );
        ctx.events.push(GameEvent::Win {
            final_score: ctx.score.value(),
            elapsed: ctx.elapsed,
        });
    }
}

fn apply_delta(ctx: &mut SimulationContext, delta: ScoreDelta) {
    let before = ctx.score.value();
    let score = ctx.score.apply(delta.amount);
    if score != before {
        ctx.events.push(GameEvent::ScoreChanged { score });
    }
}

/// Recompute the tier after a score change
fn refresh_tier(ctx: &mut SimulationContext) {
    let tier = tier_for(ctx.score.value(), &ctx.level);
    if tier != ctx.tier {
        log::debug!(
            "Difficulty tier {} -> {} (speed {} -> {})",
            ctx.tier.step,
            tier.step,
            ctx.tier.scroll_speed,
            tier.scroll_speed
        );
        ctx.tier = tier;
    }
}

fn end_run(ctx: &mut SimulationContext, reason: EndReason) {
    ctx.phase = GamePhase::GameOver;
    let fact = facts::random_fact(&mut ctx.rng);
    log::info!(
        "Run over ({:?}): score={} elapsed={:.2}s",
        reason,
        ctx.score.value(),
        ctx.elapsed
    );
    ctx.events.push(GameEvent::GameOver {
        final_score: ctx.score.value(),
        reason,
        fact,
    });
}
