//! Per-tick session update
//!
//! The driving loop calls `tick` once per frame while the phase is
//! Playing, and stops scheduling the moment the session enters GameOver
//! or LevelWon. `GameState::restart` / `GameState::advance_level` re-arm
//! it afterward.

use glam::Vec2;
use rand::Rng;

use super::geom::{Axis, circle_rect_overlap};
use super::physics::step_ball;
use super::powerup::{self, PowerUpKind};
use super::state::{GamePhase, GameState, PowerUpDrop};
use crate::consts::*;

/// Input signals for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Discrete paddle intent (keyboard)
    pub left: bool,
    pub right: bool,
    /// Pointer/touch target x in field coordinates
    pub target_x: Option<f32>,
}

/// Advance the session by one tick. No-op outside the Playing phase.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    // 1. Paddle input
    state
        .paddle
        .apply_input(input.left, input.right, input.target_x);

    // 2. Physics for every ball; extras that fall out are dropped
    step_ball(&mut state.ball, &state.paddle);
    state.ball.record_trail();
    for ball in &mut state.extra_balls {
        step_ball(ball, &state.paddle);
        ball.record_trail();
    }
    state.extra_balls.retain(|b| b.pos.y <= FIELD_HEIGHT);

    // 3. Block collisions and scoring (primary ball only)
    block_collision_pass(state);

    // 4. Power-up countdown
    powerup::tick_effects(state);

    // 5. Falling drops: move, collect, cull
    update_drops(state);

    // 6. Loss check. Losing the primary only costs a life when no extra
    // ball is keeping the round alive.
    if state.ball.pos.y > FIELD_HEIGHT {
        if state.extra_balls.is_empty() {
            state.lives = state.lives.saturating_sub(1);
            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                log::info!("game over at level {} with score {}", state.level, state.score);
                return;
            }
        }
        state.reset_ball();
    }

    // 7. Win check
    if state.blocks.iter().all(|b| b.destroyed) {
        state.phase = GamePhase::LevelWon;
        log::info!("level {} cleared, score {}", state.level, state.score);
    }
}

/// One pass over the block list against the primary ball. Each block is
/// visited at most once per tick, so a pierced ball can chew through
/// several blocks in one frame but never the same block twice.
fn block_collision_pass(state: &mut GameState) {
    let mut gem_centers: Vec<Vec2> = Vec::new();

    for block in &mut state.blocks {
        if block.destroyed {
            continue;
        }
        let Some(pen) = circle_rect_overlap(state.ball.pos, state.ball.radius, &block.rect())
        else {
            continue;
        };
        // Reflection axis is resolved before hit accounting and applied
        // only if the ball has no pierce charge left
        let axis = pen.reflect_axis();

        if block.is_multi_hit() {
            block.current_hits += 1;
            if block.current_hits >= block.max_hits {
                block.destroyed = true;
                state.score += u64::from(block.points) * 2;
            } else {
                state.score += u64::from(block.points / 2);
            }
        } else {
            block.destroyed = true;
            state.score += u64::from(block.points);
        }

        if block.is_gem() && block.destroyed {
            gem_centers.push(block.rect().center());
        }

        if state.ball.piercing > 0 {
            state.ball.piercing -= 1;
        } else {
            match axis {
                Axis::Horizontal => state.ball.vel.x = -state.ball.vel.x,
                Axis::Vertical => state.ball.vel.y = -state.ball.vel.y,
            }
        }

        // Compounding, uncapped, applied on pierced hits too
        state.ball.vel *= BLOCK_HIT_SPEEDUP;
    }

    for center in gem_centers {
        spawn_drop(state, center);
    }
}

/// One drop per destroyed gem block, uniformly random kind
fn spawn_drop(state: &mut GameState, center: Vec2) {
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    state.drops.push(PowerUpDrop {
        kind,
        pos: center,
        fall_speed: DROP_FALL_SPEED,
        collected: false,
    });
    log::debug!("spawned {kind:?} drop at {center}");
}

/// Drops fall, get collected on paddle contact, or despawn below the field
fn update_drops(state: &mut GameState) {
    let paddle_rect = state.paddle.rect();
    let mut collected: Vec<PowerUpKind> = Vec::new();

    state.drops.retain_mut(|drop| {
        drop.pos.y += drop.fall_speed;
        if drop.rect().intersects(&paddle_rect) {
            drop.collected = true;
            collected.push(drop.kind);
            return false;
        }
        drop.pos.y <= FIELD_HEIGHT + DROP_DESPAWN_MARGIN
    });

    for kind in collected {
        powerup::activate(state, kind);
    }
}
