//! Power-up activation, duration countdown and expiry
//!
//! Each kind runs an independent Inactive -> Active(remaining_ticks) ->
//! Inactive timer. Activation applies the effect immediately;
//! re-activating an already-active kind resets the clock and reapplies
//! the effect (so multi-ball spawns two more extras each time). Expiry
//! reverts the effect to baseline.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, BallColor, GameState};
use crate::consts::*;

/// The closed set of power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    MultiBall,
    LongPaddle,
    BigBall,
    FireBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        Self::MultiBall,
        Self::LongPaddle,
        Self::BigBall,
        Self::FireBall,
    ];

    /// Effect duration in ticks (60 per second)
    pub fn duration_ticks(self) -> u32 {
        match self {
            Self::MultiBall => 600,  // 10s
            Self::LongPaddle => 900, // 15s
            Self::BigBall => 600,    // 10s
            Self::FireBall => 450,   // 7.5s
        }
    }

    fn index(self) -> usize {
        match self {
            Self::MultiBall => 0,
            Self::LongPaddle => 1,
            Self::BigBall => 2,
            Self::FireBall => 3,
        }
    }
}

/// One per-kind countdown
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PowerUpTimer {
    pub active: bool,
    pub remaining_ticks: u32,
}

/// Timer table covering every power-up kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    timers: [PowerUpTimer; 4],
}

impl ActiveEffects {
    pub fn timer(&self, kind: PowerUpKind) -> &PowerUpTimer {
        &self.timers[kind.index()]
    }

    pub fn timer_mut(&mut self, kind: PowerUpKind) -> &mut PowerUpTimer {
        &mut self.timers[kind.index()]
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.timer(kind).active
    }
}

/// Activate a power-up: arm (or re-arm) its timer and apply the effect
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    let timer = state.effects.timer_mut(kind);
    timer.active = true;
    timer.remaining_ticks = kind.duration_ticks();
    apply_effect(state, kind);
    log::debug!("power-up {kind:?} active for {} ticks", kind.duration_ticks());
}

/// Per-tick countdown for every active timer; zero triggers expiry
pub fn tick_effects(state: &mut GameState) {
    for kind in PowerUpKind::ALL {
        let timer = state.effects.timer_mut(kind);
        if !timer.active {
            continue;
        }
        timer.remaining_ticks = timer.remaining_ticks.saturating_sub(1);
        if timer.remaining_ticks == 0 {
            timer.active = false;
            revert_effect(state, kind);
            log::debug!("power-up {kind:?} expired");
        }
    }
}

fn apply_effect(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::MultiBall => {
            // Two extras burst out of the primary ball, inheriting its
            // radius and pierce charges
            for _ in 0..2 {
                let dx = state.rng.random_range(-4.0_f32..4.0);
                state.extra_balls.push(Ball {
                    pos: state.ball.pos,
                    vel: Vec2::new(dx, -state.ball.vel.y.abs()),
                    radius: state.ball.radius,
                    piercing: state.ball.piercing,
                    color: BallColor::Classic,
                    trail: Vec::new(),
                });
            }
        }
        PowerUpKind::LongPaddle => {
            state.paddle.width = PADDLE_WIDTH * LONG_PADDLE_SCALE;
        }
        PowerUpKind::BigBall => {
            for ball in state.all_balls_mut() {
                ball.radius = BALL_RADIUS * BIG_BALL_SCALE;
            }
        }
        PowerUpKind::FireBall => {
            for ball in state.all_balls_mut() {
                ball.piercing = FIREBALL_CHARGES;
                ball.color = BallColor::Fire;
            }
        }
    }
}

fn revert_effect(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        // Unconditional discard of the whole extra-ball set, not just
        // the ones this activation spawned
        PowerUpKind::MultiBall => state.extra_balls.clear(),
        PowerUpKind::LongPaddle => state.paddle.width = PADDLE_WIDTH,
        PowerUpKind::BigBall => {
            for ball in state.all_balls_mut() {
                ball.radius = BALL_RADIUS;
            }
        }
        PowerUpKind::FireBall => {
            for ball in state.all_balls_mut() {
                ball.piercing = 0;
                ball.color = BallColor::Classic;
            }
        }
    }
}
