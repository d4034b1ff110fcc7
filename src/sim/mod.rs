//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick = one frame at 60 Hz)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod geom;
pub mod physics;
pub mod powerup;
pub mod state;
pub mod tick;

pub use geom::{Axis, Penetration, Rect, circle_rect_overlap};
pub use physics::step_ball;
pub use powerup::{ActiveEffects, PowerUpKind, PowerUpTimer};
pub use state::{
    Ball, BallColor, Block, GamePhase, GameState, GemKind, Paddle, PowerUpDrop, TRAIL_LENGTH,
};
pub use tick::{TickInput, tick};
