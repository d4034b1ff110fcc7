//! Gem Breaker - a breakout variant with gem blocks and timed power-ups
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, power-ups, session state)
//!
//! Rendering and device input are external collaborators: they read the
//! `sim::GameState` snapshot each tick and feed a `sim::TickInput`.

pub mod sim;

pub use sim::{GamePhase, GameState, TickInput};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second); velocities are px per tick
    pub const TICK_RATE: u32 = 60;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Top edge of the paddle; doubles as the "floor" for ball-paddle logic
    pub const PADDLE_Y: f32 = FIELD_HEIGHT - 30.0;
    /// Keyboard movement per tick
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Fraction of the distance to the pointer target covered per tick
    pub const PADDLE_SEEK_FACTOR: f32 = 0.2;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_SPEED: f32 = 4.0;
    pub const BALL_SPAWN_Y: f32 = FIELD_HEIGHT - 50.0;
    /// Base speed added on every level advance
    pub const LEVEL_SPEED_INCREMENT: f32 = 0.5;
    /// Compounding velocity multiplier applied on every block hit
    pub const BLOCK_HIT_SPEEDUP: f32 = 1.005;
    /// Angular range of paddle deflection; the hit offset (-0.5..0.5) scales this
    pub const PADDLE_BOUNCE_ARC: f32 = std::f32::consts::FRAC_PI_3;

    /// Block grid
    pub const BLOCK_ROWS: usize = 6;
    pub const BLOCK_COLS: usize = 10;
    pub const BLOCK_WIDTH: f32 = 75.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_PADDING: f32 = 5.0;
    pub const BLOCK_OFFSET_TOP: f32 = 80.0;
    pub const BLOCK_OFFSET_LEFT: f32 = 12.5;
    /// Chance for a cell to hold a gem block
    pub const GEM_CHANCE: f64 = 0.15;
    /// Chance for a non-gem block to need two hits
    pub const MULTI_HIT_CHANCE: f64 = 0.2;

    /// Power-up drops
    pub const DROP_SIZE: f32 = 20.0;
    pub const DROP_FALL_SPEED: f32 = 2.0;
    /// Margin below the field before an uncollected drop despawns
    pub const DROP_DESPAWN_MARGIN: f32 = 50.0;

    /// Power-up effect scales
    pub const LONG_PADDLE_SCALE: f32 = 1.5;
    pub const BIG_BALL_SCALE: f32 = 1.5;
    pub const FIREBALL_CHARGES: u32 = 3;
}
