//! Entity model and session state
//!
//! Everything the renderer reads each tick lives here. The `GameState`
//! aggregate exclusively owns the block grid, the ball set, the drop set
//! and the power-up timers; all mutation goes through `tick` and the
//! lifecycle commands on `GameState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::powerup::ActiveEffects;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Reserved - no transition reaches this yet
    Paused,
    /// Run ended; `restart` re-arms
    GameOver,
    /// Grid cleared; `advance_level` re-arms
    LevelWon,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 10;

/// Render color tag for a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallColor {
    #[default]
    Classic,
    Fire,
}

/// A ball entity. The primary ball and extra balls share this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Remaining pierce-through-block charges
    pub piercing: u32,
    pub color: BallColor,
    /// Trail history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Ball {
    /// Record current position to trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        self.trail.truncate(TRAIL_LENGTH);
    }

    /// Clear trail (on respawn)
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle. Height and vertical position are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (FIELD_WIDTH - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, PADDLE_Y, self.width, PADDLE_HEIGHT)
    }

    /// Is this x strictly over the paddle? Used by the physics step.
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }

    /// Apply one tick of input: discrete keys first (right wins a
    /// conflict), then proportional seek toward the pointer target,
    /// then clamp to the field. Out-of-range pointer coordinates are
    /// clamped, never rejected.
    pub fn apply_input(&mut self, left: bool, right: bool, target_x: Option<f32>) {
        if right && self.x < FIELD_WIDTH - self.width {
            self.x += PADDLE_SPEED;
        } else if left && self.x > 0.0 {
            self.x -= PADDLE_SPEED;
        }

        if let Some(tx) = target_x {
            let target = tx.clamp(0.0, FIELD_WIDTH) - self.width / 2.0;
            let distance = target - self.x;
            if distance.abs() > 1.0 {
                self.x += distance * PADDLE_SEEK_FACTOR;
            }
        }

        self.x = self.x.clamp(0.0, FIELD_WIDTH - self.width);
    }
}

/// Gem block varieties (renderer picks the palette)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GemKind {
    Diamond,
    Ruby,
    Emerald,
    Sapphire,
    Topaz,
}

impl GemKind {
    pub const ALL: [GemKind; 5] = [
        Self::Diamond,
        Self::Ruby,
        Self::Emerald,
        Self::Sapphire,
        Self::Topaz,
    ];
}

/// A destructible block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Min corner; extent is the fixed block size
    pub pos: Vec2,
    /// Grid row, determines the renderer's base color
    pub row: u8,
    pub destroyed: bool,
    pub gem: Option<GemKind>,
    pub max_hits: u8,
    pub current_hits: u8,
    pub points: u32,
}

impl Block {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BLOCK_WIDTH, BLOCK_HEIGHT)
    }

    #[inline]
    pub fn is_multi_hit(&self) -> bool {
        self.max_hits > 1
    }

    #[inline]
    pub fn is_gem(&self) -> bool {
        self.gem.is_some()
    }
}

/// A falling power-up pickup, spawned at a destroyed gem block's center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpDrop {
    pub kind: super::powerup::PowerUpKind,
    /// Center position
    pub pos: Vec2,
    pub fall_speed: f32,
    pub collected: bool,
}

impl PowerUpDrop {
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - DROP_SIZE / 2.0,
            self.pos.y - DROP_SIZE / 2.0,
            DROP_SIZE,
            DROP_SIZE,
        )
    }
}

/// Deserialized snapshots are render-side reads; they get a detached RNG
fn detached_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state (owned aggregate, renderer snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "detached_rng")]
    pub(crate) rng: Pcg32,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    /// Speed the primary ball respawns with; grows each level
    pub base_speed: f32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    /// The primary ball - the only one that scans blocks
    pub ball: Ball,
    /// Extra balls spawned by the multi-ball power-up
    pub extra_balls: Vec<Ball>,
    pub blocks: Vec<Block>,
    pub drops: Vec<PowerUpDrop>,
    pub effects: ActiveEffects,
}

impl GameState {
    /// Create a new session with the given seed, grid generated and ball
    /// at spawn, ready to play
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: 3,
            level: 1,
            base_speed: BALL_START_SPEED,
            phase: GamePhase::Playing,
            time_ticks: 0,
            paddle: Paddle::default(),
            ball: Ball {
                pos: Vec2::new(FIELD_WIDTH / 2.0, BALL_SPAWN_Y),
                vel: Vec2::ZERO,
                radius: BALL_RADIUS,
                piercing: 0,
                color: BallColor::Classic,
                trail: Vec::new(),
            },
            extra_balls: Vec::new(),
            blocks: Vec::new(),
            drops: Vec::new(),
            effects: ActiveEffects::default(),
        };
        state.generate_blocks();
        state.reset_ball();
        state
    }

    /// Re-center the primary ball with a fresh base-speed velocity and a
    /// random horizontal direction. Radius and piercing deliberately
    /// survive a respawn.
    pub fn reset_ball(&mut self) {
        self.ball.pos = Vec2::new(FIELD_WIDTH / 2.0, BALL_SPAWN_Y);
        let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.vel = Vec2::new(dir * self.base_speed, -self.base_speed);
        self.ball.clear_trail();
    }

    /// Restart from scratch: fresh score/lives/level, fresh grid
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = 3;
        self.level = 1;
        self.base_speed = BALL_START_SPEED;
        self.reset_round();
        log::info!("session restarted");
    }

    /// Advance to the next, faster level; score and lives carry over
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.base_speed += LEVEL_SPEED_INCREMENT;
        self.reset_round();
        log::info!("level {} started, base speed {}", self.level, self.base_speed);
    }

    /// Wholesale entity reset shared by restart and level advance
    fn reset_round(&mut self) {
        self.extra_balls.clear();
        self.drops.clear();
        self.effects = ActiveEffects::default();
        self.paddle = Paddle::default();
        self.ball.radius = BALL_RADIUS;
        self.ball.piercing = 0;
        self.ball.color = BallColor::Classic;
        self.generate_blocks();
        self.reset_ball();
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
    }

    /// Regenerate the block grid with this session's RNG
    pub fn generate_blocks(&mut self) {
        self.blocks.clear();
        let mut gems = 0usize;
        let mut multi = 0usize;

        for row in 0..BLOCK_ROWS {
            for col in 0..BLOCK_COLS {
                let is_gem = self.rng.random_bool(GEM_CHANCE);
                let gem = if is_gem {
                    gems += 1;
                    Some(GemKind::ALL[self.rng.random_range(0..GemKind::ALL.len())])
                } else {
                    None
                };
                let is_multi = !is_gem && self.rng.random_bool(MULTI_HIT_CHANCE);
                if is_multi {
                    multi += 1;
                }

                // Higher rows are worth more; gems multiply that
                let value = (BLOCK_ROWS - row) as u32;
                self.blocks.push(Block {
                    pos: Vec2::new(
                        col as f32 * (BLOCK_WIDTH + BLOCK_PADDING) + BLOCK_OFFSET_LEFT,
                        row as f32 * (BLOCK_HEIGHT + BLOCK_PADDING) + BLOCK_OFFSET_TOP,
                    ),
                    row: row as u8,
                    destroyed: false,
                    gem,
                    max_hits: if is_multi { 2 } else { 1 },
                    current_hits: 0,
                    points: if is_gem { value * 50 } else { value * 10 },
                });
            }
        }

        log::info!(
            "generated {} blocks ({gems} gems, {multi} multi-hit)",
            self.blocks.len()
        );
    }

    /// The primary ball followed by every extra ball
    pub fn all_balls_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        std::iter::once(&mut self.ball).chain(self.extra_balls.iter_mut())
    }

    pub fn blocks_remaining(&self) -> usize {
        self.blocks.iter().filter(|b| !b.destroyed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_session_invariants() {
        let state = GameState::new(42);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.blocks.len(), BLOCK_ROWS * BLOCK_COLS);
        assert_eq!(state.blocks_remaining(), BLOCK_ROWS * BLOCK_COLS);
        assert!(state.extra_balls.is_empty());
        assert!(state.drops.is_empty());
        // Ball at spawn with base-speed velocity
        assert_eq!(state.ball.pos, Vec2::new(FIELD_WIDTH / 2.0, BALL_SPAWN_Y));
        assert_eq!(state.ball.vel.x.abs(), BALL_START_SPEED);
        assert_eq!(state.ball.vel.y, -BALL_START_SPEED);
        assert!(state.ball.radius > 0.0);
    }

    #[test]
    fn test_grid_point_values() {
        let state = GameState::new(7);
        for block in &state.blocks {
            let value = (BLOCK_ROWS - block.row as usize) as u32;
            if block.is_gem() {
                assert_eq!(block.points, value * 50);
                // Gem blocks are never multi-hit
                assert_eq!(block.max_hits, 1);
            } else {
                assert_eq!(block.points, value * 10);
            }
            assert!(block.current_hits <= block.max_hits);
        }
    }

    #[test]
    fn test_gem_kinds_vary_across_grids() {
        // Over enough grids every gem kind must show up
        let mut state = GameState::new(1234);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            state.generate_blocks();
            for block in &state.blocks {
                if let Some(kind) = block.gem {
                    seen.insert(format!("{kind:?}"));
                }
            }
        }
        assert_eq!(seen.len(), GemKind::ALL.len());
    }

    #[test]
    fn test_restart_round_trip() {
        let mut state = GameState::new(99);
        state.score = 500;
        state.lives = 1;
        state.level = 4;
        state.base_speed = 6.0;
        state.ball.radius = BALL_RADIUS * BIG_BALL_SCALE;
        state.ball.piercing = 2;
        state.paddle.width = PADDLE_WIDTH * LONG_PADDLE_SCALE;
        state.phase = GamePhase::GameOver;

        state.restart();

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.base_speed, BALL_START_SPEED);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.blocks_remaining(), BLOCK_ROWS * BLOCK_COLS);
        assert_eq!(state.ball.pos, Vec2::new(FIELD_WIDTH / 2.0, BALL_SPAWN_Y));
        assert_eq!(state.ball.vel.x.abs(), BALL_START_SPEED);
        assert_eq!(state.ball.vel.y, -BALL_START_SPEED);
        assert_eq!(state.ball.radius, BALL_RADIUS);
        assert_eq!(state.ball.piercing, 0);
        assert_eq!(state.paddle.width, PADDLE_WIDTH);
        assert!(state.ball.trail.is_empty());
    }

    #[test]
    fn test_advance_level_carries_score_and_lives() {
        let mut state = GameState::new(99);
        state.score = 750;
        state.lives = 2;
        state.phase = GamePhase::LevelWon;

        state.advance_level();

        assert_eq!(state.score, 750);
        assert_eq!(state.lives, 2);
        assert_eq!(state.level, 2);
        assert_eq!(state.base_speed, BALL_START_SPEED + LEVEL_SPEED_INCREMENT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.blocks_remaining(), BLOCK_ROWS * BLOCK_COLS);
        // Respawned ball carries the faster base speed
        assert_eq!(state.ball.vel.y, -state.base_speed);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut ball = GameState::new(3).ball;
        for i in 0..50 {
            ball.pos = Vec2::new(i as f32, i as f32);
            ball.record_trail();
        }
        assert_eq!(ball.trail.len(), TRAIL_LENGTH);
        // Newest first
        assert_eq!(ball.trail[0], Vec2::new(49.0, 49.0));
    }

    proptest! {
        /// Paddle x never leaves [0, field_width - width], whatever the input
        #[test]
        fn prop_paddle_stays_in_bounds(
            steps in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), proptest::option::of(-500.0f32..1500.0)),
                1..200,
            )
        ) {
            let mut paddle = Paddle::default();
            for (left, right, target) in steps {
                paddle.apply_input(left, right, target);
                prop_assert!(paddle.x >= 0.0);
                prop_assert!(paddle.x <= FIELD_WIDTH - paddle.width);
            }
        }
    }
}
