//! Per-ball physics step: wall and paddle reflection, then integration
//!
//! Positions are never clamped after a wall reflection; the velocity is
//! negated before integration, so any overshoot self-corrects on the
//! following ticks. A ball that crosses the paddle plane while not
//! horizontally over the paddle keeps falling - only the session's loss
//! check catches it.

use super::state::{Ball, Paddle};
use crate::consts::*;

/// Advance one ball by one tick against the field walls and the paddle
pub fn step_ball(ball: &mut Ball, paddle: &Paddle) {
    let next_x = ball.pos.x + ball.vel.x;
    if next_x > FIELD_WIDTH - ball.radius || next_x < ball.radius {
        ball.vel.x = -ball.vel.x;
    }

    let next_y = ball.pos.y + ball.vel.y;
    if next_y < ball.radius {
        ball.vel.y = -ball.vel.y;
    } else if next_y > PADDLE_Y - ball.radius && paddle.spans_x(ball.pos.x) {
        // Redirect off the paddle: the strike offset picks the angle,
        // the speed magnitude is preserved
        let hit_pos = (ball.pos.x - paddle.x) / paddle.width;
        let angle = (hit_pos - 0.5) * PADDLE_BOUNCE_ARC;
        let speed = ball.speed();
        ball.vel.x = angle.sin() * speed;
        ball.vel.y = -angle.cos() * speed;
    }

    ball.pos += ball.vel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameState;
    use glam::Vec2;

    fn test_ball(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = GameState::new(0).ball;
        ball.pos = pos;
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_side_wall_reflection() {
        let paddle = Paddle::default();

        let mut ball = test_ball(Vec2::new(FIELD_WIDTH - 10.0, 300.0), Vec2::new(4.0, -4.0));
        step_ball(&mut ball, &paddle);
        assert_eq!(ball.vel.x, -4.0);

        let mut ball = test_ball(Vec2::new(10.0, 300.0), Vec2::new(-4.0, -4.0));
        step_ball(&mut ball, &paddle);
        assert_eq!(ball.vel.x, 4.0);
    }

    #[test]
    fn test_top_wall_reflection() {
        let paddle = Paddle::default();
        let mut ball = test_ball(Vec2::new(400.0, 10.0), Vec2::new(2.0, -4.0));
        step_ball(&mut ball, &paddle);
        assert_eq!(ball.vel.y, 4.0);
        assert_eq!(ball.pos.y, 14.0);
    }

    #[test]
    fn test_center_paddle_bounce_goes_straight_up() {
        let paddle = Paddle::default();
        let center_x = paddle.x + paddle.width / 2.0;
        let mut ball = test_ball(Vec2::new(center_x, PADDLE_Y - 10.0), Vec2::new(3.0, 4.0));
        let speed_before = ball.speed();

        step_ball(&mut ball, &paddle);

        // Dead-center hit maps to angle zero: straight up, same speed
        assert!(ball.vel.x.abs() < 1e-4);
        assert!(ball.vel.y < 0.0);
        assert!((ball.speed() - speed_before).abs() < 1e-4);
    }

    #[test]
    fn test_edge_paddle_bounce_deflects_sideways() {
        let paddle = Paddle::default();

        // Strike near the right edge deflects right
        let right_x = paddle.x + paddle.width * 0.9;
        let mut ball = test_ball(Vec2::new(right_x, PADDLE_Y - 10.0), Vec2::new(0.0, 4.0));
        step_ball(&mut ball, &paddle);
        assert!(ball.vel.x > 0.0);
        assert!(ball.vel.y < 0.0);

        // Near the left edge deflects left
        let left_x = paddle.x + paddle.width * 0.1;
        let mut ball = test_ball(Vec2::new(left_x, PADDLE_Y - 10.0), Vec2::new(0.0, 4.0));
        step_ball(&mut ball, &paddle);
        assert!(ball.vel.x < 0.0);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_ball_beside_paddle_falls_through() {
        // Crossing the paddle plane while not over the paddle is not a
        // bounce; the ball keeps its downward velocity
        let paddle = Paddle::default();
        let miss_x = paddle.x - 50.0;
        let mut ball = test_ball(Vec2::new(miss_x, PADDLE_Y - 10.0), Vec2::new(0.0, 4.0));

        step_ball(&mut ball, &paddle);
        assert_eq!(ball.vel.y, 4.0);
        assert_eq!(ball.pos.y, PADDLE_Y - 6.0);
    }

    #[test]
    fn test_integration_is_unconditional() {
        let paddle = Paddle::default();
        let mut ball = test_ball(Vec2::new(400.0, 300.0), Vec2::new(3.0, -4.0));
        step_ball(&mut ball, &paddle);
        assert_eq!(ball.pos, Vec2::new(403.0, 296.0));
    }
}
