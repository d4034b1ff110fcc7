//! Headless demo driver
//!
//! Runs a seeded session with a simple autopilot paddle for up to ten
//! minutes of simulated time, then prints the final state as JSON.
//! Pass a seed as the first argument for a reproducible run.

use gem_breaker::consts::TICK_RATE;
use gem_breaker::{GamePhase, GameState, TickInput, sim};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random);
    log::info!("starting session with seed {seed}");

    let mut state = GameState::new(seed);
    let max_ticks = 10 * 60 * TICK_RATE as u64;

    for _ in 0..max_ticks {
        // Chase whichever ball is closest to the bottom
        let target_x = state
            .extra_balls
            .iter()
            .chain(std::iter::once(&state.ball))
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|ball| ball.pos.x);

        sim::tick(&mut state, &TickInput {
            target_x,
            ..TickInput::default()
        });

        match state.phase {
            GamePhase::LevelWon => state.advance_level(),
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    log::info!(
        "finished after {} ticks: level {}, score {}, {} blocks left",
        state.time_ticks,
        state.level,
        state.score,
        state.blocks_remaining()
    );

    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize final state: {err}"),
    }
}
