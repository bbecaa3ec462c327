//! Hop Chain entry point
//!
//! Native builds run a headless demo: an autopilot holds the input for
//! roughly the right time to reach the next platform, with a bit of human
//! error, and every game event is logged. The first argument may name a
//! settings JSON file.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use hop_chain::horizontal;
    use hop_chain::sim::{Game, GameEvent, GamePhase, ManualClock, charge_for_distance};

    /// Simulated frame rate
    const FRAME: f32 = 1.0 / 60.0;
    /// Relative charge error of the autopilot (±)
    const AIM_ERROR: f32 = 0.06;
    /// Sessions played before the demo stops
    const SESSIONS: u32 = 3;

    fn step(game: &mut Game<ManualClock>, clock: &ManualClock) {
        clock.advance(FRAME as f64);
        game.advance(FRAME);
        for event in game.drain_events() {
            report(&event);
        }
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::JumpStarted { target, charge, distance } => {
                log::info!("  hop -> #{target} (held {charge:.2}s, {distance:.2} units)")
            }
            GameEvent::Landed { index } => log::info!("  landed on #{index}"),
            GameEvent::GameOver { index, landing } => {
                log::info!("  missed #{index}, came down at ({:.2}, {:.2})", landing.x, landing.z)
            }
            other => log::debug!("  {other:?}"),
        }
    }

    /// Play one session to the end. Returns the number of platforms reached.
    fn play_session(game: &mut Game<ManualClock>, clock: &ManualClock, aim: &mut Pcg32) -> usize {
        loop {
            let index = game.player().current_target_index;
            let Some(next) = game.platforms().get(index + 1) else {
                log::info!("  chain cleared!");
                return index;
            };

            let distance = (horizontal(next.position) - horizontal(game.player().position)).length();
            let charge = charge_for_distance(distance) * (1.0 + aim.random_range(-AIM_ERROR..AIM_ERROR));

            game.on_input_press();
            let mut held = 0.0;
            while held < charge {
                step(game, clock);
                held += FRAME;
            }
            if game.on_input_release().is_err() {
                // Rejections are logged by the game; try again
                continue;
            }

            while game.phase() == GamePhase::Jumping {
                step(game, clock);
            }
            if game.is_game_over() {
                return game.player().current_target_index - 1;
            }
        }
    }

    pub fn run(settings: hop_chain::Settings) -> Result<(), hop_chain::ConfigError> {
        let clock = ManualClock::new();
        let mut game = Game::with_clock(settings, clock.clone())?;
        let mut aim = Pcg32::seed_from_u64(game.seed());

        for session in 1..=SESSIONS {
            log::info!("Session {session}: seed {}", game.seed());
            let reached = play_session(&mut game, &clock, &mut aim);
            log::info!(
                "Session {session}: reached platform {reached} of {}",
                game.platforms().len().saturating_sub(1)
            );
            game.restart();
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), hop_chain::ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hop Chain (native demo) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => hop_chain::Settings::load_from(path)?,
        None => hop_chain::Settings::default(),
    };
    demo::run(settings)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
