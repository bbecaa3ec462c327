//! Session controller
//!
//! Owns the platform chain, the player and the camera, turns press/release
//! input into jumps and drives both animation channels from the host's
//! per-frame `advance`.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::animation::{AnimationRegistry, Channel, Easing, tween};
use super::level::{self, Platform};
use super::landing;
use super::state::{Clock, GameEvent, GamePhase, JumpRejected, Player, SystemClock};
use super::trajectory::{self, Trajectory};
use crate::consts::CAMERA_START;
use crate::settings::{ConfigError, Settings};
use crate::camera_target;

/// A running hop-chain session
pub struct Game<C: Clock = SystemClock> {
    settings: Settings,
    clock: C,
    /// Seed of the current chain
    seed: u64,
    /// Seed the next restart will use
    next_seed: u64,
    platforms: Vec<Platform>,
    player: Player,
    camera: Vec3,
    phase: GamePhase,
    /// Clock reading at press time while the input is held
    charge_started: Option<f64>,
    /// Jump in flight
    trajectory: Option<Trajectory>,
    animations: AnimationRegistry<Vec3>,
    events: Vec<GameEvent>,
}

impl Game<SystemClock> {
    /// Start a session on the wall clock
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        Self::with_clock(settings, SystemClock::default())
    }
}

impl<C: Clock> Game<C> {
    /// Start a session on a custom clock. The first chain is built immediately.
    pub fn with_clock(settings: Settings, clock: C) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());

        let mut game = Self {
            settings,
            clock,
            seed,
            next_seed: seed,
            platforms: Vec::new(),
            player: Player::default(),
            camera: CAMERA_START,
            phase: GamePhase::Idle,
            charge_started: None,
            trajectory: None,
            animations: AnimationRegistry::new(),
            events: Vec::new(),
        };
        game.restart();
        Ok(game)
    }

    /// Throw away the current chain and player and start over.
    ///
    /// Returns once the first camera animation is queued.
    pub fn restart(&mut self) {
        self.animations.cancel_all();
        self.charge_started = None;
        self.trajectory = None;

        self.seed = self.next_seed;
        let mut rng = Pcg32::seed_from_u64(self.seed);
        self.platforms = level::generate(self.settings.platform_count, &mut rng);
        self.next_seed = rng.random();

        self.player = Player::default();
        self.camera = CAMERA_START;
        self.phase = GamePhase::Idle;

        log::info!(
            "Session started with seed {} ({} platforms)",
            self.seed,
            self.platforms.len()
        );
        self.events.push(GameEvent::Restarted {
            seed: self.seed,
            platforms: self.platforms.len(),
        });

        self.reset_camera();
    }

    /// Input went down. Returns true if a charge started.
    pub fn on_input_press(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            log::debug!("Press ignored: game over");
            return false;
        }
        if self.charge_started.is_some() {
            log::debug!("Press ignored: already charging");
            return false;
        }

        self.charge_started = Some(self.clock.now());
        // Holding during a jump charges the next one without leaving Jumping
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Charging;
        }
        self.events.push(GameEvent::ChargeStarted);
        true
    }

    /// Input went up: jump if the charge is usable.
    pub fn on_input_release(&mut self) -> Result<(), JumpRejected> {
        if self.phase == GamePhase::GameOver {
            self.charge_started = None;
            return self.reject(JumpRejected::GameOver);
        }
        let Some(started) = self.charge_started.take() else {
            return self.reject(JumpRejected::NotCharging);
        };
        if self.phase == GamePhase::Charging {
            self.phase = GamePhase::Idle;
        }

        let charge = (self.clock.now() - started) as f32;
        if charge.is_nan() || charge < self.settings.min_charge_secs {
            return self.reject(JumpRejected::InputTooShort { held: charge });
        }
        if self.animations.is_active(Channel::MovePlayer) {
            return self.reject(JumpRejected::AnimationInProgress);
        }

        let next = self.player.current_target_index + 1;
        let Some(target) = self.platforms.get(next).map(|p| p.position) else {
            return self.reject(JumpRejected::NoMoreTargets);
        };

        let traj = match trajectory::plan_with_min(
            charge,
            self.settings.min_charge_secs,
            self.player.position,
            target,
        ) {
            Ok(traj) => traj,
            Err(reason) => return self.reject(reason),
        };

        // Committed before we know whether the landing is good
        self.player.current_target_index = next;
        self.player.heading = traj.direction;
        self.player.rotation = 0.0;
        self.player.begin_trail();

        log::debug!(
            "Jump to #{}: charge={:.3}s distance={:.3} apex={:.3}",
            next,
            charge,
            traj.distance,
            traj.apex_height
        );
        self.events.push(GameEvent::JumpStarted {
            target: next,
            charge,
            distance: traj.distance,
        });

        let sampler = {
            let traj = traj.clone();
            Box::new(move |t: f32| traj.sample(t))
        };
        self.animations.start(Channel::MovePlayer, sampler, traj.duration);
        self.trajectory = Some(traj);
        self.phase = GamePhase::Jumping;
        Ok(())
    }

    /// Step all animations by `dt` seconds. Call once per rendered frame.
    pub fn advance(&mut self, dt: f32) {
        for frame in self.animations.advance(dt) {
            // Skip frames superseded while earlier frames were applied
            if !self.animations.is_current(frame.handle) {
                continue;
            }
            match frame.handle.channel {
                Channel::MovePlayer => {
                    self.player.position = frame.value;
                    if let Some(traj) = &self.trajectory {
                        self.player.rotation = traj.rotation_at(frame.elapsed);
                    }
                    self.player.record_trail();
                    if frame.completed {
                        self.finish_jump();
                    }
                }
                Channel::MoveCamera => self.camera = frame.value,
            }
        }
    }

    fn finish_jump(&mut self) {
        self.trajectory = None;
        let index = self.player.current_target_index;
        let landed_at = self.player.position;
        let alive = self
            .platforms
            .get(index)
            .is_some_and(|target| landing::evaluate(landed_at, target));

        if alive {
            log::info!("Landed on platform {}", index);
            self.events.push(GameEvent::Landed { index });
            self.phase = if self.charge_started.is_some() {
                GamePhase::Charging
            } else {
                GamePhase::Idle
            };
            self.reset_camera();
        } else {
            log::warn!("Game over: missed platform {} (landed at {})", index, landed_at);
            self.player.alive = false;
            self.phase = GamePhase::GameOver;
            self.charge_started = None;
            self.events.push(GameEvent::GameOver {
                index,
                landing: landed_at,
            });
        }
    }

    fn reset_camera(&mut self) {
        let end = camera_target(self.player.position, self.settings.camera_distance);
        let secs = self.settings.camera_follow_secs;
        self.animations.start(
            Channel::MoveCamera,
            tween(self.camera, end, secs, Easing::EaseOut),
            secs,
        );
    }

    fn reject(&mut self, reason: JumpRejected) -> Result<(), JumpRejected> {
        match reason {
            JumpRejected::NotCharging | JumpRejected::GameOver => log::debug!("Release ignored: {}", reason),
            _ => log::warn!("Jump rejected: {}", reason),
        }
        self.events.push(GameEvent::JumpRejected(reason));
        Err(reason)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> Vec3 {
        self.camera
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Platform the player is standing on or flying to
    pub fn current_target(&self) -> Option<&Platform> {
        self.platforms.get(self.player.current_target_index)
    }

    /// Jump currently in flight
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fill level of the charge meter in [0, 1]; 0 when not charging
    pub fn charge_ratio(&self) -> f32 {
        match self.charge_started {
            Some(started) => {
                let held = (self.clock.now() - started) as f32;
                (held / self.settings.charge_meter_full_secs).clamp(0.0, 1.0)
            }
            None => 0.0,
        }
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
