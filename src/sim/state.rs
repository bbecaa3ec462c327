//! Game state and core session types

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Standing on a platform, waiting for input
    Idle,
    /// Input held, charge timer running
    Charging,
    /// Player in the air
    Jumping,
    /// Missed a platform; only a restart leaves this phase
    GameOver,
}

/// Why a release did not produce a jump
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
pub enum JumpRejected {
    #[error("charge too short ({held:.3}s)")]
    InputTooShort { held: f32 },
    #[error("a jump is already in progress")]
    AnimationInProgress,
    #[error("no more platforms to jump to")]
    NoMoreTargets,
    #[error("game is over, restart to play again")]
    GameOver,
    #[error("release without a press")]
    NotCharging,
}

/// The player token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Spin around the jump direction (radians, one full turn per jump)
    pub rotation: f32,
    /// Direction of the last jump
    pub heading: Vec3,
    /// Platform the player is jumping to or standing on
    pub current_target_index: usize,
    pub alive: bool,
    /// Sampled flight path of every jump this session (newest last)
    #[serde(skip)]
    pub trails: Vec<Vec<Vec3>>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: 0.0,
            heading: Vec3::X,
            current_target_index: 0,
            alive: true,
            trails: Vec::new(),
        }
    }
}

impl Player {
    /// Begin recording a new trail at the take-off point
    pub fn begin_trail(&mut self) {
        self.trails.push(vec![self.position]);
    }

    /// Append the current position to the newest trail
    pub fn record_trail(&mut self) {
        let pos = self.position;
        if let Some(trail) = self.trails.last_mut() {
            trail.push(pos);
        }
    }
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh chain was built
    Restarted { seed: u64, platforms: usize },
    ChargeStarted,
    JumpStarted { target: usize, charge: f32, distance: f32 },
    JumpRejected(JumpRejected),
    Landed { index: usize },
    GameOver { index: usize, landing: Vec3 },
}

/// Monotonic time source, in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-stepped clock for fixed-step hosts and tests.
///
/// Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs.max(0.0));
    }

    pub fn set(&self, secs: f64) {
        if secs >= self.now.get() {
            self.now.set(secs);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
