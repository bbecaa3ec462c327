//! Hop Chain - a charge-and-leap platform hopping arcade core
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (level generation, trajectories, animation channels, landing)
//! - `settings`: Data-driven session configuration
//! - `platform`: Browser bindings (wasm32 only)

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Settings};
pub use sim::{Game, GameEvent, GamePhase, JumpRejected};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Gravity used by the jump arc (units/s²)
    pub const GRAVITY: f32 = 10.0;
    /// Launch angle of every jump (radians)
    pub const LAUNCH_ANGLE: f32 = std::f32::consts::PI / 8.0;
    /// Shortest press that still produces a jump (seconds)
    pub const MIN_CHARGE_SECS: f32 = 0.1;

    /// Platform side length range [min, max)
    pub const PLATFORM_MIN_SIZE: f32 = 0.5;
    pub const PLATFORM_MAX_SIZE: f32 = 1.0;
    /// Edge-to-edge clearance range [0, max)
    pub const PLATFORM_MAX_GAP: f32 = 3.0;
    /// Every platform is a slab of this thickness hanging below its top face
    pub const PLATFORM_HEIGHT: f32 = 0.3;
    /// Chain length built on restart
    pub const DEFAULT_PLATFORM_COUNT: usize = 10;
    /// Longest chain a session may ask for
    pub const MAX_PLATFORM_COUNT: usize = 10_000;

    /// Camera sits this far from the player along `CAMERA_OFFSET_DIR`
    pub const CAMERA_DISTANCE: f32 = 3.0;
    /// Unnormalized camera offset direction (up and behind)
    pub const CAMERA_OFFSET_DIR: Vec3 = Vec3::new(-1.0, 2.0, -1.0);
    /// Camera pose before the first follow animation
    pub const CAMERA_START: Vec3 = Vec3::new(-1.0, 1.0, -1.0);
    /// Camera re-center duration (seconds)
    pub const CAMERA_FOLLOW_SECS: f32 = 0.8;

    /// Holding this long fills the charge meter
    pub const CHARGE_METER_FULL_SECS: f32 = 5.0;
}

/// Project a world position onto the ground plane as (x, z)
#[inline]
pub fn horizontal(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

/// Where the camera should rest for a player standing at `player_pos`
#[inline]
pub fn camera_target(player_pos: Vec3, distance: f32) -> Vec3 {
    player_pos + consts::CAMERA_OFFSET_DIR.normalize() * distance
}
