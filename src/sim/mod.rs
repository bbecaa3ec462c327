//! Deterministic gameplay module
//!
//! All gameplay logic lives here. This module must stay renderer-agnostic:
//! - Time only enters through `advance(dt)` and the `Clock` trait
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod animation;
pub mod game;
pub mod landing;
pub mod level;
pub mod state;
pub mod trajectory;

pub use animation::{AnimationHandle, AnimationRegistry, Channel, Easing, Frame, Sampler, tween};
pub use game::Game;
pub use landing::evaluate;
pub use level::{Axis, Platform, generate};
pub use state::{Clock, GameEvent, GamePhase, JumpRejected, ManualClock, Player, SystemClock};
pub use trajectory::{Trajectory, charge_for_distance, plan, plan_with_min};
