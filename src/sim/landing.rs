//! Landing evaluation
//!
//! Survival only depends on where the player comes down on the ground plane:
//! the (x, z) landing point must fall inside the target's square footprint.

use glam::Vec3;

use super::level::Platform;
use crate::horizontal;

/// Returns true if a jump ending at `landing` survives on `target`.
///
/// The footprint boundary counts as a hit; height is ignored.
pub fn evaluate(landing: Vec3, target: &Platform) -> bool {
    let (min, max) = target.footprint();
    let p = horizontal(landing);
    p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
}
