//! Charge-to-arc jump planning
//!
//! A held input of `charge` seconds becomes a parabolic hop that lasts exactly
//! `charge` seconds. Horizontal travel scales 4x harder than the true projectile
//! range at the launch angle, which gives the game its snappy arcade feel:
//! - apex height `h = ½·g·(charge/2)²`
//! - distance `8·tan(angle)·h`
//! - vertical speed `4·h / charge`, so the apex lands exactly at the midpoint

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::JumpRejected;
use crate::consts::*;

/// A planned jump from `start` to `end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub start: Vec3,
    pub end: Vec3,
    /// Unit horizontal-ish direction toward the target
    pub direction: Vec3,
    /// Flight time in seconds (equal to the charge time)
    pub duration: f32,
    /// Initial vertical speed
    pub speed_y: f32,
    pub apex_height: f32,
    pub distance: f32,
}

impl Trajectory {
    /// Vertical offset above `start.y` after `t` seconds
    #[inline]
    pub fn height_at(&self, t: f32) -> f32 {
        self.speed_y * t - 0.5 * GRAVITY * t * t
    }

    /// Position after `t` seconds of flight (clamped to the flight time)
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, self.duration);
        let progress = if self.duration > 0.0 { t / self.duration } else { 1.0 };
        let mut pos = self.start.lerp(self.end, progress);
        pos.y = self.start.y + self.height_at(t);
        pos
    }

    /// Spin angle after `t` seconds: one full turn per jump
    pub fn rotation_at(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            return std::f32::consts::TAU;
        }
        (t / self.duration).clamp(0.0, 1.0) * std::f32::consts::TAU
    }
}

/// Plan a jump toward `target` from a charge of `charge` seconds.
pub fn plan(charge: f32, start: Vec3, target: Vec3) -> Result<Trajectory, JumpRejected> {
    plan_with_min(charge, MIN_CHARGE_SECS, start, target)
}

/// Same as [`plan`] with a custom minimum charge.
pub fn plan_with_min(
    charge: f32,
    min_charge: f32,
    start: Vec3,
    target: Vec3,
) -> Result<Trajectory, JumpRejected> {
    if charge.is_nan() || charge < min_charge {
        return Err(JumpRejected::InputTooShort { held: charge });
    }

    // Aim at where the target actually is, not along the stored axis
    let direction = (target - start).try_normalize().unwrap_or(Vec3::X);

    let half = charge / 2.0;
    let apex_height = 0.5 * GRAVITY * half * half;
    let distance = 8.0 * LAUNCH_ANGLE.tan() * apex_height;
    let speed_y = 4.0 * apex_height / charge;

    Ok(Trajectory {
        start,
        end: start + direction * distance,
        direction,
        duration: charge,
        speed_y,
        apex_height,
        distance,
    })
}

/// Charge time that makes a jump travel `distance` units.
///
/// Inverse of the distance formula: `d = g·tan(angle)·charge²`.
pub fn charge_for_distance(distance: f32) -> f32 {
    (distance.max(0.0) / (GRAVITY * LAUNCH_ANGLE.tan())).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_second_charge() {
        let traj = plan(2.0, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)).unwrap();
        assert!((traj.apex_height - 5.0).abs() < 1e-5);
        assert!((traj.distance - 16.568542).abs() < 1e-3);
        assert!((traj.speed_y - 10.0).abs() < 1e-5);
        assert!((traj.height_at(1.0) - 5.0).abs() < 1e-5);
        assert!((traj.end - Vec3::new(traj.distance, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_lands_at_start_height() {
        let start = Vec3::new(1.0, 0.0, 2.0);
        let traj = plan(0.7, start, Vec3::new(1.0, 0.0, 6.0)).unwrap();
        let landed = traj.sample(traj.duration);
        assert!(landed.y.abs() < 1e-5);
        assert!((landed - traj.end).length() < 1e-5);
        assert_eq!(traj.sample(0.0), start);
        // Past the end stays clamped
        assert_eq!(traj.sample(10.0), traj.sample(traj.duration));
    }

    #[test]
    fn test_too_short_rejected() {
        let err = plan(0.05, Vec3::ZERO, Vec3::X).unwrap_err();
        assert!(matches!(err, JumpRejected::InputTooShort { .. }));
        assert!(plan(0.1, Vec3::ZERO, Vec3::X).is_ok());
        assert!(plan(f32::NAN, Vec3::ZERO, Vec3::X).is_err());
    }

    #[test]
    fn test_plan_is_pure() {
        let a = plan(0.9, Vec3::new(0.5, 0.0, 0.5), Vec3::new(3.0, 0.0, 0.5)).unwrap();
        let b = plan(0.9, Vec3::new(0.5, 0.0, 0.5), Vec3::new(3.0, 0.0, 0.5)).unwrap();
        assert_eq!(a, b);
        for i in 0..=10 {
            let t = a.duration * i as f32 / 10.0;
            assert_eq!(a.sample(t), b.sample(t));
        }
    }

    #[test]
    fn test_diagonal_aim() {
        // Jumps aim at the real target even when it is off-axis
        let traj = plan(1.0, Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)).unwrap();
        assert!((traj.direction.x - traj.direction.z).abs() < 1e-6);
        assert!((traj.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_charge_for_distance_inverts_plan() {
        for d in [0.5_f32, 1.7, 3.2, 6.0] {
            let charge = charge_for_distance(d);
            let traj = plan(charge.max(MIN_CHARGE_SECS), Vec3::ZERO, Vec3::X).unwrap();
            if charge >= MIN_CHARGE_SECS {
                assert!((traj.distance - d).abs() < 1e-3, "d={} got={}", d, traj.distance);
            }
        }
    }

    #[test]
    fn test_rotation_full_turn() {
        let traj = plan(0.5, Vec3::ZERO, Vec3::X).unwrap();
        assert_eq!(traj.rotation_at(0.0), 0.0);
        assert!((traj.rotation_at(0.5) - std::f32::consts::TAU).abs() < 1e-6);
    }
}
