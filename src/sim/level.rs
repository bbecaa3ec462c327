//! Procedural platform chain
//!
//! Platforms are laid out one after another: each new platform is pushed away
//! from its predecessor along X or Z by a random edge-to-edge gap plus both
//! half-sizes, so neighbouring footprints never overlap.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::horizontal;

/// Placement axis of a platform relative to its predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Z => Vec3::Z,
        }
    }

    /// Component of `v` along this axis
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }
}

/// A square platform in the chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub index: usize,
    /// Side length of the square top face
    pub size: f32,
    /// Direction this platform was placed in from the previous one (advisory)
    pub axis: Axis,
    /// Top-center of the platform
    pub position: Vec3,
    pub height: f32,
    /// Edge-to-edge clearance to the previous platform (0 for the first)
    pub gap: f32,
    /// Display tint, 0xRRGGBB
    pub color: u32,
}

impl Platform {
    /// Horizontal footprint as (min, max) corners in (x, z)
    pub fn footprint(&self) -> (Vec2, Vec2) {
        let center = horizontal(self.position);
        let half = Vec2::splat(self.size / 2.0);
        (center - half, center + half)
    }
}

/// Build a chain of `count` platforms starting at the origin.
pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Vec<Platform> {
    let mut platforms: Vec<Platform> = Vec::with_capacity(count);

    for index in 0..count {
        let size = rng.random_range(PLATFORM_MIN_SIZE..PLATFORM_MAX_SIZE);
        let gap = rng.random_range(0.0..PLATFORM_MAX_GAP);
        let axis = if rng.random_bool(0.5) { Axis::X } else { Axis::Z };
        let color = rng.random_range(0..0x00ff_ffff);

        let platform = match platforms.last() {
            Some(prev) => {
                let distance = gap + size / 2.0 + prev.size / 2.0;
                Platform {
                    index,
                    size,
                    axis,
                    position: prev.position + axis.unit() * distance,
                    height: PLATFORM_HEIGHT,
                    gap,
                    color,
                }
            }
            None => Platform {
                index,
                size,
                axis,
                position: Vec3::ZERO,
                height: PLATFORM_HEIGHT,
                gap: 0.0,
                color,
            },
        };
        platforms.push(platform);
    }

    log::debug!("Generated {} platforms", platforms.len());
    platforms
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_platform_at_origin() {
        let mut rng = Pcg32::seed_from_u64(7);
        let chain = generate(10, &mut rng);
        assert_eq!(chain.len(), 10);
        assert_eq!(chain[0].position, Vec3::ZERO);
        assert_eq!(chain[0].gap, 0.0);
        for (i, p) in chain.iter().enumerate() {
            assert_eq!(p.index, i);
            assert_eq!(p.height, PLATFORM_HEIGHT);
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(generate(0, &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_chain() {
        let a = generate(12, &mut Pcg32::seed_from_u64(42));
        let b = generate(12, &mut Pcg32::seed_from_u64(42));
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.size, pb.size);
            assert_eq!(pa.axis, pb.axis);
        }
    }

    #[test]
    fn test_footprint_corners() {
        let p = Platform {
            index: 3,
            size: 0.8,
            axis: Axis::Z,
            position: Vec3::new(2.0, 0.0, 5.0),
            height: PLATFORM_HEIGHT,
            gap: 1.0,
            color: 0,
        };
        let (min, max) = p.footprint();
        assert!((min - Vec2::new(1.6, 4.6)).length() < 1e-6);
        assert!((max - Vec2::new(2.4, 5.4)).length() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_chain_spacing(seed in any::<u64>(), count in 1usize..40) {
            let chain = generate(count, &mut Pcg32::seed_from_u64(seed));
            prop_assert_eq!(chain.len(), count);
            prop_assert_eq!(chain[0].position, Vec3::ZERO);

            for pair in chain.windows(2) {
                let (prev, cur) = (&pair[0], &pair[1]);
                prop_assert!(cur.size >= PLATFORM_MIN_SIZE && cur.size < PLATFORM_MAX_SIZE);
                prop_assert!(cur.gap >= 0.0 && cur.gap < PLATFORM_MAX_GAP);

                let offset = cur.position - prev.position;
                let along = cur.axis.component(offset);
                let expected = cur.size / 2.0 + prev.size / 2.0 + cur.gap;
                prop_assert!((along - expected).abs() < 1e-4, "along={} expected={}", along, expected);

                // Nothing moves off-axis
                let off_axis = offset - cur.axis.unit() * along;
                prop_assert!(off_axis.length() < 1e-6);
            }
        }
    }
}
