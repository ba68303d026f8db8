//! Planar geometry helpers shared by steering and presentation.
//!
//! All positions and velocities are `glam::Vec2` in world units. Helpers in
//! this module never fail on degenerate input: a zero-length direction is
//! the zero vector.

use std::f32::consts::TAU;

pub use glam::Vec2;

/// Unit vector pointing from `from` to `to`, or zero when they coincide.
#[must_use]
pub fn unit_direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Returns whether `point` lies strictly inside the circle around `center`.
#[must_use]
pub fn within_radius(center: Vec2, point: Vec2, radius: f32) -> bool {
    center.distance(point) < radius
}

/// Samples a point uniformly (by area) inside the disk around `center`.
///
/// The radial sample is square-rooted so density is uniform by area.
#[must_use]
pub fn sample_in_disk(rng: &mut fastrand::Rng, center: Vec2, radius: f32) -> Vec2 {
    let r = radius * rng.f32().sqrt();
    let theta = rng.f32() * TAU;
    center + Vec2::new(theta.cos(), theta.sin()) * r
}

/// Samples a value uniformly from `[min, max]`.
#[must_use]
pub fn sample_in_range(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    (min + (max - min) * rng.f32()).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unit_direction_is_normalized() {
        let dir = unit_direction(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!((dir.x - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_within_radius_is_strict() {
        assert!(within_radius(Vec2::ZERO, Vec2::new(3.0, 0.0), 5.0));
        assert!(!within_radius(Vec2::ZERO, Vec2::new(5.0, 0.0), 5.0));
        assert!(!within_radius(Vec2::ZERO, Vec2::new(10.0, 0.0), 5.0));
    }

    #[test]
    fn test_sample_in_range_degenerate_interval() {
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(sample_in_range(&mut rng, 2.0, 2.0), 2.0);
        assert_eq!(sample_in_range(&mut rng, 3.0, 1.0), 3.0);
    }

    #[test]
    fn test_zero_radius_disk_returns_center() {
        let mut rng = fastrand::Rng::with_seed(1);
        let center = Vec2::new(-3.0, 8.0);
        assert_eq!(sample_in_disk(&mut rng, center, 0.0), center);
    }

    proptest! {
        #[test]
        fn disk_samples_stay_inside(
            seed in any::<u64>(),
            cx in -100.0..100.0f32,
            cy in -100.0..100.0f32,
            radius in 0.0..50.0f32,
        ) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let center = Vec2::new(cx, cy);
            let p = sample_in_disk(&mut rng, center, radius);
            prop_assert!(p.distance(center) <= radius + 1e-3);
        }

        #[test]
        fn range_samples_stay_inside(
            seed in any::<u64>(),
            min in 0.0..10.0f32,
            span in 0.0..10.0f32,
        ) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let max = min + span;
            let v = sample_in_range(&mut rng, min, max);
            prop_assert!(v >= min && v <= max);
        }
    }
}
