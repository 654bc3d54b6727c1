//! Property-based tests for ray picking using proptest.

use bevy::prelude::*;
use proptest::prelude::*;

use super::{PickVolume, nearest_hit, ray_from_ndc};
use crate::test_utils::fixtures::entities;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A sphere straight ahead is hit at its centre distance minus its radius.
    #[test]
    fn prop_sphere_ahead_hit_at_surface(
        distance in 2.0f32..1000.0,
        radius in 0.05f32..1.0,
        scale in 0.5f32..2.0,
    ) {
        let transform = Transform::from_xyz(0.0, 0.0, -distance).with_scale(Vec3::splat(scale));
        let ray = Ray3d { origin: Vec3::ZERO, direction: Dir3::NEG_Z };
        let t = PickVolume::sphere(radius).intersect(&transform, ray);

        prop_assert!(t.is_some());
        let expected = distance - radius * scale;
        prop_assert!((t.unwrap() - expected).abs() <= 1e-3 * distance);
    }

    /// Candidate order only matters for exact ties.
    #[test]
    fn prop_nearest_is_order_independent(
        near in 2.0f32..100.0,
        gap in 0.5f32..100.0,
    ) {
        let [a, b] = entities();
        let volume = PickVolume::sphere(0.5);
        let near_t = Transform::from_xyz(0.0, 0.0, -near);
        let far_t = Transform::from_xyz(0.0, 0.0, -(near + gap));
        let ray = Ray3d { origin: Vec3::ZERO, direction: Dir3::NEG_Z };

        let forward = nearest_hit(ray, [(a, &near_t, &volume), (b, &far_t, &volume)]);
        let backward = nearest_hit(ray, [(b, &far_t, &volume), (a, &near_t, &volume)]);

        prop_assert_eq!(forward.map(|h| h.entity), Some(a));
        prop_assert_eq!(backward.map(|h| h.entity), Some(a));
    }

    /// Rays through any on-screen point leave the camera in front of it.
    #[test]
    fn prop_rays_point_forward(
        x in -1.0f32..=1.0,
        y in -1.0f32..=1.0,
        aspect in 0.5f32..3.0,
    ) {
        let camera = Transform::from_xyz(0.0, 50.0, 150.0).looking_at(Vec3::ZERO, Vec3::Y);
        let ray = ray_from_ndc(Vec2::new(x, y), &camera, 60f32.to_radians(), aspect);

        prop_assert!(ray.is_some());
        let ray = ray.unwrap();
        prop_assert!(ray.direction.dot(*camera.forward()) > 0.0);
    }
}
