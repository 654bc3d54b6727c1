//! Property-based tests for the orbit model using proptest.

use bevy::math::Vec2;
use proptest::prelude::*;

use super::{orbit_path, OrbitParams, ORBIT_PATH_SEGMENTS};
use crate::types::ORBIT_PLANE_Y;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every position lies exactly `radius` from the origin on the orbit plane.
    #[test]
    fn prop_position_stays_on_circle(
        radius in 0.0f32..500.0,
        angular_speed in -2.0f32..2.0,
        t in 0.0f64..1.0e6,
    ) {
        let pos = OrbitParams::new(radius, angular_speed).position_at(t);
        let distance = Vec2::new(pos.x, pos.z).length();

        prop_assert!(
            (distance - radius).abs() <= 1e-4 * radius.max(1.0),
            "r={} t={} distance={}", radius, t, distance
        );
        prop_assert_eq!(pos.y, ORBIT_PLANE_Y);
    }

    /// Same inputs always give the same position (no hidden state).
    #[test]
    fn prop_position_is_pure(
        radius in 0.0f32..500.0,
        angular_speed in -2.0f32..2.0,
        t in 0.0f64..1.0e5,
    ) {
        let orbit = OrbitParams::new(radius, angular_speed);
        let first = orbit.position_at(t);
        let _ = orbit.position_at(t * 0.5 + 3.0);
        prop_assert_eq!(first, orbit.position_at(t));
    }

    /// Orbit paths close on themselves for any radius.
    #[test]
    fn prop_path_closes(radius in 0.0f32..1000.0) {
        let path = orbit_path(radius, ORBIT_PATH_SEGMENTS);
        let gap = (path[0] - path[ORBIT_PATH_SEGMENTS]).length();
        prop_assert!(gap <= 1e-4 * radius.max(1.0), "gap {}", gap);
    }
}
