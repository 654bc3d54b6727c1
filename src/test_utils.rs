//! Test utilities for scene tests.
//!
//! Provides fixtures for entities and rays, geometric assertions, and a
//! headless app builder.

use bevy::prelude::*;

/// Fixtures for picking and orbit tests.
pub mod fixtures {
    use super::*;

    /// `N` distinct entity ids from a throwaway world.
    pub fn entities<const N: usize>() -> [Entity; N] {
        let mut world = World::new();
        std::array::from_fn(|_| world.spawn_empty().id())
    }

    /// Ray from the origin in `direction`.
    pub fn ray_toward(direction: Vec3) -> Ray3d {
        Ray3d {
            origin: Vec3::ZERO,
            direction: Dir3::new(direction).unwrap_or(Dir3::NEG_Z),
        }
    }
}

/// Assertions on orbit geometry.
pub mod assertions {
    use super::*;

    /// Assert that `point` lies on the orbit plane at distance `radius`.
    pub fn assert_on_orbit(point: Vec3, radius: f32, tolerance: f32) {
        let planar = Vec2::new(point.x, point.z).length();
        assert!(
            (planar - radius).abs() <= tolerance,
            "Point {point} is at distance {planar}, expected {radius}"
        );
        assert!(
            point.y.abs() <= tolerance,
            "Point {point} is off the orbit plane"
        );
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;

    /// Create a minimal Bevy app for testing without rendering.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entities_are_distinct() {
        let [a, b, c] = fixtures::entities();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_on_orbit_accepts_circle_point() {
        assertions::assert_on_orbit(Vec3::new(3.0, 0.0, 4.0), 5.0, 1e-5);
    }

    #[test]
    #[should_panic]
    fn test_on_orbit_rejects_wrong_radius() {
        assertions::assert_on_orbit(Vec3::new(3.0, 0.0, 4.0), 6.0, 1e-5);
    }
}
