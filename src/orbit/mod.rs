//! Circular co-planar orbit model.
//!
//! Positions are recomputed from absolute elapsed time every frame, so a
//! body's place on its orbit is exactly reproducible for a given `t` and
//! never drifts with frame count.

#[cfg(test)]
mod proptest_orbit;

use bevy::prelude::*;
use std::f64::consts::TAU;

use crate::types::ORBIT_PLANE_Y;

/// Segments in the closed polyline drawn for each orbit.
pub const ORBIT_PATH_SEGMENTS: usize = 128;

/// Geometric parameters of a circular orbit around the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitParams {
    /// Distance from the origin in scene units, never negative.
    pub radius: f32,
    /// Radians of orbital progress per second; the sign gives the direction.
    pub angular_speed: f32,
}

impl OrbitParams {
    /// Build orbit parameters, clamping a negative radius to zero.
    pub fn new(radius: f32, angular_speed: f32) -> Self {
        Self {
            radius: radius.max(0.0),
            angular_speed,
        }
    }

    /// Orbital angle at `t` seconds, wrapped to `[0, TAU)`.
    ///
    /// Evaluated in f64 so long sessions keep full angular precision.
    pub fn angle_at(&self, t: f64) -> f64 {
        (self.angular_speed as f64 * t).rem_euclid(TAU)
    }

    /// Position on the orbit plane at `t` seconds since session start.
    pub fn position_at(&self, t: f64) -> Vec3 {
        point_on_circle(self.radius, self.angle_at(t))
    }

    /// Seconds per revolution, `None` for a stationary body.
    pub fn period(&self) -> Option<f64> {
        if self.angular_speed == 0.0 {
            None
        } else {
            Some(TAU / (self.angular_speed as f64).abs())
        }
    }

    /// Closed reference polyline for this orbit (see [`orbit_path`]).
    pub fn path(&self, segments: usize) -> Vec<Vec3> {
        orbit_path(self.radius, segments)
    }
}

/// Sample a full turn of radius `radius` as `segments + 1` points.
///
/// The sweep uses the same parametric form as [`OrbitParams::position_at`]
/// over θ ∈ [0, 2π], so the first and last points coincide.
pub fn orbit_path(radius: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let theta = (i as f64 / segments as f64) * TAU;
            point_on_circle(radius, theta)
        })
        .collect()
}

fn point_on_circle(radius: f32, theta: f64) -> Vec3 {
    let radius = radius as f64;
    Vec3::new(
        (radius * theta.cos()) as f32,
        ORBIT_PLANE_Y,
        (radius * theta.sin()) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assertions::assert_on_orbit;
    use approx::assert_relative_eq;

    #[test]
    fn test_starts_on_positive_x_axis() {
        let orbit = OrbitParams::new(25.0, 0.05);
        let pos = orbit.position_at(0.0);
        assert_relative_eq!(pos.x, 25.0);
        assert_relative_eq!(pos.z, 0.0);
        assert_eq!(pos.y, ORBIT_PLANE_Y);
    }

    #[test]
    fn test_quarter_turn() {
        let orbit = OrbitParams::new(10.0, 0.5);
        // ω·t = π/2
        let t = std::f64::consts::FRAC_PI_2 / 0.5;
        let pos = orbit.position_at(t);
        assert!(pos.x.abs() < 1e-4, "x should vanish, got {}", pos.x);
        assert_relative_eq!(pos.z, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_negative_speed_reverses_direction() {
        let prograde = OrbitParams::new(12.0, 0.1).position_at(3.0);
        let retrograde = OrbitParams::new(12.0, -0.1).position_at(3.0);
        assert_relative_eq!(prograde.x, retrograde.x, epsilon = 1e-5);
        assert_relative_eq!(prograde.z, -retrograde.z, epsilon = 1e-5);
    }

    #[test]
    fn test_negative_radius_is_clamped() {
        let orbit = OrbitParams::new(-4.0, 1.0);
        assert_eq!(orbit.radius, 0.0);
        assert_eq!(orbit.position_at(17.0), Vec3::new(0.0, ORBIT_PLANE_Y, 0.0));
    }

    #[test]
    fn test_period() {
        assert!(OrbitParams::new(5.0, 0.0).period().is_none());
        let period = OrbitParams::new(5.0, -0.5).period().unwrap();
        assert_relative_eq!(period, TAU / 0.5);
    }

    #[test]
    fn test_position_repeats_after_one_period() {
        let orbit = OrbitParams::new(70.0, 0.015);
        let period = orbit.period().unwrap();
        let a = orbit.position_at(12.5);
        let b = orbit.position_at(12.5 + period);
        assert!((a - b).length() < 1e-3);
    }

    #[test]
    fn test_path_is_closed_loop() {
        let path = orbit_path(25.0, ORBIT_PATH_SEGMENTS);
        assert_eq!(path.len(), ORBIT_PATH_SEGMENTS + 1);
        for point in &path {
            assert_on_orbit(*point, 25.0, 1e-4);
        }

        let first = path[0];
        let last = path[ORBIT_PATH_SEGMENTS];
        assert!((first - last).length() < 1e-4, "{first} vs {last}");
    }

    #[test]
    fn test_path_matches_position_formula() {
        let orbit = OrbitParams::new(50.0, 1.0);
        let path = orbit.path(ORBIT_PATH_SEGMENTS);
        // θ = ω·t with ω = 1, so sample i is the position at t = θ_i
        for (i, point) in path.iter().enumerate().step_by(16) {
            let theta = i as f64 / ORBIT_PATH_SEGMENTS as f64 * TAU;
            assert!((orbit.position_at(theta) - *point).length() < 1e-3);
        }
    }

    #[test]
    fn test_path_has_minimum_segments() {
        assert_eq!(orbit_path(1.0, 0).len(), 4);
    }
}
