//! Orbit path rendering using Bevy Gizmos.
//!
//! The polylines are computed once when the planets are built (one full
//! sweep of the orbit formula) and only redrawn afterwards.

use bevy::prelude::*;

use crate::session::scene_running;

/// Plugin drawing the stored orbit paths.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPaths>()
            .init_resource::<OrbitPathSettings>()
            .add_systems(Update, draw_orbit_paths.run_if(scene_running));
    }
}

/// Settings for orbit path rendering.
#[derive(Resource)]
pub struct OrbitPathSettings {
    /// Whether to show orbit paths.
    pub visible: bool,
    /// Line colour (#444444).
    pub color: Color,
    /// Alpha value for the line colour.
    pub alpha: f32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            color: Color::srgb(0.267, 0.267, 0.267),
            alpha: 0.5,
        }
    }
}

/// Closed orbit polyline of one body.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitPath {
    pub body: String,
    /// First and last points coincide.
    pub points: Vec<Vec3>,
}

/// Orbit paths built by the scene builder, in body order.
#[derive(Resource, Debug, Default)]
pub struct OrbitPaths {
    paths: Vec<OrbitPath>,
}

impl OrbitPaths {
    pub fn push(&mut self, body: impl Into<String>, points: Vec<Vec3>) {
        self.paths.push(OrbitPath {
            body: body.into(),
            points,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitPath> {
        self.paths.iter()
    }

    pub fn get(&self, body: &str) -> Option<&OrbitPath> {
        self.paths.iter().find(|p| p.body == body)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

/// Draw every stored orbit as a line strip.
fn draw_orbit_paths(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    paths: Res<OrbitPaths>,
) {
    if !settings.visible {
        return;
    }

    let color = settings.color.with_alpha(settings.alpha);
    for path in paths.iter() {
        gizmos.linestrip(path.points.iter().copied(), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_keep_insertion_order() {
        let mut paths = OrbitPaths::default();
        paths.push("Mercury", vec![Vec3::X, Vec3::X]);
        paths.push("Venus", vec![Vec3::Z, Vec3::Z]);

        let names: Vec<_> = paths.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(names, ["Mercury", "Venus"]);
        assert_eq!(paths.get("Venus").map(|p| p.points[0]), Some(Vec3::Z));
        assert!(paths.get("Pluto").is_none());
    }

    #[test]
    fn test_default_line_style() {
        let settings = OrbitPathSettings::default();
        assert!(settings.visible);
        assert_eq!(settings.alpha, 0.5);
    }
}
