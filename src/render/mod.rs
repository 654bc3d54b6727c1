//! Scene construction and drawing.
//!
//! [`SceneBuildPlugin`] spawns and moves everything in the scene and needs
//! no GPU or egui, so headless tests can run it. [`OverlayPlugin`] adds the
//! gizmo orbit paths and the egui labels and tooltip on top.

pub mod actors;
pub mod background;
pub mod bodies;
pub mod extras;
pub mod labels;
pub mod orbits;
pub mod rings;
mod sync;

use bevy::prelude::*;

use crate::types::{FrameSet, StartupSet};

use self::actors::{request_actors, spawn_loaded_actors};
use self::background::{rotate_starfield, spawn_lighting, spawn_starfield};
use self::bodies::{spawn_planets, spawn_satellites, spawn_sun, watch_surface_textures};
use self::extras::{drift_asteroids, spawn_asteroids, spawn_black_hole};
use self::labels::LabelPlugin;
use self::orbits::{OrbitPathPlugin, OrbitPaths};
use self::sync::update_orbits;

pub use self::bodies::SurfaceTexture;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((SceneBuildPlugin, OverlayPlugin));
    }
}

/// Scene construction plus per-tick motion.
pub struct SceneBuildPlugin;

impl Plugin for SceneBuildPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPaths>()
            // Registration order: planets, then satellites; actors append later
            .add_systems(
                Startup,
                (
                    spawn_lighting,
                    spawn_starfield,
                    spawn_sun,
                    spawn_planets,
                    spawn_satellites,
                    spawn_asteroids,
                    spawn_black_hole,
                    request_actors,
                )
                    .chain()
                    .in_set(StartupSet::Build),
            )
            .add_systems(
                Update,
                (watch_surface_textures, spawn_loaded_actors).in_set(FrameSet::Load),
            )
            .add_systems(
                Update,
                (update_orbits, rotate_starfield, drift_asteroids).in_set(FrameSet::Motion),
            );
    }
}

/// Gizmo orbit paths, egui labels and the tooltip box.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((OrbitPathPlugin, LabelPlugin));
    }
}
