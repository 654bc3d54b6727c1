//! Pointer tracking and keyboard shortcuts.
//!
//! The pointer position and viewport size are copied from the primary
//! window once per tick, ahead of motion and picking, so the hit-test always
//! reads this tick's cursor.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::hover::PointerState;
use crate::render::labels::LabelSettings;
use crate::render::orbits::OrbitPathSettings;
use crate::session::SceneSession;
use crate::types::FrameSet;

/// Plugin providing pointer tracking and keyboard shortcuts.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (track_pointer, keyboard_shortcuts).in_set(FrameSet::Input),
        );
    }
}

/// Copy cursor position and viewport size from the primary window.
pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows.single() else {
        pointer.screen = None;
        return;
    };

    pointer.viewport = Vec2::new(window.width(), window.height());
    pointer.screen = window.cursor_position();
}

/// Handle keyboard shortcuts.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    session: Res<SceneSession>,
    labels: Option<ResMut<LabelSettings>>,
    orbit_paths: Option<ResMut<OrbitPathSettings>>,
) {
    // Escape: stop the scene
    if keys.just_pressed(KeyCode::Escape) {
        info!("Stop requested from keyboard");
        session.token.cancel();
    }

    // L: toggle body labels
    if keys.just_pressed(KeyCode::KeyL)
        && let Some(mut labels) = labels
    {
        labels.visible = !labels.visible;
        info!("Labels {}", if labels.visible { "shown" } else { "hidden" });
    }

    // O: toggle orbit paths
    if keys.just_pressed(KeyCode::KeyO)
        && let Some(mut paths) = orbit_paths
    {
        paths.visible = !paths.visible;
        info!("Orbit paths {}", if paths.visible { "shown" } else { "hidden" });
    }
}
