//! Perspective camera with a damped orbit controller.
//!
//! Left drag orbits around the target, the scroll wheel dollies in and out.
//! Input only accumulates velocity; the controller then advances by one
//! fixed damping step per tick and writes the camera transform.

use std::f32::consts::FRAC_PI_2;

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use bevy_egui::EguiContexts;

use crate::config::{CameraSettings, SceneConfig};
use crate::types::{FrameSet, SceneEntity, StartupSet};

/// Radians of orbit per pixel of drag.
pub const ROTATE_SPEED: f32 = 0.005;

/// Fractional dolly per scroll line.
pub const ZOOM_SPEED: f32 = 0.1;

/// Pitch stays this far from the poles so `looking_at` keeps a stable up.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Orbit-style camera controller state.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Angle about +Y, zero looking down -Z.
    pub yaw: f32,
    /// Elevation above the orbit plane.
    pub pitch: f32,
    pub distance: f32,
    pub yaw_velocity: f32,
    pub pitch_velocity: f32,
    pub zoom_velocity: f32,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Controller reproducing a camera at `settings.position` looking at
    /// `settings.target`.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let offset = settings.position - settings.target;
        let distance = offset.length();
        let (yaw, pitch) = if distance > f32::EPSILON {
            (offset.x.atan2(offset.z), (offset.y / distance).clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };

        Self {
            target: settings.target,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance: distance.clamp(settings.min_distance, settings.max_distance),
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            damping: settings.damping.clamp(0.0, 1.0),
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
        }
    }

    /// Queue an orbit by a pointer drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw_velocity -= delta.x * ROTATE_SPEED;
        self.pitch_velocity += delta.y * ROTATE_SPEED;
    }

    /// Queue a dolly; positive `lines` moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.zoom_velocity += lines * ZOOM_SPEED;
    }

    /// Advance one damping step: apply a `damping` share of the queued
    /// motion and decay the rest.
    pub fn update(&mut self) {
        let d = self.damping;
        self.yaw += self.yaw_velocity * d;
        self.pitch = (self.pitch + self.pitch_velocity * d).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = (self.distance * (1.0 - self.zoom_velocity * d))
            .clamp(self.min_distance, self.max_distance);

        let keep = 1.0 - d;
        self.yaw_velocity *= keep;
        self.pitch_velocity *= keep;
        self.zoom_velocity *= keep;
    }

    pub fn transform(&self) -> Transform {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance;
        Transform::from_translation(self.target + offset).looking_at(self.target, Vec3::Y)
    }
}

/// Plugin providing the scene camera and its controls.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera.in_set(StartupSet::Build))
            .add_systems(Update, orbit_camera_input.in_set(FrameSet::Input))
            .add_systems(Update, update_orbit_camera.in_set(FrameSet::Camera));
    }
}

/// Camera bundle for `settings`, without the controller.
pub fn camera_bundle(settings: &CameraSettings) -> impl Bundle {
    (
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            ..default()
        }),
        Transform::from_translation(settings.position).looking_at(settings.target, Vec3::Y),
        MainCamera,
        SceneEntity,
    )
}

/// Spawn the main camera, with the orbit controller when enabled.
fn setup_camera(mut commands: Commands, config: Res<SceneConfig>) {
    let mut camera = commands.spawn(camera_bundle(&config.camera));
    if config.features.orbit_controls {
        camera.insert(OrbitCamera::from_settings(&config.camera));
    }
}

/// Feed mouse drag and scroll into the controller.
fn orbit_camera_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut controllers: Query<&mut OrbitCamera, With<MainCamera>>,
    mut contexts: EguiContexts,
) {
    // Leave the pointer to egui when it is over a panel
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_pointer_input()
    {
        return;
    }

    let Ok(mut controller) = controllers.single_mut() else {
        return;
    };

    if mouse_buttons.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
        controller.rotate(mouse_motion.delta);
    }
    if mouse_scroll.delta.y != 0.0 {
        controller.zoom(mouse_scroll.delta.y);
    }
}

/// One damping step per tick.
fn update_orbit_camera(mut cameras: Query<(&mut OrbitCamera, &mut Transform), With<MainCamera>>) {
    for (mut controller, mut transform) in &mut cameras {
        controller.update();
        *transform = controller.transform();
    }
}
