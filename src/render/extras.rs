//! Decorative extras of the full scene: drifting asteroids and a black hole.
//!
//! Neither is pickable.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use rand::Rng;

use crate::config::SceneConfig;
use crate::types::{REFERENCE_FRAME_RATE, SceneClock, SceneEntity};

pub const ASTEROID_RADIUS: f32 = 0.5;

/// Half-extent of the asteroid scatter box.
pub const ASTEROID_SPREAD: Vec3 = Vec3::new(500.0, 50.0, 500.0);

/// Largest per-axis jitter in one 60 Hz frame.
pub const ASTEROID_JITTER: f32 = 0.1;

pub const BLACK_HOLE_RADIUS: f32 = 3.0;
pub const BLACK_HOLE_POSITION: Vec3 = Vec3::new(0.0, -100.0, -200.0);
pub const ACCRETION_DISK_INNER: f32 = 5.0;
pub const ACCRETION_DISK_OUTER: f32 = 20.0;

/// Marker for a drifting asteroid.
#[derive(Component, Debug)]
pub struct Asteroid;

/// Marker for the black hole.
#[derive(Component, Debug)]
pub struct BlackHole;

/// Uniform random point inside the asteroid scatter box.
pub fn asteroid_position(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.random_range(-ASTEROID_SPREAD.x..ASTEROID_SPREAD.x),
        rng.random_range(-ASTEROID_SPREAD.y..ASTEROID_SPREAD.y),
        rng.random_range(-ASTEROID_SPREAD.z..ASTEROID_SPREAD.z),
    )
}

/// Random-walk step for `dt` seconds, at most [`ASTEROID_JITTER`] per axis
/// per reference frame.
pub fn jitter_step(dt: f32, rng: &mut impl Rng) -> Vec3 {
    let amplitude = ASTEROID_JITTER * dt.max(0.0) * REFERENCE_FRAME_RATE;
    if amplitude <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.random_range(-amplitude..=amplitude),
        rng.random_range(-amplitude..=amplitude),
        rng.random_range(-amplitude..=amplitude),
    )
}

pub fn spawn_asteroids(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    if !config.features.asteroids {
        return;
    }

    let mesh = meshes.add(Sphere::new(ASTEROID_RADIUS).mesh().uv(8, 8));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.5, 0.5),
        ..default()
    });

    let mut rng = rand::rng();
    for _ in 0..config.asteroid_count {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(asteroid_position(&mut rng)),
            Asteroid,
            SceneEntity,
        ));
    }

    info!("Spawned {} asteroids", config.asteroid_count);
}

pub fn drift_asteroids(clock: Res<SceneClock>, mut asteroids: Query<&mut Transform, With<Asteroid>>) {
    let mut rng = rand::rng();
    for mut transform in &mut asteroids {
        transform.translation += jitter_step(clock.delta, &mut rng);
    }
}

pub fn spawn_black_hole(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    if !config.features.black_hole {
        return;
    }

    let core = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        unlit: true,
        ..default()
    });
    let disk = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands
        .spawn((
            Name::new("Black Hole"),
            Mesh3d(meshes.add(Sphere::new(BLACK_HOLE_RADIUS).mesh().uv(32, 32))),
            MeshMaterial3d(core),
            Transform::from_translation(BLACK_HOLE_POSITION),
            BlackHole,
            SceneEntity,
        ))
        .with_children(|parent| {
            // Accretion disk in the hole's horizontal plane
            parent.spawn((
                Mesh3d(meshes.add(Annulus::new(ACCRETION_DISK_INNER, ACCRETION_DISK_OUTER))),
                MeshMaterial3d(disk),
                Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ));
        });
}
