//! Planetary rings: a translucent annulus plus scattered debris.
//!
//! Both are children of the planet, so they follow its orbit and spin.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;
use rand::Rng;

use crate::catalog::RingDescriptor;
use crate::pick::PickShape;

/// Radius of one debris rock.
pub const DEBRIS_RADIUS: f32 = 0.05;

/// Debris colour (#694605).
pub const DEBRIS_COLOR: Color = Color::srgb(0.412, 0.275, 0.020);

/// Opacity of the ring band.
pub const RING_OPACITY: f32 = 0.4;

/// Marker for a ring band entity.
#[derive(Component, Debug)]
pub struct RingBand;

/// Marker for one debris rock.
#[derive(Component, Debug)]
pub struct Debris;

/// One rock's placement in the ring plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DebrisSample {
    pub angle: f32,
    pub radius: f32,
}

impl DebrisSample {
    /// Position in the planet's local XZ plane.
    pub fn position(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(cos * self.radius, 0.0, sin * self.radius)
    }
}

/// Scatter `count` rocks at uniform angle and uniform radius within the
/// ring bounds (inclusive).
pub fn scatter_debris(ring: &RingDescriptor, count: usize, rng: &mut impl Rng) -> Vec<DebrisSample> {
    (0..count)
        .map(|_| DebrisSample {
            angle: rng.random_range(0.0..TAU),
            radius: rng.random_range(ring.inner..=ring.outer),
        })
        .collect()
}

/// Pick annulus covering the band and every rock, including the part of a
/// rock that sticks out past the ring edges.
pub fn ring_pick_shape(ring: &RingDescriptor) -> PickShape {
    PickShape::Annulus {
        inner: (ring.inner - DEBRIS_RADIUS).max(0.0),
        outer: ring.outer + DEBRIS_RADIUS,
    }
}

/// Spawn the band and the debris under `parent`.
pub fn spawn_ring(
    parent: &mut ChildSpawnerCommands,
    ring: &RingDescriptor,
    debris: &[DebrisSample],
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let band_material = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(RING_OPACITY),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    // Annulus meshes lie in the XY plane; lay the band flat in XZ
    parent.spawn((
        Mesh3d(meshes.add(Annulus::new(ring.inner, ring.outer))),
        MeshMaterial3d(band_material),
        Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        RingBand,
    ));

    let rock_mesh = meshes.add(Sphere::new(DEBRIS_RADIUS).mesh().uv(8, 8));
    let rock_material = materials.add(StandardMaterial {
        base_color: DEBRIS_COLOR,
        unlit: true,
        ..default()
    });

    for sample in debris {
        parent.spawn((
            Mesh3d(rock_mesh.clone()),
            MeshMaterial3d(rock_material.clone()),
            Transform::from_translation(sample.position()),
            Debris,
        ));
    }
}
