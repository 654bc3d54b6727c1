//! Background rendering: starfield and lighting.

use bevy::asset::RenderAssetUsages;
use bevy::light::GlobalAmbientLight;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::prelude::*;
use rand::Rng;

use crate::config::SceneConfig;
use crate::types::{SceneClock, SceneEntity, STARFIELD_ROTATION_RATE};

/// Ambient light colour (#222222).
const AMBIENT_COLOR: Color = Color::srgb(0.133, 0.133, 0.133);

/// Root of the starfield point cloud.
#[derive(Component, Debug)]
pub struct Starfield;

/// `count` points uniformly inside the cube `[-spread, spread]³`.
pub fn star_positions(count: usize, spread: f32, rng: &mut impl Rng) -> Vec<Vec3> {
    let spread = spread.abs().max(f32::EPSILON);
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.random_range(-spread..spread),
                rng.random_range(-spread..spread),
                rng.random_range(-spread..spread),
            )
        })
        .collect()
}

/// Spawn the starfield as one point-list mesh.
pub fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    let positions = star_positions(config.star_count, config.star_spread, &mut rand::rng());
    let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions);

    // Material for stars - unlit white
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    commands.spawn((
        Name::new("Starfield"),
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(star_material),
        Transform::default(),
        Starfield,
        SceneEntity,
    ));

    info!("Spawned {} background stars", config.star_count);
}

/// Black sky and a dim ambient light; the sun carries the point light.
pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(ClearColor(Color::BLACK));
    commands.insert_resource(GlobalAmbientLight {
        color: AMBIENT_COLOR,
        brightness: 400.0,
        affects_lightmapped_meshes: true,
    });
}

/// Slow decorative rotation of the starfield, scaled by frame time.
pub fn rotate_starfield(clock: Res<SceneClock>, mut stars: Query<&mut Transform, With<Starfield>>) {
    for mut transform in &mut stars {
        transform.rotate_y(STARFIELD_ROTATION_RATE * clock.delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_stars_fill_cube() {
        let mut rng = StdRng::seed_from_u64(3);
        let stars = star_positions(10_000, 1000.0, &mut rng);

        assert_eq!(stars.len(), 10_000);
        assert!(stars.iter().all(|s| s.abs().max_element() <= 1000.0));
        // Spread across the whole cube, not clumped at the centre
        assert!(stars.iter().any(|s| s.x > 900.0));
        assert!(stars.iter().any(|s| s.y < -900.0));
    }

    #[test]
    fn test_zero_stars() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(star_positions(0, 1000.0, &mut rng).is_empty());
    }
}
