//! Sun, planet and satellite spawning.
//!
//! Every orbiting body is registered in descriptor order, planets first, then
//! satellites. A missing texture never blocks construction: the body is
//! spawned and registered right away, and [`watch_surface_textures`] swaps in
//! a plain colour if the texture later fails to load.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::catalog::{BodyDescriptor, satellites_around};
use crate::config::SceneConfig;
use crate::hover::HoverLabel;
use crate::orbit::ORBIT_PATH_SEGMENTS;
use crate::pick::{PickVolume, PickableRegistry};
use crate::render::orbits::OrbitPaths;
use crate::render::rings::{ring_pick_shape, scatter_debris, spawn_ring};
use crate::types::{BodyRegistry, OrbitingBody, SceneEntity};

/// Satellite hull colour (#888888).
const SATELLITE_COLOR: Color = Color::srgb(0.533, 0.533, 0.533);

/// Marker for the sun.
#[derive(Component, Debug)]
pub struct Sun;

/// Marker for a satellite.
#[derive(Component, Debug)]
pub struct Satellite;

/// A texture still loading for this body's material.
///
/// Removed once the image is loaded, or once the material has fallen back to
/// `placeholder` after a failed load.
#[derive(Component, Debug)]
pub struct SurfaceTexture {
    pub image: Handle<Image>,
    pub placeholder: Color,
}

/// Spawn the sun and its point light at the origin.
pub fn spawn_sun(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
) {
    let sun = &config.sun;
    let image: Handle<Image> = asset_server.load(sun.texture.clone());
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(image.clone()),
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            Name::new("Sun"),
            Mesh3d(meshes.add(Sphere::new(sun.radius).mesh().uv(32, 32))),
            MeshMaterial3d(material),
            Transform::default(),
            Sun,
            SurfaceTexture {
                image,
                placeholder: sun.light_color,
            },
            SceneEntity,
        ))
        .with_children(|parent| {
            parent.spawn(PointLight {
                color: sun.light_color,
                intensity: sun.light_intensity,
                range: sun.light_range,
                shadows_enabled: false,
                ..default()
            });
        });
}

/// Spawn one entity per planet descriptor, with rings where configured.
pub fn spawn_planets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
    mut bodies: ResMut<BodyRegistry>,
    mut pickables: ResMut<PickableRegistry>,
    mut orbit_paths: ResMut<OrbitPaths>,
) {
    let mut rng = rand::rng();

    for desc in &config.bodies {
        let orbit = desc.orbit();
        let texture = desc
            .texture
            .as_ref()
            .map(|path| asset_server.load::<Image>(path.clone()));
        let material = materials.add(planet_material(desc, texture.clone()));

        let mut volume = PickVolume::sphere(desc.size);
        let ring = desc.ring.filter(|_| config.features.rings);
        if let Some(ring) = ring {
            volume = volume.with(ring_pick_shape(&ring));
        }

        let mut body = OrbitingBody::new(desc.name.clone(), orbit);
        body.info = desc.info.clone();

        let mut entity = commands.spawn((
            Name::new(desc.name.clone()),
            Mesh3d(meshes.add(Sphere::new(desc.size).mesh().uv(32, 32))),
            MeshMaterial3d(material),
            Transform::from_translation(orbit.position_at(0.0)),
            body,
            HoverLabel::new(desc.name.clone(), desc.info.clone()),
            volume,
            SceneEntity,
        ));

        if let Some(image) = texture {
            entity.insert(SurfaceTexture {
                image,
                placeholder: desc.color,
            });
        }

        if let Some(ring) = ring {
            let debris = scatter_debris(&ring, config.debris_per_ring, &mut rng);
            entity.with_children(|parent| {
                spawn_ring(parent, &ring, &debris, &mut meshes, &mut materials);
            });
        }

        let id = entity.id();
        bodies.register(id);
        pickables.register(id);
        orbit_paths.push(desc.name.clone(), orbit.path(ORBIT_PATH_SEGMENTS));
    }

    info!("Spawned {} planets", config.bodies.len());
}

/// Spawn satellites around the configured host planet.
pub fn spawn_satellites(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
    mut bodies: ResMut<BodyRegistry>,
    mut pickables: ResMut<PickableRegistry>,
) {
    if !config.features.satellites || config.satellite_count == 0 {
        return;
    }
    let Some(host) = config.satellite_host() else {
        warn!(
            "Satellite host {:?} not in the scene; no satellites spawned",
            config.satellite_host
        );
        return;
    };

    let material = materials.add(StandardMaterial {
        base_color: SATELLITE_COLOR,
        metallic: 0.5,
        perceptual_roughness: 0.1,
        ..default()
    });

    let satellites = satellites_around(host, config.satellite_count);
    for sat in &satellites {
        let id = commands
            .spawn((
                Name::new(sat.name.clone()),
                Mesh3d(meshes.add(Cuboid::from_size(sat.size))),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(sat.orbit.position_at(0.0)),
                OrbitingBody::new(sat.name.clone(), sat.orbit).with_self_rotation(0.0),
                HoverLabel::new(sat.name.clone(), None),
                PickVolume::cuboid(sat.size),
                Satellite,
                SceneEntity,
            ))
            .id();
        bodies.register(id);
        pickables.register(id);
    }

    info!("Spawned {} satellites around {}", satellites.len(), host.name);
}

/// Unlit material showing the texture, or the placeholder colour without one.
fn planet_material(desc: &BodyDescriptor, texture: Option<Handle<Image>>) -> StandardMaterial {
    StandardMaterial {
        base_color: if texture.is_some() { Color::WHITE } else { desc.color },
        base_color_texture: texture,
        unlit: true,
        ..default()
    }
}

/// Fall back to the placeholder colour for textures that failed to load.
pub fn watch_surface_textures(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    pending: Query<(Entity, &SurfaceTexture, &MeshMaterial3d<StandardMaterial>, Option<&Name>)>,
) {
    for (entity, surface, material, name) in &pending {
        match asset_server.load_state(surface.image.id()) {
            LoadState::Loaded => {
                commands.entity(entity).remove::<SurfaceTexture>();
            }
            LoadState::Failed(err) => {
                let name = name.map_or("body", |n| n.as_str());
                error!("Texture for {name} failed to load, using plain colour: {err}");
                if let Some(material) = materials.get_mut(&material.0) {
                    material.base_color_texture = None;
                    material.base_color = surface.placeholder;
                }
                commands.entity(entity).remove::<SurfaceTexture>();
            }
            _ => {}
        }
    }
}
