//! glTF actors (astronauts, alien ships).
//!
//! Models load in the background. Once a model is available its instances
//! are spawned and appended to the pickable registry, at whatever tick that
//! happens; a failed load is logged and the actors are left out.

use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

use crate::catalog::ActorDescriptor;
use crate::config::SceneConfig;
use crate::hover::HoverLabel;
use crate::pick::{PickVolume, PickableRegistry};
use crate::types::SceneEntity;

/// Marker for a spawned actor instance.
#[derive(Component, Debug)]
pub struct Actor;

/// A model requested at startup that has not been placed yet.
#[derive(Debug, Clone)]
pub struct PendingActor {
    pub descriptor: ActorDescriptor,
    pub scene: Handle<Scene>,
}

/// Actor models still loading.
#[derive(Resource, Debug, Default)]
pub struct PendingActors(pub Vec<PendingActor>);

/// Start loading every actor model.
pub fn request_actors(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
) {
    if !config.features.actors {
        return;
    }

    let pending = config
        .actors
        .iter()
        .map(|descriptor| PendingActor {
            descriptor: descriptor.clone(),
            scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(descriptor.model.clone())),
        })
        .collect();
    commands.insert_resource(PendingActors(pending));
}

/// Bundle for one placed instance of `descriptor`.
pub fn actor_instance(
    descriptor: &ActorDescriptor,
    scene: Handle<Scene>,
    name: String,
    position: Vec3,
) -> impl Bundle {
    (
        Name::new(name.clone()),
        SceneRoot(scene),
        Transform::from_translation(position).with_scale(Vec3::splat(descriptor.scale)),
        HoverLabel::new(name, None),
        PickVolume::sphere(descriptor.pick_radius),
        Actor,
        SceneEntity,
    )
}

/// Place actors whose model finished loading; drop those that failed.
pub fn spawn_loaded_actors(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    scenes: Option<Res<Assets<Scene>>>,
    pending: Option<ResMut<PendingActors>>,
    mut pickables: ResMut<PickableRegistry>,
) {
    let (Some(scenes), Some(mut pending)) = (scenes, pending) else {
        return;
    };

    pending.0.retain(|actor| {
        if let LoadState::Failed(err) = asset_server.load_state(actor.scene.id()) {
            error!("Failed to load model {}: {err}", actor.descriptor.model);
            return false;
        }
        if !scenes.contains(actor.scene.id()) {
            return true;
        }

        let descriptor = &actor.descriptor;
        for (name, position) in descriptor.instance_names().zip(descriptor.placements.iter().copied()) {
            let id = commands
                .spawn(actor_instance(descriptor, actor.scene.clone(), name, position))
                .id();
            pickables.register(id);
        }
        info!("Placed {} x {}", descriptor.placements.len(), descriptor.label);
        false
    });

    if pending.0.is_empty() {
        commands.remove_resource::<PendingActors>();
    }
}
