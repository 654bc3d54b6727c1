//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::window::PrimaryWindow;

use orrery::apod::ApodPlugin;
use orrery::config::{SceneConfig, SceneVariant};
use orrery::hover::HoverPlugin;
use orrery::render::SceneBuildPlugin;
use orrery::session::{SceneSession, SessionPlugin, StopToken};
use orrery::time::TimePlugin;

/// Fixed tick length used by the headless apps.
pub const TICK: Duration = Duration::from_millis(100);

/// Small scene config: few stars, no network, no glTF models.
pub fn test_config(variant: SceneVariant) -> SceneConfig {
    let mut config = SceneConfig::for_variant(variant);
    config.star_count = 100;
    config.debris_per_ring = 200;
    config.asteroid_count = 5;
    config.features.actors = false;
    config.features.remote_image = false;
    config
}

/// Headless scene app without GPU, egui or a real window.
///
/// Builds everything except the camera controller and the overlays; the
/// caller gets the stop token back. With `window` a bare primary window
/// entity is spawned so the render surface check passes.
pub fn scene_app(config: SceneConfig, window: bool) -> (App, StopToken) {
    let token = StopToken::new();
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(AssetPlugin::default())
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .init_asset::<Image>()
        .init_asset::<Scene>()
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK))
        .insert_resource(config)
        .insert_resource(SceneSession::new(token.clone()))
        .add_plugins((SessionPlugin, TimePlugin, SceneBuildPlugin, HoverPlugin, ApodPlugin));

    if window {
        app.world_mut().spawn((Window::default(), PrimaryWindow));
    }
    (app, token)
}

/// Run `n` updates.
pub fn run_ticks(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

/// Entities carrying component `T`.
pub fn count_with<T: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, With<T>>()
        .iter(app.world())
        .count()
}
