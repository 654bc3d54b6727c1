//! Orrery - Interactive Solar System Scene
//!
//! A desktop application showing the Sun and planets on circular orbits,
//! with orbit camera controls and hover tooltips.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::config::SceneConfig;
use orrery::session::start_scene;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Space Explorer".to_string(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(EguiPlugin::default());

    // Parsed after the log plugin is in place so a bad override is reported
    let config = match SceneConfig::from_env_and_args(std::env::args_os().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}; using the full scene");
            SceneConfig::default()
        }
    };
    start_scene(&mut app, config);
    app.run();
}
