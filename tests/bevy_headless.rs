//! Headless Bevy integration tests.
//!
//! These tests verify the session lifecycle and per-tick motion without GPU.

mod common;

use approx::assert_relative_eq;
use bevy::prelude::*;
use common::{count_with, run_ticks, scene_app, test_config};
use orrery::config::SceneVariant;
use orrery::pick::PickableRegistry;
use orrery::render::background::Starfield;
use orrery::session::{SceneSession, SessionPhase};
use orrery::types::{BodyRegistry, OrbitingBody, SceneClock, SceneEntity};

fn phase(app: &App) -> SessionPhase {
    app.world().resource::<SceneSession>().phase
}

#[test]
fn test_session_goes_live_after_startup() {
    let (mut app, _token) = scene_app(test_config(SceneVariant::Interactive), true);
    app.update();

    assert_eq!(phase(&app), SessionPhase::Running);
    assert_eq!(app.world().resource::<BodyRegistry>().len(), 8);
}

#[test]
fn test_bodies_follow_elapsed_time() {
    let (mut app, _token) = scene_app(test_config(SceneVariant::Interactive), true);
    run_ticks(&mut app, 12);

    let elapsed = app.world().resource::<SceneClock>().elapsed;
    assert!(elapsed > 0.5, "Clock should have advanced, got {elapsed}");

    let mut query = app.world_mut().query::<(&OrbitingBody, &Transform)>();
    for (body, transform) in query.iter(app.world()) {
        let expected = body.orbit.position_at(elapsed);
        assert_relative_eq!(transform.translation.x, expected.x, epsilon = 1e-3);
        assert_relative_eq!(transform.translation.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(transform.translation.z, expected.z, epsilon = 1e-3);
    }
}

#[test]
fn test_planets_spin_with_time() {
    let (mut app, _token) = scene_app(test_config(SceneVariant::Interactive), true);
    run_ticks(&mut app, 5);

    let mut query = app.world_mut().query::<&OrbitingBody>();
    assert!(
        query.iter(app.world()).all(|b| b.spin > 0.0),
        "Every planet should have turned about its own axis"
    );
}

#[test]
fn test_missing_window_skips_scene() {
    let (mut app, _token) = scene_app(test_config(SceneVariant::Full), false);
    run_ticks(&mut app, 3);

    assert_eq!(phase(&app), SessionPhase::Skipped);
    assert_eq!(count_with::<SceneEntity>(&mut app), 0);
    assert!(app.world().resource::<BodyRegistry>().is_empty());
    assert_eq!(
        app.world().resource::<SceneClock>().ticks,
        0,
        "Clock should not tick for a skipped scene"
    );
}

#[test]
fn test_stop_token_tears_scene_down() {
    let (mut app, token) = scene_app(test_config(SceneVariant::Full), true);
    run_ticks(&mut app, 3);
    assert!(count_with::<SceneEntity>(&mut app) > 0);
    assert_eq!(count_with::<Starfield>(&mut app), 1);

    token.cancel();
    app.update();

    assert_eq!(phase(&app), SessionPhase::TornDown);
    assert_eq!(count_with::<SceneEntity>(&mut app), 0);
    assert!(app.world().resource::<BodyRegistry>().is_empty());
    assert!(app.world().resource::<PickableRegistry>().is_empty());

    // Nothing runs after teardown
    let ticks = app.world().resource::<SceneClock>().ticks;
    run_ticks(&mut app, 3);
    assert_eq!(app.world().resource::<SceneClock>().ticks, ticks);
}

#[test]
fn test_cancel_before_first_update_builds_nothing() {
    let (mut app, token) = scene_app(test_config(SceneVariant::Interactive), true);
    token.cancel();
    run_ticks(&mut app, 2);

    assert_eq!(phase(&app), SessionPhase::TornDown);
    assert_eq!(count_with::<SceneEntity>(&mut app), 0);
}
