//! Scene session lifecycle: start, per-tick stop check and teardown.
//!
//! [`start_scene`] hands back a [`StopToken`]. Every tick set is gated on
//! [`scene_running`], which observes the token first; once cancelled the
//! teardown system releases the scene exactly once.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use bevy::time::Real;
use bevy::window::PrimaryWindow;

use crate::apod::{ApodFetch, ApodPlugin};
use crate::camera::{CameraPlugin, OrbitCamera};
use crate::config::SceneConfig;
use crate::hover::{HoverPlugin, HoverState, Tooltip};
use crate::input::InputPlugin;
use crate::pick::PickableRegistry;
use crate::render::RenderPlugin;
use crate::render::actors::PendingActors;
use crate::render::orbits::OrbitPaths;
use crate::time::TimePlugin;
use crate::types::{BodyRegistry, FrameSet, SceneClock, SceneEntity, StartupSet};

/// Cancellation handle for a running scene.
///
/// Clones share the same flag, so the caller can keep one and cancel from
/// anywhere (a keyboard shortcut, a host shutting the view down).
#[derive(Clone, Debug, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Starting,
    Running,
    /// No render surface at startup; nothing was built.
    Skipped,
    TornDown,
}

/// The active scene session.
#[derive(Resource, Debug)]
pub struct SceneSession {
    pub token: StopToken,
    pub phase: SessionPhase,
}

impl SceneSession {
    pub fn new(token: StopToken) -> Self {
        Self {
            token,
            phase: SessionPhase::Starting,
        }
    }
}

/// Run condition: scene construction may proceed.
pub fn scene_starting(session: Option<Res<SceneSession>>) -> bool {
    session.is_some_and(|s| s.phase == SessionPhase::Starting && !s.token.is_cancelled())
}

/// Run condition for every tick set: running and not cancelled.
pub fn scene_running(session: Option<Res<SceneSession>>) -> bool {
    session.is_some_and(|s| s.phase == SessionPhase::Running && !s.token.is_cancelled())
}

fn teardown_requested(session: Option<Res<SceneSession>>) -> bool {
    session.is_some_and(|s| s.phase == SessionPhase::Running && s.token.is_cancelled())
}

/// Insert `config`, install every scene plugin and return the stop token.
pub fn start_scene(app: &mut App, config: SceneConfig) -> StopToken {
    let token = StopToken::new();
    app.insert_resource(config)
        .insert_resource(SceneSession::new(token.clone()))
        .add_plugins((
            SessionPlugin,
            TimePlugin,
            InputPlugin,
            CameraPlugin,
            RenderPlugin,
            HoverPlugin,
            ApodPlugin,
        ));
    token
}

/// Schedules, shared registries and the session lifecycle systems.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SceneSession>() {
            app.insert_resource(SceneSession::new(StopToken::new()));
        }
        app.init_resource::<SceneClock>()
            .init_resource::<BodyRegistry>()
            .init_resource::<PickableRegistry>()
            .configure_sets(
                Startup,
                (StartupSet::Surface, StartupSet::Build, StartupSet::Ready).chain(),
            )
            .configure_sets(Startup, StartupSet::Build.run_if(scene_starting))
            .configure_sets(
                Update,
                (
                    FrameSet::Clock,
                    FrameSet::Input,
                    FrameSet::Load,
                    FrameSet::Motion,
                    FrameSet::Camera,
                    FrameSet::Pick,
                )
                    .chain(),
            )
            .add_systems(Startup, check_render_surface.in_set(StartupSet::Surface))
            .add_systems(Startup, mark_running.in_set(StartupSet::Ready))
            .add_systems(Update, teardown_scene.after(FrameSet::Pick).run_if(teardown_requested));

        for set in [
            FrameSet::Clock,
            FrameSet::Input,
            FrameSet::Load,
            FrameSet::Motion,
            FrameSet::Camera,
            FrameSet::Pick,
        ] {
            app.configure_sets(Update, set.run_if(scene_running));
        }
    }
}

/// Skip the whole scene when there is no window to render into.
fn check_render_surface(
    windows: Query<(), With<PrimaryWindow>>,
    mut session: ResMut<SceneSession>,
) {
    if session.phase != SessionPhase::Starting {
        return;
    }
    if windows.is_empty() {
        warn!("No primary window available; scene initialization skipped");
        session.phase = SessionPhase::Skipped;
    }
}

fn mark_running(
    mut session: ResMut<SceneSession>,
    mut clock: ResMut<SceneClock>,
    real: Res<Time<Real>>,
    bodies: Res<BodyRegistry>,
    pickables: Res<PickableRegistry>,
) {
    if session.phase != SessionPhase::Starting {
        return;
    }
    if session.token.is_cancelled() {
        session.phase = SessionPhase::TornDown;
        return;
    }
    session.phase = SessionPhase::Running;
    clock.start_at(real.elapsed_secs_f64());
    info!(
        "Scene running: {} orbiting bodies, {} pickable objects",
        bodies.len(),
        pickables.len()
    );
}

/// Release everything the scene owns, on the main thread, once.
fn teardown_scene(
    mut commands: Commands,
    mut session: ResMut<SceneSession>,
    scene_entities: Query<Entity, With<SceneEntity>>,
    controllers: Query<Entity, With<OrbitCamera>>,
    mut bodies: ResMut<BodyRegistry>,
    mut pickables: ResMut<PickableRegistry>,
    hover: Option<ResMut<HoverState>>,
    orbit_paths: Option<ResMut<OrbitPaths>>,
) {
    for entity in &controllers {
        commands.entity(entity).remove::<OrbitCamera>();
    }

    let mut despawned = 0;
    for entity in &scene_entities {
        commands.entity(entity).despawn();
        despawned += 1;
    }

    bodies.clear();
    pickables.clear();
    if let Some(mut hover) = hover {
        hover.reset();
    }
    if let Some(mut paths) = orbit_paths {
        paths.clear();
    }
    commands.remove_resource::<Tooltip>();
    commands.remove_resource::<PendingActors>();
    // Dropping the task cancels an in-flight fetch
    commands.remove_resource::<ApodFetch>();

    session.phase = SessionPhase::TornDown;
    info!("Scene torn down ({despawned} root entities released)");
}
