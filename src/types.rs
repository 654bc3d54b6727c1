//! Core scene types, system sets and constants shared across plugins.

use bevy::prelude::*;

use crate::orbit::OrbitParams;

/// Ordered stages of one scene tick.
///
/// Configured as a chain in [`crate::session::SessionPlugin`], each set
/// gated on the session still running. Hit-testing sits after every
/// transform write so the tooltip reflects the frame about to be drawn.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Advance the scene clock.
    Clock,
    /// Pointer, viewport and keyboard state.
    Input,
    /// Completion of asynchronous loads (textures, models, remote image).
    Load,
    /// Orbit positions, spin and decorative motion.
    Motion,
    /// Camera controller damping step.
    Camera,
    /// Ray pick and tooltip update.
    Pick,
}

/// Startup stages: surface precondition, scene construction, go-live.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartupSet {
    Surface,
    Build,
    Ready,
}

/// Planet self-rotation in radians per second (0.01 rad per frame at 60 Hz).
pub const SELF_ROTATION_RATE: f32 = 0.6;

/// Starfield rotation in radians per second (0.0002 rad per frame at 60 Hz).
pub const STARFIELD_ROTATION_RATE: f32 = 0.012;

/// Refresh rate the per-frame increments were first tuned for.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Height of the shared orbit plane.
pub const ORBIT_PLANE_Y: f32 = 0.0;

/// A body moving on a circular orbit around the origin.
///
/// The entity carrying this component is the visual handle; the component
/// only holds geometric parameters and the spin accumulator.
#[derive(Component, Clone, Debug)]
pub struct OrbitingBody {
    /// Unique name within the scene.
    pub id: String,
    pub orbit: OrbitParams,
    /// Spin about the body's own Y axis, radians per second.
    pub self_rotation_rate: f32,
    /// Accumulated spin angle in `[0, TAU)`.
    pub spin: f32,
    /// Descriptive text shown on hover.
    pub info: Option<String>,
}

impl OrbitingBody {
    pub fn new(id: impl Into<String>, orbit: OrbitParams) -> Self {
        Self {
            id: id.into(),
            orbit,
            self_rotation_rate: SELF_ROTATION_RATE,
            spin: 0.0,
            info: None,
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn with_self_rotation(mut self, rate: f32) -> Self {
        self.self_rotation_rate = rate;
        self
    }

    /// Advance the spin accumulator by `dt` seconds and return the new angle.
    pub fn advance_spin(&mut self, dt: f32) -> f32 {
        self.spin = (self.spin + self.self_rotation_rate * dt).rem_euclid(std::f32::consts::TAU);
        self.spin
    }
}

/// Marker for every root entity owned by the scene, despawned on teardown.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SceneEntity;

/// Orbiting bodies in registration (descriptor) order.
#[derive(Resource, Debug, Default)]
pub struct BodyRegistry {
    entries: Vec<Entity>,
}

impl BodyRegistry {
    pub fn register(&mut self, entity: Entity) {
        if !self.entries.contains(&entity) {
            self.entries.push(entity);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Scene time since session start.
///
/// `elapsed` is wall-clock time measured from the session start, so it keeps
/// up after a long frame. `delta` is the (capped) frame time used for spin.
#[derive(Resource, Clone, Debug, Default)]
pub struct SceneClock {
    /// Seconds since the session started.
    pub elapsed: f64,
    /// Length of the last tick in seconds.
    pub delta: f32,
    /// Number of ticks run so far.
    pub ticks: u64,
    /// Real-time reading at session start.
    origin: Option<f64>,
}

impl SceneClock {
    /// Mark the session start at real-time reading `now`.
    pub fn start_at(&mut self, now: f64) {
        self.origin = Some(now);
        self.elapsed = 0.0;
    }

    pub fn origin(&self) -> Option<f64> {
        self.origin
    }

    /// Advance to real-time reading `now` with frame delta `dt`.
    ///
    /// Without a recorded start, the first reading becomes the start.
    pub fn advance(&mut self, now: f64, dt: f32) {
        let origin = *self.origin.get_or_insert(now);
        self.elapsed = (now - origin).max(0.0);
        self.delta = dt.max(0.0);
        self.ticks += 1;
    }
}
