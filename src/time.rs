//! Scene clock advancement.
//!
//! Orbit positions are a function of absolute elapsed time, so the clock is
//! the only time state the scene keeps.

use bevy::prelude::*;
use bevy::time::Real;

use crate::types::{FrameSet, SceneClock};

/// Plugin providing the per-tick clock update.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_clock.in_set(FrameSet::Clock));
    }
}

/// Advance the scene clock: wall-clock elapsed time from `Time<Real>`, frame
/// delta from the default clock.
fn advance_clock(mut clock: ResMut<SceneClock>, real: Res<Time<Real>>, time: Res<Time>) {
    clock.advance(real.elapsed_secs_f64(), time.delta_secs());
}
