//! Per-tick transform updates for orbiting bodies.

use bevy::prelude::*;

use crate::types::{BodyRegistry, OrbitingBody, SceneClock};

/// Place every registered body on its orbit at the current elapsed time
/// and advance its spin.
///
/// Positions come from absolute elapsed time, never from the previous
/// frame, so they cannot drift.
pub fn update_orbits(
    clock: Res<SceneClock>,
    registry: Res<BodyRegistry>,
    mut bodies: Query<(&mut OrbitingBody, &mut Transform)>,
) {
    for entity in registry.iter() {
        let Ok((mut body, mut transform)) = bodies.get_mut(entity) else {
            continue;
        };

        transform.translation = body.orbit.position_at(clock.elapsed);
        let spin = body.advance_spin(clock.delta);
        transform.rotation = Quat::from_rotation_y(spin);
    }
}
