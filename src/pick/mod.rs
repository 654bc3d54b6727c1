//! Ray picking against the pickable registry.
//!
//! A pickable is a root entity with a [`PickVolume`]: one or more shapes in
//! the entity's local space covering the body and everything parented to it
//! (rings, debris, model children). Rays are tested in local space, so the
//! entity's rotation and scale apply to every part.

use bevy::prelude::*;

#[cfg(test)]
mod proptest_pick;

/// Hits closer than this along the ray are ignored.
const MIN_HIT_DISTANCE: f32 = 1e-4;

/// A shape in the owning entity's local space, centred on its origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickShape {
    Sphere { radius: f32 },
    Cuboid { half_size: Vec3 },
    /// Flat ring in the local XZ plane.
    Annulus { inner: f32, outer: f32 },
}

impl PickShape {
    /// Nearest positive ray parameter, with `dir` not necessarily normalised.
    fn intersect_local(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        match *self {
            PickShape::Sphere { radius } => ray_sphere(origin, dir, radius),
            PickShape::Cuboid { half_size } => ray_cuboid(origin, dir, half_size),
            PickShape::Annulus { inner, outer } => ray_annulus(origin, dir, inner, outer),
        }
    }
}

/// Compound pick volume of a registered entity.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct PickVolume {
    pub parts: Vec<PickShape>,
}

impl PickVolume {
    pub fn sphere(radius: f32) -> Self {
        Self {
            parts: vec![PickShape::Sphere { radius }],
        }
    }

    pub fn cuboid(size: Vec3) -> Self {
        Self {
            parts: vec![PickShape::Cuboid { half_size: size * 0.5 }],
        }
    }

    pub fn with(mut self, shape: PickShape) -> Self {
        self.parts.push(shape);
        self
    }

    /// Distance along `ray` to the nearest part, if any is hit in front of
    /// the ray origin.
    pub fn intersect(&self, transform: &Transform, ray: Ray3d) -> Option<f32> {
        let to_local = transform.compute_affine().inverse();
        let origin = to_local.transform_point3(ray.origin);
        let dir = to_local.transform_vector3(*ray.direction);
        if !origin.is_finite() || !dir.is_finite() {
            return None;
        }

        // The affine map preserves the ray parameter, and the world
        // direction is unit length, so `t` is already a world distance.
        self.parts
            .iter()
            .filter_map(|part| part.intersect_local(origin, dir))
            .min_by(f32::total_cmp)
    }
}

/// Entities eligible for hover, in registration order.
///
/// Appended by the scene builder and by asynchronous model loads. Order is
/// the tie-break for equal hit distances.
#[derive(Resource, Debug, Default)]
pub struct PickableRegistry {
    entries: Vec<Entity>,
}

impl PickableRegistry {
    pub fn register(&mut self, entity: Entity) {
        if !self.entries.contains(&entity) {
            self.entries.push(entity);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entries.iter().copied()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries that no longer satisfy `keep` (despawned entities).
    pub fn retain(&mut self, keep: impl FnMut(&Entity) -> bool) {
        self.entries.retain(keep);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Result of a pick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Nearest hit among `candidates`, scanned in order.
///
/// Equal distances keep the earlier candidate, so with candidates in
/// registry order the first-registered entity wins a tie.
pub fn nearest_hit<'a>(
    ray: Ray3d,
    candidates: impl IntoIterator<Item = (Entity, &'a Transform, &'a PickVolume)>,
) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for (entity, transform, volume) in candidates {
        let Some(distance) = volume.intersect(transform, ray) else {
            continue;
        };
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(PickHit { entity, distance });
        }
    }
    best
}

/// Normalised device coordinates of a cursor position.
///
/// `x` and `y` are in `[-1, 1]` with the origin at the viewport centre and
/// `y` pointing up (screen `y` grows downward).
pub fn ndc_from_cursor(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        -(cursor.y / viewport.y) * 2.0 + 1.0,
    ))
}

/// Ray from a perspective camera through an NDC point.
///
/// Starts at the camera position, like a pinhole camera ray. Hover picking
/// uses this instead of `Camera::viewport_to_world` because it runs in
/// `Update`, after the orbit systems have written `Transform` but before
/// `GlobalTransform` is propagated, and because it must work in headless
/// apps without a render target. Only perspective projections pick; the
/// caller gets `None` for anything else.
pub fn ray_from_ndc(ndc: Vec2, camera: &Transform, fov_y: f32, aspect: f32) -> Option<Ray3d> {
    let tan_half = (fov_y * 0.5).tan();
    let view_dir = Vec3::new(ndc.x * tan_half * aspect, ndc.y * tan_half, -1.0);
    let direction = Dir3::new(camera.rotation * view_dir).ok()?;
    Some(Ray3d {
        origin: camera.translation,
        direction,
    })
}

fn ray_sphere(origin: Vec3, dir: Vec3, radius: f32) -> Option<f32> {
    let len = dir.length();
    if len <= f32::EPSILON {
        return None;
    }
    let unit = dir / len;

    // Closest approach, then back off to the surface. Unlike b² - 4ac this
    // keeps precision for small spheres far from the ray origin.
    let t_ca = -origin.dot(unit);
    let perp = origin + unit * t_ca;
    let h2 = radius * radius - perp.length_squared();
    if h2 < 0.0 {
        return None;
    }
    let h = h2.sqrt();

    // Distances along `unit`; divide by |dir| to get the ray parameter
    let t1 = (t_ca - h) / len;
    let t2 = (t_ca + h) / len;
    if t1 > MIN_HIT_DISTANCE {
        Some(t1)
    } else if t2 > MIN_HIT_DISTANCE {
        Some(t2)
    } else {
        None
    }
}

fn ray_cuboid(origin: Vec3, dir: Vec3, half_size: Vec3) -> Option<f32> {
    // Slab test; a zero direction component gives ±inf, which the min/max
    // below handle as "parallel to that slab".
    let inv = dir.recip();
    let t0 = (-half_size - origin) * inv;
    let t1 = (half_size - origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();

    if t_far < t_near || t_far <= MIN_HIT_DISTANCE {
        return None;
    }
    Some(if t_near > MIN_HIT_DISTANCE { t_near } else { t_far })
}

fn ray_annulus(origin: Vec3, dir: Vec3, inner: f32, outer: f32) -> Option<f32> {
    if dir.y.abs() <= f32::EPSILON {
        return None;
    }
    let t = -origin.y / dir.y;
    if t <= MIN_HIT_DISTANCE {
        return None;
    }
    let hit = origin + dir * t;
    let r = Vec2::new(hit.x, hit.z).length();
    (inner..=outer).contains(&r).then_some(t)
}
