//! Declarative descriptors for everything the scene builder spawns.
//!
//! Sizes, radii and speeds are scene units (not physical): the table keeps
//! the inner planets readable next to the gas giants.

use bevy::prelude::*;

use crate::orbit::OrbitParams;

/// Inner/outer radius of a planetary ring, in the planet's local units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingDescriptor {
    pub inner: f32,
    pub outer: f32,
}

impl RingDescriptor {
    /// Build a ring, ordering the bounds and clamping them to be non-negative.
    pub fn new(inner: f32, outer: f32) -> Self {
        let (inner, outer) = (inner.max(0.0), outer.max(0.0));
        Self {
            inner: inner.min(outer),
            outer: inner.max(outer),
        }
    }
}

/// One orbiting planet.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescriptor {
    /// Unique name, also the hover fallback label.
    pub name: String,
    /// Texture path relative to the asset root.
    pub texture: Option<String>,
    /// Sphere radius.
    pub size: f32,
    pub orbit_radius: f32,
    /// Radians per second.
    pub angular_speed: f32,
    pub ring: Option<RingDescriptor>,
    /// Hover text.
    pub info: Option<String>,
    /// Placeholder colour used until (or instead of) the texture.
    pub color: Color,
}

impl BodyDescriptor {
    pub fn new(name: impl Into<String>, size: f32, orbit_radius: f32, angular_speed: f32) -> Self {
        Self {
            name: name.into(),
            texture: None,
            size,
            orbit_radius,
            angular_speed,
            ring: None,
            info: None,
            color: Color::srgb(0.7, 0.7, 0.7),
        }
    }

    pub fn with_texture(mut self, path: impl Into<String>) -> Self {
        self.texture = Some(path.into());
        self
    }

    pub fn with_ring(mut self, inner: f32, outer: f32) -> Self {
        self.ring = Some(RingDescriptor::new(inner, outer));
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn orbit(&self) -> OrbitParams {
        OrbitParams::new(self.orbit_radius, self.angular_speed)
    }
}

/// The sun at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct SunDescriptor {
    pub radius: f32,
    pub texture: String,
    pub light_color: Color,
    pub light_intensity: f32,
    pub light_range: f32,
}

impl Default for SunDescriptor {
    fn default() -> Self {
        Self {
            radius: 5.0,
            texture: "textures/sun.jpg".to_string(),
            // #ffcc00
            light_color: Color::srgb_u8(0xff, 0xcc, 0x00),
            light_intensity: 2_000_000.0,
            light_range: 300.0,
        }
    }
}

/// A small satellite orbiting the sun alongside a host planet.
#[derive(Clone, Debug, PartialEq)]
pub struct SatelliteDescriptor {
    pub name: String,
    pub orbit: OrbitParams,
    /// Box dimensions.
    pub size: Vec3,
}

/// A glTF actor placed statically in the scene once its model loads.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorDescriptor {
    /// Name prefix; instances are named `"{label} {n}"` starting at 1.
    pub label: String,
    /// glTF/GLB path relative to the asset root.
    pub model: String,
    pub scale: f32,
    /// Bounding sphere used for hover picking, in model units.
    pub pick_radius: f32,
    pub placements: Vec<Vec3>,
}

impl ActorDescriptor {
    /// Instance names in placement order.
    pub fn instance_names(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.placements.len()).map(|n| format!("{} {}", self.label, n))
    }
}

/// The eight planets of the default scene.
pub fn solar_system() -> Vec<BodyDescriptor> {
    vec![
        BodyDescriptor::new("Mercury", 1.0, 12.0, 0.1)
            .with_texture("textures/mercury.jpg")
            .with_color(Color::srgb(0.6, 0.6, 0.6))
            .with_info("Mercury is the smallest planet and closest to the Sun."),
        BodyDescriptor::new("Venus", 1.5, 18.0, 0.07)
            .with_texture("textures/venus.jpg")
            .with_color(Color::srgb(0.9, 0.85, 0.7))
            .with_info("Venus has a thick atmosphere and is the hottest planet."),
        BodyDescriptor::new("Earth", 2.0, 25.0, 0.05)
            .with_texture("textures/earth.png")
            .with_color(Color::srgb(0.2, 0.5, 0.8))
            .with_info("Earth is the only known planet to support life."),
        BodyDescriptor::new("Mars", 1.2, 35.0, 0.03)
            .with_texture("textures/mars.png")
            .with_color(Color::srgb(0.8, 0.4, 0.2))
            .with_info("Mars is known as the Red Planet due to its iron oxide surface."),
        BodyDescriptor::new("Jupiter", 3.5, 50.0, 0.02)
            .with_texture("textures/jupiter.jpg")
            .with_color(Color::srgb(0.8, 0.7, 0.6))
            .with_info("Jupiter is the largest planet in the Solar System."),
        BodyDescriptor::new("Saturn", 3.0, 70.0, 0.015)
            .with_texture("textures/saturn.jpg")
            .with_color(Color::srgb(0.9, 0.85, 0.6))
            .with_ring(3.5, 7.0)
            .with_info("Saturn is famous for its extensive ring system."),
        BodyDescriptor::new("Uranus", 2.5, 90.0, 0.01)
            .with_texture("textures/uranus.png")
            .with_color(Color::srgb(0.6, 0.8, 0.9))
            .with_info("Uranus has a unique sideways rotation."),
        BodyDescriptor::new("Neptune", 2.0, 110.0, 0.008)
            .with_texture("textures/neptune.jpg")
            .with_color(Color::srgb(0.3, 0.5, 0.9))
            .with_info("Neptune is known for its strong winds and dark storms."),
    ]
}

/// `count` satellites on widening orbits just outside `host`.
///
/// Satellite `i` orbits at `host + 3 + 2i` with speed `2·host + 0.01i`.
pub fn satellites_around(host: &BodyDescriptor, count: usize) -> Vec<SatelliteDescriptor> {
    (0..count)
        .map(|i| SatelliteDescriptor {
            name: format!("Satellite {}", i + 1),
            orbit: OrbitParams::new(
                host.orbit_radius + 3.0 + i as f32 * 2.0,
                host.angular_speed * 2.0 + i as f32 * 0.01,
            ),
            size: Vec3::new(0.5, 0.5, 1.0),
        })
        .collect()
}

/// Astronauts and alien ships of the populated scene.
pub fn default_actors() -> Vec<ActorDescriptor> {
    vec![
        ActorDescriptor {
            label: "Astronaut".to_string(),
            model: "models/astronaut.glb".to_string(),
            scale: 1.0,
            pick_radius: 1.5,
            placements: (0..2).map(|i| Vec3::new(10.0 + i as f32 * 5.0, 15.0, 0.0)).collect(),
        },
        ActorDescriptor {
            label: "Alien Ship".to_string(),
            model: "models/ufo.glb".to_string(),
            scale: 2.0,
            pick_radius: 1.5,
            placements: (0..2).map(|i| Vec3::new(0.0, 20.0, i as f32 * 30.0)).collect(),
        },
    ]
}
