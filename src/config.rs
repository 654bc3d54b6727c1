//! Scene configuration: feature presets, counts and collaborator settings.
//!
//! The four historical variants of the scene are presets over one set of
//! feature flags, so every code path exists once.

use std::ffi::OsString;
use std::str::FromStr;

use bevy::prelude::*;

use crate::catalog::{default_actors, solar_system, ActorDescriptor, BodyDescriptor, SunDescriptor};

/// Default public endpoint of the astronomy picture of the day.
pub const APOD_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

/// Errors raised while reading configuration overrides.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown scene variant {0:?} (expected stars, interactive, populated or full)")]
    UnknownVariant(String),

    #[error("invalid value {value:?} for {key}")]
    InvalidNumber { key: String, value: String },
}

/// Successive feature increments of the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneVariant {
    /// Sun, planets, orbits and starfield.
    Starfield,
    /// Adds orbit camera controls and hover tooltips.
    Interactive,
    /// Adds rings with debris, satellites and glTF actors.
    Populated,
    /// Adds asteroids, the black hole, the remote image and body labels.
    #[default]
    Full,
}

impl SceneVariant {
    pub fn features(self) -> SceneFeatures {
        let interactive = self != SceneVariant::Starfield;
        let populated = matches!(self, SceneVariant::Populated | SceneVariant::Full);
        let full = self == SceneVariant::Full;

        SceneFeatures {
            orbit_controls: interactive,
            tooltip: interactive,
            rings: populated,
            satellites: populated,
            actors: populated,
            asteroids: full,
            black_hole: full,
            remote_image: full,
            labels: full,
        }
    }
}

impl FromStr for SceneVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stars" | "starfield" | "1" => Ok(SceneVariant::Starfield),
            "interactive" | "2" => Ok(SceneVariant::Interactive),
            "populated" | "3" => Ok(SceneVariant::Populated),
            "full" | "4" => Ok(SceneVariant::Full),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Individually switchable scene features.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneFeatures {
    pub orbit_controls: bool,
    pub tooltip: bool,
    pub rings: bool,
    pub satellites: bool,
    pub actors: bool,
    pub asteroids: bool,
    pub black_hole: bool,
    pub remote_image: bool,
    pub labels: bool,
}

impl Default for SceneFeatures {
    fn default() -> Self {
        SceneVariant::default().features()
    }
}

/// Perspective camera and orbit controller settings.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of the remaining rotation applied (and removed) per tick.
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 50.0, 150.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
            near: 0.1,
            far: 2000.0,
            damping: 0.05,
            min_distance: 20.0,
            max_distance: 500.0,
        }
    }
}

/// Endpoint and key for the remote image of the day.
#[derive(Clone, Debug, PartialEq)]
pub struct RemoteImageSettings {
    pub endpoint: String,
    pub api_key: String,
    /// Centre of the textured plane.
    pub plane_position: Vec3,
    /// Edge length of the square plane.
    pub plane_size: f32,
}

impl Default for RemoteImageSettings {
    fn default() -> Self {
        Self {
            endpoint: APOD_ENDPOINT.to_string(),
            api_key: "DEMO_KEY".to_string(),
            plane_position: Vec3::new(0.0, 0.0, -100.0),
            plane_size: 20.0,
        }
    }
}

/// Everything the scene builder needs, inserted as a resource by
/// [`crate::session::start_scene`].
#[derive(Resource, Clone, Debug)]
pub struct SceneConfig {
    pub variant: SceneVariant,
    pub features: SceneFeatures,
    pub sun: SunDescriptor,
    pub bodies: Vec<BodyDescriptor>,
    pub actors: Vec<ActorDescriptor>,
    /// Planet the satellites are placed around.
    pub satellite_host: String,
    pub satellite_count: usize,
    pub star_count: usize,
    /// Half-extent of the cube the stars are scattered in.
    pub star_spread: f32,
    pub debris_per_ring: usize,
    pub asteroid_count: usize,
    pub camera: CameraSettings,
    pub remote_image: RemoteImageSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::for_variant(SceneVariant::default())
    }
}

impl SceneConfig {
    pub fn for_variant(variant: SceneVariant) -> Self {
        Self {
            variant,
            features: variant.features(),
            sun: SunDescriptor::default(),
            bodies: solar_system(),
            actors: default_actors(),
            satellite_host: "Earth".to_string(),
            satellite_count: 3,
            star_count: 10_000,
            star_spread: 1000.0,
            debris_per_ring: 1000,
            asteroid_count: 50,
            camera: CameraSettings::default(),
            remote_image: RemoteImageSettings::default(),
        }
    }

    /// Switch variant, resetting the feature flags to that preset.
    pub fn with_variant(mut self, variant: SceneVariant) -> Self {
        self.variant = variant;
        self.features = variant.features();
        self
    }

    pub fn with_bodies(mut self, bodies: Vec<BodyDescriptor>) -> Self {
        self.bodies = bodies;
        self
    }

    /// Read `ORRERY_VARIANT`, `ORRERY_STAR_COUNT` and `NASA_API_KEY`, then let
    /// the first command-line argument override the variant.
    pub fn from_env_and_args(
        args: impl IntoIterator<Item = OsString>,
    ) -> Result<Self, ConfigError> {
        Self::default()
            .apply_overrides(|key| std::env::var(key).ok())?
            .apply_args(args)
    }

    /// Let the first argument pick the variant. Arguments need not be UTF-8.
    pub fn apply_args(self, args: impl IntoIterator<Item = OsString>) -> Result<Self, ConfigError> {
        match args.into_iter().next() {
            Some(arg) => Ok(self.with_variant(arg.to_string_lossy().parse()?)),
            None => Ok(self),
        }
    }

    /// Apply overrides from a key lookup (the environment in production).
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(variant) = lookup("ORRERY_VARIANT") {
            self = self.with_variant(variant.parse()?);
        }
        if let Some(count) = lookup("ORRERY_STAR_COUNT") {
            self.star_count = count.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "ORRERY_STAR_COUNT".to_string(),
                value: count.clone(),
            })?;
        }
        if let Some(key) = lookup("NASA_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.remote_image.api_key = key;
        }
        Ok(self)
    }

    /// Descriptor of the satellite host planet, if it is in the scene.
    pub fn satellite_host(&self) -> Option<&BodyDescriptor> {
        self.bodies.iter().find(|b| b.name == self.satellite_host)
    }
}
