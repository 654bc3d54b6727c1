//! Astronomy picture of the day on a decorative plane.
//!
//! One best-effort HTTP fetch on the IO task pool at startup: query the
//! endpoint for today's entry, download and decode the image, then texture a
//! square plane with it. Any failure is logged and the plane is left out.
//! No retries.

use std::io::Read;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use serde::Deserialize;

use crate::config::{RemoteImageSettings, SceneConfig};
use crate::types::{FrameSet, SceneEntity, StartupSet};

/// Errors from fetching the picture of the day.
#[derive(thiserror::Error, Debug)]
pub enum ApodError {
    #[error("request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no image url")]
    MissingUrl,

    #[error("today's entry is a {0}, not an image")]
    NotAnImage(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// The fields of the endpoint's JSON response that matter here.
#[derive(Debug, Deserialize)]
pub struct ApodResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// A usable entry: an image URL plus its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApodEntry {
    pub title: String,
    pub url: String,
}

/// Decoded RGBA8 pixels, ready to become a texture.
#[derive(Debug, Clone)]
pub struct ApodImage {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Parse the endpoint's JSON body.
pub fn parse_response(body: &str) -> Result<ApodEntry, ApodError> {
    let response: ApodResponse = serde_json::from_str(body)?;

    if let Some(media) = response.media_type.as_deref()
        && media != "image"
    {
        return Err(ApodError::NotAnImage(media.to_string()));
    }

    let url = response
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or(ApodError::MissingUrl)?;

    Ok(ApodEntry {
        title: response.title.unwrap_or_default(),
        url,
    })
}

/// Blocking fetch and decode. Runs on the IO task pool.
pub fn fetch_image(settings: &RemoteImageSettings) -> Result<ApodImage, ApodError> {
    let body = ureq::get(&settings.endpoint)
        .query("api_key", &settings.api_key)
        .call()
        .map_err(Box::new)?
        .into_string()?;
    let entry = parse_response(&body)?;

    let mut bytes = Vec::new();
    ureq::get(&entry.url)
        .call()
        .map_err(Box::new)?
        .into_reader()
        .read_to_end(&mut bytes)?;

    let rgba = image::load_from_memory(&bytes)?.to_rgba8();
    Ok(ApodImage {
        title: entry.title,
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

impl ApodImage {
    pub fn into_texture(self) -> Image {
        Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.pixels,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }
}

/// The in-flight fetch. Dropping it cancels the task.
#[derive(Resource)]
pub struct ApodFetch(pub Task<Result<ApodImage, ApodError>>);

/// Marker for the textured plane.
#[derive(Component, Debug)]
pub struct ApodPlane;

/// Plugin providing the picture-of-the-day plane.
pub struct ApodPlugin;

impl Plugin for ApodPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_apod_fetch.in_set(StartupSet::Build))
            .add_systems(Update, finish_apod_fetch.in_set(FrameSet::Load));
    }
}

fn start_apod_fetch(mut commands: Commands, config: Res<SceneConfig>) {
    if !config.features.remote_image {
        return;
    }

    let settings = config.remote_image.clone();
    let task = IoTaskPool::get().spawn(async move { fetch_image(&settings) });
    commands.insert_resource(ApodFetch(task));
    debug!("Picture of the day requested from {}", config.remote_image.endpoint);
}

fn finish_apod_fetch(
    mut commands: Commands,
    fetch: Option<ResMut<ApodFetch>>,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(mut fetch) = fetch else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(&mut fetch.0)) else {
        return;
    };
    commands.remove_resource::<ApodFetch>();

    let image = match result {
        Ok(image) => image,
        Err(err) => {
            warn!("Picture of the day unavailable: {err}");
            return;
        }
    };

    info!("Picture of the day: {} ({}x{})", image.title, image.width, image.height);
    let settings = &config.remote_image;
    let texture = images.add(image.into_texture());
    commands.spawn((
        Name::new("Picture of the Day"),
        Mesh3d(meshes.add(Rectangle::new(settings.plane_size, settings.plane_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(texture),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(settings.plane_position),
        ApodPlane,
        SceneEntity,
    ));
}
