//! Orrery - Interactive Solar System Scene
//!
//! A library crate providing the orbit model, scene builder, frame clock
//! and hover picking for testing and integration purposes.

pub mod apod;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod hover;
pub mod input;
pub mod orbit;
pub mod pick;
pub mod render;
pub mod session;
pub mod time;
pub mod types;

#[cfg(test)]
pub mod test_utils;
