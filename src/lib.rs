//! Bearer-authenticated relay to an image-to-3D generation API, with a flat
//! file cache of the generated models.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
