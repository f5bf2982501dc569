//! smolsoft3d: a small CPU software rasterizer
//!
//! Turns triangles, a camera pose and an optional texture into pixels:
//! - View transform and near-plane clipping
//! - Perspective projection with a horizontal field of view
//! - Perspective-correct scanline fill with a per-pixel depth test
//! - Nearest-neighbor texture sampling, multiplied into vertex color

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod config;
pub mod error;
pub mod rasterizer;
pub mod scene;

pub use error::{Error, Result};
