//! Software rasterizer
//!
//! Features:
//! - Near-plane clipping with attribute interpolation
//! - Perspective-correct color and texture coordinates
//! - Scanline fill with sub-pixel row/column bounds
//! - Back-face culling by screen-space winding
//! - Linear z-buffer

mod clip;
mod math;
mod render;
mod scanline;
mod target;
mod texture;
mod types;
mod view;

pub use clip::*;
pub use math::*;
pub use render::*;
pub use scanline::*;
pub use target::*;
pub use texture::*;
pub use types::*;
pub use view::*;

/// Default output resolution
pub const WIDTH: usize = 400;
pub const HEIGHT: usize = 240;
