//! Render target: RGBA pixels plus a parallel depth buffer

use std::path::Path;

use image::{ImageBuffer, Rgba};

use super::texture::Sampler;
use super::types::Color;
use crate::error::Result;

/// Depth value of an empty cell (furthest possible)
pub const DEPTH_CLEAR: f32 = 1.0;

/// Framebuffer for software rendering
pub struct Target {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub depth: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl Target {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            depth: vec![DEPTH_CLEAR; width * height],
            width,
            height,
        }
    }

    /// Fill every pixel with `color`
    pub fn clear_surface(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&bytes);
        }
    }

    /// Reset every depth cell to [`DEPTH_CLEAR`]; call once per frame before drawing
    pub fn clear_depth(&mut self) {
        self.depth.fill(DEPTH_CLEAR);
    }

    /// Depth-tested pixel write.
    ///
    /// Writes only when `(x, y)` is on the target and `depth` is strictly
    /// nearer than what is stored. Returns whether the pixel was written.
    pub fn blit(&mut self, x: i32, y: i32, depth: f32, color: Color) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }

        let idx = y as usize * self.width + x as usize;
        if depth < self.depth[idx] {
            self.depth[idx] = depth;
            let pixel_idx = idx * 4;
            self.pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bytes());
            return true;
        }
        false
    }

    /// Current color at `(x, y)`; black outside the target
    pub fn read(&self, x: usize, y: usize) -> Color {
        self.texel(x, y).unwrap_or(Color::BLACK)
    }

    /// Stored depth at `(x, y)`
    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depth[y * self.width + x])
        } else {
            None
        }
    }

    /// Write the color buffer to an image file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let img: ImageBuffer<Rgba<u8>, &[u8]> =
            ImageBuffer::from_raw(self.width as u32, self.height as u32, self.pixels.as_slice())
                .ok_or(crate::Error::BufferSize)?;
        img.save(path.as_ref())?;
        tracing::info!("saved {}", path.as_ref().display());
        Ok(())
    }
}

impl Sampler for Target {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn texel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(Color::from_bytes(bytes))
        } else {
            None
        }
    }
}
