//! Texture sources and nearest-neighbor sampling

use std::path::Path;

use image::GenericImageView;

use super::types::Color;
use crate::error::Result;

/// Anything the rasterizer can read texels from
pub trait Sampler {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Texel at `(x, y)`, or `None` outside the surface
    fn texel(&self, x: usize, y: usize) -> Option<Color>;

    /// Nearest-neighbor sample at normalized coordinates.
    ///
    /// `u` spans [0, width) left to right, `v` spans [height, 0) so that
    /// v=1 is the top row. Anything outside the surface reads as opaque black.
    fn sample(&self, u: f32, v: f32) -> Color {
        let x = (u * self.width() as f32).floor();
        let y = ((1.0 - v) * self.height() as f32).floor();

        if x < 0.0 || y < 0.0 || x.is_nan() || y.is_nan() {
            return Color::BLACK;
        }

        self.texel(x as usize, y as usize).unwrap_or(Color::BLACK)
    }
}

/// Simple texture (array of colors)
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::WHITE; width * height],
            name: String::new(),
        }
    }

    /// Load texture from an image file (png, jpeg or bmp)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let texture = Self::from_image(&img, name);
        tracing::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Load texture from encoded image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&img, name))
    }

    fn from_image(img: &image::DynamicImage, name: String) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .to_rgba8()
            .pixels()
            .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
            .collect();

        Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        }
    }

    /// Checkerboard of `cell`-sized squares
    pub fn checkerboard(width: usize, height: usize, cell: usize, color1: Color, color2: Color) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / cell) + (y / cell)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self {
            width,
            height,
            pixels,
            name: "checkerboard".to_string(),
        }
    }

    /// Get pixel at x,y coordinates
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        self.texel(x, y).unwrap_or(Color::BLACK)
    }
}

impl Sampler for Texture {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn texel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x).copied()
        } else {
            None
        }
    }
}
