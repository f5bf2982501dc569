//! Viewer configuration
//!
//! Read from a RON file; every field is optional and falls back to the
//! built-in default.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rasterizer::{Color, RasterSettings, Screen, HEIGHT, WIDTH};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "smolsoft3d.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render target size in pixels
    pub width: usize,
    pub height: usize,
    /// Horizontal field of view in degrees
    pub fov: f32,
    /// Window size is the target size times this
    pub window_scale: u32,
    /// Degrees of turn per pixel of mouse motion
    pub mouse_sensitivity: f32,
    /// Units per second
    pub move_speed: f32,
    pub clear_color: Color,
    /// Scene file; the built-in demo is used when it cannot be read
    pub scene: PathBuf,
    /// `tracing` filter used when RUST_LOG is unset
    pub log_filter: String,
    pub raster: RasterSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            fov: 60.0,
            window_scale: 3,
            mouse_sensitivity: 0.2,
            move_speed: 2.2,
            clear_color: Color::BLACK,
            scene: PathBuf::from("assets/scene.ron"),
            log_filter: "info".to_string(),
            raster: RasterSettings::default(),
        }
    }
}

impl Config {
    pub fn from_ron(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_ron(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Like `load`, but a broken file is reported and replaced by the defaults.
    ///
    /// Returns the error alongside so the caller can log it once logging is up.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<Error>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn screen(&self) -> Screen {
        Screen::new(self.width as f32, self.height as f32, self.fov)
    }
}
