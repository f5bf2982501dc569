//! Viewer state: camera, render target and the loaded scene
//!
//! Platform-independent. The window layer fills in a `FrameInput` each
//! frame, calls `update` then `render`, and presents `target.pixels`.

use std::path::Path;

use glam::Vec2;

use crate::config::Config;
use crate::error::Result;
use crate::rasterizer::{render_model, Camera, Sampler, Screen, Target};
use crate::scene::{Drawable, Scene};

/// Input gathered by the window layer for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// +1 forward, -1 back
    pub advance: f32,
    /// +1 right, -1 left
    pub strafe: f32,
    /// +1 up, -1 down
    pub ascend: f32,
    /// Mouse motion in window pixels since last frame
    pub mouse_delta: Vec2,
    /// Grab the cursor (mouse look on)
    pub capture: bool,
    /// Release the cursor (mouse look off)
    pub release: bool,
}

pub struct App {
    pub config: Config,
    pub target: Target,
    pub screen: Screen,
    pub camera: Camera,
    pub drawables: Vec<Drawable>,
    /// Mouse motion turns the camera only while captured
    pub mouse_captured: bool,
}

impl App {
    /// Build the viewer for `scene`; relative asset paths resolve against `base`
    pub fn new(config: Config, scene: &Scene, base: &Path) -> Self {
        Self {
            target: Target::new(config.width, config.height),
            screen: config.screen(),
            camera: scene.camera,
            drawables: scene.build(base),
            mouse_captured: false,
            config,
        }
    }

    /// Apply one frame of input; `dt` is in seconds
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        // motion on the capturing frame is the cursor jumping into the grab
        let looking = self.mouse_captured && !input.release;
        if input.capture {
            self.mouse_captured = true;
        }
        if input.release {
            self.mouse_captured = false;
        }

        if looking && input.mouse_delta != Vec2::ZERO {
            let sens = self.config.mouse_sensitivity;
            self.camera.turn(-sens * input.mouse_delta.x, -sens * input.mouse_delta.y);
        }

        let step = dt * self.config.move_speed;
        self.camera.advance(step * input.advance, step * input.strafe, step * input.ascend);
    }

    /// Draw every object into the target. Returns the number of
    /// screen-space triangles handed to the filler.
    pub fn render(&mut self) -> usize {
        self.target.clear_surface(self.config.clear_color);
        self.target.clear_depth();

        let mut drawn = 0;
        for drawable in &self.drawables {
            let sampler = drawable.texture.as_ref().map(|t| t as &dyn Sampler);
            drawn += render_model(
                &mut self.target,
                &self.camera,
                &self.screen,
                &drawable.model,
                &drawable.transform,
                sampler,
                &self.config.raster,
            );
        }

        tracing::debug!(
            "frame: {} triangles, camera at {:?} pitch {:.1} yaw {:.1}",
            drawn,
            self.camera.position,
            self.camera.pitch,
            self.camera.yaw
        );
        drawn
    }

    /// Write the last rendered frame to a PNG file
    pub fn screenshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.target.save_png(path)?;
        tracing::info!("saved screenshot {}", path.display());
        Ok(())
    }
}
