//! Scene description - what to draw and from where
//!
//! A scene is a RON file naming a camera pose and a list of objects. Each
//! object points at a model (a file or a built-in shape), an optional
//! texture, and a translation. Broken objects are skipped with a warning
//! so one bad asset never blanks the whole frame.

mod model;
mod shapes;

pub use model::*;
pub use shapes::*;

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rasterizer::{Camera, Color, Model, Texture};

/// Where an object's triangles come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelSource {
    /// Text or RON model file, relative to the scene file
    File(PathBuf),
    Shape(Shape),
}

/// Where an object's texture comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TextureSource {
    /// Image file, relative to the scene file
    File(PathBuf),
    /// Generated checkerboard, `size` pixels square
    Checker {
        size: usize,
        cell: usize,
        a: Color,
        b: Color,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub model: ModelSource,
    #[serde(default)]
    pub texture: Option<TextureSource>,
    #[serde(default)]
    pub translation: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub camera: Camera,
    pub objects: Vec<SceneObject>,
}

/// A scene object with its assets loaded, ready to render
#[derive(Debug, Clone)]
pub struct Drawable {
    pub name: String,
    pub model: Model,
    pub texture: Option<Texture>,
    pub transform: Mat4,
}

impl ModelSource {
    fn name(&self) -> String {
        match self {
            ModelSource::File(path) => path.display().to_string(),
            ModelSource::Shape(shape) => format!("{shape:?}"),
        }
    }

    fn load(&self, base: &Path) -> Result<Model> {
        match self {
            ModelSource::File(path) => load_model(base.join(path)),
            ModelSource::Shape(shape) => Ok(shape.build()),
        }
    }
}

impl TextureSource {
    fn load(&self, base: &Path) -> Result<Texture> {
        match self {
            TextureSource::File(path) => Texture::from_file(base.join(path)),
            TextureSource::Checker { size, cell, a, b } => {
                Ok(Texture::checkerboard(*size, *size, *cell, *a, *b))
            }
        }
    }
}

impl Scene {
    /// Built-in scene: a textured floor, a crate, a colored triangle and a spike
    pub fn demo() -> Self {
        let checker = |cell, a, b| {
            Some(TextureSource::Checker {
                size: 64,
                cell,
                a,
                b,
            })
        };

        Self {
            camera: Camera::new(Vec3::new(3.5, 1.5, -2.0), 45.0, -20.0),
            objects: vec![
                SceneObject {
                    model: ModelSource::Shape(Shape::Floor),
                    texture: checker(8, Color::new(90, 140, 90), Color::new(50, 90, 50)),
                    translation: Vec3::ZERO,
                },
                SceneObject {
                    model: ModelSource::Shape(Shape::Crate),
                    texture: checker(16, Color::new(200, 150, 90), Color::new(120, 80, 40)),
                    translation: Vec3::ZERO,
                },
                SceneObject {
                    model: ModelSource::Shape(Shape::Triangle),
                    texture: None,
                    translation: Vec3::ZERO,
                },
                SceneObject {
                    model: ModelSource::Shape(Shape::Spike),
                    texture: None,
                    translation: Vec3::new(-2.0, 0.0, 2.0),
                },
            ],
        }
    }

    /// Load every object's assets; `base` anchors relative paths.
    ///
    /// Objects whose model fails to load are dropped. A texture that fails
    /// to load leaves its object untextured.
    pub fn build(&self, base: &Path) -> Vec<Drawable> {
        let mut drawables = Vec::with_capacity(self.objects.len());

        for object in &self.objects {
            let name = object.model.name();
            let model = match object.model.load(base) {
                Ok(model) => model,
                Err(e) => {
                    tracing::warn!("skipping {}: {}", name, e);
                    continue;
                }
            };

            let texture = object.texture.as_ref().and_then(|source| match source.load(base) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    tracing::warn!("{} drawn untextured: {}", name, e);
                    None
                }
            });

            drawables.push(Drawable {
                name,
                model,
                texture,
                transform: Mat4::from_translation(object.translation),
            });
        }

        tracing::info!(
            "scene ready: {} of {} objects, {} triangles",
            drawables.len(),
            self.objects.len(),
            drawables.iter().map(|d| d.model.len()).sum::<usize>()
        );
        drawables
    }
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a RON string
pub fn load_scene_from_str(s: &str) -> Result<Scene> {
    Ok(ron::from_str(s)?)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}
