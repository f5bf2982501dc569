//! Core types for the rasterizer

use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use serde::{Deserialize, Serialize};

use super::clip::NEAR_CLIP;
use super::math::to_vec4;
use super::scanline::DEPTH_SCALE;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::with_alpha(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

/// A vertex with homogeneous position, float color (0-255) and texture coordinate
///
/// `pos.w` is 1 for ordinary vertices. Between [`Vertex::interp`] and
/// [`Vertex::restore`] it carries `1/z` instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: Vec4,
    pub color: Vec4,
    pub uv: Vec2,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            pos: Vec4::W,
            color: Vec4::splat(255.0),
            uv: Vec2::ZERO,
        }
    }
}

impl Vertex {
    pub fn new(pos: Vec3, color: Color, uv: Vec2) -> Self {
        Self {
            pos: pos.extend(1.0),
            color: to_vec4(color),
            uv,
        }
    }

    /// White vertex at `pos`
    pub fn from_pos(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec4::new(x, y, z, 1.0),
            ..Self::default()
        }
    }

    /// Same attributes, different position (w reset to 1)
    pub fn with_pos(self, pos: Vec3) -> Self {
        Self {
            pos: pos.extend(1.0),
            ..self
        }
    }

    pub fn xyz(&self) -> Vec3 {
        self.pos.truncate()
    }

    /// Prepare for screen-space interpolation: store `1/z` in w and scale
    /// every other attribute by it
    pub fn interp(&self) -> Vertex {
        let w = 1.0 / self.pos.z;
        Vertex {
            pos: (self.pos.truncate() * w).extend(w),
            color: self.color * w,
            uv: self.uv * w,
        }
    }

    /// Undo [`Vertex::interp`] after interpolating: divide everything by w
    pub fn restore(&self) -> Vertex {
        let w = self.pos.w;
        Vertex {
            pos: (self.pos.truncate() / w).extend(1.0),
            color: self.color / w,
            uv: self.uv / w,
        }
    }

    /// Interpolate every attribute with the same parameter
    pub fn lerp(&self, other: &Vertex, p: f32) -> Vertex {
        Vertex {
            pos: self.pos.lerp(other.pos, p),
            color: self.color.lerp(other.color, p),
            uv: self.uv.lerp(other.uv, p),
        }
    }
}

/// Orientation of a triangle in screen space
///
/// Named for a y-up frame: on a y-down screen a `Clockwise` triangle
/// appears counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Collinear or zero-area; never drawn
    Degenerate,
}

/// Three vertices, ordered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self { vertices: [v0, v1, v2] }
    }

    /// Winding order from the xy components of the positions
    pub fn winding(&self) -> Winding {
        let [a, b, c] = &self.vertices;
        let span01 = b.pos.xy() - a.pos.xy();
        let span02 = c.pos.xy() - a.pos.xy();
        let normal = Vec2::new(span01.y, -span01.x);
        let d = normal.dot(span02);

        if d > 0.0 {
            Winding::Clockwise
        } else if d < 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Degenerate
        }
    }

    /// Same triangle with the opposite winding
    pub fn reversed(&self) -> Triangle {
        let [a, b, c] = self.vertices;
        Triangle::new(a, c, b)
    }

    /// Apply `f` to every vertex position, keeping color and uv
    pub fn map_positions(&self, mut f: impl FnMut(Vec3) -> Vec3) -> Triangle {
        let [a, b, c] = self.vertices;
        Triangle::new(
            a.with_pos(f(a.xyz())),
            b.with_pos(f(b.xyz())),
            c.with_pos(f(c.xyz())),
        )
    }

    /// Signed area of the xy projection (positive for `Winding::Clockwise`)
    pub fn signed_area(&self) -> f32 {
        let [a, b, c] = &self.vertices;
        let (ax, ay) = (a.pos.x, a.pos.y);
        let (bx, by) = (b.pos.x, b.pos.y);
        let (cx, cy) = (c.pos.x, c.pos.y);
        ((by - ay) * (cx - ax) - (bx - ax) * (cy - ay)) * 0.5
    }
}

/// Every triangle carries its own vertices; there is no index buffer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub triangles: Vec<Triangle>,
}

impl Model {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }
}

/// Rasterizer settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSettings {
    /// View-space distance of the near clip plane
    pub near_clip: f32,
    /// Only triangles with this winding on screen are drawn
    pub front_face: Winding,
    /// View-space z is divided by this before the depth test
    pub depth_scale: f32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            near_clip: NEAR_CLIP,
            front_face: Winding::Clockwise,
            depth_scale: DEPTH_SCALE,
        }
    }
}
