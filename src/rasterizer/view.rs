//! Camera pose, viewport, and the world -> view -> screen transforms

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use super::math::{clamp, remap};
use super::types::Triangle;

/// Yaw limit in degrees; looking straight up or down would flip the view
pub const YAW_LIMIT: f32 = 89.9;

/// Camera state. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Heading, rotation about the vertical axis
    pub pitch: f32,
    /// Tilt, rotation about the horizontal axis
    pub yaw: f32,
}

impl Camera {
    pub fn new(position: Vec3, pitch: f32, yaw: f32) -> Self {
        Self {
            position,
            pitch,
            yaw: clamp(yaw, -YAW_LIMIT, YAW_LIMIT),
        }
    }

    /// Turn by the given deltas, keeping yaw inside the limit
    pub fn turn(&mut self, pitch_delta: f32, yaw_delta: f32) {
        self.pitch += pitch_delta;
        self.yaw = clamp(self.yaw + yaw_delta, -YAW_LIMIT, YAW_LIMIT);
    }

    /// Move along axes aligned with the camera's heading (tilt is ignored)
    pub fn advance(&mut self, advance: f32, strafe: f32, ascend: f32) {
        let local = Vec3::new(strafe, ascend, advance);
        self.position += Mat3::from_rotation_y(-self.pitch.to_radians()) * local;
    }

    /// World space -> view space (camera at the origin looking down +z)
    pub fn to_view(&self, world: Vec3) -> Vec3 {
        let heading = Mat3::from_rotation_y(self.pitch.to_radians());
        let tilt = Mat3::from_rotation_x(self.yaw.to_radians());
        tilt * (heading * (world - self.position))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, 0.0)
    }
}

/// Viewport size in pixels and field of view in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
    pub fov: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32, fov: f32) -> Self {
        Self { width, height, fov }
    }

    /// View space -> screen space.
    ///
    /// The projected unit square is fitted to the viewport height and
    /// centered horizontally; y is flipped so it grows downward. z passes
    /// through untouched for depth testing. Callers must keep z positive.
    pub fn project(&self, view: Vec3) -> Vec3 {
        let diff = self.width - self.height;
        let fov_factor = self.fov / 90.0;
        let depth = view.z * fov_factor;

        Vec3::new(
            remap(view.x / depth, -1.0, 1.0, diff / 2.0, self.height + diff / 2.0),
            remap(view.y / depth, -1.0, 1.0, self.height, 0.0),
            view.z,
        )
    }

    /// Project all three vertices, keeping color and uv
    pub fn project_triangle(&self, triangle: &Triangle) -> Triangle {
        triangle.map_positions(|p| self.project(p))
    }
}
