//! Pipeline orchestration: world -> view -> clip -> screen -> fill

use glam::{Mat4, Vec2};

use super::clip::clip_near;
use super::scanline::Scanline;
use super::target::Target;
use super::texture::Sampler;
use super::types::{Model, RasterSettings, Triangle};
use super::view::{Camera, Screen};

/// Clip a view-space triangle to the near plane, project what is left, and fill it.
///
/// Returns how many screen-space triangles were handed to the filler.
pub fn draw_view_triangle(
    target: &mut Target,
    screen: &Screen,
    triangle: &Triangle,
    sampler: Option<&dyn Sampler>,
    settings: &RasterSettings,
) -> usize {
    let clipped = clip_near(triangle, settings.near_clip);
    let clip_rect = Vec2::new(screen.width, screen.height);
    let mut scan = Scanline::new(target, sampler, settings, clip_rect);

    for tri in clipped.as_slice() {
        scan.fill(&screen.project_triangle(tri));
    }
    clipped.len()
}

/// Draw a single world-space triangle
pub fn draw_world_triangle(
    target: &mut Target,
    camera: &Camera,
    screen: &Screen,
    triangle: &Triangle,
    transform: &Mat4,
    sampler: Option<&dyn Sampler>,
    settings: &RasterSettings,
) -> usize {
    let view = triangle.map_positions(|p| camera.to_view(transform.transform_point3(p)));
    draw_view_triangle(target, screen, &view, sampler, settings)
}

/// Render every triangle of a model.
///
/// Triangles are drawn in model order with no sorting; overlap is resolved
/// by the target's depth test. `sampler`, when present, modulates vertex
/// colors for this model only.
pub fn render_model(
    target: &mut Target,
    camera: &Camera,
    screen: &Screen,
    model: &Model,
    transform: &Mat4,
    sampler: Option<&dyn Sampler>,
    settings: &RasterSettings,
) -> usize {
    model
        .triangles
        .iter()
        .map(|tri| draw_world_triangle(target, camera, screen, tri, transform, sampler, settings))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::target::DEPTH_CLEAR;
    use crate::rasterizer::types::{Color, Vertex};
    use glam::Vec3;

    fn settings() -> RasterSettings {
        RasterSettings::default()
    }

    fn written(target: &Target) -> usize {
        target.depth.iter().filter(|&&d| d != DEPTH_CLEAR).count()
    }

    /// Facing the camera at the origin once projected
    fn facing_tri(z: f32, color: Color) -> Triangle {
        Triangle::new(
            Vertex::new(Vec3::new(-1.0, -1.0, z), color, Vec2::ZERO),
            Vertex::new(Vec3::new(1.0, -1.0, z), color, Vec2::ZERO),
            Vertex::new(Vec3::new(0.0, 1.0, z), color, Vec2::ZERO),
        )
    }

    #[test]
    fn test_view_triangle_in_front_is_drawn() {
        let screen = Screen::new(120.0, 80.0, 60.0);
        let mut target = Target::new(120, 80);
        let n = draw_view_triangle(&mut target, &screen, &facing_tri(3.0, Color::RED), None, &settings());
        assert_eq!(n, 1);
        assert!(written(&target) > 0);
        assert_eq!(target.read(60, 45), Color::RED);
    }

    #[test]
    fn test_view_triangle_behind_is_skipped() {
        let screen = Screen::new(120.0, 80.0, 60.0);
        let mut target = Target::new(120, 80);
        let n = draw_view_triangle(&mut target, &screen, &facing_tri(-3.0, Color::RED), None, &settings());
        assert_eq!(n, 0);
        assert_eq!(written(&target), 0);
    }

    #[test]
    fn test_straddling_triangle_is_clipped_not_dropped() {
        let screen = Screen::new(120.0, 80.0, 60.0);
        let mut target = Target::new(120, 80);
        let tri = Triangle::new(
            Vertex::from_pos(-1.0, -1.0, 2.0),
            Vertex::from_pos(1.0, -1.0, 2.0),
            Vertex::from_pos(0.0, -1.0, -2.0),
        );
        let n = draw_view_triangle(&mut target, &screen, &tri, None, &settings());
        assert_eq!(n, 3);
    }

    #[test]
    fn test_model_transform_applied() {
        let screen = Screen::new(120.0, 80.0, 60.0);
        let model = Model::new(vec![facing_tri(0.0, Color::GREEN)]);
        let camera = Camera::default();

        let mut target = Target::new(120, 80);
        render_model(&mut target, &camera, &screen, &model, &Mat4::IDENTITY, None, &settings());
        assert_eq!(written(&target), 0, "z=0 is on the eye and must not draw");

        let pushed = Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0));
        render_model(&mut target, &camera, &screen, &model, &pushed, None, &settings());
        assert!(written(&target) > 0);
    }
}
