//! Perspective-correct scanline triangle fill
//!
//! Triangles arrive in screen space (x, y in pixels, z still the view-space
//! depth). Any triangle without a horizontal edge is split at its middle
//! vertex into a flat-top and a flat-bottom half; each flat triangle is then
//! walked row by row from its apex toward its flat edge.
//!
//! Attributes are interpolated between [`Vertex::interp`]-prepared vertices
//! and recovered with one [`Vertex::restore`] per pixel, which gives 3D-linear
//! rather than screen-linear results.

use glam::Vec2;

use super::math::{blend, inv_lerp, lerp, remap, to_color};
use super::target::Target;
use super::texture::Sampler;
use super::types::{RasterSettings, Triangle, Vertex, Winding};

/// View-space z is divided by this to get the value stored in the depth buffer
pub const DEPTH_SCALE: f32 = 10000.0;

/// Fills screen-space triangles into a target
pub struct Scanline<'a> {
    target: &'a mut Target,
    sampler: Option<&'a dyn Sampler>,
    settings: &'a RasterSettings,
    /// Viewport size; pixels outside [0, clip.x) x [0, clip.y) are skipped
    clip: Vec2,
}

impl<'a> Scanline<'a> {
    pub fn new(
        target: &'a mut Target,
        sampler: Option<&'a dyn Sampler>,
        settings: &'a RasterSettings,
        clip: Vec2,
    ) -> Self {
        Self {
            target,
            sampler,
            settings,
            clip,
        }
    }

    /// Fill one screen-space triangle.
    ///
    /// Flat (all y equal), back-facing, degenerate, and behind-the-eye
    /// triangles are dropped without drawing anything.
    pub fn fill(&mut self, triangle: &Triangle) {
        let [v0, v1, v2] = &triangle.vertices;
        let (y0, y1, y2) = (v0.pos.y, v1.pos.y, v2.pos.y);

        if y0 == y1 && y1 == y2 {
            return;
        }

        if triangle.winding() != self.settings.front_face {
            return;
        }

        if v0.pos.z <= 0.0 || v1.pos.z <= 0.0 || v2.pos.z <= 0.0 {
            tracing::warn!(
                z0 = v0.pos.z,
                z1 = v1.pos.z,
                z2 = v2.pos.z,
                "triangle behind the eye reached the fill stage; dropped"
            );
            return;
        }

        if y0 != y1 && y1 != y2 && y2 != y0 {
            self.split(triangle);
        } else if y1 == y2 {
            self.fill_flat(v0, v1, v2);
        } else if y0 == y1 {
            // rotate so the odd vertex comes first (rotation keeps winding)
            self.fill(&Triangle::new(*v2, *v0, *v1));
        } else {
            self.fill(&Triangle::new(*v1, *v2, *v0));
        }
    }

    /// Cut a general triangle at its middle vertex's row into two flat ones
    fn split(&mut self, triangle: &Triangle) {
        let mut sorted = triangle.vertices;
        sorted.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        let [top, mid, bottom] = sorted;

        let p = inv_lerp(mid.pos.y, top.pos.y, bottom.pos.y);
        let mut extra = top.interp().lerp(&bottom.interp(), p).restore();

        // depth, color and uv stay perspective-correct, x and y must sit on the screen edge
        extra.pos.x = lerp(top.pos.x, bottom.pos.x, p);
        extra.pos.y = mid.pos.y;

        let sorted_winding = Triangle::new(top, mid, bottom).winding();
        if sorted_winding == Winding::Degenerate {
            return;
        }

        if sorted_winding == self.settings.front_face {
            self.fill(&Triangle::new(top, mid, extra));
            self.fill(&Triangle::new(mid, bottom, extra));
        } else {
            self.fill(&Triangle::new(mid, top, extra));
            self.fill(&Triangle::new(bottom, mid, extra));
        }
    }

    /// Base case: `apex` is alone on its row, `a` and `b` share a row
    fn fill_flat(&mut self, apex: &Vertex, a: &Vertex, b: &Vertex) {
        let y1 = apex.pos.y;
        let y2 = a.pos.y;
        let height = (y2.round() - y1.round()).abs();

        let (left, right) = if a.pos.x < b.pos.x { (a, b) } else { (b, a) };

        let apex_i = apex.interp();
        let left_i = left.interp();
        let right_i = right.interp();

        // Rows are measured as progress from the apex (0) to the flat edge
        // (height); find which progress values land on the viewport
        let (near_edge, far_edge) = if y1 < y2 {
            (0.0, self.clip.y)
        } else {
            (self.clip.y, 0.0)
        };
        let first_row = (remap(near_edge, y1, y2, 0.0, height).round() + 0.5).max(0.5);
        let last_row = (remap(far_edge, y1, y2, 0.0, height).round() - 0.5).min(height);

        for y in pixel_centers(first_row, last_row) {
            let x1 = remap(y, 0.0, height, apex.pos.x, left.pos.x).round();
            let x2 = remap(y, 0.0, height, apex.pos.x, right.pos.x).round();

            let yp = inv_lerp(y, 0.0, height);
            let row = lerp(y1, y2, yp) as i32;

            let first_col = x1.max(0.5);
            let last_col = x2.min(self.clip.x - 0.5);

            for x in pixel_centers(first_col, last_col) {
                // zero-width spans take the left edge
                let xp = if x2 > x1 { inv_lerp(x, x1, x2) } else { 0.0 };
                let vertex = apex_i.lerp(&left_i.lerp(&right_i, xp), yp).restore();

                let mut color = to_color(vertex.color);
                if let Some(sampler) = self.sampler {
                    color = blend(color, sampler.sample(vertex.uv.x, vertex.uv.y));
                }

                self.target.blit(
                    x as i32,
                    row,
                    vertex.pos.z / self.settings.depth_scale,
                    color,
                );
            }
        }
    }
}

/// `first, first + 1, ...` while `<= last`, counted with integers so huge
/// coordinates cannot stall the loop
fn pixel_centers(first: f32, last: f32) -> impl Iterator<Item = f32> {
    let count = if last >= first && first.is_finite() && last.is_finite() {
        (last - first).floor() as i64 + 1
    } else {
        0
    };
    (0..count).map(move |i| first + i as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::types::Color;
    use glam::Vec3;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const W: usize = 64;
    const H: usize = 48;

    fn screen_vert(x: f32, y: f32, z: f32, color: Color) -> Vertex {
        Vertex::new(Vec3::new(x, y, z), color, Vec2::ZERO)
    }

    fn draw(triangles: &[Triangle]) -> Target {
        let mut target = Target::new(W, H);
        let settings = RasterSettings::default();
        let mut scan = Scanline::new(&mut target, None, &settings, Vec2::new(W as f32, H as f32));
        for tri in triangles {
            scan.fill(tri);
        }
        target
    }

    fn covered(target: &Target) -> BTreeSet<(usize, usize)> {
        let mut set = BTreeSet::new();
        for y in 0..target.height {
            for x in 0..target.width {
                if target.depth_at(x, y) != Some(crate::rasterizer::target::DEPTH_CLEAR) {
                    set.insert((x, y));
                }
            }
        }
        set
    }

    /// Put vertices in whichever order faces the default front face
    fn front(a: Vertex, b: Vertex, c: Vertex) -> Triangle {
        let tri = Triangle::new(a, b, c);
        if tri.winding() == Winding::Clockwise {
            tri
        } else {
            tri.reversed()
        }
    }

    #[test]
    fn test_pixel_centers() {
        assert_eq!(pixel_centers(0.5, 3.0).collect::<Vec<_>>(), vec![0.5, 1.5, 2.5]);
        assert_eq!(pixel_centers(2.0, 2.0).collect::<Vec<_>>(), vec![2.0]);
        assert_eq!(pixel_centers(3.0, 2.0).count(), 0);
        assert_eq!(pixel_centers(f32::NAN, 2.0).count(), 0);
    }

    #[test]
    fn test_fills_flat_bottom_triangle() {
        let tri = front(
            screen_vert(20.0, 10.0, 1.0, Color::RED),
            screen_vert(10.0, 30.0, 1.0, Color::RED),
            screen_vert(30.0, 30.0, 1.0, Color::RED),
        );
        let target = draw(&[tri]);
        let pixels = covered(&target);
        assert!(!pixels.is_empty());
        // rows stay between the apex and the flat edge
        assert!(pixels.iter().all(|&(_, y)| (10..30).contains(&y)));
        assert!(pixels.iter().all(|&(x, _)| (10..=30).contains(&x)));
        assert_eq!(target.read(20, 25), Color::RED);
    }

    #[test]
    fn test_back_face_draws_nothing() {
        let tri = front(
            screen_vert(5.0, 5.0, 1.0, Color::RED),
            screen_vert(40.0, 12.0, 1.0, Color::RED),
            screen_vert(15.0, 40.0, 1.0, Color::RED),
        );
        assert!(!covered(&draw(&[tri])).is_empty());
        assert!(covered(&draw(&[tri.reversed()])).is_empty());
    }

    #[test]
    fn test_flat_triangle_draws_nothing() {
        let tri = Triangle::new(
            screen_vert(5.0, 5.0, 1.0, Color::RED),
            screen_vert(40.0, 5.0, 1.0, Color::RED),
            screen_vert(15.0, 5.0, 1.0, Color::RED),
        );
        assert!(covered(&draw(&[tri])).is_empty());
    }

    #[test]
    fn test_behind_eye_draws_nothing() {
        let tri = front(
            screen_vert(5.0, 5.0, -1.0, Color::RED),
            screen_vert(40.0, 12.0, 1.0, Color::RED),
            screen_vert(15.0, 40.0, 1.0, Color::RED),
        );
        assert!(covered(&draw(&[tri])).is_empty());
    }

    #[test]
    fn test_offscreen_parts_are_clipped() {
        let tri = front(
            screen_vert(-100.0, -50.0, 1.0, Color::GREEN),
            screen_vert(200.0, -40.0, 1.0, Color::GREEN),
            screen_vert(30.0, 300.0, 1.0, Color::GREEN),
        );
        let target = draw(&[tri]);
        assert_eq!(target.read(32, 10), Color::GREEN);
    }

    #[test]
    fn test_split_triangle_has_no_gaps_at_middle_row() {
        let tri = front(
            screen_vert(10.0, 4.0, 1.0, Color::BLUE),
            screen_vert(50.0, 20.0, 2.0, Color::BLUE),
            screen_vert(20.0, 44.0, 3.0, Color::BLUE),
        );
        let target = draw(&[tri]);
        let rows: BTreeSet<usize> = covered(&target).iter().map(|&(_, y)| y).collect();
        for y in 5..43 {
            assert!(rows.contains(&y), "row {y} missing");
        }
    }

    #[test]
    fn test_color_interpolates_across_triangle() {
        let tri = front(
            screen_vert(0.0, 0.0, 1.0, Color::BLACK),
            screen_vert(60.0, 0.0, 1.0, Color::WHITE),
            screen_vert(0.0, 46.0, 1.0, Color::BLACK),
        );
        let target = draw(&[tri]);
        let near_black = target.read(2, 2);
        let brighter = target.read(40, 2);
        assert!(brighter.r > near_black.r);
    }

    #[test]
    fn test_texture_modulates_vertex_color() {
        let mut target = Target::new(W, H);
        let settings = RasterSettings::default();
        let tex = crate::rasterizer::texture::Texture::checkerboard(2, 2, 1, Color::GREEN, Color::GREEN);
        let mut scan = Scanline::new(&mut target, Some(&tex as &dyn Sampler), &settings, Vec2::new(W as f32, H as f32));

        let mut a = screen_vert(5.0, 5.0, 1.0, Color::WHITE);
        let mut b = screen_vert(50.0, 5.0, 1.0, Color::WHITE);
        let mut c = screen_vert(5.0, 40.0, 1.0, Color::WHITE);
        a.uv = Vec2::new(0.1, 0.9);
        b.uv = Vec2::new(0.9, 0.9);
        c.uv = Vec2::new(0.1, 0.1);
        scan.fill(&front(a, b, c));

        let px = target.read(10, 10);
        assert_eq!(px.r, 0);
        assert!(px.g >= 254);
    }

    proptest! {
        #[test]
        fn prop_back_faces_write_nothing(
            ax in -20i32..80, ay in -20i32..70,
            bx in -20i32..80, by in -20i32..70,
            cx in -20i32..80, cy in -20i32..70,
            z in 0.5f32..50.0,
        ) {
            let tri = Triangle::new(
                screen_vert(ax as f32, ay as f32, z, Color::RED),
                screen_vert(bx as f32, by as f32, z, Color::RED),
                screen_vert(cx as f32, cy as f32, z, Color::RED),
            );
            if tri.winding() != Winding::Clockwise {
                prop_assert!(covered(&draw(&[tri])).is_empty());
            }
            if tri.reversed().winding() != Winding::Clockwise {
                prop_assert!(covered(&draw(&[tri.reversed()])).is_empty());
            }
        }

        #[test]
        fn prop_flat_fill_symmetric_under_reflection(
            apex_x in 0i32..64, apex_y in 0i32..48,
            ax in -10i32..74, bx in -10i32..74,
            flat_y in 0i32..48,
        ) {
            prop_assume!(apex_y != flat_y && ax != bx);

            let v = |x: i32, y: i32| screen_vert(x as f32, y as f32, 1.0, Color::RED);
            let flip = |y: i32| H as i32 - y;

            let upright = front(v(apex_x, apex_y), v(ax, flat_y), v(bx, flat_y));
            let mirrored = front(v(apex_x, flip(apex_y)), v(ax, flip(flat_y)), v(bx, flip(flat_y)));

            let expected: BTreeSet<(usize, usize)> = covered(&draw(&[upright]))
                .into_iter()
                .map(|(x, y)| (x, H - 1 - y))
                .collect();
            prop_assert_eq!(covered(&draw(&[mirrored])), expected);
        }
    }
}
