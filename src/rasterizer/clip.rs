//! Near-plane clipping of view-space triangles

use super::math::inv_lerp;
use super::types::{Triangle, Vertex};

/// Default near plane distance in view space
pub const NEAR_CLIP: f32 = 0.1;

/// Result of clipping one triangle: zero, one or three triangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clipped {
    /// Entirely behind the plane
    Culled,
    /// Entirely in front; passed through unchanged
    Whole(Triangle),
    /// Two vertices were behind the plane
    Trimmed(Triangle),
    /// One vertex was behind the plane; the remaining quad is split in three
    Split([Triangle; 3]),
}

impl Clipped {
    pub fn as_slice(&self) -> &[Triangle] {
        match self {
            Clipped::Culled => &[],
            Clipped::Whole(tri) | Clipped::Trimmed(tri) => std::slice::from_ref(tri),
            Clipped::Split(tris) => tris,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Clipped::Culled)
    }
}

/// Point on edge `from -> to` where it crosses the plane, all attributes interpolated
fn crossing(from: &Vertex, to: &Vertex, plane: f32) -> Vertex {
    from.lerp(to, inv_lerp(plane, from.pos.z, to.pos.z))
}

/// Clip a view-space triangle against `z = plane`.
///
/// A vertex is behind the plane when its z is strictly less than `plane`.
/// Every output triangle keeps the input's winding order.
pub fn clip_near(triangle: &Triangle, plane: f32) -> Clipped {
    let verts = &triangle.vertices;
    let behind = [
        verts[0].pos.z < plane,
        verts[1].pos.z < plane,
        verts[2].pos.z < plane,
    ];

    match behind.iter().filter(|&&b| b).count() {
        0 => Clipped::Whole(*triangle),
        3 => Clipped::Culled,
        1 => {
            // rotate so the clipped vertex comes first; rotation keeps winding
            let i = behind.iter().position(|&b| b).unwrap_or(0);
            let (a, b, c) = (&verts[i], &verts[(i + 1) % 3], &verts[(i + 2) % 3]);

            let to_b = crossing(a, b, plane);
            let to_c = crossing(a, c, plane);
            let mid = b.lerp(c, 0.5);

            Clipped::Split([
                Triangle::new(to_b, *b, mid),
                Triangle::new(to_c, to_b, mid),
                Triangle::new(to_c, mid, *c),
            ])
        }
        _ => {
            // the one vertex in front comes first
            let i = behind.iter().position(|&b| !b).unwrap_or(0);
            let (a, b, c) = (&verts[i], &verts[(i + 1) % 3], &verts[(i + 2) % 3]);

            Clipped::Trimmed(Triangle::new(*a, crossing(a, b, plane), crossing(a, c, plane)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::types::Color;
    use crate::rasterizer::view::Screen;
    use glam::{Vec2, Vec3};
    use proptest::prelude::*;

    fn vert(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::from_pos(x, y, z)
    }

    fn tri(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(vert(a[0], a[1], a[2]), vert(b[0], b[1], b[2]), vert(c[0], c[1], c[2]))
    }

    #[test]
    fn test_fully_in_front_is_identity() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 2.0], [0.0, 1.0, 3.0]);
        assert_eq!(clip_near(&t, NEAR_CLIP), Clipped::Whole(t));
        assert_eq!(clip_near(&t, NEAR_CLIP).as_slice(), &[t]);
    }

    #[test]
    fn test_fully_behind_is_culled() {
        let t = tri([0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.05]);
        let clipped = clip_near(&t, NEAR_CLIP);
        assert!(clipped.is_empty());
        assert_eq!(clipped.len(), 0);
    }

    #[test]
    fn test_vertex_on_plane_is_kept() {
        let t = tri([0.0, 0.0, NEAR_CLIP], [1.0, 0.0, 2.0], [0.0, 1.0, 3.0]);
        assert_eq!(clip_near(&t, NEAR_CLIP), Clipped::Whole(t));
    }

    #[test]
    fn test_two_behind_yields_one_on_plane() {
        let t = tri([0.0, 0.0, 2.0], [1.0, 0.0, -2.0], [0.0, 1.0, -2.0]);
        let clipped = clip_near(&t, NEAR_CLIP);
        assert_eq!(clipped.len(), 1);
        let out = clipped.as_slice()[0];
        assert_eq!(out.vertices[0], t.vertices[0]);
        assert!((out.vertices[1].pos.z - NEAR_CLIP).abs() < 1e-5);
        assert!((out.vertices[2].pos.z - NEAR_CLIP).abs() < 1e-5);
    }

    #[test]
    fn test_crossing_interpolates_every_attribute() {
        let a = Vertex::new(Vec3::new(0.0, 0.0, -1.0), Color::BLACK, Vec2::new(0.0, 0.0));
        let b = Vertex::new(Vec3::new(0.0, 0.0, 1.0), Color::WHITE, Vec2::new(1.0, 1.0));
        let v = crossing(&a, &b, 0.0);
        assert!(v.pos.z.abs() < 1e-6);
        assert!((v.color.x - 127.5).abs() < 1e-3);
        assert!((v.uv - Vec2::splat(0.5)).length() < 1e-6);
    }

    fn quad_area(points: [Vec3; 4]) -> f32 {
        // shoelace
        let mut sum = 0.0;
        for i in 0..4 {
            let p = points[i];
            let q = points[(i + 1) % 4];
            sum += p.x * q.y - q.x * p.y;
        }
        (sum * 0.5).abs()
    }

    #[test]
    fn test_one_behind_splits_into_three() {
        let screen = Screen::new(600.0, 400.0, 60.0);
        let t = tri([0.0, 1.0, -1.0], [1.0, -1.0, 3.0], [-1.0, -1.0, 2.0]);
        let clipped = clip_near(&t, NEAR_CLIP);
        assert_eq!(clipped.len(), 3);

        for out in clipped.as_slice() {
            assert_eq!(out.winding(), t.winding());
        }

        let [a, b, c] = t.vertices;
        let visible = [
            crossing(&a, &b, NEAR_CLIP).xyz(),
            b.xyz(),
            c.xyz(),
            crossing(&a, &c, NEAR_CLIP).xyz(),
        ]
        .map(|p| screen.project(p));

        let sum: f32 = clipped
            .as_slice()
            .iter()
            .map(|out| screen.project_triangle(out).signed_area().abs())
            .sum();
        let expected = quad_area(visible);
        assert!((sum - expected).abs() / expected < 1e-3, "{sum} vs {expected}");
    }

    fn coord() -> impl Strategy<Value = f32> {
        -10.0f32..10.0
    }

    fn depth() -> impl Strategy<Value = f32> {
        -5.0f32..20.0
    }

    prop_compose! {
        fn any_triangle()(
            ax in coord(), ay in coord(), az in depth(),
            bx in coord(), by in coord(), bz in depth(),
            cx in coord(), cy in coord(), cz in depth(),
        ) -> Triangle {
            tri([ax, ay, az], [bx, by, bz], [cx, cy, cz])
        }
    }

    proptest! {
        #[test]
        fn prop_outputs_are_in_front(t in any_triangle()) {
            for out in clip_near(&t, NEAR_CLIP).as_slice() {
                for v in &out.vertices {
                    prop_assert!(v.pos.z >= NEAR_CLIP - 1e-4);
                }
            }
        }

        #[test]
        fn prop_count_matches_clipped_vertices(t in any_triangle()) {
            let behind = t.vertices.iter().filter(|v| v.pos.z < NEAR_CLIP).count();
            let expected = match behind {
                0 => 1,
                1 => 3,
                2 => 1,
                _ => 0,
            };
            prop_assert_eq!(clip_near(&t, NEAR_CLIP).len(), expected);
        }
    }
}
