//! Built-in meshes for the demo scene
//!
//! Every face is wound so it is drawn when seen from outside the shape.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::rasterizer::{Color, Model, Triangle, Vertex};

/// Procedural model that can be named from a scene file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Textured 6x6 ground quad at y = 0
    Floor,
    /// Unit cube resting on y = 0, one full texture per face
    Crate,
    /// Upright triangle with red, green and blue corners
    Triangle,
    /// Square pyramid resting on y = 0
    Spike,
}

impl Shape {
    pub fn build(self) -> Model {
        match self {
            Shape::Floor => floor(3.0),
            Shape::Crate => crate_box(0.5),
            Shape::Triangle => color_triangle(),
            Shape::Spike => spike(0.4, 1.2),
        }
    }
}

/// Order `a b c` so the triangle faces along `outward`
fn facing(a: Vertex, b: Vertex, c: Vertex, outward: Vec3) -> Triangle {
    let tri = Triangle::new(a, b, c);
    let normal = (b.xyz() - a.xyz()).cross(c.xyz() - a.xyz());
    // screen-space front faces have their geometric normal pointing away from the eye
    if normal.dot(outward) > 0.0 {
        tri.reversed()
    } else {
        tri
    }
}

fn quad(corners: [Vec3; 4], uvs: [Vec2; 4], color: Color, outward: Vec3) -> [Triangle; 2] {
    let v = |i: usize| Vertex::new(corners[i], color, uvs[i]);
    [
        facing(v(0), v(1), v(2), outward),
        facing(v(0), v(2), v(3), outward),
    ]
}

const FULL_UV: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

pub fn floor(half: f32) -> Model {
    let corners = [
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, 0.0, -half),
        Vec3::new(half, 0.0, half),
        Vec3::new(-half, 0.0, half),
    ];
    Model::new(quad(corners, FULL_UV, Color::WHITE, Vec3::Y).to_vec())
}

pub fn crate_box(half: f32) -> Model {
    let center = Vec3::new(0.0, half, 0.0);
    let mut triangles = Vec::with_capacity(12);

    for axis in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
        // two in-plane directions for this face
        let (u, v) = if axis.y != 0.0 {
            (Vec3::X, Vec3::Z)
        } else {
            (axis.cross(Vec3::Y).normalize(), Vec3::Y)
        };
        let mid = center + axis * half;
        let corners = [
            mid - u * half - v * half,
            mid + u * half - v * half,
            mid + u * half + v * half,
            mid - u * half + v * half,
        ];
        triangles.extend(quad(corners, FULL_UV, Color::WHITE, axis));
    }

    Model::new(triangles)
}

pub fn color_triangle() -> Model {
    let a = Vertex::new(Vec3::new(0.5, 0.0, 2.0), Color::RED, Vec2::new(0.0, 0.0));
    let b = Vertex::new(Vec3::new(2.0, 0.0, 2.0), Color::GREEN, Vec2::new(1.0, 0.0));
    let c = Vertex::new(Vec3::new(1.25, 1.2, 2.0), Color::BLUE, Vec2::new(0.5, 1.0));
    Model::new(vec![facing(a, b, c, Vec3::NEG_Z)])
}

pub fn spike(half: f32, height: f32) -> Model {
    let apex = Vec3::new(0.0, height, 0.0);
    let base = [
        Vec3::new(-half, 0.0, -half),
        Vec3::new(half, 0.0, -half),
        Vec3::new(half, 0.0, half),
        Vec3::new(-half, 0.0, half),
    ];
    let colors = [
        Color::new(200, 60, 60),
        Color::new(200, 160, 60),
        Color::new(60, 160, 200),
        Color::new(160, 60, 200),
    ];

    let mut triangles = Vec::with_capacity(6);
    for i in 0..4 {
        let (p, q) = (base[i], base[(i + 1) % 4]);
        let outward = ((p + q) * 0.5).normalize();
        triangles.push(facing(
            Vertex::new(p, colors[i], Vec2::ZERO),
            Vertex::new(q, colors[i], Vec2::X),
            Vertex::new(apex, Color::WHITE, Vec2::new(0.5, 1.0)),
            outward,
        ));
    }
    let dark = Color::new(40, 40, 40);
    triangles.extend(quad(base, FULL_UV, dark, Vec3::NEG_Y));

    Model::new(triangles)
}
