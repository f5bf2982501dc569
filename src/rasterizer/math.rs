//! Scalar helpers and color conversions
//!
//! Everything in here is a pure function over `f32` or glam vectors.

use glam::Vec4;

use super::types::Color;

/// Linearly interpolate between `a` and `b` over progress `p`
pub fn lerp(a: f32, b: f32, p: f32) -> f32 {
    a + p * (b - a)
}

/// Progress of `x` between `a` and `b`
pub fn inv_lerp(x: f32, a: f32, b: f32) -> f32 {
    (x - a) / (b - a)
}

/// Convert `x` from range [a, b] to range [c, d]
pub fn remap(x: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    lerp(c, d, inv_lerp(x, a, b))
}

/// Clamp `x` into [a, b]
///
/// Unlike `f32::clamp` this never panics when the bounds are inverted.
pub fn clamp(x: f32, a: f32, b: f32) -> f32 {
    x.min(b).max(a)
}

/// Color channels as floats (0-255 per channel)
pub fn to_vec4(color: Color) -> Vec4 {
    Vec4::new(
        color.r as f32,
        color.g as f32,
        color.b as f32,
        color.a as f32,
    )
}

/// Float channels back to a color, saturating at 0 and 255
pub fn to_color(v: Vec4) -> Color {
    Color::with_alpha(
        clamp(v.x, 0.0, 255.0) as u8,
        clamp(v.y, 0.0, 255.0) as u8,
        clamp(v.z, 0.0, 255.0) as u8,
        clamp(v.w, 0.0, 255.0) as u8,
    )
}

/// Multiply two colors channel by channel (white is the identity)
pub fn blend(a: Color, b: Color) -> Color {
    to_color((to_vec4(a) / 255.0) * (to_vec4(b) / 255.0) * 255.0)
}
