//! Linear algebra and other useful mathematics.
//!
//! Vectors and matrices come from [`glam`]; this module re-exports the
//! types the renderer uses and adds the pieces specific to rasterization:
//! support for custom [varying][vary] types, [floating-point][float]
//! functions that also work in `no_std`, and utilities such as
//! [approximate equality][approx] comparisons.

pub use glam::{Mat4, Vec2, Vec3, Vec4, vec2, vec3, vec4};

pub use {
    approx::ApproxEq,
    vary::{Vary, lerp},
};

pub mod approx;
pub mod float;
pub mod vary;

/// An RGB color with `f32` channels, nominally in the range [0, 1].
pub type Color3 = Vec3;
/// An RGBA color with `f32` channels, nominally in the range [0, 1].
pub type Color4 = Vec4;

/// Returns an RGB color with the given channels.
#[inline]
pub const fn rgb(r: f32, g: f32, b: f32) -> Color3 {
    vec3(r, g, b)
}

/// Returns an RGBA color with the given channels.
#[inline]
pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color4 {
    vec4(r, g, b, a)
}
