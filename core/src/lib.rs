//! ```text
//!                      __
//!    _____ ____ ______/ /_______  ______ ___
//!   / ___/ __ `/ ___/ __/ ___/ / / / __ `__ \
//!  / /  / /_/ (__  ) /_/ /  / /_/ / / / / / /
//! /_/   \__,_/____/\__/_/   \__,_/_/ /_/ /_/
//! ```
//!
//! Core functionality of the `rastrum` project.
//!
//! A software triangle rasterizer with programmable shaders: vertices are
//! transformed by a vertex shader, clipped against the view volume,
//! projected to the screen, and rasterized into a [framebuffer] of color
//! and depth values, with a fragment shader computing the color of each
//! covered pixel.
//!
//! Vector and matrix types come from [`glam`].
//!
//! # Crate features
//!
//! * `std`:
//!   Makes available items requiring I/O or timekeeping, and uses the
//!   floating-point functions of `std`. Enabled by default.
//!
//!   If this feature is disabled, the crate only depends on `alloc`.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate. Needed in `no_std` builds.
//!
//! [framebuffer]: render::target::Framebuffer

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

pub mod geom;
pub mod math;
pub mod render;
pub mod util;

/// Prelude module exporting the most commonly used items.
pub mod prelude {
    pub use crate::math::{
        Color3, Color4, Mat4, Vary, Vec2, Vec3, Vec4, lerp, rgb, rgba, vec2,
        vec3, vec4,
    };

    pub use crate::geom::{
        ModelVertex, Normal3, TexCoord, Tri, Vertex, tri, vertex,
    };

    pub use crate::render::{
        Varyings,
        ctx::{Context, DepthFunc},
        draw, draw_all,
        shader::{FragmentShader, Program, Uniforms, VertexShader},
        stats::Stats,
        target::Framebuffer,
        tex::{Sample, Texture, Wrap},
    };

    pub use crate::util::buf::Buf2;
}
