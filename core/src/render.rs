//! Turning 3D geometry into raster images.
//!
//! This module constitutes the core rendering pipeline of `rastrum`.
//! It contains code for [clipping][clip], [transforming, shading][shader],
//! [texturing][tex], [rasterizing][raster], and [outputting][target]
//! triangles.
//!
//! The pipeline for a single triangle is:
//!
//! 1. The [vertex shader][shader::VertexShader] maps each of the three
//!    vertices to clip space and computes its varyings.
//! 2. The triangle is [clipped][clip] against the view volume, resulting
//!    in a convex polygon of up to [`MAX_VERTS`][clip::MAX_VERTS] vertices.
//! 3. Each vertex of the polygon is mapped to normalized device coordinates
//!    and then to screen space.
//! 4. The polygon is split into a fan of triangles, and each triangle is
//!    [rasterized][raster] into the framebuffer, invoking the
//!    [fragment shader][shader::FragmentShader] for each visible pixel.

use crate::geom::{ModelVertex, Tri};
use crate::math::{Vary, Vec4};

use clip::Clipper;
use shader::{FragmentShader, Program, Uniforms, VertexShader};
use stats::Stats;
use target::Framebuffer;

pub mod blinn;
pub mod clip;
pub mod ctx;
pub mod raster;
pub mod shader;
pub mod stats;
pub mod target;
pub mod tex;

/// The per-vertex output of a vertex shader, and the per-pixel input of a
/// fragment shader.
///
/// Shaders only ever set `clip_pos` and `var`; the pipeline computes the
/// other positions as the values flow through the clipper and rasterizer.
/// In a fragment shader, `frag_pos.xy` is the pixel center and
/// `frag_pos.z` the depth of the fragment.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Varyings<A> {
    /// Homogeneous clip-space position.
    pub clip_pos: Vec4,
    /// Normalized device coordinates, with W replaced by 1/W<sub>clip</sub>.
    pub ndc_pos: Vec4,
    /// Screen-space position in pixels, depth in [0, 1] as Z, and
    /// 1/W<sub>clip</sub> as W.
    pub frag_pos: Vec4,
    /// Custom varyings interpolated across the triangle.
    pub var: A,
}

impl<A> Varyings<A> {
    /// Returns new varyings with the given clip-space position and custom
    /// varyings. The NDC and screen positions are zero.
    #[inline]
    pub const fn new(clip_pos: Vec4, var: A) -> Self {
        Self {
            clip_pos,
            ndc_pos: Vec4::ZERO,
            frag_pos: Vec4::ZERO,
            var,
        }
    }

    /// Computes `ndc_pos` and `frag_pos` from `clip_pos` for a viewport
    /// of size `w` × `h` pixels.
    ///
    /// The perspective divide maps the clip-space position to normalized
    /// device coordinates in [-1, 1]³; these are then mapped to pixel
    /// coordinates X ∈ [0, `w`] and Y ∈ [0, `h`], Y pointing up, and depth
    /// Z ∈ [0, 1].
    ///
    /// # Examples
    /// ```
    /// use rastrum_core::render::Varyings;
    /// use rastrum_core::math::vec4;
    ///
    /// let mut v = Varyings::new(vec4(1.0, -2.0, 0.0, 2.0), ());
    /// v.project(100.0, 50.0);
    /// assert_eq!(v.ndc_pos, vec4(0.5, -1.0, 0.0, 0.5));
    /// assert_eq!(v.frag_pos, vec4(75.0, 0.0, 0.5, 0.5));
    /// ```
    #[inline]
    pub fn project(&mut self, w: f32, h: f32) {
        let recip_w = 1.0 / self.clip_pos.w;
        let ndc = self.clip_pos * recip_w;
        self.ndc_pos = ndc.truncate().extend(recip_w);
        self.frag_pos = Vec4::new(
            (ndc.x + 1.0) * 0.5 * w,
            (ndc.y + 1.0) * 0.5 * h,
            (ndc.z + 1.0) * 0.5,
            recip_w,
        );
    }
}

impl<A: Vary> Vary for Varyings<A> {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            clip_pos: Vary::lerp(&self.clip_pos, &other.clip_pos, t),
            ndc_pos: Vary::lerp(&self.ndc_pos, &other.ndc_pos, t),
            frag_pos: Vary::lerp(&self.frag_pos, &other.frag_pos, t),
            var: self.var.lerp(&other.var, t),
        }
    }

    fn weighted([a, b, c]: [&Self; 3], ws: [f32; 3]) -> Self {
        Self {
            clip_pos: Vary::weighted([&a.clip_pos, &b.clip_pos, &c.clip_pos], ws),
            ndc_pos: Vary::weighted([&a.ndc_pos, &b.ndc_pos, &c.ndc_pos], ws),
            frag_pos: Vary::weighted([&a.frag_pos, &b.frag_pos, &c.frag_pos], ws),
            var: A::weighted([&a.var, &b.var, &c.var], ws),
        }
    }
}

/// Draws a single triangle into `fb`.
///
/// Shades the vertices of `tri` with the program's vertex shader, clips the
/// result against the view volume, and rasterizes what remains using the
/// program's fragment shader and pipeline state. `uni` is passed to both
/// shaders. Returns statistics of the work done.
///
/// # Panics
/// In debug builds, if the model-space position of a vertex does not have
/// W = 1.
pub fn draw<Vtx, Uni, Vs, Fs>(
    fb: &mut Framebuffer,
    prog: &Program<Vs, Fs>,
    tri: &Tri<Vtx>,
    uni: &Uni,
) -> Stats
where
    Vtx: ModelVertex,
    Uni: Uniforms,
    Vs: VertexShader<Vtx, Uni>,
    Vs::Var: Vary + Clone,
    Fs: FragmentShader<Vs::Var, Uni>,
{
    draw_all(fb, prog, core::slice::from_ref(tri), uni)
}

/// Draws triangles into `fb`, in order.
///
/// Equivalent to calling [`draw`] for each triangle in `tris`, but reuses
/// the same clipping buffers for the whole slice.
///
/// # Panics
/// In debug builds, if the model-space position of a vertex does not have
/// W = 1.
pub fn draw_all<Vtx, Uni, Vs, Fs>(
    fb: &mut Framebuffer,
    prog: &Program<Vs, Fs>,
    tris: &[Tri<Vtx>],
    uni: &Uni,
) -> Stats
where
    Vtx: ModelVertex,
    Uni: Uniforms,
    Vs: VertexShader<Vtx, Uni>,
    Vs::Var: Vary + Clone,
    Fs: FragmentShader<Vs::Var, Uni>,
{
    let mut stats = Stats::start();
    stats.calls = 1.0;

    let mut clipper = Clipper::new();
    let (w, h) = (fb.width() as f32, fb.height() as f32);

    for Tri(vs) in tris {
        stats.prims.i += 1;
        stats.verts.i += 3;

        // Vertex shader
        let clip_vs = vs.each_ref().map(|v| {
            debug_assert_eq!(v.model_pos().w, 1.0, "model-space W must be 1");
            prog.vertex_shader.shade_vertex(v, uni)
        });

        let poly = clipper.clip(clip_vs);
        stats.verts.o += poly.len();

        // Perspective divide and viewport transform
        for v in poly.iter_mut() {
            v.project(w, h);
        }

        for tri in fan(poly) {
            let frags = raster::tri_fill(
                fb,
                &prog.ctx,
                &prog.fragment_shader,
                uni,
                tri,
            );
            if let Some(frags) = frags {
                stats.prims.o += 1;
                stats.frags += frags;
            }
        }
    }
    stats.finish()
}

/// Returns the fan of triangles covering a convex polygon.
///
/// The polygon `v0, v1, ..., vn` yields `n - 1` triangles
/// `(v0, v1, v2), (v0, v2, v3), ..., (v0, vn-1, vn)`. Polygons with fewer
/// than three vertices yield nothing.
///
/// # Examples
/// ```
/// use rastrum_core::render::fan;
///
/// let tris: Vec<_> = fan(&[0, 1, 2, 3]).collect();
/// assert_eq!(tris, [[&0, &1, &2], [&0, &2, &3]]);
/// ```
pub fn fan<T>(poly: &[T]) -> impl Iterator<Item = [&T; 3]> {
    let (first, rest) = poly.split_first().unzip();
    rest.unwrap_or(&[])
        .windows(2)
        .filter_map(move |pair| Some([first?, &pair[0], &pair[1]]))
}
