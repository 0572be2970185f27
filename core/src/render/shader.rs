//! Fragment and vertex shaders.
//!
//! Shaders are functions that are used to customize vertex and fragment
//! handling during rendering.
//!
//! A *vertex shader* is responsible for transforming and projecting each
//! vertex in the rendered geometry, usually using a model-view-projection
//! matrix to move the vertex from the model space to the clip space. Vertex
//! shaders can also perform any other per-vertex calculations and pass on
//! the results as varyings of the output.
//!
//! A *fragment shader* is used to compute the color of each individual pixel,
//! or fragment, drawn to the framebuffer. The fragment shader receives as
//! input the varyings interpolated across the triangle being rasterized,
//! such as color, texture coordinate, or normal vector.

use crate::math::{Color4, Mat4};

use super::{Varyings, ctx::Context};

/// Per-draw constants passed to both shader stages.
///
/// Every uniforms type must expose a model-view-projection matrix; other
/// fields are up to the shader. Uniforms are only ever borrowed immutably
/// during a draw call.
pub trait Uniforms {
    /// Returns the matrix that maps model-space positions to clip space.
    fn mvp(&self) -> &Mat4;
}

/// Trait for vertex shaders, used to transform vertices and perform other
/// per-vertex computations.
///
/// # Type parameters
/// * `Vtx`: Type of the input vertex.
/// * `Uni`: Type of custom "uniform" (non-vertex-specific) data, such as
///   transform matrices, passed to the shader.
pub trait VertexShader<Vtx, Uni> {
    /// The type of the varyings output alongside the clip-space position.
    type Var;

    /// Transforms `vertex` to clip space and computes its varyings.
    ///
    /// The pipeline fills in the screen-space positions of the returned
    /// value; the shader only needs to set `clip_pos` and `var`.
    ///
    /// # Panics
    /// `shade_vertex` should never panic.
    fn shade_vertex(&self, vertex: &Vtx, uniform: &Uni) -> Varyings<Self::Var>;
}

/// Trait for fragment shaders, used to compute the color of each individual
/// pixel, or fragment, rendered.
///
/// # Type parameters
/// * `Var`: The varying of the input fragment.
/// * `Uni`: Type of the uniform data.
pub trait FragmentShader<Var, Uni> {
    /// Computes the color of `frag`. Returns either `Some(color)`, or `None`
    /// if the fragment should be discarded.
    ///
    /// A discarded fragment writes neither color nor depth.
    ///
    /// # Panics
    /// `shade_fragment` should never panic.
    fn shade_fragment(&self, frag: &Varyings<Var>, uniform: &Uni)
    -> Option<Color4>;
}

impl<F, Vtx, Var, Uni> VertexShader<Vtx, Uni> for F
where
    F: Fn(&Vtx, &Uni) -> Varyings<Var>,
{
    type Var = Var;

    fn shade_vertex(&self, vertex: &Vtx, uniform: &Uni) -> Varyings<Var> {
        self(vertex, uniform)
    }
}

impl<F, Var, Uni, Out> FragmentShader<Var, Uni> for F
where
    F: Fn(&Varyings<Var>, &Uni) -> Out,
    Out: Into<Option<Color4>>,
{
    fn shade_fragment(
        &self,
        frag: &Varyings<Var>,
        uniform: &Uni,
    ) -> Option<Color4> {
        self(frag, uniform).into()
    }
}

/// A type that composes a vertex and a fragment shader with the pipeline
/// state used when drawing with them.
#[derive(Copy, Clone, Debug)]
pub struct Program<Vs, Fs> {
    pub vertex_shader: Vs,
    pub fragment_shader: Fs,
    pub ctx: Context,
}

impl<Vs, Fs> Program<Vs, Fs> {
    /// Returns a new `Program` with `vs` as the vertex shader, `fs` as the
    /// fragment shader, and the [default][Context::default] pipeline state.
    pub fn new(vs: Vs, fs: Fs) -> Self {
        Self {
            vertex_shader: vs,
            fragment_shader: fs,
            ctx: Context::default(),
        }
    }

    /// Returns `self` with its pipeline state replaced by `ctx`.
    pub fn with(self, ctx: Context) -> Self {
        Self { ctx, ..self }
    }
}

impl Uniforms for Mat4 {
    /// A bare matrix is its own model-view-projection matrix.
    fn mvp(&self) -> &Mat4 {
        self
    }
}
