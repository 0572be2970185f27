//! Pipeline state and parameters.

/// Per-draw pipeline state used by the rasterizer.
///
/// A `Context` is part of a [`Program`][super::shader::Program] and is only
/// read during a draw call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Context {
    /// Whether to do depth testing.
    ///
    /// If `true`, a fragment is only shaded if its depth passes the
    /// comparison given by `depth_func` against the depth currently stored
    /// in the framebuffer. If `false`, every covered fragment is shaded.
    pub depth_test: bool,

    /// Whether to write depth values.
    ///
    /// If `false`, other fragment processing is done but there is no depth
    /// output. Independent of `depth_test`.
    pub depth_write: bool,

    /// Whether to alpha-blend shaded colors over the framebuffer contents.
    ///
    /// If `true`, the stored color becomes `lerp(dst, src.rgb, src.a)`;
    /// otherwise it is overwritten with `src.rgb`.
    pub blend: bool,

    /// Whether to draw triangles facing away from the viewer.
    ///
    /// Triangles wound counter-clockwise on screen face the viewer. If this
    /// is `false`, other triangles are culled before rasterization.
    pub double_sided: bool,

    /// The comparison used by the depth test.
    pub depth_func: DepthFunc,
}

/// Predicate used to compare a fragment's depth against the stored depth.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DepthFunc {
    /// Passes if the new depth is less than the stored depth.
    #[default]
    Less,
    /// Passes if the new depth is less than or equal to the stored depth.
    LessEqual,
    /// Always passes.
    Always,
}

impl DepthFunc {
    /// Returns whether depth `new` passes this test against `stored`.
    ///
    /// `stored` is a closure so that [`Always`][Self::Always] can pass
    /// without reading the depth buffer at all.
    ///
    /// # Examples
    /// ```
    /// use rastrum_core::render::ctx::DepthFunc;
    ///
    /// assert!(DepthFunc::Less.passes(0.5, || 0.6));
    /// assert!(!DepthFunc::Less.passes(0.5, || 0.5));
    /// assert!(DepthFunc::LessEqual.passes(0.5, || 0.5));
    /// assert!(DepthFunc::Always.passes(0.9, || unreachable!()));
    /// ```
    #[inline]
    pub fn passes(self, new: f32, stored: impl FnOnce() -> f32) -> bool {
        match self {
            Self::Less => new < stored(),
            Self::LessEqual => new <= stored(),
            Self::Always => true,
        }
    }
}

impl Context {
    /// Returns whether a fragment with depth `new` passes the depth test.
    ///
    /// If depth testing is disabled, always returns `true` without calling
    /// `stored`.
    #[inline]
    pub fn depth_test(&self, new: f32, stored: impl FnOnce() -> f32) -> bool {
        !self.depth_test || self.depth_func.passes(new, stored)
    }

    /// Returns whether a triangle should be culled given its facing.
    #[inline]
    pub fn face_cull(&self, is_backface: bool) -> bool {
        is_backface && !self.double_sided
    }
}

impl Default for Context {
    /// Creates a pipeline state with default settings.
    ///
    /// The default values are:
    /// * Depth testing: Enabled
    /// * Depth writes:  Enabled
    /// * Blending:      Disabled
    /// * Double-sided:  Disabled (backfaces are culled)
    /// * Depth func:    Pass if closer
    fn default() -> Self {
        Self {
            depth_test: true,
            depth_write: true,
            blend: false,
            double_sided: false,
            depth_func: DepthFunc::Less,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    #[test]
    fn depth_funcs() {
        use DepthFunc::*;
        assert!(Less.passes(0.1, || 0.2));
        assert!(!Less.passes(0.2, || 0.2));
        assert!(!Less.passes(0.3, || 0.2));

        assert!(LessEqual.passes(0.1, || 0.2));
        assert!(LessEqual.passes(0.2, || 0.2));
        assert!(!LessEqual.passes(0.3, || 0.2));

        assert!(Always.passes(0.3, || 0.2));
        assert!(Always.passes(f32::INFINITY, || 0.0));
    }

    #[test]
    fn always_does_not_read_stored_depth() {
        let reads = Cell::new(0);
        let stored = || {
            reads.set(reads.get() + 1);
            0.0
        };
        assert!(DepthFunc::Always.passes(1.0, stored));
        assert_eq!(reads.get(), 0);
    }

    #[test]
    fn disabled_depth_test_always_passes() {
        let ctx = Context { depth_test: false, ..Context::default() };
        assert!(ctx.depth_test(2.0, || unreachable!()));

        let ctx = Context::default();
        assert!(!ctx.depth_test(2.0, || 1.0));
        assert!(ctx.depth_test(0.5, || 1.0));
    }

    #[test]
    fn face_culling() {
        let ctx = Context::default();
        assert!(ctx.face_cull(true));
        assert!(!ctx.face_cull(false));

        let ctx = Context { double_sided: true, ..ctx };
        assert!(!ctx.face_cull(true));
    }

    #[test]
    fn defaults() {
        let ctx = Context::default();
        assert!(ctx.depth_test);
        assert!(ctx.depth_write);
        assert!(!ctx.blend);
        assert!(!ctx.double_sided);
        assert_eq!(ctx.depth_func, DepthFunc::Less);
    }
}
