//! Translation of triangles into discrete pixels in the framebuffer.
//!
//! The rasterizer visits every pixel inside the screen-space bounding box
//! of a triangle and tests whether the pixel *center* lies inside the
//! triangle, using barycentric coordinates computed in screen space. The
//! coordinates of covered pixels are then corrected for perspective and
//! used to interpolate the varyings passed to the fragment shader.
//!
//! A pixel whose center lies exactly on an edge counts as covered, so
//! such pixels are drawn by both triangles sharing the edge.

use core::ops::RangeInclusive;

use crate::geom::{Winding, signed_area, winding};
use crate::math::{Vary, Vec2, Vec4, vec2};

use super::{
    Varyings, ctx::Context, shader::FragmentShader, stats::Throughput,
    target::Framebuffer,
};

/// Rasterizes a screen-space triangle into `fb`.
///
/// The vertices must already be [projected][Varyings::project] to the
/// dimensions of `fb`. Back-facing triangles are culled unless
/// `ctx.double_sided` is set, and triangles with zero screen-space area
/// are skipped; in both cases returns `None`. Otherwise, returns the number
/// of pixels covered and the number of pixels written.
pub fn tri_fill<A, Uni, Fs>(
    fb: &mut Framebuffer,
    ctx: &Context,
    fs: &Fs,
    uni: &Uni,
    vs: [&Varyings<A>; 3],
) -> Option<Throughput>
where
    A: Vary,
    Fs: FragmentShader<A, Uni>,
{
    if ctx.face_cull(is_backface(vs)) {
        log::trace!("culled backface");
        return None;
    }
    let pts = vs.map(|v| xy(v.frag_pos));
    let [a, b, c] = pts;
    if signed_area(a, b, c) == 0.0 {
        log::trace!("skipped degenerate triangle");
        return None;
    }
    let (w, h) = (fb.width(), fb.height());
    let (xs, ys) = bounding_box(pts, w, h)?;
    let recip_ws = vs.map(|v| v.frag_pos.w);

    let mut io = Throughput::default();
    for y in ys {
        for x in xs.clone() {
            let center = vec2(x as f32 + 0.5, y as f32 + 0.5);
            let ws = screen_weights(pts, center);
            if !is_inside(ws) {
                continue;
            }
            io.i += 1;
            let ws = perspective_correct(ws, recip_ws);
            let frag = interpolate(vs, ws, w as f32, h as f32);
            io.o += process_pixel(fb, ctx, fs, uni, [x, y], &frag) as usize;
        }
    }
    Some(io)
}

/// Returns whether the triangle faces away from the viewer.
///
/// A triangle is back-facing if its vertices wind clockwise in normalized
/// device coordinates. Degenerate triangles also count as back-facing.
pub fn is_backface<A>([a, b, c]: [&Varyings<A>; 3]) -> bool {
    winding(xy(a.ndc_pos), xy(b.ndc_pos), xy(c.ndc_pos)) == Winding::Cw
}

/// Returns the ranges of pixel columns and rows overlapping the bounding
/// box of `pts`, clamped to a `w` × `h` screen.
///
/// Both ranges are inclusive. Returns `None` if the screen is empty.
pub fn bounding_box(
    [a, b, c]: [Vec2; 3],
    w: usize,
    h: usize,
) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
    if w == 0 || h == 0 {
        return None;
    }
    let (min, max) = (a.min(b).min(c), a.max(b).max(c));
    let clamp = |v: f32, n: usize| {
        (floor(v) as isize).clamp(0, n as isize - 1) as usize
    };
    Some((
        clamp(min.x, w)..=clamp(max.x, w),
        clamp(min.y, h)..=clamp(max.y, h),
    ))
}

/// Returns the barycentric coordinates of `p` relative to the triangle
/// `pts`.
///
/// The triangle must have nonzero area.
///
/// # Examples
/// ```
/// use rastrum_core::math::vec2;
/// use rastrum_core::render::raster::screen_weights;
///
/// let tri = [vec2(0.0, 0.0), vec2(4.0, 0.0), vec2(0.0, 4.0)];
/// assert_eq!(screen_weights(tri, vec2(0.0, 0.0)), [1.0, 0.0, 0.0]);
/// assert_eq!(screen_weights(tri, vec2(1.0, 2.0)), [0.25, 0.25, 0.5]);
/// ```
#[inline]
pub fn screen_weights([a, b, c]: [Vec2; 3], p: Vec2) -> [f32; 3] {
    let (ab, ac, ap) = (b - a, c - a, p - a);
    let factor = 1.0 / (ab.x * ac.y - ab.y * ac.x);
    let s = (ac.y * ap.x - ac.x * ap.y) * factor;
    let t = (ab.x * ap.y - ab.y * ap.x) * factor;
    [1.0 - s - t, s, t]
}

/// Returns whether barycentric coordinates `ws` denote a point inside
/// the triangle or on its edge.
#[inline]
pub fn is_inside(ws: [f32; 3]) -> bool {
    ws.iter().all(|&w| w >= 0.0)
}

/// Converts screen-space barycentric coordinates into ones that are linear
/// in clip space.
///
/// `recip_ws` holds 1/W<sub>clip</sub> of each vertex. The result sums to
/// one.
///
/// # Examples
/// ```
/// use rastrum_core::render::raster::perspective_correct;
///
/// // A vertex twice as far away gets half the weight
/// let ws = perspective_correct([0.5, 0.5, 0.0], [1.0, 0.5, 1.0]);
/// assert_eq!(ws, [2.0 / 3.0, 1.0 / 3.0, 0.0]);
/// ```
#[inline]
pub fn perspective_correct(ws: [f32; 3], recip_ws: [f32; 3]) -> [f32; 3] {
    debug_assert!(
        recip_ws.iter().all(|&w| w > 0.0),
        "vertex behind the viewer: 1/w = {recip_ws:?}"
    );
    let ws = [ws[0] * recip_ws[0], ws[1] * recip_ws[1], ws[2] * recip_ws[2]];
    let sum: f32 = ws.iter().sum();
    ws.map(|w| w / sum)
}

/// Blends the vertices with weights `ws` and projects the result for a
/// `w` × `h` screen.
pub fn interpolate<A: Vary>(
    vs: [&Varyings<A>; 3],
    ws: [f32; 3],
    w: f32,
    h: f32,
) -> Varyings<A> {
    let mut frag = Vary::weighted(vs, ws);
    frag.project(w, h);
    frag
}

/// Runs the depth test and fragment shader for pixel `(x, y)` and writes
/// the result to `fb`.
///
/// Returns whether the pixel was written.
pub fn process_pixel<A, Uni, Fs>(
    fb: &mut Framebuffer,
    ctx: &Context,
    fs: &Fs,
    uni: &Uni,
    [x, y]: [usize; 2],
    frag: &Varyings<A>,
) -> bool
where
    Fs: FragmentShader<A, Uni>,
{
    let z = frag.frag_pos.z;
    if !ctx.depth_test(z, || fb.depth(x, y)) {
        return false;
    }
    let Some(src) = fs.shade_fragment(frag, uni) else {
        return false;
    };
    let src = src.clamp(Vec4::ZERO, Vec4::ONE);
    let color = if ctx.blend {
        // Inherent glam lerp: dst + (src - dst) * alpha
        fb.color(x, y).lerp(src.truncate(), src.w)
    } else {
        src.truncate()
    };
    fb.set_color(x, y, color);
    if ctx.depth_write {
        fb.set_depth(x, y, z);
    }
    true
}

#[inline]
fn xy(v: Vec4) -> Vec2 {
    vec2(v.x, v.y)
}

#[inline]
fn floor(x: f32) -> f32 {
    use crate::math::float::f32;
    f32::floor(x)
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};
    use core::cell::RefCell;

    use crate::assert_approx_eq;
    use crate::math::{Color3, Color4, rgb, rgba, vec4};
    use crate::util::buf::Buf2;

    use super::*;

    /// Returns projected varyings for a vertex at screen position (x, y)
    /// on a `w` × `h` screen, with depth `z` and 1/W = `recip_w`.
    fn screen_vert<A>(
        [x, y, z]: [f32; 3],
        recip_w: f32,
        [w, h]: [f32; 2],
        var: A,
    ) -> Varyings<A> {
        let ndc = vec4(2.0 * x / w - 1.0, 2.0 * y / h - 1.0, 2.0 * z - 1.0, 1.0);
        let mut v = Varyings::new(ndc / recip_w, var);
        v.project(w, h);
        v
    }

    fn ctx_2d() -> Context {
        Context {
            depth_test: false,
            double_sided: true,
            ..Context::default()
        }
    }

    fn ascii(buf: &Buf2<u8>) -> Vec<String> {
        // Print top row first
        (0..buf.height())
            .rev()
            .map(|y| buf[y].iter().map(|&n| b".#234"[n as usize] as char).collect())
            .collect()
    }

    #[test]
    fn bounding_box_is_clamped_to_screen() {
        let pts = [vec2(-3.0, 1.5), vec2(4.2, -1.0), vec2(2.0, 9.0)];
        let (xs, ys) = bounding_box(pts, 8, 6).unwrap();
        assert_eq!(xs, 0..=4);
        assert_eq!(ys, 0..=5);

        let pts = [vec2(1.5, 1.5), vec2(2.5, 1.5), vec2(1.5, 3.0)];
        let (xs, ys) = bounding_box(pts, 8, 6).unwrap();
        assert_eq!(xs, 1..=2);
        assert_eq!(ys, 1..=3);

        assert_eq!(bounding_box(pts, 0, 6), None);
    }

    #[test]
    fn screen_weights_at_vertices_and_centroid() {
        let pts = [vec2(1.0, 1.0), vec2(7.0, 2.0), vec2(3.0, 6.0)];
        assert_approx_eq!(screen_weights(pts, pts[0]), [1.0, 0.0, 0.0]);
        assert_approx_eq!(screen_weights(pts, pts[1]), [0.0, 1.0, 0.0]);
        assert_approx_eq!(screen_weights(pts, pts[2]), [0.0, 0.0, 1.0]);

        let centroid = (pts[0] + pts[1] + pts[2]) / 3.0;
        let ws = screen_weights(pts, centroid);
        assert_approx_eq!(ws, [1.0 / 3.0; 3]);
        assert!(is_inside(ws));

        assert!(!is_inside(screen_weights(pts, vec2(0.0, 0.0))));
    }

    #[test]
    fn perspective_correct_weights_sum_to_one() {
        let ws = perspective_correct([0.2, 0.3, 0.5], [0.1, 0.5, 0.25]);
        assert_approx_eq!(ws.iter().sum::<f32>(), 1.0);
        // Equal depths leave the weights unchanged
        let ws = perspective_correct([0.2, 0.3, 0.5], [0.5; 3]);
        assert_approx_eq!(ws, [0.2, 0.3, 0.5]);
    }

    #[test]
    fn backface_is_clockwise_in_ndc() {
        let dim = [4.0, 4.0];
        let a = screen_vert([0.0, 0.0, 0.5], 1.0, dim, ());
        let b = screen_vert([4.0, 0.0, 0.5], 1.0, dim, ());
        let c = screen_vert([0.0, 4.0, 0.5], 1.0, dim, ());
        assert!(!is_backface([&a, &b, &c]));
        assert!(is_backface([&a, &c, &b]));
        assert!(is_backface([&a, &a, &b]));
    }

    #[test]
    fn culled_and_degenerate_triangles_return_none() {
        let dim = [4.0, 4.0];
        let a = screen_vert([0.0, 0.0, 0.5], 1.0, dim, ());
        let b = screen_vert([4.0, 0.0, 0.5], 1.0, dim, ());
        let c = screen_vert([0.0, 4.0, 0.5], 1.0, dim, ());
        let mut fb = Framebuffer::new(4, 4);
        let fs = |_: &Varyings<()>, _: &()| rgba(1.0, 1.0, 1.0, 1.0);

        let ctx = Context::default();
        assert_eq!(tri_fill(&mut fb, &ctx, &fs, &(), [&a, &c, &b]), None);

        let ctx = ctx_2d();
        assert_eq!(tri_fill(&mut fb, &ctx, &fs, &(), [&a, &b, &b]), None);

        assert!(fb.color_buf().data().iter().all(|c| *c == Color3::ZERO));
    }

    #[test]
    fn shared_edge_leaves_no_gaps() {
        let dim = [20.0, 10.0];
        let [v0, v1, v2, v3] = [[8.0, 0.0], [0.0, 6.0], [14.0, 9.0], [20.0, 5.0]]
            .map(|[x, y]| screen_vert([x, y, 0.5], 1.0, dim, ()));

        let mut fb = Framebuffer::new(20, 10);
        let counts = RefCell::new(Buf2::<u8>::new_default(20, 10));
        let fs = |f: &Varyings<()>, _: &()| {
            let [x, y] = [f.frag_pos.x as usize, f.frag_pos.y as usize];
            counts.borrow_mut()[[x, y]] += 1;
            rgba(1.0, 1.0, 1.0, 1.0)
        };
        let ctx = ctx_2d();

        let io0 = tri_fill(&mut fb, &ctx, &fs, &(), [&v0, &v1, &v2]).unwrap();
        let io1 = tri_fill(&mut fb, &ctx, &fs, &(), [&v0, &v2, &v3]).unwrap();

        let expected = [
            "....................",
            "............###.....",
            ".......#########....",
            "..################..",
            ".##################.",
            "..#################.",
            "...#############....",
            ".....#########......",
            "......######........",
            ".......##...........",
        ];
        assert_eq!(ascii(&counts.borrow()), expected);

        let total: usize = expected
            .iter()
            .map(|row| row.bytes().filter(|&b| b == b'#').count())
            .sum();
        assert_eq!(io0.i + io1.i, total);
        assert_eq!(io0.o + io1.o, total);
    }

    #[test]
    fn varyings_are_interpolated_perspective_correctly() {
        let dim = [8.0, 8.0];
        // Left edge near, right edge four times as far
        let a = screen_vert([0.0, 0.0, 0.5], 1.0, dim, 0.0f32);
        let b = screen_vert([8.0, 0.0, 0.5], 0.25, dim, 1.0f32);
        let c = screen_vert([0.0, 8.0, 0.5], 1.0, dim, 0.0f32);

        let mut fb = Framebuffer::new(8, 8);
        let vals = RefCell::new(Buf2::<f32>::new_default(8, 8));
        let fs = |f: &Varyings<f32>, _: &()| {
            let [x, y] = [f.frag_pos.x as usize, f.frag_pos.y as usize];
            vals.borrow_mut()[[x, y]] = f.var;
            rgba(f.var, 0.0, 0.0, 1.0)
        };
        tri_fill(&mut fb, &ctx_2d(), &fs, &(), [&a, &b, &c]).unwrap();

        // Screen weight of b at pixel (3, 0) is 3.5/8
        let s = 3.5 / 8.0;
        let expected = s * 0.25 / (s * 0.25 + (1.0 - s));
        let vals = vals.borrow();
        assert_approx_eq!(vals[[3, 0]], expected, eps = 1e-5);
        // Less than the screen-linear value
        assert!(vals[[3, 0]] < s);
    }

    #[test]
    fn depth_test_and_write() {
        let mut fb = Framebuffer::new(1, 1);
        let fs = |_: &Varyings<()>, _: &()| rgba(1.0, 0.0, 0.0, 1.0);
        let ctx = Context::default();

        let mut frag = Varyings::new(Vec4::W, ());
        frag.frag_pos = vec4(0.5, 0.5, 0.5, 1.0);

        assert!(process_pixel(&mut fb, &ctx, &fs, &(), [0, 0], &frag));
        assert_eq!(fb.depth(0, 0), 0.5);
        // Less fails on equal depth
        assert!(!process_pixel(&mut fb, &ctx, &fs, &(), [0, 0], &frag));

        let ctx = Context { depth_write: false, ..ctx };
        frag.frag_pos.z = 0.25;
        assert!(process_pixel(&mut fb, &ctx, &fs, &(), [0, 0], &frag));
        assert_eq!(fb.depth(0, 0), 0.5);
        assert_eq!(fb.color(0, 0), rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn discarded_fragment_writes_nothing() {
        let mut fb = Framebuffer::new(1, 1);
        let fs = |_: &Varyings<()>, _: &()| None::<Color4>;
        let mut frag = Varyings::new(Vec4::W, ());
        frag.frag_pos = vec4(0.5, 0.5, 0.5, 1.0);

        let ctx = Context::default();
        assert!(!process_pixel(&mut fb, &ctx, &fs, &(), [0, 0], &frag));
        assert_eq!(fb.color(0, 0), Color3::ZERO);
        assert_eq!(fb.depth(0, 0), 1.0);
    }

    #[test]
    fn blending_and_clamping() {
        let mut fb = Framebuffer::new(1, 1);
        fb.clear(rgb(0.0, 0.0, 1.0));
        let frag = Varyings::new(Vec4::W, ());
        let ctx = Context { depth_test: false, blend: true, ..Context::default() };

        let half = |_: &Varyings<()>, _: &()| rgba(1.0, 0.0, 0.0, 0.5);
        process_pixel(&mut fb, &ctx, &half, &(), [0, 0], &frag);
        assert_approx_eq!(fb.color(0, 0), rgb(0.5, 0.0, 0.5));

        let clear = |_: &Varyings<()>, _: &()| rgba(1.0, 1.0, 1.0, 0.0);
        process_pixel(&mut fb, &ctx, &clear, &(), [0, 0], &frag);
        assert_approx_eq!(fb.color(0, 0), rgb(0.5, 0.0, 0.5));

        let ctx = Context { blend: false, ..ctx };
        let bright = |_: &Varyings<()>, _: &()| rgba(2.0, -1.0, 0.5, 0.0);
        process_pixel(&mut fb, &ctx, &bright, &(), [0, 0], &frag);
        assert_eq!(fb.color(0, 0), rgb(1.0, 0.0, 0.5));
    }
}
