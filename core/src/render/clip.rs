//! Clipping triangles against the view volume.
//!
//! Clipping means converting a shape into another, such that only the points
//! inside a volume enclosed by one or more planes remain. This module clips
//! triangles in homogeneous *clip space* against the canonical view volume
//!
//! ```text
//! -W ≤ X ≤ W,  -W ≤ Y ≤ W,  -W ≤ Z ≤ W,  W ≥ ε
//! ```
//!
//! before the perspective divide, so that nothing behind the eye or outside
//! the viewport ever reaches the rasterizer. The `W ≥ ε` plane keeps the
//! divide well-defined: every vertex that survives clipping has a positive W.

use alloc::vec::Vec;
use core::mem::swap;

use crate::math::{Vary, Vec4};

use super::Varyings;

/// The smallest clip-space W a visible vertex may have.
pub const EPSILON: f32 = 1e-5;

/// The maximum number of vertices clipping a triangle may produce.
pub const MAX_VERTS: usize = 9;

/// A clipping plane bounding the view volume.
///
/// The inside of each plane is the half-space where [`Plane::signed_dist`]
/// is non-negative.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Plane {
    /// W ≥ ε; rejects points at or behind the eye.
    PositiveW,
    /// X ≤ W
    Right,
    /// X ≥ -W
    Left,
    /// Y ≤ W
    Top,
    /// Y ≥ -W
    Bottom,
    /// Z ≤ W
    Far,
    /// Z ≥ -W
    Near,
}

/// The planes of the view volume, in the order they are clipped against.
pub const PLANES: [Plane; 7] = [
    Plane::PositiveW,
    Plane::Right,
    Plane::Left,
    Plane::Top,
    Plane::Bottom,
    Plane::Far,
    Plane::Near,
];

/// Clips triangles against the view volume.
///
/// Holds two scratch buffers that are reused across calls, so clipping
/// many triangles with the same `Clipper` allocates only once.
#[derive(Clone, Debug)]
pub struct Clipper<A> {
    verts_in: Vec<Varyings<A>>,
    verts_out: Vec<Varyings<A>>,
}

impl Plane {
    /// Returns the signed distance of `pt` from `self`.
    ///
    /// The result is positive if `pt` is inside the plane, negative if it is
    /// outside, and zero if `pt` lies exactly on the plane.
    ///
    /// # Examples
    /// ```
    /// use rastrum_core::render::clip::Plane;
    /// use rastrum_core::math::vec4;
    ///
    /// assert_eq!(Plane::Right.signed_dist(vec4(0.5, 0.0, 0.0, 1.0)), 0.5);
    /// assert_eq!(Plane::Left.signed_dist(vec4(-2.0, 0.0, 0.0, 1.0)), -1.0);
    /// ```
    #[inline]
    pub fn signed_dist(&self, pt: Vec4) -> f32 {
        match self {
            Plane::PositiveW => pt.w - EPSILON,
            Plane::Right => pt.w - pt.x,
            Plane::Left => pt.w + pt.x,
            Plane::Top => pt.w - pt.y,
            Plane::Bottom => pt.w + pt.y,
            Plane::Far => pt.w - pt.z,
            Plane::Near => pt.w + pt.z,
        }
    }

    /// Returns whether `pt` is inside `self` or exactly on it.
    #[inline]
    pub fn is_inside(&self, pt: Vec4) -> bool {
        self.signed_dist(pt) >= 0.0
    }

    /// Clips a convex polygon against `self`.
    ///
    /// Appends the resulting vertices to `verts_out`.
    ///
    /// In the diagram below, clipping triangle ABC results in quad QABP,
    /// where P and Q are new vertices generated by interpolating between
    /// B and C, and C and A, respectively.
    ///
    /// ```text
    ///                  C
    ///                 / \         outside
    ///               /    \
    /// ------------Q-------P--------self-----
    ///           /          \
    ///         A--___        \     inside
    ///               `---__   \
    ///                     `---B
    /// ```
    ///
    /// A new vertex is only generated if an edge strictly crosses the plane.
    /// A vertex exactly on the plane counts as inside, so it is emitted once
    /// and never duplicated by an intersection.
    pub fn clip_polygon<A: Vary + Clone>(
        &self,
        verts_in: &[Varyings<A>],
        verts_out: &mut Vec<Varyings<A>>,
    ) {
        let Some(mut prev) = verts_in.last() else {
            return;
        };
        let mut d_prev = self.signed_dist(prev.clip_pos);

        for curr in verts_in {
            let d_curr = self.signed_dist(curr.clip_pos);
            if crosses(d_prev, d_curr) {
                // Opposite signs, so the denominator is nonzero
                let t = d_prev / (d_prev - d_curr);
                verts_out.push(prev.lerp(curr, t));
            }
            if d_curr >= 0.0 {
                verts_out.push(curr.clone());
            }
            prev = curr;
            d_prev = d_curr;
        }
    }
}

/// Returns whether an edge with endpoint distances `d0` and `d1` strictly
/// crosses a plane.
///
/// Compares signs rather than testing `d0 * d1 < 0`, which underflows to
/// zero for tiny distances.
#[inline]
fn crosses(d0: f32, d1: f32) -> bool {
    d0 != 0.0 && d1 != 0.0 && (d0 < 0.0) != (d1 < 0.0)
}

/// Returns whether `pt` is inside the view volume.
///
/// # Examples
/// ```
/// use rastrum_core::render::clip::is_visible;
/// use rastrum_core::math::vec4;
///
/// assert!(is_visible(vec4(1.0, -1.0, 0.0, 1.0)));
/// assert!(!is_visible(vec4(0.0, 0.0, 0.5, -1.0)));
/// assert!(!is_visible(vec4(0.0, 2.0, 0.0, 1.0)));
/// ```
#[inline]
pub fn is_visible(pt: Vec4) -> bool {
    pt.w >= EPSILON
        && pt.x.abs() <= pt.w
        && pt.y.abs() <= pt.w
        && pt.z.abs() <= pt.w
}

impl<A: Vary + Clone> Clipper<A> {
    /// Creates a new clipper with empty buffers.
    pub fn new() -> Self {
        Self {
            verts_in: Vec::with_capacity(MAX_VERTS),
            verts_out: Vec::with_capacity(MAX_VERTS),
        }
    }

    /// Clips a triangle against the view volume.
    ///
    /// Returns the vertices of the convex polygon that remains, or an empty
    /// slice if the triangle lies entirely outside the volume. The slice is
    /// mutable so that the caller can map the vertices in place. If all three
    /// vertices are inside, they are returned unchanged.
    ///
    /// The algorithm used is Sutherland–Hodgman [^1], clipping the polygon
    /// against each plane in [`PLANES`] in turn and stopping early once
    /// nothing remains.
    ///
    /// # Panics
    /// If a clipping pass produces more than [`MAX_VERTS`] vertices.
    ///
    /// [^1]: Ivan Sutherland, Gary W. Hodgman: Reentrant Polygon Clipping.
    ///        Communications of the ACM, vol. 17, pp. 32–42, 1974
    pub fn clip(&mut self, tri: [Varyings<A>; 3]) -> &mut [Varyings<A>] {
        let Self { verts_in, verts_out } = self;
        verts_in.clear();
        verts_out.clear();

        if tri.iter().all(|v| is_visible(v.clip_pos)) {
            verts_out.extend(tri);
            return verts_out;
        }

        verts_in.extend(tri);
        for (i, plane) in PLANES.iter().enumerate() {
            plane.clip_polygon(verts_in, verts_out);
            verts_in.clear();
            assert!(
                verts_out.len() <= MAX_VERTS,
                "clipping against {plane:?} produced {} vertices",
                verts_out.len()
            );
            if verts_out.is_empty() {
                log::trace!("triangle clipped away by {plane:?}");
                break;
            }
            if i < PLANES.len() - 1 {
                // The result of this pass is the input of the next
                swap(verts_in, verts_out);
            }
        }
        verts_out
    }
}

impl<A: Vary + Clone> Default for Clipper<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::assert_approx_eq;
    use crate::math::vec4;

    use super::*;

    fn vtx(x: f32, y: f32, z: f32) -> Varyings<f32> {
        Varyings::new(vec4(x, y, z, 1.0), x)
    }

    fn hvtx(x: f32, y: f32, z: f32, w: f32) -> Varyings<f32> {
        Varyings::new(vec4(x, y, z, w), 0.0)
    }

    fn clip(tri: [Varyings<f32>; 3]) -> Vec<Varyings<f32>> {
        Clipper::new().clip(tri).to_vec()
    }

    fn in_bounds(v: &Varyings<f32>) -> bool {
        let p = v.clip_pos;
        p.w > 0.0
            && (p / p.w).to_array()[..3].iter().all(|a| a.abs() <= 1.00001)
    }

    #[test]
    fn signed_distance() {
        let p = vec4(0.5, -2.0, 3.0, 1.0);
        assert_eq!(Plane::Right.signed_dist(p), 0.5);
        assert_eq!(Plane::Left.signed_dist(p), 1.5);
        assert_eq!(Plane::Top.signed_dist(p), 3.0);
        assert_eq!(Plane::Bottom.signed_dist(p), -1.0);
        assert_eq!(Plane::Far.signed_dist(p), -2.0);
        assert_eq!(Plane::Near.signed_dist(p), 4.0);
        assert_eq!(Plane::PositiveW.signed_dist(p), 1.0 - EPSILON);
    }

    #[test]
    fn visibility() {
        assert!(is_visible(vec4(0.0, 0.0, 0.0, 1.0)));
        assert!(is_visible(vec4(1.0, 1.0, 1.0, 1.0)));
        assert!(is_visible(vec4(-2.0, 0.0, 2.0, 2.0)));

        assert!(!is_visible(vec4(0.0, 0.0, 0.0, 0.0)));
        assert!(!is_visible(vec4(0.0, 0.0, 0.0, -1.0)));
        assert!(!is_visible(vec4(0.0, 0.0, -1.5, 1.0)));
        assert!(!is_visible(vec4(0.0, -1.01, 0.0, 1.0)));
    }

    #[test]
    fn polygon_clip_inside() {
        let vs = [vtx(0.5, 0.0, -1.0), vtx(-1.0, 1.0, 1.0), vtx(0.0, -1.0, 0.0)];
        let mut res = vec![];
        Plane::Right.clip_polygon(&vs, &mut res);
        assert_eq!(res, vs);
    }

    #[test]
    fn polygon_clip_outside() {
        let vs = [vtx(2.0, 0.0, 0.0), vtx(1.5, 1.0, 0.0), vtx(3.0, -1.0, 0.0)];
        let mut res = vec![];
        Plane::Right.clip_polygon(&vs, &mut res);
        assert_eq!(res, []);
    }

    #[test]
    fn polygon_clip_one_outside_yields_quad() {
        //        out
        //        | \
        // 1.0  --+--+---- plane
        //        |   \
        //       in1--in2
        let out = vtx(2.0, 0.0, 0.0);
        let in1 = vtx(0.0, 0.0, 0.0);
        let in2 = vtx(0.0, 1.0, 0.0);

        let mut res = vec![];
        Plane::Right.clip_polygon(&[out, in1, in2], &mut res);

        assert_eq!(res.len(), 4);
        assert_approx_eq!(res[0].clip_pos, vec4(1.0, 0.5, 0.0, 1.0));
        assert_approx_eq!(res[1].clip_pos, vec4(1.0, 0.0, 0.0, 1.0));
        assert_eq!(res[2], in1);
        assert_eq!(res[3], in2);
        // Attributes are interpolated along with the position
        assert_approx_eq!(res[0].var, 1.0);
        assert_approx_eq!(res[1].var, 1.0);
    }

    #[test]
    fn polygon_clip_vertices_on_plane_not_duplicated() {
        //  on1-----on2   plane
        //     \   /
        //      ins
        let on1 = vtx(1.0, 1.0, 0.0);
        let on2 = vtx(1.0, -1.0, 0.0);
        let ins = vtx(0.0, 0.0, 0.0);

        let mut res = vec![];
        Plane::Right.clip_polygon(&[ins, on1, on2], &mut res);
        assert_eq!(res, [ins, on1, on2]);
    }

    #[test]
    fn polygon_clip_tiny_distances_still_cross() {
        // Distances from the left plane are ±1e-25; their product is zero
        let a = hvtx(1e-25, 0.0, 0.0, 0.0);
        let b = hvtx(-1e-25, 0.0, 0.0, 0.0);
        let c = hvtx(1.0, 1.0, 0.0, 1.0);

        let mut res = vec![];
        Plane::Left.clip_polygon(&[a, b, c], &mut res);

        assert_eq!(res.len(), 4);
        assert_eq!(res[0], a);
        assert_approx_eq!(res[1].clip_pos, vec4(0.0, 0.0, 0.0, 0.0));
        assert_eq!(res[3], c);
        assert!(res.iter().all(|v| Plane::Left.signed_dist(v.clip_pos) >= -1e-6));
    }

    #[test]
    fn edge_crossing_needs_strictly_opposite_signs() {
        assert!(crosses(1e-30, -1e-30));
        assert!(crosses(-2.0, 3.0));
        assert!(!crosses(0.0, -1.0));
        assert!(!crosses(-0.0, 1.0));
        assert!(!crosses(1.0, 2.0));
        assert!(!crosses(-1.0, -2.0));
    }

    #[test]
    fn polygon_clip_outside_touching_plane() {
        let out = vtx(2.0, 0.0, 0.0);
        let on1 = vtx(1.0, 1.0, 0.0);
        let on2 = vtx(1.0, -1.0, 0.0);

        let mut res = vec![];
        Plane::Right.clip_polygon(&[out, on1, on2], &mut res);
        // Only the degenerate sliver on the plane remains
        assert_eq!(res, [on1, on2]);
    }

    #[test]
    fn tri_fully_inside_is_returned_unchanged() {
        let tri = [vtx(-1.0, -1.0, -1.0), vtx(1.0, 1.0, 0.0), vtx(0.0, 1.0, 1.0)];
        assert_eq!(clip(tri), tri);
    }

    #[test]
    fn tri_behind_eye_is_rejected() {
        let tri = [
            hvtx(0.0, 0.0, 0.0, -1.0),
            hvtx(1.0, 0.0, 0.0, -2.0),
            hvtx(0.0, 1.0, 0.0, -0.5),
        ];
        assert_eq!(clip(tri), []);
    }

    #[test]
    fn tri_outside_one_plane_is_rejected() {
        let tri = [vtx(2.0, 2.0, 2.0), vtx(2.0, -2.0, 0.0), vtx(1.5, -1.0, 2.0)];
        assert_eq!(clip(tri), []);
    }

    #[test]
    fn tri_straddling_near_plane_yields_quad() {
        let tri = [
            hvtx(-0.5, -0.5, 0.5, 1.0),
            hvtx(0.5, -0.5, 0.5, 1.0),
            hvtx(0.0, 0.0, -3.0, -1.0),
        ];
        let res = clip(tri);

        assert_eq!(res.len(), 4);
        assert!(res.iter().all(in_bounds));
        assert_eq!(res[1], tri[0]);
        assert_eq!(res[2], tri[1]);
        // Intersections of the edges with the Z = -W plane
        assert_approx_eq!(
            res[0].clip_pos,
            vec4(-4.0 / 11.0, -4.0 / 11.0, -5.0 / 11.0, 5.0 / 11.0),
            eps = 1e-5
        );
        assert_approx_eq!(
            res[3].clip_pos,
            vec4(4.0 / 11.0, -4.0 / 11.0, -5.0 / 11.0, 5.0 / 11.0),
            eps = 1e-5
        );
    }

    #[test]
    fn tri_against_corner_yields_quad() {
        let tri = [vtx(0.0, 0.0, 0.0), vtx(2.0, 0.0, 0.0), vtx(0.0, 0.0, 2.0)];
        let res = clip(tri);

        assert_eq!(res.len(), 4);
        assert!(res.iter().all(in_bounds));
    }

    #[test]
    fn tri_against_frustum_result_is_heptagon() {
        let tri = [vtx(-1.5, 0.0, 0.0), vtx(0.0, 0.0, -1.5), vtx(2.0, 0.0, 2.0)];
        let res = clip(tri);

        // Every plane but W and Y crosses the triangle
        assert_eq!(res.len(), 7);
        assert!(res.iter().all(in_bounds));
        assert_approx_eq!(res[0].clip_pos, vec4(1.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn clipper_reuse_does_not_leak_vertices() {
        let mut c = Clipper::new();
        let big = [vtx(-1.5, 0.0, 0.0), vtx(0.0, 0.0, -1.5), vtx(2.0, 0.0, 2.0)];
        let small = [vtx(0.0, 0.0, 0.0), vtx(0.5, 0.0, 0.0), vtx(0.0, 0.5, 0.0)];

        assert_eq!(c.clip(big).len(), 7);
        assert_eq!(c.clip(small), small);
        assert_eq!(c.clip([vtx(3.0, 0.0, 0.0); 3]), []);
    }

    #[test]
    fn tri_clip_against_frustum_all_cases() {
        // Methodically go through every combination of every vertex
        // inside/outside/on every plane, including degenerate cases.
        let xs = &[-2.0, -1.0, 0.0, 1.0, 2.0];

        let pts: Vec<_> = xs
            .iter()
            .flat_map(|&x| {
                xs.iter()
                    .flat_map(move |&y| xs.iter().map(move |&z| vtx(x, y, z)))
            })
            .collect();

        let mut clipper = Clipper::new();
        let mut total = 0;
        for a in &pts {
            for b in &pts {
                for c in &pts {
                    let res = clipper.clip([*a, *b, *c]);
                    assert!(res.len() <= MAX_VERTS);
                    assert!(
                        res.iter().all(in_bounds),
                        "clip returned oob vertex:\n\
                            input: {:?}\n\
                            output: {:?}",
                        [a, b, c],
                        res
                    );
                    total += 1;
                }
            }
        }
        assert_eq!(total, 5i32.pow(9));
    }
}
