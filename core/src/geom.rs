//! Basic geometric primitives.

use crate::math::{Vec2, Vec3, Vec4};

/// Vertex with a position and arbitrary other attributes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex<P, A> {
    pub pos: P,
    pub attrib: A,
}

/// Triangle, defined by three vertices.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Tri<V>(pub [V; 3]);

/// A surface normal in 3D.
pub type Normal3 = Vec3;

/// A texture coordinate pair.
pub type TexCoord = Vec2;

/// Polygon winding order.
///
/// The triangle *ABC* below has clockwise winding, while
/// the triangle *DEF* has counter-clockwise winding.
///
/// ```text
///     B            F
///    / \          / \
///   /   \        /   \
///  /     \      /     \
/// A-------C    D-------E
///    Cw           Ccw
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Winding {
    /// Clockwise winding.
    Cw,
    /// Counter-clockwise winding.
    #[default]
    Ccw,
}

/// A vertex that can be fed to the rendering pipeline.
///
/// Every vertex type must expose a model-space position. The position is
/// homogeneous and its `w` component must equal 1.
pub trait ModelVertex {
    /// Returns the model-space position of `self`.
    fn model_pos(&self) -> Vec4;
}

/// Creates a `Vertex` with the given position and attribute values.
pub const fn vertex<P, A>(pos: P, attrib: A) -> Vertex<P, A> {
    Vertex { pos, attrib }
}

/// Creates a `Tri` with the given vertices.
pub const fn tri<V>(a: V, b: V, c: V) -> Tri<V> {
    Tri([a, b, c])
}

impl<A> ModelVertex for Vertex<Vec3, A> {
    #[inline]
    fn model_pos(&self) -> Vec4 {
        self.pos.extend(1.0)
    }
}

impl<A> ModelVertex for Vertex<Vec4, A> {
    #[inline]
    fn model_pos(&self) -> Vec4 {
        self.pos
    }
}

impl<V> Tri<V> {
    /// Returns a triangle with the vertices of `self` mapped by `f`.
    pub fn map<U>(self, f: impl FnMut(V) -> U) -> Tri<U> {
        Tri(self.0.map(f))
    }
}

/// Returns twice the signed area of the triangle *abc* projected to the
/// XY plane.
///
/// The area is positive if the triangle is wound counter-clockwise.
///
/// # Examples
/// ```
/// use rastrum_core::geom::signed_area;
/// use rastrum_core::math::vec2;
///
/// let [a, b, c] = [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0)];
/// assert_eq!(signed_area(a, b, c), 1.0);
/// assert_eq!(signed_area(a, c, b), -1.0);
/// ```
#[inline]
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    a.x * b.y - a.y * b.x + b.x * c.y - b.y * c.x + c.x * a.y - c.y * a.x
}

/// Returns the winding order of the triangle *abc* in the XY plane.
///
/// Degenerate triangles are considered clockwise.
pub fn winding(a: Vec2, b: Vec2, c: Vec2) -> Winding {
    if signed_area(a, b, c) > 0.0 {
        Winding::Ccw
    } else {
        Winding::Cw
    }
}
