//! Triangle meshes.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};

use re::geom::{Tri, Vertex, vertex};
use re::math::Vec3;

/// A triangle mesh.
///
/// An object made of flat triangular faces that typically form a contiguous
/// surface, approximating a possibly curved shape. Faces refer to vertices
/// by index, so several faces can share a vertex.
#[derive(Clone)]
pub struct Mesh<A> {
    /// The faces of the mesh, with each face a triplet of indices
    /// to the `verts` vector.
    pub faces: Vec<Tri<usize>>,
    /// The vertices of the mesh.
    pub verts: Vec<Vertex<Vec3, A>>,
}

/// A builder for meshes, checking the face indices on completion.
#[derive(Clone, Debug)]
pub struct Builder<A> {
    mesh: Mesh<A>,
}

impl<A> Mesh<A> {
    /// Creates a new triangle mesh with the given faces and vertices.
    ///
    /// # Examples
    /// ```
    /// use re::geom::{Tri, vertex};
    /// use re::math::{Vec3, vec2};
    /// use rastrum_geom::Mesh;
    ///
    /// // A unit square in the XY plane, split along its diagonal
    /// let corners = [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)];
    /// let quad = Mesh::new(
    ///     [Tri([0, 1, 2]), Tri([0, 2, 3])],
    ///     corners.map(|uv| vertex(uv.extend(0.0), uv)),
    /// );
    /// assert_eq!(quad.verts.len(), 4);
    /// assert_eq!(quad.tris().nth(1).unwrap().0[2].pos, Vec3::Y);
    /// ```
    /// # Panics
    /// If any of the vertex indices in `faces` ≥ `verts.len()`.
    pub fn new<F, V>(faces: F, verts: V) -> Self
    where
        F: IntoIterator<Item = Tri<usize>>,
        V: IntoIterator<Item = Vertex<Vec3, A>>,
    {
        let faces: Vec<_> = faces.into_iter().collect();
        let verts: Vec<_> = verts.into_iter().collect();

        for (i, Tri(vs)) in faces.iter().enumerate() {
            assert!(
                vs.iter().all(|&j| j < verts.len()),
                "vertex index out of bounds at faces[{i}]: {vs:?}"
            )
        }
        Self { faces, verts }
    }

    /// Returns a new mesh builder.
    pub fn builder() -> Builder<A> {
        Builder { mesh: Mesh::default() }
    }

    /// Returns an iterator over the faces of `self`, with the indices
    /// replaced by the vertices they refer to.
    pub fn tris(&self) -> impl Iterator<Item = Tri<Vertex<Vec3, A>>> + '_
    where
        A: Clone,
    {
        self.faces
            .iter()
            .map(|Tri(vs)| Tri(vs.map(|i| self.verts[i].clone())))
    }
}

impl<A> Builder<A> {
    /// Appends a face with the given vertex indices.
    pub fn push_face(&mut self, a: usize, b: usize, c: usize) {
        self.mesh.faces.push(Tri([a, b, c]));
    }

    /// Appends all the faces yielded by the given iterator.
    pub fn push_faces<Fs>(&mut self, faces: Fs)
    where
        Fs: IntoIterator<Item = [usize; 3]>,
    {
        self.mesh.faces.extend(faces.into_iter().map(Tri));
    }

    /// Appends a vertex with the given position and attribute, returning
    /// its index.
    pub fn push_vert(&mut self, pos: Vec3, attrib: A) -> usize {
        self.mesh.verts.push(vertex(pos, attrib));
        self.mesh.verts.len() - 1
    }

    /// Returns the finished mesh containing all the added faces and vertices.
    ///
    /// # Panics
    /// If any of the vertex indices in `faces` ≥ `verts.len()`.
    pub fn build(self) -> Mesh<A> {
        let Mesh { faces, verts } = self.mesh;
        Mesh::new(faces, verts)
    }
}

impl<A: Debug> Debug for Mesh<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("faces", &self.faces)
            .field("verts", &self.verts)
            .finish()
    }
}

impl<A> Default for Mesh<A> {
    fn default() -> Self {
        Self { faces: Vec::new(), verts: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use re::math::vec3;

    use super::*;

    #[test]
    fn tris_resolve_indices() {
        let mut b = Mesh::builder();
        let i = b.push_vert(vec3(0.0, 0.0, 0.0), 'a');
        let j = b.push_vert(vec3(1.0, 0.0, 0.0), 'b');
        let k = b.push_vert(vec3(0.0, 1.0, 0.0), 'c');
        b.push_faces([[i, j, k], [k, j, i]]);
        let mesh = b.build();

        let attrs: Vec<_> = mesh.tris().map(|t| t.0.map(|v| v.attrib)).collect();
        assert_eq!(attrs, [['a', 'b', 'c'], ['c', 'b', 'a']]);
    }

    #[test]
    #[should_panic = "out of bounds at faces[1]"]
    fn new_rejects_dangling_index() {
        let verts = [Vec3::ZERO, Vec3::X, Vec3::Y].map(|p| vertex(p, ()));
        _ = Mesh::new([Tri([0, 1, 2]), Tri([2, 1, 3])], verts);
    }

    #[test]
    #[should_panic]
    fn build_rejects_face_added_before_its_vertices() {
        let mut b = Mesh::builder();
        b.push_face(0, 1, 2);
        b.push_vert(Vec3::ZERO, ());
        _ = b.build();
    }

    #[test]
    fn shared_vertices_are_stored_once() {
        let mut b = Mesh::<()>::builder();
        let vs = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z].map(|p| b.push_vert(p, ()));
        b.push_faces([[vs[0], vs[1], vs[2]], [vs[0], vs[2], vs[3]]]);
        let mesh = b.build();
        assert_eq!(mesh.verts.len(), 4);
        assert_eq!(mesh.tris().count(), 2);
    }

    #[test]
    fn default_is_empty() {
        let mesh = Mesh::<()>::default();
        assert!(mesh.faces.is_empty() && mesh.verts.is_empty());
        assert_eq!(mesh.tris().count(), 0);
    }
}
