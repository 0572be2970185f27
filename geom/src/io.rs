//! Loading meshes from Wavefront OBJ files.
//!
//! OBJ is a line-based text format. The records supported are:
//!
//! Record | Meaning
//! ------ | -------
//! `v`    | vertex position `x y z`
//! `vt`   | texture coordinate `u v`
//! `vn`   | vertex normal `x y z`
//! `f`    | face, a list of three or more corners
//!
//! Each face corner is `p`, `p/t`, `p//n`, or `p/t/n`, where `p`, `t`,
//! and `n` are one-based indices to the lists of positions, texture
//! coordinates, and normals respectively. Negative indices count backwards
//! from the most recent record. Comments starting with `#` and records of
//! other types are ignored.

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display, Formatter};
use core::num::ParseFloatError;
#[cfg(feature = "std")]
use std::{fs, io, path::Path};

use re::geom::{Normal3, TexCoord};
use re::math::{Vec2, Vec3, vec2, vec3};

use crate::Mesh;

use Error::*;

/// Error during loading or parsing an OBJ file.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// An I/O error occurred.
    #[cfg(feature = "std")]
    Io(io::ErrorKind),
    /// A record had too few values, or a face too few corners.
    Truncated { line: usize },
    /// A value could not be parsed as a number.
    InvalidNumber { line: usize, value: String },
    /// A face corner referred to a nonexistent position, texture
    /// coordinate, or normal.
    IndexOutOfBounds { line: usize, index: isize },
}

/// Result of loading or parsing an OBJ file.
pub type Result<T> = core::result::Result<T, Error>;

/// The vertex attributes of a loaded mesh.
pub type ObjAttrib = (TexCoord, Normal3);

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "std")]
            Io(kind) => write!(f, "error reading obj file: {kind}"),
            Truncated { line } => {
                write!(f, "line {line}: too few values in record")
            }
            InvalidNumber { line, value } => {
                write!(f, "line {line}: invalid number {value:?}")
            }
            IndexOutOfBounds { line, index } => {
                write!(f, "line {line}: index {index} out of bounds")
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Io(e.kind())
    }
}

/// Loads an OBJ mesh from a file.
///
/// # Errors
/// Returns [`Error`] if the file cannot be read or is not valid OBJ.
#[cfg(feature = "std")]
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh<ObjAttrib>> {
    let path = path.as_ref();
    let src = fs::read_to_string(path)?;
    let mesh = read_obj(&src)?;
    log::info!(
        "loaded {}: {} faces, {} vertices",
        path.display(),
        mesh.faces.len(),
        mesh.verts.len()
    );
    Ok(mesh)
}

/// Parses an OBJ mesh from a string.
///
/// Every face corner becomes a vertex of its own. Faces with more than three
/// corners are split into a fan of triangles. Corners without a texture
/// coordinate get (0, 0); corners without a normal get the normal of the
/// face's plane.
///
/// # Examples
/// ```
/// use rastrum_geom::io::read_obj;
///
/// let mesh = read_obj("
///     v 0 0 0
///     v 1 0 0
///     v 1 1 0
///     v 0 1 0
///     f 1 2 3 4
/// ").unwrap();
///
/// assert_eq!(mesh.faces.len(), 2);
/// assert_eq!(mesh.verts.len(), 6);
/// ```
///
/// # Errors
/// Returns [`Error`] if `src` is not valid OBJ.
pub fn read_obj(src: &str) -> Result<Mesh<ObjAttrib>> {
    let mut positions = Vec::new();
    let mut tex_coords = Vec::new();
    let mut normals = Vec::new();
    let mut b = Mesh::builder();

    for (line, text) in (1..).zip(src.lines()) {
        let text = text.split('#').next().unwrap_or_default();
        let mut tokens = text.split_ascii_whitespace();
        let Some(kind) = tokens.next() else {
            continue;
        };
        match kind {
            "v" => positions.push(parse_vec3(line, tokens)?),
            "vn" => normals.push(parse_vec3(line, tokens)?),
            "vt" => tex_coords.push(parse_vec2(line, tokens)?),
            "f" => {
                let corners = tokens
                    .map(|c| parse_corner(line, c))
                    .collect::<Result<Vec<_>>>()?;
                if corners.len() < 3 {
                    return Err(Truncated { line });
                }
                let pos: Vec<Vec3> = corners
                    .iter()
                    .map(|c| lookup(&positions, c.pos, line))
                    .collect::<Result<_>>()?;
                let face_n = face_normal(&pos);

                let mut idcs = Vec::with_capacity(corners.len());
                for (c, p) in corners.iter().zip(&pos) {
                    let uv = c.uv.map_or(Ok(Vec2::ZERO), |i| {
                        lookup(&tex_coords, i, line)
                    })?;
                    let n = c
                        .normal
                        .map_or(Ok(face_n), |i| lookup(&normals, i, line))?;
                    idcs.push(b.push_vert(*p, (uv, n)));
                }
                for pair in idcs[1..].windows(2) {
                    b.push_face(idcs[0], pair[0], pair[1]);
                }
            }
            other => log::trace!("line {line}: ignoring record {other:?}"),
        }
    }
    Ok(b.build())
}

/// The raw indices of a face corner.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Corner {
    pos: isize,
    uv: Option<isize>,
    normal: Option<isize>,
}

fn parse_corner(line: usize, s: &str) -> Result<Corner> {
    let mut parts = s.split('/');
    let idx = |p: Option<&str>| -> Result<Option<isize>> {
        match p {
            None | Some("") => Ok(None),
            Some(p) => p
                .parse()
                .map(Some)
                .map_err(|_| InvalidNumber { line, value: p.into() }),
        }
    };
    let pos = idx(parts.next())?.ok_or(Truncated { line })?;
    let uv = idx(parts.next())?;
    let normal = idx(parts.next())?;
    Ok(Corner { pos, uv, normal })
}

/// Resolves a one-based or negative relative OBJ index.
fn lookup<T: Copy>(items: &[T], index: isize, line: usize) -> Result<T> {
    let i = if index < 0 {
        items.len().checked_sub(index.unsigned_abs())
    } else {
        index.checked_sub(1).map(|i| i as usize)
    };
    i.and_then(|i| items.get(i).copied())
        .ok_or(IndexOutOfBounds { line, index })
}

fn parse_floats<'a, const N: usize>(
    line: usize,
    mut tokens: impl Iterator<Item = &'a str>,
) -> Result<[f32; N]> {
    let mut res = [0.0; N];
    for r in &mut res {
        let tok = tokens.next().ok_or(Truncated { line })?;
        *r = tok.parse().map_err(|_: ParseFloatError| InvalidNumber {
            line,
            value: tok.into(),
        })?;
    }
    Ok(res)
}

fn parse_vec3<'a>(
    line: usize,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<Vec3> {
    let [x, y, z] = parse_floats(line, tokens)?;
    Ok(vec3(x, y, z))
}

fn parse_vec2<'a>(
    line: usize,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<Vec2> {
    let [u, v] = parse_floats(line, tokens)?;
    Ok(vec2(u, v))
}

/// Returns the unit normal of the plane of the first three points,
/// or zero if they are collinear.
fn face_normal(pos: &[Vec3]) -> Normal3 {
    let (a, b, c) = (pos[0], pos[1], pos[2]);
    (b - a).cross(c - a).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    const QUAD: &str = "
# A unit square
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 1.0
vn 0.0 0.0 1.0

s off
f 1/1/1 2/2/1 3/2/1
f 1//1 3//1 4//1  # trailing comment
";

    #[test]
    fn read_corners_and_attributes() {
        let mesh = read_obj(QUAD).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.verts.len(), 6);

        let v = &mesh.verts;
        assert_eq!(v[1].pos, vec3(1.0, 0.0, 0.0));
        assert_eq!(v[1].attrib, (vec2(1.0, 1.0), Vec3::Z));
        // No texture coordinate given
        assert_eq!(v[5].attrib, (Vec2::ZERO, Vec3::Z));
        assert_eq!(v[5].pos, vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn polygons_are_fanned() {
        let mesh = read_obj("v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5").unwrap();
        let faces: Vec<_> = mesh.faces.iter().map(|t| t.0).collect();
        assert_eq!(faces, [[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn missing_normal_is_face_normal() {
        let mesh = read_obj("v 0 0 0\nv 0 0 -1\nv 0 1 0\nf 1 2 3").unwrap();
        assert!(mesh.verts.iter().all(|v| v.attrib.1 == Vec3::X));
    }

    #[test]
    fn negative_indices_are_relative() {
        let mesh = read_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1").unwrap();
        assert_eq!(mesh.verts[0].pos, Vec3::ZERO);
        assert_eq!(mesh.verts[2].pos, Vec3::Y);
    }

    #[test]
    fn errors_have_line_numbers() {
        assert_eq!(
            read_obj("v 0 0 0\nv 1 zero 0").unwrap_err(),
            InvalidNumber { line: 2, value: "zero".into() }
        );
        assert_eq!(read_obj("\n\nvt 0.5").unwrap_err(), Truncated { line: 3 });
        assert_eq!(
            read_obj("v 0 0 0\nf 1 2 1").unwrap_err(),
            IndexOutOfBounds { line: 2, index: 2 }
        );
        assert_eq!(
            read_obj("v 0 0 0\nf 1 0 1").unwrap_err(),
            IndexOutOfBounds { line: 2, index: 0 }
        );
        assert_eq!(read_obj("v 0 0 0\nf 1 1").unwrap_err(), Truncated { line: 2 });
        assert_eq!(
            read_obj("f 1/x/1").unwrap_err(),
            InvalidNumber { line: 1, value: "x".into() }
        );
    }

    #[test]
    fn error_display() {
        let e = IndexOutOfBounds { line: 7, index: -2 };
        assert_eq!(e.to_string(), "line 7: index -2 out of bounds");
    }

    #[test]
    fn empty_input_is_empty_mesh() {
        let mesh = read_obj("# nothing here\n\n").unwrap();
        assert!(mesh.faces.is_empty());
        assert!(mesh.verts.is_empty());
    }

    #[cfg(feature = "std")]
    #[test]
    fn load_missing_file() {
        let res = load_obj("does/not/exist.obj");
        assert_eq!(res.unwrap_err(), Io(io::ErrorKind::NotFound));
    }
}
