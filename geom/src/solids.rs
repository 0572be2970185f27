//! Mesh approximations of geometric shapes.

use re::geom::{Normal3, TexCoord};
use re::math::{Vec3, vec2, vec3};

use crate::Mesh;

/// Returns an axis-aligned cube with side length 2, centered at the
/// origin.
///
/// Every face has its own four vertices with the face normal and texture
/// coordinates covering the whole texture. Faces are wound
/// counter-clockwise when viewed from outside the cube.
pub fn cube() -> Mesh<(TexCoord, Normal3)> {
    cuboid(Vec3::splat(-1.0), Vec3::splat(1.0))
}

/// Returns an axis-aligned box with opposite corners `min` and `max`.
///
/// See [`cube`] for the vertex layout.
pub fn cuboid(min: Vec3, max: Vec3) -> Mesh<(TexCoord, Normal3)> {
    // Corners indexed by bits: X = 0b100, Y = 0b010, Z = 0b001
    #[rustfmt::skip]
    const FACES: [(Normal3, [usize; 4]); 6] = [
        (vec3(-1.0, 0.0, 0.0), [0b000, 0b001, 0b011, 0b010]),
        (vec3(1.0, 0.0, 0.0),  [0b101, 0b100, 0b110, 0b111]),
        (vec3(0.0, -1.0, 0.0), [0b000, 0b100, 0b101, 0b001]),
        (vec3(0.0, 1.0, 0.0),  [0b011, 0b111, 0b110, 0b010]),
        (vec3(0.0, 0.0, -1.0), [0b100, 0b000, 0b010, 0b110]),
        (vec3(0.0, 0.0, 1.0),  [0b001, 0b101, 0b111, 0b011]),
    ];
    const UVS: [TexCoord; 4] =
        [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)];

    let corner = |bits: usize| {
        let pick = |bit: usize, lo: f32, hi: f32| {
            if bits & bit != 0 { hi } else { lo }
        };
        vec3(
            pick(0b100, min.x, max.x),
            pick(0b010, min.y, max.y),
            pick(0b001, min.z, max.z),
        )
    };

    let mut b = Mesh::builder();
    for (normal, corners) in FACES {
        let [i, j, k, l] = [0, 1, 2, 3]
            .map(|n| b.push_vert(corner(corners[n]), (UVS[n], normal)));
        b.push_faces([[i, j, k], [i, k, l]]);
    }
    b.build()
}
