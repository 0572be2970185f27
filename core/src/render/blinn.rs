//! Blinn–Phong shading.
//!
//! A ready-made vertex and fragment shader pair lighting a surface with a
//! single point light, with optional diffuse and specular textures. Pass
//! [`vertex_shader`] and [`fragment_shader`] to
//! [`Program::new`][super::shader::Program::new].

use crate::geom::{ModelVertex, Normal3, TexCoord};
use crate::impl_vary;
use crate::math::{Color3, Color4, Mat4, Vec3, Vec4};

use super::{Varyings, shader::Uniforms, tex::Texture};

/// A vertex with a position, texture coordinate, and surface normal in
/// model space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BlinnVertex {
    pub pos: Vec3,
    pub uv: TexCoord,
    pub normal: Normal3,
}

/// Varyings output by [`vertex_shader`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BlinnVar {
    pub world_pos: Vec3,
    pub world_normal: Normal3,
    pub uv: TexCoord,
}
impl_vary!(BlinnVar { world_pos, world_normal, uv });

/// Uniforms of the Blinn–Phong shaders.
#[derive(Clone, Debug)]
pub struct BlinnUniforms {
    /// Model-view-projection matrix.
    pub mvp: Mat4,
    /// Model-to-world matrix.
    pub model: Mat4,
    /// Matrix used to transform normals to world space; usually the
    /// inverse transpose of `model`.
    pub normal_to_world: Mat4,

    pub camera_pos: Vec3,
    pub light_pos: Vec3,

    pub light_ambient: Color3,
    pub light_diffuse: Color3,
    pub light_specular: Color3,
    /// Specular exponent; higher values give smaller, sharper highlights.
    pub shininess: f32,

    /// Diffuse color map. Modulates both ambient and diffuse light.
    pub diffuse: Option<Texture>,
    /// Specular strength map.
    pub specular: Option<Texture>,
}

impl ModelVertex for BlinnVertex {
    #[inline]
    fn model_pos(&self) -> Vec4 {
        self.pos.extend(1.0)
    }
}

impl Uniforms for BlinnUniforms {
    fn mvp(&self) -> &Mat4 {
        &self.mvp
    }
}

impl Default for BlinnUniforms {
    /// Identity transforms, camera and light on the positive Z axis, a dim
    /// white ambient light, and no textures.
    fn default() -> Self {
        Self {
            mvp: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            normal_to_world: Mat4::IDENTITY,
            camera_pos: Vec3::new(0.0, 0.0, 5.0),
            light_pos: Vec3::new(2.0, 3.0, 5.0),
            light_ambient: Color3::splat(0.1),
            light_diffuse: Color3::splat(0.8),
            light_specular: Color3::ONE,
            shininess: 32.0,
            diffuse: None,
            specular: None,
        }
    }
}

/// Transforms `v` to clip and world space.
pub fn vertex_shader(v: &BlinnVertex, uni: &BlinnUniforms) -> Varyings<BlinnVar> {
    let model_pos = v.model_pos();
    Varyings::new(
        *uni.mvp() * model_pos,
        BlinnVar {
            world_pos: (uni.model * model_pos).truncate(),
            world_normal: (uni.normal_to_world * v.normal.extend(0.0)).truncate(),
            uv: v.uv,
        },
    )
}

/// Computes the Blinn–Phong lighting of a fragment.
///
/// The result is `ambient + diffuse + specular` where
/// * ambient = light ambient × diffuse map,
/// * diffuse = max(0, N·L) × light diffuse × diffuse map,
/// * specular = max(0, N·H)<sup>shininess</sup> × light specular ×
///   specular map,
///
/// and a missing map counts as white. Alpha is always 1.
pub fn fragment_shader(
    frag: &Varyings<BlinnVar>,
    uni: &BlinnUniforms,
) -> Color4 {
    use crate::math::float::f32;

    let BlinnVar { world_pos, world_normal, uv } = frag.var;

    let n = world_normal.normalize_or_zero();
    let view_dir = (uni.camera_pos - world_pos).normalize_or_zero();
    let light_dir = (uni.light_pos - world_pos).normalize_or_zero();
    let half_dir = (light_dir + view_dir).normalize_or_zero();

    let diff_color = uni
        .diffuse
        .as_ref()
        .map_or(Color3::ONE, |t| t.sample(uv).truncate());
    let spec_strength = uni
        .specular
        .as_ref()
        .map_or(Color3::ONE, |t| t.sample(uv).truncate());

    let ambient = uni.light_ambient * diff_color;
    let diffuse = n.dot(light_dir).max(0.0) * uni.light_diffuse * diff_color;
    let spec = f32::powf(n.dot(half_dir).max(0.0), uni.shininess);
    let specular = spec * uni.light_specular * spec_strength;

    (ambient + diffuse + specular).extend(1.0)
}
