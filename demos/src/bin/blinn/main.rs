//! A Blinn–Phong lit mesh with a free-flying camera.
//!
//! Usage: `blinn [MESH.obj] [DIFFUSE] [SPECULAR]`
//!
//! Without a mesh, a cube is shown. The texture arguments can be any PNG or
//! JPEG images. Move with WASD, rise and sink with Space and Shift, and turn
//! with Q and E. The specular exponent grows over time, wrapping around
//! after 256.

use std::{env, ops::ControlFlow::Continue};

use anyhow::Context as _;

use re::prelude::*;
use re::render::blinn::{
    BlinnUniforms, BlinnVertex, fragment_shader, vertex_shader,
};
use re_front::{Frame, minifb::Window};
use re_geom::{Mesh, io::ObjAttrib, io::load_obj, solids::cube};

use cam::Camera;

mod cam;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let mesh = match args.next() {
        Some(path) => load_obj(&path)
            .with_context(|| format!("could not load mesh {path}"))?,
        None => cube(),
    };
    let diffuse = args.next().map(|p| load_texture(&p)).transpose()?;
    let specular = args.next().map(|p| load_texture(&p)).transpose()?;

    let tris = blinn_tris(&mesh);
    log::info!("drawing {} triangles", tris.len());

    let prog = Program::new(vertex_shader, fragment_shader);

    let mut win = Window::builder()
        .title("rastrum//blinn")
        .clear_color(rgb(0.05, 0.05, 0.1))
        .build()?;
    let (w, h) = win.dims;

    let mut cam = Camera::new(vec3(0.0, 0.0, 4.0), w as f32 / h as f32);
    let mut uni = BlinnUniforms {
        light_pos: vec3(3.0, 4.0, 4.0),
        shininess: 1.0,
        diffuse,
        specular,
        ..BlinnUniforms::default()
    };

    win.run(|frame: &mut Frame<Window>| {
        let dt = frame.dt_secs();
        let input = frame.win.poll_input();
        cam.update(&input, dt);

        uni.shininess *= 2f32.powf(dt * 2.0);
        if uni.shininess > 256.0 {
            uni.shininess -= 256.0;
        }

        let model = Mat4::from_rotation_y(frame.t.as_secs_f32() * 0.5);
        uni.model = model;
        uni.normal_to_world = model.inverse().transpose();
        uni.mvp = cam.projection() * cam.view() * model;
        uni.camera_pos = cam.pos;

        *frame.stats += draw_all(frame.buf, &prog, &tris, &uni);
        Continue(())
    })?;
    Ok(())
}

fn blinn_tris(mesh: &Mesh<ObjAttrib>) -> Vec<Tri<BlinnVertex>> {
    mesh.tris()
        .map(|t| {
            t.map(|v| BlinnVertex {
                pos: v.pos,
                uv: v.attrib.0,
                normal: v.attrib.1,
            })
        })
        .collect()
}

fn load_texture(path: &str) -> anyhow::Result<Texture> {
    let img = image::open(path)
        .with_context(|| format!("could not load texture {path}"))?
        .into_rgba32f();
    let (w, h) = img.dimensions();
    anyhow::ensure!(w > 0 && h > 0, "texture {path} is empty");
    log::info!("loaded {w}x{h} texture {path}");

    let texels = img.pixels().map(|p| Vec4::from_array(p.0));
    Ok(Texture::new(Buf2::new(w as usize, h as usize, texels)))
}
