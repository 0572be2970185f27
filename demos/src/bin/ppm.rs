//! Renders a lit cube without a window and saves it as a PPM image.
//!
//! Usage: `ppm [OUTPUT]`; the output path defaults to `cube.ppm`.

use std::env;

use anyhow::Context as _;

use re::prelude::*;
use re::render::blinn::{
    BlinnUniforms, BlinnVertex, fragment_shader, vertex_shader,
};
use re::util::pnm::save_ppm;
use re_geom::solids::cube;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let out = env::args().nth(1).unwrap_or_else(|| "cube.ppm".into());

    let (w, h) = (640, 480);
    let mut fb = Framebuffer::new(w, h);
    fb.clear(rgb(0.1, 0.1, 0.15));

    let tris: Vec<_> = cube()
        .tris()
        .map(|t| {
            t.map(|v| BlinnVertex {
                pos: v.pos,
                uv: v.attrib.0,
                normal: v.attrib.1,
            })
        })
        .collect();

    let camera_pos = vec3(2.5, 2.0, 3.5);
    let model = Mat4::from_rotation_y(0.3);
    let view = Mat4::look_at_rh(camera_pos, Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh_gl(1.0, w as f32 / h as f32, 0.1, 100.0);

    let uni = BlinnUniforms {
        mvp: proj * view * model,
        model,
        normal_to_world: model.inverse().transpose(),
        camera_pos,
        light_pos: vec3(3.0, 4.0, 2.0),
        light_diffuse: rgb(0.9, 0.6, 0.3),
        ..BlinnUniforms::default()
    };

    let prog = Program::new(vertex_shader, fragment_shader);
    let stats = draw_all(&mut fb, &prog, &tris, &uni);
    log::info!("\n{stats}");

    save_ppm(&out, &fb).with_context(|| format!("writing {out}"))?;
    println!("wrote {w}x{h} image to {out}");
    Ok(())
}
