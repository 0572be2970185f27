//! A spinning triangle with interpolated vertex colors.

use std::ops::ControlFlow::Continue;

use re::prelude::*;
use re_front::{Frame, minifb::Window};

type ColorVertex = Vertex<Vec3, Color3>;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let tri = tri(
        vertex(vec3(-1.0, -1.0, 0.0), rgb(1.0, 0.0, 0.0)),
        vertex(vec3(1.0, -1.0, 0.0), rgb(0.0, 0.8, 0.0)),
        vertex(vec3(0.0, 1.0, 0.0), rgb(0.4, 0.4, 1.0)),
    );

    let prog = Program::new(
        |v: &ColorVertex, mvp: &Mat4| Varyings::new(*mvp * v.model_pos(), v.attrib),
        |f: &Varyings<Color3>, _: &Mat4| f.var.extend(1.0),
    )
    // Show both sides while spinning
    .with(Context { double_sided: true, ..Context::default() });

    let mut win = Window::builder().title("rastrum//hello").build()?;
    let (w, h) = win.dims;
    let proj = Mat4::perspective_rh_gl(1.0, w as f32 / h as f32, 0.1, 100.0);

    win.run(|frame: &mut Frame<Window>| {
        let secs = frame.t.as_secs_f32();
        let mvp = proj
            * Mat4::from_translation(vec3(0.0, 0.0, -3.0))
            * Mat4::from_rotation_y(secs);

        *frame.stats += draw(frame.buf, &prog, &tri, &mvp);
        Continue(())
    })?;
    Ok(())
}
