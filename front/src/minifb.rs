//! Frontend using the `minifb` crate for window creation and event handling.

use std::{
    ops::ControlFlow::{self, Break},
    time::Instant,
};

use minifb::WindowOptions;

use re::math::Color3;
use re::render::{stats::Stats, target::Framebuffer};
use re::util::pixfmt::{IntoPixel, Xrgb8888};

use crate::{Frame, Input, Key};

/// A lightweight wrapper of a `minifb` window.
pub struct Window {
    /// The wrapped minifb window.
    pub imp: minifb::Window,
    /// The width and height of the window.
    pub dims: (usize, usize),
    /// The color the framebuffer is cleared to before each frame.
    pub clear_color: Color3,
    /// The depth the framebuffer is cleared to before each frame.
    pub clear_depth: f32,
    pixels: Vec<u32>,
}

/// Builder for creating `Window`s.
pub struct Builder<'title> {
    pub dims: (usize, usize),
    pub title: &'title str,
    pub target_fps: Option<usize>,
    pub clear_color: Color3,
    pub clear_depth: f32,
    pub opts: WindowOptions,
}

impl Default for Builder<'_> {
    /// An 800×600 window capped at 60 fps, cleared to black.
    fn default() -> Self {
        Self {
            dims: (800, 600),
            title: "// rastrum application //",
            target_fps: Some(60),
            clear_color: Color3::ZERO,
            clear_depth: 1.0,
            opts: WindowOptions::default(),
        }
    }
}

impl<'t> Builder<'t> {
    /// Sets the width and height of the window.
    pub fn dims(mut self, w: usize, h: usize) -> Self {
        self.dims = (w, h);
        self
    }
    /// Sets the title of the window.
    pub fn title(mut self, title: &'t str) -> Self {
        self.title = title;
        self
    }
    /// Sets the frame rate cap of the window. `None` means unlimited
    /// frame rate (the main loop runs as fast as possible).
    pub fn target_fps(mut self, fps: Option<usize>) -> Self {
        self.target_fps = fps;
        self
    }
    /// Sets the color the framebuffer is cleared to before each frame.
    pub fn clear_color(mut self, c: Color3) -> Self {
        self.clear_color = c;
        self
    }
    /// Sets other `minifb` options.
    pub fn options(mut self, opts: WindowOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Creates the window.
    ///
    /// # Errors
    /// Returns [`minifb::Error`] if the window cannot be created.
    pub fn build(self) -> minifb::Result<Window> {
        let Self {
            dims,
            title,
            target_fps,
            clear_color,
            clear_depth,
            opts,
        } = self;
        let mut imp = minifb::Window::new(title, dims.0, dims.1, opts)?;
        if let Some(fps) = target_fps {
            imp.set_target_fps(fps);
        }
        log::debug!("opened {}x{} window {title:?}", dims.0, dims.1);
        Ok(Window {
            imp,
            dims,
            clear_color,
            clear_depth,
            pixels: vec![0; dims.0 * dims.1],
        })
    }
}

impl Window {
    /// Returns a window builder.
    pub fn builder() -> Builder<'static> {
        Builder::default()
    }

    /// Updates the window content with the colors of `fb`.
    ///
    /// Row 0 of the framebuffer is shown at the bottom of the window.
    ///
    /// # Errors
    /// Returns [`minifb::Error`] if updating the window fails.
    pub fn present(&mut self, fb: &Framebuffer) -> minifb::Result<()> {
        let (w, h) = (fb.width(), fb.height());
        self.pixels.resize(w * h, 0);
        let rows = fb.color_buf().rows().rev();
        for (dst, src) in self.pixels.chunks_exact_mut(w).zip(rows) {
            for (d, &c) in dst.iter_mut().zip(src) {
                *d = IntoPixel::<u32, Xrgb8888>::into_pixel(c);
            }
        }
        self.imp.update_with_buffer(&self.pixels, w, h)
    }

    /// Returns the keys currently held down.
    pub fn poll_input(&self) -> Input {
        let keys = self
            .imp
            .get_keys()
            .into_iter()
            .filter_map(map_key)
            .collect();
        Input { keys }
    }

    /// Runs the main loop of the program, invoking the callback on each
    /// iteration to compute and draw the next frame.
    ///
    /// The main loop stops and this function returns if:
    /// * the user closes the window via the GUI (e.g. titlebar close button);
    /// * the Esc key is pressed; or
    /// * the callback returns `ControlFlow::Break`.
    ///
    /// Returns the statistics accumulated over all frames, also logged at
    /// the `info` level.
    ///
    /// # Errors
    /// Returns [`minifb::Error`] if updating the window fails.
    pub fn run<F>(&mut self, mut frame_fn: F) -> minifb::Result<Stats>
    where
        F: FnMut(&mut Frame<Self>) -> ControlFlow<()>,
    {
        let (w, h) = self.dims;
        let mut fb = Framebuffer::new(w, h);
        let mut stats = Stats::start();

        let start = Instant::now();
        let mut last = Instant::now();
        while !self.should_quit() {
            fb.clear(self.clear_color);
            fb.clear_depth(self.clear_depth);

            let frame = &mut Frame {
                t: start.elapsed(),
                dt: last.elapsed(),
                buf: &mut fb,
                win: self,
                stats: &mut stats,
            };
            last = Instant::now();
            if let Break(()) = frame_fn(frame) {
                break;
            }
            self.present(&fb)?;
            stats.frames += 1.0;
        }
        let stats = stats.finish();
        log::info!("\n{stats}");
        Ok(stats)
    }

    fn should_quit(&self) -> bool {
        !self.imp.is_open() || self.imp.is_key_down(minifb::Key::Escape)
    }
}

fn map_key(key: minifb::Key) -> Option<Key> {
    use minifb::Key as Mk;
    Some(match key {
        Mk::W => Key::W,
        Mk::A => Key::A,
        Mk::S => Key::S,
        Mk::D => Key::D,
        Mk::Q => Key::Q,
        Mk::E => Key::E,
        Mk::Up => Key::Up,
        Mk::Down => Key::Down,
        Mk::Left => Key::Left,
        Mk::Right => Key::Right,
        Mk::Space => Key::Space,
        Mk::LeftShift | Mk::RightShift => Key::Shift,
        Mk::Escape => Key::Escape,
        _ => return None,
    })
}
