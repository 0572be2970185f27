//! Render targets.
//!
//! The render target of the pipeline is a [`Framebuffer`], comprising a color
//! buffer and a depth buffer of equal size.

use crate::math::Color3;
use crate::util::buf::Buf2;

/// Framebuffer, combining a color (pixel) buffer and a depth buffer.
///
/// Pixels are addressed by (x, y) where x is the column and y the row.
/// Row 0 is the *bottom* row of the image: screen-space Y grows upwards,
/// like normalized device coordinates. Presenters flip the rows when
/// converting to the usual top-down image order.
///
/// The framebuffer never resizes itself.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    color: Buf2<Color3>,
    depth: Buf2<f32>,
}

impl Framebuffer {
    /// Creates a framebuffer of size `w` × `h` with every pixel black and
    /// every depth value 1.0, the far end of the depth range.
    pub fn new(w: usize, h: usize) -> Self {
        log::debug!("allocating {w}x{h} framebuffer");
        Self {
            color: Buf2::new_with(w, h, |_, _| Color3::ZERO),
            depth: Buf2::new_with(w, h, |_, _| 1.0),
        }
    }

    /// Returns the width of `self` in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.color.width()
    }
    /// Returns the height of `self` in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.color.height()
    }

    /// Returns the color of the pixel at (x, y).
    ///
    /// # Panics
    /// If (x, y) is out of bounds.
    #[inline]
    pub fn color(&self, x: usize, y: usize) -> Color3 {
        self.color[[x, y]]
    }
    /// Sets the color of the pixel at (x, y).
    ///
    /// # Panics
    /// If (x, y) is out of bounds.
    #[inline]
    pub fn set_color(&mut self, x: usize, y: usize, c: Color3) {
        self.color[[x, y]] = c;
    }

    /// Returns the depth value at (x, y).
    ///
    /// # Panics
    /// If (x, y) is out of bounds.
    #[inline]
    pub fn depth(&self, x: usize, y: usize) -> f32 {
        self.depth[[x, y]]
    }
    /// Sets the depth value at (x, y).
    ///
    /// # Panics
    /// If (x, y) is out of bounds.
    #[inline]
    pub fn set_depth(&mut self, x: usize, y: usize, z: f32) {
        self.depth[[x, y]] = z;
    }

    /// Fills the color buffer with `c`.
    pub fn clear(&mut self, c: Color3) {
        self.color.fill(c);
    }
    /// Fills the depth buffer with `z`.
    pub fn clear_depth(&mut self, z: f32) {
        self.depth.fill(z);
    }

    /// Returns the color buffer.
    pub fn color_buf(&self) -> &Buf2<Color3> {
        &self.color
    }
    /// Returns the depth buffer.
    pub fn depth_buf(&self) -> &Buf2<f32> {
        &self.depth
    }
}
