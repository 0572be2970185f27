//! Textures and texture sampling.

use crate::geom::TexCoord;
use crate::math::Color4;
use crate::util::buf::Buf2;

/// How texture coordinates outside [0, 1] are mapped to texels.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Wrap {
    /// Coordinates are clamped to the nearest edge texel.
    #[default]
    Clamp,
    /// The texture repeats infinitely in both directions.
    Repeat,
}

/// A type that can be sampled with texture coordinates.
///
/// Shaders that only need to look up colors can be written against this
/// trait rather than a concrete texture type.
pub trait Sample {
    /// Returns the color at texture coordinates `uv`.
    fn sample(&self, uv: TexCoord) -> Color4;
}

/// A two-dimensional image used as a color lookup table.
///
/// Texels are stored in image order, the top row first. Texture space
/// has its origin at the *bottom* left corner of the image: (0, 0) is the
/// bottom left and (1, 1) the top right corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    texels: Buf2<Color4>,
    wrap: Wrap,
}

impl Texture {
    /// Creates a texture from a buffer of texels, using [`Wrap::Clamp`].
    ///
    /// # Panics
    /// If `texels` is empty.
    pub fn new(texels: Buf2<Color4>) -> Self {
        assert!(
            texels.width() > 0 && texels.height() > 0,
            "texture must not be empty"
        );
        Self { texels, wrap: Wrap::default() }
    }

    /// Returns `self` with the wrap mode replaced by `wrap`.
    pub fn with_wrap(self, wrap: Wrap) -> Self {
        Self { wrap, ..self }
    }

    /// Returns the width of `self` in texels.
    #[inline]
    pub fn width(&self) -> usize {
        self.texels.width()
    }
    /// Returns the height of `self` in texels.
    #[inline]
    pub fn height(&self) -> usize {
        self.texels.height()
    }
    /// Returns the wrap mode of `self`.
    #[inline]
    pub fn wrap(&self) -> Wrap {
        self.wrap
    }
    /// Returns the texels of `self`, the top row first.
    pub fn texels(&self) -> &Buf2<Color4> {
        &self.texels
    }

    /// Returns the texel nearest to `uv`.
    ///
    /// # Examples
    /// ```
    /// use rastrum_core::math::{rgba, vec2};
    /// use rastrum_core::render::tex::Texture;
    /// use rastrum_core::util::buf::Buf2;
    ///
    /// let black = rgba(0.0, 0.0, 0.0, 1.0);
    /// let white = rgba(1.0, 1.0, 1.0, 1.0);
    /// // Top row white, bottom row black
    /// let tex = Texture::new(Buf2::new_with(2, 2, |_, y| {
    ///     if y == 0 { white } else { black }
    /// }));
    /// assert_eq!(tex.sample(vec2(0.25, 0.25)), black);
    /// assert_eq!(tex.sample(vec2(0.25, 0.75)), white);
    /// ```
    pub fn sample(&self, uv: TexCoord) -> Color4 {
        let (w, h) = (self.width(), self.height());
        let x = self.wrap.apply(floor(uv.x * w as f32), w);
        let y = self.wrap.apply(floor(uv.y * h as f32), h);
        // Flip from bottom-up texture space to top-down rows
        self.texels[[x, h - 1 - y]]
    }
}

impl From<Buf2<Color4>> for Texture {
    fn from(texels: Buf2<Color4>) -> Self {
        Self::new(texels)
    }
}

impl Wrap {
    /// Maps texel coordinate `i` to the range 0..`n`.
    fn apply(self, i: f32, n: usize) -> usize {
        // Saturating float to int conversion; NaN maps to 0
        let i = i as isize;
        let n = n as isize;
        match self {
            Self::Clamp => i.clamp(0, n - 1) as usize,
            Self::Repeat => i.rem_euclid(n) as usize,
        }
    }
}

impl Sample for Texture {
    fn sample(&self, uv: TexCoord) -> Color4 {
        Texture::sample(self, uv)
    }
}

/// A constant color samples as itself everywhere.
impl Sample for Color4 {
    fn sample(&self, _: TexCoord) -> Color4 {
        *self
    }
}

fn floor(x: f32) -> f32 {
    use crate::math::float::f32;
    f32::floor(x)
}
