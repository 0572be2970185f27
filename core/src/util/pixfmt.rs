//! Pixel formats and conversion of colors to pixels.
//!
//! The renderer works with floating-point colors whose channels are in the
//! range [0, 1]. Presentation layers usually want packed eight-bit channels;
//! this module provides the conversion.

use crate::math::{Color3, Color4};

pub trait IntoPixel<T, F>: Sized {
    /// Converts `self` to `T` in format `F`.
    fn into_pixel(self) -> T;

    /// Converts `self` to `T`, taking an `F` to help type inference.
    ///
    /// This can be used to avoid the awkward fully-qualified syntax
    /// `IntoPixel::<_, F>::into_pixel(self)`.
    fn into_pixel_fmt(self, _: F) -> T {
        self.into_pixel()
    }
}

/// Eight-bit channels in R,G,B order.
#[derive(Copy, Clone, Default)]
pub struct Rgb888;

/// Eight-bit channels in X,R,G,B order, where X is unused.
#[derive(Copy, Clone, Default)]
pub struct Xrgb8888;

/// Eight-bit channels in R,G,B,A order.
#[derive(Copy, Clone, Default)]
pub struct Rgba8888;

/// Converts a channel value in [0, 1] to an eight-bit integer.
///
/// Values outside the range are clamped. The result is truncated, not
/// rounded, so only exactly 1.0 maps to 255.
///
/// # Examples
/// ```
/// use rastrum_core::util::pixfmt::to_u8;
///
/// assert_eq!(to_u8(0.0), 0);
/// assert_eq!(to_u8(0.5), 127);
/// assert_eq!(to_u8(1.0), 255);
/// assert_eq!(to_u8(-3.0), 0);
/// ```
#[inline]
pub fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0) as u8
}

// Impls for Color3

impl IntoPixel<[u8; 3], Rgb888> for Color3 {
    fn into_pixel(self) -> [u8; 3] {
        self.to_array().map(to_u8)
    }
}

impl IntoPixel<u32, Xrgb8888> for Color3 {
    fn into_pixel(self) -> u32 {
        let [r, g, b] = self.into_pixel_fmt(Rgb888);
        // From [0x00, 0xRR, 0xGG, 0xBB] to 0x00_RR_GG_BB -> big-endian!
        u32::from_be_bytes([0, r, g, b])
    }
}

// Impls for Color4

impl IntoPixel<[u8; 4], Rgba8888> for Color4 {
    fn into_pixel(self) -> [u8; 4] {
        self.to_array().map(to_u8)
    }
}

impl IntoPixel<u32, Xrgb8888> for Color4 {
    fn into_pixel(self) -> u32 {
        self.truncate().into_pixel()
    }
}
