//! Writing framebuffers as PPM images.
//!
//! PPM is the RGB member of the PNM (also known as NetPBM) family of image
//! formats. A binary PPM file, sub-format P6, is a short textual header
//! followed by three bytes per pixel, rows from top to bottom.

use core::fmt::{self, Display, Formatter};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::render::target::Framebuffer;

use super::pixfmt::{IntoPixel, Rgb888};

/// The header of a binary PPM image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Header {
    width: usize,
    height: usize,
    max: u16,
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self { width, height, max } = self;
        writeln!(f, "P6 {width} {height} {max}")
    }
}

/// Writes the color buffer of `fb` to a file in PPM format, P6 sub-format
/// (binary 8-bits-per-channel RGB).
///
/// Caution: This function overwrites the file if it already exists.
/// Use [`write_ppm`] for more control over file creation.
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing.
pub fn save_ppm(path: impl AsRef<Path>, fb: &Framebuffer) -> io::Result<()> {
    let path = path.as_ref();
    log::debug!("writing {}x{} ppm to {}", fb.width(), fb.height(), path.display());
    let mut out = BufWriter::new(File::create(path)?);
    write_ppm(&mut out, fb)?;
    out.flush()
}

/// Writes the color buffer of `fb` to `out` in PPM format, P6 sub-format
/// (binary 8-bits-per-channel RGB).
///
/// The framebuffer's row 0 is the bottom row of the image, so rows are
/// written in reverse order.
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing.
pub fn write_ppm(mut out: impl Write, fb: &Framebuffer) -> io::Result<()> {
    let buf = fb.color_buf();
    let hdr = Header {
        width: buf.width(),
        height: buf.height(),
        max: 255,
    };
    write!(out, "{hdr}")?;

    buf.rows().rev().flatten().try_for_each(|&c| {
        let rgb: [u8; 3] = c.into_pixel_fmt(Rgb888);
        out.write_all(&rgb)
    })
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use crate::math::rgb;

    use super::*;

    #[test]
    fn header_format() {
        let hdr = Header { width: 64, height: 16, max: 255 };
        assert_eq!(hdr.to_string(), "P6 64 16 255\n");
    }

    #[test]
    fn write_ppm_top_row_first() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set_color(0, 0, rgb(1.0, 0.0, 0.0));
        fb.set_color(1, 0, rgb(0.0, 1.0, 0.0));
        fb.set_color(0, 1, rgb(0.0, 0.0, 1.0));
        fb.set_color(1, 1, rgb(1.0, 1.0, 0.0));

        let mut out = Vec::new();
        write_ppm(&mut out, &fb).unwrap();

        assert_eq!(
            &out,
            b"P6 2 2 255\n\
              \x00\x00\xFF\
              \xFF\xFF\x00\
              \xFF\x00\x00\
              \x00\xFF\x00"
        );
    }

    #[test]
    fn write_ppm_clamps_colors() {
        let mut fb = Framebuffer::new(1, 1);
        fb.clear(rgb(2.0, -1.0, 0.5));

        let mut out = Vec::new();
        write_ppm(&mut out, &fb).unwrap();
        assert_eq!(&out[out.len() - 3..], [0xFF, 0x00, 0x7F]);
    }
}
