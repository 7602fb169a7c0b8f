//! Binary PPM (P6) encoding of a packed XRGB frame.

use gk_core::Color;
use std::io::{self, Write};

/// Write `pixels` (row-major XRGB8888) as a P6 image.
///
/// `pixels.len()` must equal `width * height`.
pub fn write_ppm<W: Write>(
    out: &mut W,
    width: u32,
    height: u32,
    pixels: &[u32],
) -> io::Result<()> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} pixels for a {width}x{height} frame", pixels.len()),
        ));
    }
    write!(out, "P6\n{width} {height}\n255\n")?;
    let mut row = Vec::with_capacity(width as usize * 3);
    for line in pixels.chunks(width.max(1) as usize) {
        row.clear();
        for &px in line {
            let Color { r, g, b } = Color::from_xrgb(px);
            row.extend_from_slice(&[r, g, b]);
        }
        out.write_all(&row)?;
    }
    out.flush()
}
