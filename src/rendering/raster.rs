//! Frame rasterization: module grid to a fixed-size RGBA bitmap plus PNG
//! encoding.

use std::io::Cursor;

use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::rendering::Frame;

/// Paint `frame` into a bitmap of exactly `size x size` pixels.
///
/// Pixels sample the module grid with nearest-module mapping, so the output
/// is fully determined by the frame: identical frames produce identical
/// buffers. When the pixel size is smaller than the grid, modules alias but
/// the mapping stays deterministic.
pub fn rasterize(frame: &Frame) -> RgbaImage {
    let size = frame.config.size;
    let grid = frame.grid_dimension() as u32;
    let fg = Rgba(frame.config.foreground.rgba());
    let bg = Rgba(frame.config.background.rgba());

    let mut img = RgbaImage::new(size, size);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let mx = (x as u64 * grid as u64 / size as u64) as i32;
        let my = (y as u64 * grid as u64 / size as u64) as i32;
        *pixel = if frame.module_at(mx, my) { fg } else { bg };
    }
    img
}

/// Encode a rasterized frame as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| Error::Capture(format!("PNG encoding failed: {}", e)))?;
    Ok(buf)
}
