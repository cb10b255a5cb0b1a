use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::core::error::Result;
use crate::core::geometry::{PrintableBox, ensure_fits};

/// Fully transparent raster of the given size.
pub fn transparent(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
}

/// Alpha-blend `src` onto `dest` with its top-left corner at `(x, y)`.
///
/// The source must land wholly inside the destination.
pub fn composite(dest: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64, what: &'static str) -> Result<()> {
    ensure_fits(what, x, y, src.dimensions(), dest.dimensions())?;
    imageops::overlay(dest, src, x, y);
    Ok(())
}

/// Scaled copy of `src`; the source stays untouched.
pub fn resized(src: &RgbaImage, (width, height): (u32, u32), filter: FilterType) -> RgbaImage {
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    imageops::resize(src, width, height, filter)
}

/// Copy of `src` flipped vertically and then horizontally: a half turn.
pub fn point_reflected(src: &RgbaImage) -> RgbaImage {
    let flipped = imageops::flip_vertical(src);
    imageops::flip_horizontal(&flipped)
}

/// Paste a half-turned copy of `half` onto the lower half of `canvas`.
///
/// `half` itself is left as it was so later steps can keep drawing on it.
pub fn mirror_and_apply(canvas: &mut RgbaImage, half: &RgbaImage) -> Result<()> {
    let mirror = point_reflected(half);
    let paste_y = i64::from(canvas.height() / 2);
    composite(canvas, &mirror, 0, paste_y, "mirrored half")
}

impl PrintableBox {
    /// Composite `glyph` at a box-local offset, rounding the offset down.
    pub fn insert(&self, canvas: &mut RgbaImage, glyph: &RgbaImage, x: f64, y: f64) -> Result<()> {
        let (x, y) = self.to_canvas(x, y);
        composite(canvas, glyph, x, y, "pip")
    }
}
