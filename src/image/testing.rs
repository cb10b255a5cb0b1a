//! In-memory glyph sources for unit tests.

use image::{Rgba, RgbaImage};

use crate::core::error::Result;
use crate::core::rank::Rank;
use crate::image::assets::GlyphSource;
use crate::image::raster::transparent;

pub fn solid(width: u32, height: u32, colour: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, colour)
}

/// Transparent frame, square suit art and rectangular numerals in one colour.
pub struct MemoryAssets {
    frame: (u32, u32),
    ink: Rgba<u8>,
}

impl MemoryAssets {
    pub fn new(frame: (u32, u32), ink: Rgba<u8>) -> Self {
        Self { frame, ink }
    }
}

impl GlyphSource for MemoryAssets {
    fn frame(&self) -> Result<RgbaImage> {
        Ok(transparent(self.frame.0, self.frame.1))
    }

    fn suit_art(&self, _suit: usize) -> Result<RgbaImage> {
        Ok(solid(60, 60, self.ink))
    }

    fn numeral(&self, _suit: usize, _rank: Rank) -> Result<RgbaImage> {
        Ok(solid(16, 24, self.ink))
    }
}
