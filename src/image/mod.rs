//! Raster composition of card faces on top of the `image` crate.

pub mod assets;
pub mod card;
pub mod raster;
pub mod sheet;

#[cfg(test)]
pub(crate) mod testing;

pub use assets::{AssetDir, GlyphSource, load_rgba};
pub use card::{
    CardBuilder, Diagnostics, SuitGlyphs, build_indicator, corner_placements, render_pips,
};
pub use raster::{composite, mirror_and_apply, point_reflected, resized, transparent};
pub use sheet::{PreviewSheet, outline_printable_box};
