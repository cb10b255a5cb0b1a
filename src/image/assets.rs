use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::core::error::{LayoutError, Result};
use crate::core::rank::Rank;

/// Supplies the source artwork a deck is composed from.
pub trait GlyphSource {
    /// Frame template every card is stamped with; its size is the card size.
    fn frame(&self) -> Result<RgbaImage>;
    /// Full-resolution artwork for suit `suit`.
    fn suit_art(&self, suit: usize) -> Result<RgbaImage>;
    /// Corner numeral for `rank` in the colouring of suit `suit`.
    fn numeral(&self, suit: usize, rank: Rank) -> Result<RgbaImage>;
}

/// Asset tree on disk:
///
/// ```text
/// art/frame.png
/// art/suit-{n}.png
/// numbers/suit-{n}/{rank}.png
/// ```
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn frame_path(&self) -> PathBuf {
        self.root.join("art").join("frame.png")
    }

    pub fn suit_path(&self, suit: usize) -> PathBuf {
        self.root.join("art").join(format!("suit-{}.png", suit))
    }

    pub fn numeral_path(&self, suit: usize, rank: Rank) -> PathBuf {
        self.root
            .join("numbers")
            .join(format!("suit-{}", suit))
            .join(format!("{}.png", rank.label()))
    }
}

impl GlyphSource for AssetDir {
    fn frame(&self) -> Result<RgbaImage> {
        load_rgba(&self.frame_path())
    }

    fn suit_art(&self, suit: usize) -> Result<RgbaImage> {
        load_rgba(&self.suit_path(suit))
    }

    fn numeral(&self, suit: usize, rank: Rank) -> Result<RgbaImage> {
        load_rgba(&self.numeral_path(suit, rank))
    }
}

/// Decode an image file into RGBA, reporting the path when it cannot be read.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    log::debug!("loading {}", path.display());
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| LayoutError::AssetMissing {
            path: path.to_path_buf(),
            source,
        })
}
