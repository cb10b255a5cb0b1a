use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::core::error::{LayoutError, Result};
use crate::core::rank::{Rank, STANDARD_RANKS};

/// Resampling policy applied whenever a glyph is scaled to its target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleFilter::Nearest => write!(f, "nearest"),
            ResampleFilter::Triangle => write!(f, "triangle"),
            ResampleFilter::CatmullRom => write!(f, "catmull-rom"),
            ResampleFilter::Gaussian => write!(f, "gaussian"),
            ResampleFilter::Lanczos3 => write!(f, "lanczos3"),
        }
    }
}

/// Dimensions, margins and toggles that parameterise every layout computation.
///
/// Built once before rendering and passed by reference to each component, so
/// two decks with different settings can render side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Ranks rendered for each suit, in output order.
    pub ranks: Vec<Rank>,
    pub total_suits: usize,

    /// Edge length of the single large ace glyph.
    pub ace_size: u32,

    /// Inset of the printable box from the frame edges.
    pub frame_horizontal_margin: u32,
    pub frame_vertical_margin: u32,

    /// Vertical gap between the corner numeral and its mini suit glyph.
    pub indicator_number_margin: u32,

    pub mini_suit_width: u32,
    pub mini_suit_height: u32,
    pub number_width: u32,
    pub number_height: u32,

    /// Size of the regular pip glyph.
    pub suit_indicator_width: u32,
    pub suit_indicator_height: u32,

    /// Corner indicator offsets, measured from the card edge rather than the box.
    pub horizontal_margin: u32,
    pub vertical_margin: u32,

    /// Draw indicators in all four corners instead of top-left and bottom-right only.
    pub support_left_handed: bool,

    pub resample: ResampleFilter,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            ranks: STANDARD_RANKS.to_vec(),
            total_suits: 4,
            ace_size: 250,
            frame_horizontal_margin: 100,
            frame_vertical_margin: 100,
            indicator_number_margin: 10,
            mini_suit_width: 60,
            mini_suit_height: 70,
            number_width: 54,
            number_height: 74,
            suit_indicator_width: 170,
            suit_indicator_height: 170,
            horizontal_margin: 15,
            vertical_margin: 60,
            support_left_handed: true,
            resample: ResampleFilter::default(),
        }
    }
}

impl LayoutConfig {
    /// Read a JSON layout file; absent fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: LayoutConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that cannot produce a well-formed card.
    pub fn validate(&self) -> Result<()> {
        let dimensions = [
            ("ace_size", self.ace_size),
            ("frame_horizontal_margin", self.frame_horizontal_margin),
            ("frame_vertical_margin", self.frame_vertical_margin),
            ("indicator_number_margin", self.indicator_number_margin),
            ("mini_suit_width", self.mini_suit_width),
            ("mini_suit_height", self.mini_suit_height),
            ("number_width", self.number_width),
            ("number_height", self.number_height),
            ("suit_indicator_width", self.suit_indicator_width),
            ("suit_indicator_height", self.suit_indicator_height),
            ("horizontal_margin", self.horizontal_margin),
            ("vertical_margin", self.vertical_margin),
        ];
        if let Some((name, _)) = dimensions.iter().find(|(_, value)| *value == 0) {
            return Err(LayoutError::Configuration(format!(
                "{} must be a positive number of pixels",
                name
            )));
        }
        if self.ranks.is_empty() {
            return Err(LayoutError::Configuration(
                "at least one rank must be rendered".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        if let Some(rank) = self.ranks.iter().find(|rank| !seen.insert(**rank)) {
            return Err(LayoutError::Configuration(format!(
                "rank {} is listed more than once",
                rank
            )));
        }
        if self.total_suits == 0 {
            return Err(LayoutError::Configuration(
                "total_suits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pip_size(&self) -> (u32, u32) {
        (self.suit_indicator_width, self.suit_indicator_height)
    }

    pub fn mini_suit_size(&self) -> (u32, u32) {
        (self.mini_suit_width, self.mini_suit_height)
    }

    pub fn numeral_size(&self) -> (u32, u32) {
        (self.number_width, self.number_height)
    }

    pub fn filter(&self) -> FilterType {
        self.resample.filter_type()
    }
}
