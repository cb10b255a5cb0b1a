//! Raster-free layout rules: configuration, ranks, printable box geometry and pip recipes.

pub mod config;
pub mod error;
pub mod geometry;
pub mod pips;
pub mod rank;

pub use config::{LayoutConfig, ResampleFilter};
pub use error::{LayoutError, Result};
pub use geometry::{Orientation, Placement, PrintableBox, ensure_fits};
pub use pips::{GlyphKind, Pattern, Step, Target, half_size, plan_pips, quad_gap, recipe};
pub use rank::{NUMERIC_RANKS, Rank, STANDARD_RANKS};
