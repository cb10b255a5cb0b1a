//! Playing-card face generator: pip layout, corner indicators and deck output.

pub mod core;
pub mod deck;
pub mod image;

pub use crate::core::{
    LayoutConfig, LayoutError, NUMERIC_RANKS, Orientation, Pattern, Placement, PrintableBox,
    Rank, ResampleFilter, STANDARD_RANKS, Step, Target, plan_pips, recipe,
};
pub use crate::deck::{
    Manifest, ManifestEntry, Mismatch, RenderPlan, RenderedCard, build_deck, build_preview,
    build_suit, render_deck, write_deck,
};
pub use crate::image::{
    AssetDir, CardBuilder, Diagnostics, GlyphSource, SuitGlyphs, build_indicator, render_pips,
};

/// Render a full deck from an asset directory into `plan.output`.
pub fn render_from_dir(
    assets: &AssetDir,
    config: &LayoutConfig,
    diagnostics: Diagnostics,
    plan: &RenderPlan,
) -> crate::core::Result<Manifest> {
    config.validate()?;
    let builder = CardBuilder::new(config, assets).with_diagnostics(diagnostics);
    render_deck(&builder, plan)
}
