//! Card face composition: pips, corner indicators and the frame.

use std::path::PathBuf;

use image::RgbaImage;

use crate::core::config::LayoutConfig;
use crate::core::error::{LayoutError, Result};
use crate::core::geometry::{Orientation, Placement, PrintableBox};
use crate::core::pips::{GlyphKind, Pattern, Step, Target, half_size, recipe};
use crate::core::rank::Rank;
use crate::image::assets::GlyphSource;
use crate::image::raster::{composite, mirror_and_apply, point_reflected, resized, transparent};
use crate::image::sheet::outline_printable_box;

/// Suit artwork plus the scaled copies the pip layout draws with.
///
/// Built once per suit and shared read-only by every card of that suit.
#[derive(Debug, Clone)]
pub struct SuitGlyphs {
    art: RgbaImage,
    pip: RgbaImage,
    ace: RgbaImage,
}

impl SuitGlyphs {
    pub fn prepare(art: RgbaImage, config: &LayoutConfig) -> Self {
        let filter = config.filter();
        let pip = resized(&art, config.pip_size(), filter);
        let ace = resized(&art, (config.ace_size, config.ace_size), filter);
        Self { art, pip, ace }
    }

    pub fn art(&self) -> &RgbaImage {
        &self.art
    }

    pub fn glyph(&self, kind: GlyphKind) -> &RgbaImage {
        match kind {
            GlyphKind::Pip => &self.pip,
            GlyphKind::Ace => &self.ace,
        }
    }
}

fn draw_pattern(
    surface: &mut RgbaImage,
    printable: &PrintableBox,
    pattern: Pattern,
    glyph: &RgbaImage,
) -> Result<()> {
    let surface_height = surface.height();
    for (x, y) in pattern.offsets(printable, glyph.dimensions(), surface_height) {
        printable.insert(surface, glyph, x, y)?;
    }
    Ok(())
}

/// Draw the pips of `rank` onto `canvas` following its recipe.
pub fn render_pips(
    canvas: &mut RgbaImage,
    rank: Rank,
    glyphs: &SuitGlyphs,
    config: &LayoutConfig,
) -> Result<()> {
    let printable = PrintableBox::for_canvas(canvas.width(), canvas.height(), config)?;
    let (half_width, half_height) = half_size(canvas.dimensions());
    let mut half: Option<RgbaImage> = None;

    for step in recipe(rank) {
        log::trace!("rank {}: {}", rank, step);
        match *step {
            Step::Draw {
                pattern,
                target,
                glyph,
            } => {
                let glyph = glyphs.glyph(glyph);
                let surface = match target {
                    Target::Card => &mut *canvas,
                    Target::Half => half.get_or_insert_with(|| transparent(half_width, half_height)),
                };
                draw_pattern(surface, &printable, pattern, glyph)?;
            }
            Step::Commit => {
                if let Some(half) = half.as_ref() {
                    composite(canvas, half, 0, 0, "half")?;
                }
            }
            Step::Mirror => {
                if let Some(half) = half.as_ref() {
                    mirror_and_apply(canvas, half)?;
                }
            }
        }
    }
    Ok(())
}

/// Stack a numeral above a miniature suit glyph on a transparent background.
///
/// The numeral is expected at its configured size; the suit glyph is scaled
/// to the mini size on a copy.
pub fn build_indicator(numeral: &RgbaImage, suit: &RgbaImage, config: &LayoutConfig) -> Result<RgbaImage> {
    let (mini_width, mini_height) = config.mini_suit_size();
    let width = numeral.width().max(mini_width);
    let height = numeral.height() + mini_height + config.indicator_number_margin;
    let mut indicator = transparent(width, height);

    let numeral_x = centred(width, config.number_width);
    composite(&mut indicator, numeral, numeral_x, 0, "numeral")?;

    let mini = resized(suit, (mini_width, mini_height), config.filter());
    let mini_y = i64::from(numeral.height() + config.indicator_number_margin);
    composite(&mut indicator, &mini, centred(width, mini_width), mini_y, "mini suit")?;
    Ok(indicator)
}

fn centred(outer: u32, inner: u32) -> i64 {
    (f64::from(outer) / 2.0 - f64::from(inner) / 2.0).floor() as i64
}

/// Corner positions for an indicator of `indicator` size on a `canvas` sized card.
///
/// Top-left and bottom-right always; top-right and bottom-left as well in
/// four-corner mode. Bottom corners carry the half-turned indicator.
pub fn corner_placements(
    canvas: (u32, u32),
    indicator: (u32, u32),
    config: &LayoutConfig,
) -> Vec<Placement> {
    let top_y = i64::from(config.vertical_margin);
    let bottom_y = i64::from(canvas.1) - i64::from(config.vertical_margin) - i64::from(indicator.1);
    let left_x = i64::from(config.horizontal_margin);
    let right_x = i64::from(canvas.0) - i64::from(config.horizontal_margin) - i64::from(indicator.0);

    let upright = |x, y| Placement::new(x, y, indicator);
    let turned = |x, y| Placement {
        orientation: Orientation::Reflected,
        ..Placement::new(x, y, indicator)
    };

    let mut corners = vec![upright(left_x, top_y)];
    if config.support_left_handed {
        corners.push(upright(right_x, top_y));
    }
    corners.push(turned(right_x, bottom_y));
    if config.support_left_handed {
        corners.push(turned(left_x, bottom_y));
    }
    corners
}

/// Optional debugging output while building cards.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Write every freshly built indicator here, overwriting the previous one.
    pub indicator_snapshot: Option<PathBuf>,
    /// Outline the printable box on each card.
    pub outline_box: bool,
}

/// Assembles complete card faces from a glyph source.
pub struct CardBuilder<'a, S: GlyphSource + ?Sized> {
    config: &'a LayoutConfig,
    assets: &'a S,
    diagnostics: Diagnostics,
}

impl<'a, S: GlyphSource + ?Sized> CardBuilder<'a, S> {
    pub fn new(config: &'a LayoutConfig, assets: &'a S) -> Self {
        Self {
            config,
            assets,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &'a LayoutConfig {
        self.config
    }

    pub fn assets(&self) -> &'a S {
        self.assets
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Stamp the frame, lay out the pips and place the corner indicators.
    ///
    /// Returns where the indicators went.
    pub fn build_card(
        &self,
        canvas: &mut RgbaImage,
        frame: &RgbaImage,
        rank: Rank,
        suit_index: usize,
        suit: &SuitGlyphs,
    ) -> Result<Vec<Placement>> {
        log::debug!("building suit {} card {}", suit_index, rank);
        composite(canvas, frame, 0, 0, "frame")?;
        render_pips(canvas, rank, suit, self.config)?;

        let numeral = self.assets.numeral(suit_index, rank)?;
        let numeral = resized(&numeral, self.config.numeral_size(), self.config.filter());
        let indicator = build_indicator(&numeral, suit.art(), self.config)?;
        self.snapshot_indicator(&indicator)?;

        let turned = point_reflected(&indicator);
        let corners = corner_placements(canvas.dimensions(), indicator.dimensions(), self.config);
        for corner in &corners {
            let glyph = match corner.orientation {
                Orientation::Upright => &indicator,
                Orientation::Reflected => &turned,
            };
            composite(canvas, glyph, corner.x, corner.y, "indicator")?;
        }

        if self.diagnostics.outline_box {
            let printable = PrintableBox::for_canvas(canvas.width(), canvas.height(), self.config)?;
            outline_printable_box(canvas, &printable);
        }
        Ok(corners)
    }

    fn snapshot_indicator(&self, indicator: &RgbaImage) -> Result<()> {
        match &self.diagnostics.indicator_snapshot {
            Some(path) => indicator.save(path).map_err(|source| LayoutError::Encode {
                path: path.clone(),
                source,
            }),
            None => {
                log::trace!(
                    "indicator {}x{} built (snapshot disabled)",
                    indicator.width(),
                    indicator.height()
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ResampleFilter;
    use crate::core::pips::plan_pips;
    use crate::core::rank::{NUMERIC_RANKS, STANDARD_RANKS};
    use crate::image::testing::{MemoryAssets, solid};
    use image::Rgba;
    use pretty_assertions::assert_eq;

    const INK: Rgba<u8> = Rgba([20, 20, 120, 255]);

    fn small_config() -> LayoutConfig {
        LayoutConfig {
            ace_size: 60,
            frame_horizontal_margin: 20,
            frame_vertical_margin: 20,
            indicator_number_margin: 4,
            mini_suit_width: 10,
            mini_suit_height: 10,
            number_width: 8,
            number_height: 12,
            suit_indicator_width: 30,
            suit_indicator_height: 30,
            horizontal_margin: 2,
            vertical_margin: 4,
            resample: ResampleFilter::Nearest,
            ..LayoutConfig::default()
        }
    }

    fn opaque_pixels(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p[3] != 0).count()
    }

    #[test]
    fn indicator_dimensions_stack_numeral_and_mini_suit() {
        let config = LayoutConfig {
            resample: ResampleFilter::Nearest,
            ..LayoutConfig::default()
        };
        let numeral = solid(54, 74, INK);
        let suit = solid(170, 170, INK);
        let indicator = build_indicator(&numeral, &suit, &config).unwrap();
        assert_eq!(indicator.dimensions(), (60, 154));
        // numeral centred at x = 3, mini suit flush at x = 0 below the gap
        assert_eq!(indicator.get_pixel(2, 0)[3], 0);
        assert_eq!(*indicator.get_pixel(3, 0), INK);
        assert_eq!(indicator.get_pixel(0, 80)[3], 0);
        assert_eq!(*indicator.get_pixel(0, 84), INK);
    }

    #[test]
    fn indicator_is_deterministic() {
        let config = LayoutConfig::default();
        let numeral = solid(54, 74, INK);
        let mut suit = solid(170, 170, INK);
        suit.put_pixel(5, 5, Rgba([255, 255, 255, 128]));
        let first = build_indicator(&numeral, &suit, &config).unwrap();
        let second = build_indicator(&numeral, &suit, &config).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn rendered_pips_match_the_plan() {
        let config = small_config();
        let glyphs = SuitGlyphs::prepare(solid(30, 30, INK), &config);
        for rank in STANDARD_RANKS {
            let mut canvas = transparent(200, 300);
            render_pips(&mut canvas, rank, &glyphs, &config).unwrap();
            let plan = plan_pips(rank, (200, 300), &config).unwrap();
            let expected: usize = plan.iter().map(|p| (p.width * p.height) as usize).sum();
            assert_eq!(opaque_pixels(&canvas), expected, "rank {}", rank);
            for p in &plan {
                assert_eq!(*canvas.get_pixel(p.x as u32, p.y as u32), INK);
            }
        }
    }

    #[test]
    fn numeric_faces_survive_a_half_turn() {
        let config = small_config();
        let assets = MemoryAssets::new((200, 300), INK);
        let builder = CardBuilder::new(&config, &assets);
        let frame = assets.frame().unwrap();
        let glyphs = SuitGlyphs::prepare(assets.suit_art(0).unwrap(), &config);
        for rank in NUMERIC_RANKS {
            let mut canvas = transparent(200, 300);
            builder.build_card(&mut canvas, &frame, rank, 0, &glyphs).unwrap();
            let turned = point_reflected(&canvas);
            assert_eq!(turned == canvas, rank != Rank::Seven, "rank {}", rank);
        }
    }

    #[test]
    fn card_keeps_frame_size() {
        let config = small_config();
        let assets = MemoryAssets::new((200, 300), INK);
        let builder = CardBuilder::new(&config, &assets);
        let frame = assets.frame().unwrap();
        let glyphs = SuitGlyphs::prepare(assets.suit_art(1).unwrap(), &config);
        for rank in STANDARD_RANKS {
            let mut canvas = transparent(frame.width(), frame.height());
            builder.build_card(&mut canvas, &frame, rank, 1, &glyphs).unwrap();
            assert_eq!(canvas.dimensions(), frame.dimensions());
        }
    }

    #[test]
    fn ace_glyph_ignores_pip_size() {
        let config = small_config();
        let glyphs = SuitGlyphs::prepare(solid(90, 90, INK), &config);
        assert_eq!(glyphs.glyph(GlyphKind::Ace).dimensions(), (60, 60));
        assert_eq!(glyphs.glyph(GlyphKind::Pip).dimensions(), (30, 30));
        let mut canvas = transparent(200, 300);
        render_pips(&mut canvas, Rank::Ace, &glyphs, &config).unwrap();
        assert_eq!(opaque_pixels(&canvas), 60 * 60);
        assert_eq!(*canvas.get_pixel(70, 120), INK);
        assert_eq!(canvas.get_pixel(69, 120)[3], 0);
    }

    #[test]
    fn two_corner_mode_places_two_indicators() {
        let config = LayoutConfig {
            support_left_handed: false,
            ..small_config()
        };
        let assets = MemoryAssets::new((200, 300), INK);
        let builder = CardBuilder::new(&config, &assets);
        let frame = assets.frame().unwrap();
        let glyphs = SuitGlyphs::prepare(assets.suit_art(0).unwrap(), &config);
        let mut canvas = transparent(200, 300);
        let corners = builder
            .build_card(&mut canvas, &frame, Rank::King, 0, &glyphs)
            .unwrap();
        // indicator: width max(8, 10) = 10, height 12 + 10 + 4 = 26
        let positions: Vec<(i64, i64, Orientation)> =
            corners.iter().map(|c| (c.x, c.y, c.orientation)).collect();
        assert_eq!(
            positions,
            vec![
                (2, 4, Orientation::Upright),
                (188, 270, Orientation::Reflected)
            ]
        );
        assert_eq!(opaque_pixels(&canvas), 2 * (8 * 12 + 10 * 10));
    }

    #[test]
    fn four_corner_mode_is_half_turn_symmetric() {
        let config = small_config();
        let corners = corner_placements((200, 300), (10, 26), &config);
        assert_eq!(corners.len(), 4);
        for corner in &corners {
            let turned = corner.point_reflected((200, 300), 0);
            assert!(corners.contains(&turned), "{corner:?}");
        }
    }

    #[test]
    fn frame_larger_than_canvas_overflows() {
        let config = small_config();
        let assets = MemoryAssets::new((200, 300), INK);
        let builder = CardBuilder::new(&config, &assets);
        let frame = solid(210, 300, INK);
        let glyphs = SuitGlyphs::prepare(assets.suit_art(0).unwrap(), &config);
        let mut canvas = transparent(200, 300);
        let err = builder
            .build_card(&mut canvas, &frame, Rank::Two, 0, &glyphs)
            .unwrap_err();
        assert!(matches!(err, LayoutError::GeometryOverflow { what: "frame", .. }));
    }
}
