//! Pip pattern library and the per-rank recipes that compose it.
//!
//! Every numeric rank is described as a fixed list of [`Step`]s. Glyphs are
//! drawn either straight onto the card or onto a half-height working surface
//! that is later pasted on top of the card and, half-turned, onto the bottom.
//! The raster renderer and [`plan_pips`] walk the same tables, so the planned
//! placements are exactly what a render produces.

use std::collections::BTreeSet;
use std::fmt;

use crate::core::config::LayoutConfig;
use crate::core::geometry::{PrintableBox, Placement, ensure_fits};
use crate::core::error::Result;
use crate::core::rank::Rank;

/// Structural arrangements of suit glyphs, in box-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// One glyph in the middle of the box.
    SingleCentered,
    /// Two glyphs on the vertical centre line, flush left and right.
    SidePair,
    /// One glyph horizontally centred on the top edge.
    TopRowCentered,
    /// One glyph horizontally centred a fifth of the box height down.
    TopRowOffset,
    /// One glyph horizontally centred a quarter of the working surface down.
    TopRowMid,
    /// Two glyphs on the top edge, flush left and right.
    TopPair,
    /// Two top pairs stacked so four glyph rows and three equal gaps fill the box.
    QuadBlock,
}

impl Pattern {
    /// Box-local top-left offsets for each glyph of this pattern.
    ///
    /// `surface_height` is the height of the raster the glyphs are drawn on; only
    /// [`Pattern::TopRowMid`] depends on it, everything else follows the box.
    pub fn offsets(self, printable: &PrintableBox, glyph: (u32, u32), surface_height: u32) -> Vec<(f64, f64)> {
        let box_width = f64::from(printable.width);
        let box_height = f64::from(printable.height);
        let glyph_width = f64::from(glyph.0);
        let glyph_height = f64::from(glyph.1);
        let centre_x = box_width / 2.0 - glyph_width / 2.0;
        let right_x = box_width - glyph_width;

        match self {
            Pattern::SingleCentered => vec![(centre_x, box_height / 2.0 - glyph_height / 2.0)],
            Pattern::SidePair => {
                let y = box_height / 2.0 - glyph_height / 2.0;
                vec![(0.0, y), (right_x, y)]
            }
            Pattern::TopRowCentered => vec![(centre_x, 0.0)],
            Pattern::TopRowOffset => vec![(centre_x, box_height / 5.0)],
            Pattern::TopRowMid => vec![(centre_x, f64::from(surface_height) / 4.0)],
            Pattern::TopPair => vec![(0.0, 0.0), (right_x, 0.0)],
            Pattern::QuadBlock => {
                let second_row = glyph_height + quad_gap(printable.height, glyph.1);
                vec![(0.0, 0.0), (right_x, 0.0), (0.0, second_row), (right_x, second_row)]
            }
        }
    }
}

/// Gap between rows when four glyph rows and three gaps share `surface_height`.
pub fn quad_gap(surface_height: u32, glyph_height: u32) -> f64 {
    (f64::from(surface_height) - 4.0 * f64::from(glyph_height)) / 3.0
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pattern::SingleCentered => "single-centered",
            Pattern::SidePair => "side-pair",
            Pattern::TopRowCentered => "top-row-centered",
            Pattern::TopRowOffset => "top-row-offset",
            Pattern::TopRowMid => "top-row-mid",
            Pattern::TopPair => "top-pair",
            Pattern::QuadBlock => "quad-block",
        };
        f.write_str(name)
    }
}

/// Raster a pattern is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Card,
    Half,
}

/// Which prepared suit glyph a step draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    Pip,
    /// The large ace glyph, sized independently of regular pips.
    Ace,
}

impl GlyphKind {
    pub fn size(self, config: &LayoutConfig) -> (u32, u32) {
        match self {
            GlyphKind::Pip => config.pip_size(),
            GlyphKind::Ace => (config.ace_size, config.ace_size),
        }
    }
}

/// One instruction of a rank recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Draw {
        pattern: Pattern,
        target: Target,
        glyph: GlyphKind,
    },
    /// Paste the working half onto the top of the card unchanged.
    Commit,
    /// Paste a half-turned copy of the working half onto the bottom of the card.
    Mirror,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Draw {
                pattern,
                target,
                glyph,
            } => {
                let surface = match target {
                    Target::Card => "card",
                    Target::Half => "half",
                };
                match glyph {
                    GlyphKind::Pip => write!(f, "{} ({})", pattern, surface),
                    GlyphKind::Ace => write!(f, "{} ({}, ace)", pattern, surface),
                }
            }
            Step::Commit => write!(f, "commit"),
            Step::Mirror => write!(f, "mirror"),
        }
    }
}

macro_rules! draw {
    ($pattern:ident, $target:ident) => {
        Step::Draw {
            pattern: Pattern::$pattern,
            target: Target::$target,
            glyph: GlyphKind::Pip,
        }
    };
}

static ACE: &[Step] = &[Step::Draw {
    pattern: Pattern::SingleCentered,
    target: Target::Card,
    glyph: GlyphKind::Ace,
}];

static TWO: &[Step] = &[draw!(TopRowCentered, Half), Step::Commit, Step::Mirror];

static THREE: &[Step] = &[
    draw!(SingleCentered, Card),
    draw!(TopRowCentered, Half),
    Step::Commit,
    Step::Mirror,
];

static FOUR: &[Step] = &[draw!(TopPair, Half), Step::Commit, Step::Mirror];

static FIVE: &[Step] = &[
    draw!(TopPair, Half),
    Step::Commit,
    Step::Mirror,
    draw!(SingleCentered, Card),
];

static SIX: &[Step] = &[
    draw!(TopPair, Half),
    Step::Commit,
    Step::Mirror,
    draw!(SidePair, Card),
];

// The odd middle pip is committed without a mirror pass.
static SEVEN: &[Step] = &[
    draw!(TopPair, Half),
    Step::Commit,
    Step::Mirror,
    draw!(SidePair, Card),
    draw!(TopRowOffset, Half),
    Step::Commit,
];

static EIGHT: &[Step] = &[
    draw!(TopPair, Half),
    Step::Commit,
    Step::Mirror,
    draw!(SidePair, Card),
    draw!(TopRowOffset, Half),
    Step::Commit,
    Step::Mirror,
];

static NINE: &[Step] = &[
    draw!(QuadBlock, Half),
    draw!(SingleCentered, Card),
    Step::Commit,
    Step::Mirror,
];

static TEN: &[Step] = &[
    draw!(QuadBlock, Half),
    Step::Commit,
    Step::Mirror,
    draw!(TopRowMid, Half),
    Step::Commit,
    Step::Mirror,
];

static COURT: &[Step] = &[];

/// Ordered pip steps for a rank. Court ranks draw no pips.
pub fn recipe(rank: Rank) -> &'static [Step] {
    match rank {
        Rank::Ace => ACE,
        Rank::Two => TWO,
        Rank::Three => THREE,
        Rank::Four => FOUR,
        Rank::Five => FIVE,
        Rank::Six => SIX,
        Rank::Seven => SEVEN,
        Rank::Eight => EIGHT,
        Rank::Nine => NINE,
        Rank::Ten => TEN,
        Rank::Jack | Rank::Queen | Rank::King => COURT,
    }
}

/// Height and width of the working half for a card canvas.
pub fn half_size(canvas: (u32, u32)) -> (u32, u32) {
    (canvas.0, canvas.1 / 2)
}

/// Distinct pip rectangles, in card pixels, that rendering `rank` produces.
///
/// Pips re-pasted by a later commit or mirror land on identical rectangles and
/// are reported once.
pub fn plan_pips(rank: Rank, canvas: (u32, u32), config: &LayoutConfig) -> Result<Vec<Placement>> {
    let printable = PrintableBox::for_canvas(canvas.0, canvas.1, config)?;
    let half = half_size(canvas);
    let mut working: Vec<Placement> = Vec::new();
    let mut card: BTreeSet<Placement> = BTreeSet::new();

    for step in recipe(rank) {
        match *step {
            Step::Draw {
                pattern,
                target,
                glyph,
            } => {
                let size = glyph.size(config);
                let surface = match target {
                    Target::Card => canvas,
                    Target::Half => half,
                };
                for (x, y) in pattern.offsets(&printable, size, surface.1) {
                    let (x, y) = printable.to_canvas(x, y);
                    ensure_fits("pip", x, y, size, surface)?;
                    let placement = Placement::new(x, y, size);
                    match target {
                        Target::Card => {
                            card.insert(placement);
                        }
                        Target::Half => working.push(placement),
                    }
                }
            }
            Step::Commit => card.extend(working.iter().copied()),
            Step::Mirror => card.extend(
                working
                    .iter()
                    .map(|p| p.point_reflected(half, i64::from(half.1))),
            ),
        }
    }

    Ok(card.into_iter().collect())
}
