//! Whole-deck rendering, output files and the render manifest.

use std::fs::{self, OpenOptions};
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::config::LayoutConfig;
use crate::core::error::{LayoutError, Result};
use crate::core::rank::Rank;
use crate::image::assets::GlyphSource;
use crate::image::card::{CardBuilder, SuitGlyphs};
use crate::image::raster::transparent;
use crate::image::sheet::PreviewSheet;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const PREVIEW_FILE: &str = "preview.png";
pub const INDICATOR_SNAPSHOT_FILE: &str = "debug_card_indicator.png";

/// One finished card face.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub suit: usize,
    /// Position of the rank within the configured rank list.
    pub column: usize,
    pub rank: Rank,
    pub image: RgbaImage,
}

impl RenderedCard {
    pub fn file_name(&self) -> String {
        card_file_name(self.suit, self.rank)
    }
}

pub fn card_file_name(suit: usize, rank: Rank) -> String {
    format!("suit_{}_card_{}.png", suit, rank.label())
}

/// Build every configured rank of one suit, in rank order.
pub fn build_suit<S: GlyphSource + ?Sized>(
    builder: &CardBuilder<'_, S>,
    frame: &RgbaImage,
    suit: usize,
    glyphs: &SuitGlyphs,
) -> Result<Vec<RenderedCard>> {
    let ranks = &builder.config().ranks;
    let mut cards = Vec::with_capacity(ranks.len());
    for (column, &rank) in ranks.iter().enumerate() {
        cards.push(build_one(builder, frame, suit, column, rank, glyphs)?);
    }
    log::info!("suit {}: built {} cards", suit, cards.len());
    Ok(cards)
}

fn build_one<S: GlyphSource + ?Sized>(
    builder: &CardBuilder<'_, S>,
    frame: &RgbaImage,
    suit: usize,
    column: usize,
    rank: Rank,
    glyphs: &SuitGlyphs,
) -> Result<RenderedCard> {
    let mut image = transparent(frame.width(), frame.height());
    builder.build_card(&mut image, frame, rank, suit, glyphs)?;
    Ok(RenderedCard {
        suit,
        column,
        rank,
        image,
    })
}

/// Build all cards of the deck, suit by suit.
///
/// Cards share nothing mutable, so with `parallel` set (and the `parallel`
/// feature compiled in) they are rendered across threads and joined; the
/// result order is the same either way.
pub fn build_deck<S: GlyphSource + Sync + ?Sized>(
    builder: &CardBuilder<'_, S>,
    parallel: bool,
) -> Result<Vec<RenderedCard>> {
    let config = builder.config();
    let assets = builder.assets();
    let frame = assets.frame()?;
    let mut suits = Vec::with_capacity(config.total_suits);
    for suit in 0..config.total_suits {
        suits.push(SuitGlyphs::prepare(assets.suit_art(suit)?, config));
    }

    // Concurrent writers would race on the single snapshot file.
    let parallel = parallel && builder.diagnostics().indicator_snapshot.is_none();
    if parallel {
        build_parallel(builder, &frame, &suits)
    } else {
        let mut cards = Vec::with_capacity(config.total_suits * config.ranks.len());
        for (suit, glyphs) in suits.iter().enumerate() {
            cards.extend(build_suit(builder, &frame, suit, glyphs)?);
        }
        Ok(cards)
    }
}

#[cfg(feature = "parallel")]
fn build_parallel<S: GlyphSource + Sync + ?Sized>(
    builder: &CardBuilder<'_, S>,
    frame: &RgbaImage,
    suits: &[SuitGlyphs],
) -> Result<Vec<RenderedCard>> {
    use rayon::prelude::*;

    let ranks = &builder.config().ranks;
    let jobs: Vec<(usize, usize, Rank)> = (0..suits.len())
        .flat_map(|suit| {
            ranks
                .iter()
                .enumerate()
                .map(move |(column, &rank)| (suit, column, rank))
        })
        .collect();
    log::info!("rendering {} cards in parallel", jobs.len());
    jobs.par_iter()
        .map(|&(suit, column, rank)| build_one(builder, frame, suit, column, rank, &suits[suit]))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn build_parallel<S: GlyphSource + Sync + ?Sized>(
    builder: &CardBuilder<'_, S>,
    frame: &RgbaImage,
    suits: &[SuitGlyphs],
) -> Result<Vec<RenderedCard>> {
    log::debug!("built without the parallel feature; rendering sequentially");
    let mut cards = Vec::new();
    for (suit, glyphs) in suits.iter().enumerate() {
        cards.extend(build_suit(builder, frame, suit, glyphs)?);
    }
    Ok(cards)
}

/// Sheet of every card: ranks across, suits down.
pub fn build_preview(cards: &[RenderedCard], config: &LayoutConfig) -> Result<RgbaImage> {
    let tile = match cards.first() {
        Some(card) => card.image.dimensions(),
        None => return Ok(transparent(1, 1)),
    };
    let mut sheet = PreviewSheet::new(tile, config.ranks.len(), config.total_suits)?;
    for card in cards {
        sheet.place(card.column, card.suit, &card.image)?;
    }
    Ok(sheet.into_image())
}

/// Record of a rendered card file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub suit: usize,
    pub rank: Rank,
    pub file: String,
    pub sha256: String,
}

/// Index of a rendered deck directory, used to detect changed or missing outputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub layout: LayoutConfig,
    #[serde(default)]
    pub preview_sha256: Option<String>,
    pub cards: Vec<ManifestEntry>,
}

/// Outcome of checking one file listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    Missing(String),
    Changed {
        file: String,
        expected: String,
        actual: String,
    },
}

impl Manifest {
    pub fn load(dir: &Path) -> Result<Self> {
        let file = OpenOptions::new().read(true).open(dir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(dir.join(MANIFEST_FILE))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Re-hash every listed file under `dir`.
    pub fn verify(&self, dir: &Path) -> Result<Vec<Mismatch>> {
        let mut mismatches = Vec::new();
        let mut expected: Vec<(&str, &str)> = self
            .cards
            .iter()
            .map(|entry| (entry.file.as_str(), entry.sha256.as_str()))
            .collect();
        if let Some(preview) = self.preview_sha256.as_deref() {
            expected.push((PREVIEW_FILE, preview));
        }
        for (file, digest) in expected {
            let path = dir.join(file);
            if !path.exists() {
                mismatches.push(Mismatch::Missing(file.to_string()));
                continue;
            }
            let actual = sha256_hex(&fs::read(&path)?);
            if actual != digest {
                mismatches.push(Mismatch::Changed {
                    file: file.to_string(),
                    expected: digest.to_string(),
                    actual,
                });
            }
        }
        Ok(mismatches)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:02x}")
}

fn encode_png(image: &RgbaImage, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|source| LayoutError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(bytes)
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<String> {
    let bytes = encode_png(image, path)?;
    fs::write(path, &bytes)?;
    log::debug!("wrote {}", path.display());
    Ok(sha256_hex(&bytes))
}

/// Write each card, the preview sheet and the manifest into `dir`.
pub fn write_deck(
    dir: &Path,
    cards: &[RenderedCard],
    preview: Option<&RgbaImage>,
    config: &LayoutConfig,
) -> Result<Manifest> {
    fs::create_dir_all(dir)?;
    let mut entries = Vec::with_capacity(cards.len());
    for card in cards {
        let file = card.file_name();
        let sha256 = write_png(&card.image, &dir.join(&file))?;
        entries.push(ManifestEntry {
            suit: card.suit,
            rank: card.rank,
            file,
            sha256,
        });
    }
    let preview_sha256 = match preview {
        Some(sheet) => Some(write_png(sheet, &dir.join(PREVIEW_FILE))?),
        None => None,
    };
    let manifest = Manifest {
        generated_at: Utc::now(),
        layout: config.clone(),
        preview_sha256,
        cards: entries,
    };
    manifest.save(dir)?;
    log::info!("wrote {} cards to {}", cards.len(), dir.display());
    Ok(manifest)
}

/// Everything a deck render run needs besides the assets.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub output: PathBuf,
    pub parallel: bool,
    pub preview: bool,
}

/// Build the deck from the builder's assets and write it out.
pub fn render_deck<S: GlyphSource + Sync + ?Sized>(
    builder: &CardBuilder<'_, S>,
    plan: &RenderPlan,
) -> Result<Manifest> {
    let config = builder.config();
    let cards = build_deck(builder, plan.parallel)?;
    let preview = if plan.preview {
        Some(build_preview(&cards, config)?)
    } else {
        None
    };
    write_deck(&plan.output, &cards, preview.as_ref(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ResampleFilter;
    use crate::core::rank::STANDARD_RANKS;
    use crate::image::testing::MemoryAssets;
    use image::Rgba;
    use pretty_assertions::assert_eq;

    const INK: Rgba<u8> = Rgba([140, 10, 10, 255]);

    fn config() -> LayoutConfig {
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

    #[test]
    fn deck_covers_every_suit_and_rank_in_order() {
        let config = config();
        let assets = MemoryAssets::new((200, 300), INK);
        let builder = CardBuilder::new(&config, &assets);
        let cards = build_deck(&builder, false).unwrap();
        assert_eq!(cards.len(), 52);
        assert_eq!(cards[0].file_name(), "suit_0_card_A.png");
        assert_eq!(cards[51].file_name(), "suit_3_card_K.png");
        assert_eq!(cards[9].rank, STANDARD_RANKS[9]);
        assert!(cards.iter().all(|c| c.image.dimensions() == (200, 300)));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let config = config();
        let assets = MemoryAssets::new((200, 300), INK);
        let builder = CardBuilder::new(&config, &assets);
        let sequential = build_deck(&builder, false).unwrap();
        let parallel = build_deck(&builder, true).unwrap();
        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!((a.suit, a.rank), (b.suit, b.rank));
            assert!(a.image == b.image, "{}", a.file_name());
        }
    }

    #[test]
    fn preview_tiles_cards_by_rank_and_suit() {
        let config = LayoutConfig {
            ranks: vec![Rank::Ace, Rank::Two],
            total_suits: 2,
            ..config()
        };
        let assets = MemoryAssets::new((200, 300), INK);
        let builder = CardBuilder::new(&config, &assets);
        let cards = build_deck(&builder, false).unwrap();
        let preview = build_preview(&cards, &config).unwrap();
        assert_eq!(preview.dimensions(), (400, 600));
        let two_of_suit_one = &cards[3];
        assert_eq!((two_of_suit_one.column, two_of_suit_one.suit), (1, 1));
        assert_eq!(
            preview.get_pixel(200 + 85, 300 + 20),
            two_of_suit_one.image.get_pixel(85, 20)
        );
    }

    #[test]
    fn manifest_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = LayoutConfig {
            ranks: vec![Rank::Three],
            total_suits: 1,
            ..config()
        };
        let assets = MemoryAssets::new((200, 300), INK);
        let builder = CardBuilder::new(&config, &assets);
        let plan = RenderPlan {
            output: dir.path().to_path_buf(),
            parallel: false,
            preview: true,
        };
        let manifest = render_deck(&builder, &plan).unwrap();
        assert_eq!(manifest.cards.len(), 1);
        let loaded = Manifest::load(dir.path()).unwrap();
        assert_eq!(loaded.cards, manifest.cards);
        assert!(loaded.verify(dir.path()).unwrap().is_empty());

        fs::write(dir.path().join("suit_0_card_3.png"), b"tampered").unwrap();
        fs::remove_file(dir.path().join(PREVIEW_FILE)).unwrap();
        let mismatches = loaded.verify(dir.path()).unwrap();
        assert_eq!(mismatches.len(), 2);
        assert!(matches!(&mismatches[0], Mismatch::Changed { file, .. } if file == "suit_0_card_3.png"));
        assert_eq!(mismatches[1], Mismatch::Missing(PREVIEW_FILE.to_string()));
    }

    #[test]
    fn sha256_is_hex_encoded() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
