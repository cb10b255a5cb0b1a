//! Deck rendering command (`pipdeck render ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pipdeck::deck::INDICATOR_SNAPSHOT_FILE;
use pipdeck::{AssetDir, Diagnostics, GlyphSource, LayoutConfig, RenderPlan, plan_pips, recipe};

use crate::cli::common::ResampleArg;
use crate::cli::utils::load_config;

/// Args for `pipdeck render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Asset root holding `art/` and `numbers/`.
    #[arg(short = 'a', long = "assets", default_value = ".")]
    pub assets: PathBuf,
    /// Directory for the generated cards.
    #[arg(short = 'o', long = "output", default_value = "bin")]
    pub output: PathBuf,
    /// JSON layout file (see `pipdeck config`).
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Only draw indicators in the top-left and bottom-right corners.
    #[arg(long = "two-corner")]
    pub two_corner: bool,
    /// Override the resampling filter used when scaling glyphs.
    #[arg(long, value_enum)]
    pub resample: Option<ResampleArg>,
    /// Outline the printable box on every card.
    #[arg(long = "debug-boxes")]
    pub debug_boxes: bool,
    /// Write each built corner indicator to the output directory.
    #[arg(long = "debug-indicator")]
    pub debug_indicator: bool,
    /// Render cards one at a time.
    #[arg(long)]
    pub sequential: bool,
    /// Skip the preview sheet.
    #[arg(long = "no-preview")]
    pub no_preview: bool,
    /// Print the pip layout of every rank instead of rendering.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Execute the render command.
pub fn handle(args: RenderArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.two_corner {
        config.support_left_handed = false;
    }
    if let Some(resample) = args.resample {
        config.resample = resample.into();
    }
    config.validate().context("invalid layout configuration")?;

    let assets = AssetDir::new(&args.assets);
    if args.dry_run {
        return dry_run(&assets, &config);
    }

    std::fs::create_dir_all(&args.output).with_context(|| {
        format!("failed to create output directory {}", args.output.display())
    })?;
    let diagnostics = Diagnostics {
        indicator_snapshot: args
            .debug_indicator
            .then(|| args.output.join(INDICATOR_SNAPSHOT_FILE)),
        outline_box: args.debug_boxes,
    };
    let plan = RenderPlan {
        output: args.output.clone(),
        parallel: !args.sequential,
        preview: !args.no_preview,
    };
    let manifest = pipdeck::render_from_dir(&assets, &config, diagnostics, &plan)
        .with_context(|| format!("failed to render deck from {}", args.assets.display()))?;

    println!(
        "Rendered {} card(s) across {} suit(s) to {}",
        manifest.cards.len(),
        config.total_suits,
        args.output.display()
    );
    Ok(())
}

fn dry_run(assets: &AssetDir, config: &LayoutConfig) -> Result<()> {
    let frame = assets
        .frame()
        .with_context(|| format!("failed to load frame from {}", assets.root().display()))?;
    let canvas = frame.dimensions();
    println!("Card {}x{}", canvas.0, canvas.1);
    for &rank in &config.ranks {
        let steps: Vec<String> = recipe(rank).iter().map(|step| step.to_string()).collect();
        let placements = plan_pips(rank, canvas, config)
            .with_context(|| format!("pip layout for rank {} does not fit", rank))?;
        println!("{:>2}: {}", rank, steps.join(" -> "));
        for p in &placements {
            println!(
                "      {:>5},{:>5}  {}x{}  {:?}",
                p.x, p.y, p.width, p.height, p.orientation
            );
        }
    }
    Ok(())
}
