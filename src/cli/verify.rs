//! Output verification (`pipdeck verify ...`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use pipdeck::{Manifest, Mismatch};

/// Args for `pipdeck verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Directory produced by `pipdeck render`.
    pub dir: PathBuf,
}

/// Execute the verify command.
pub fn handle(args: VerifyArgs) -> Result<()> {
    let manifest = Manifest::load(&args.dir)
        .with_context(|| format!("failed to read manifest in {}", args.dir.display()))?;
    let mismatches = manifest
        .verify(&args.dir)
        .with_context(|| format!("failed to hash outputs in {}", args.dir.display()))?;

    if mismatches.is_empty() {
        println!(
            "Verified {} card(s) in {} (rendered {})",
            manifest.cards.len(),
            args.dir.display(),
            manifest.generated_at.to_rfc3339()
        );
        return Ok(());
    }

    for mismatch in &mismatches {
        match mismatch {
            Mismatch::Missing(file) => println!("missing  {}", file),
            Mismatch::Changed {
                file,
                expected,
                actual,
            } => println!("changed  {} (expected {}, found {})", file, expected, actual),
        }
    }
    Err(anyhow!(
        "{} of {} file(s) differ from the manifest",
        mismatches.len(),
        manifest.cards.len() + usize::from(manifest.preview_sha256.is_some())
    ))
}
