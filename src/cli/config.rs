//! Layout configuration command (`pipdeck config`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pipdeck::LayoutConfig;

use crate::cli::utils::write_output;

/// Args for `pipdeck config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output", default_value = "-")]
    pub output: PathBuf,
}

/// Execute the config command.
pub fn handle(args: ConfigArgs) -> Result<()> {
    let mut json = LayoutConfig::default().to_json()?;
    json.push('\n');
    write_output(&args.output, &json)?;
    if args.output.as_os_str() != "-" {
        println!("Wrote default layout to {}", args.output.display());
    }
    Ok(())
}
