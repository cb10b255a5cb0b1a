//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use pipdeck::LayoutConfig;

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Load a layout file, or fall back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    match path {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("failed to read layout config {}", path.display())),
        None => Ok(LayoutConfig::default()),
    }
}
