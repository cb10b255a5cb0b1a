use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while laying out or compositing a single card.
///
/// Every variant is fatal to the card being built. Nothing is retried: the
/// layout is deterministic, so a failure would recur identically.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid layout configuration: {0}")]
    Configuration(String),

    #[error("unknown rank label '{0}'")]
    UnknownRank(String),

    #[error("asset missing or unreadable: {}", path.display())]
    AssetMissing {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "{what} at ({x}, {y}) sized {width}x{height} does not fit its {surface_width}x{surface_height} surface"
    )]
    GeometryOverflow {
        what: &'static str,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        surface_width: u32,
        surface_height: u32,
    },

    #[error("failed to write {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
