//! Shared clap helper types for CLI commands.

use clap::ValueEnum;
use pipdeck::ResampleFilter;

/// Resampling filters accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ResampleArg {
    Nearest,
    Triangle,
    #[value(name = "catmull-rom")]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleArg> for ResampleFilter {
    fn from(value: ResampleArg) -> ResampleFilter {
        match value {
            ResampleArg::Nearest => ResampleFilter::Nearest,
            ResampleArg::Triangle => ResampleFilter::Triangle,
            ResampleArg::CatmullRom => ResampleFilter::CatmullRom,
            ResampleArg::Gaussian => ResampleFilter::Gaussian,
            ResampleArg::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}
