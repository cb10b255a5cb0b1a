//! Command-line interface wiring for the `pipdeck` binary.
//!
//! This module owns the clap definitions and delegates execution to the
//! submodule for each command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod config;
pub mod render;
pub mod utils;
pub mod verify;

/// Parsed CLI entrypoint for the `pipdeck` binary.
#[derive(Parser, Debug)]
#[command(name = "pipdeck", version, about = "Generate playing-card faces from suit art and a frame")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Commands made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render every card of the deck plus a preview sheet.
    Render(render::RenderArgs),
    /// Check a rendered deck directory against its manifest.
    Verify(verify::VerifyArgs),
    /// Print or write the default layout configuration.
    Config(config::ConfigArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(args) => render::handle(args),
        Command::Verify(args) => verify::handle(args),
        Command::Config(args) => config::handle(args),
    }
}
