//! Command implementations for the harvester CLI
//!
//! This module contains the main command execution logic, progress reporting,
//! and error handling for the CLI interface. Each command is implemented in
//! its own module and follows the same shape: set up logging, validate
//! arguments, run the work and print a report.

pub mod harvest;
pub mod shared;
pub mod worlds;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the harvester
///
/// This function dispatches to the appropriate subcommand handler based on
/// CLI args. Each command is implemented in its own module:
/// - `harvest`: resolve directories and write dated snapshots
/// - `worlds`: resolve directories and list announced worlds
pub async fn run(args: Args) -> Result<()> {
    match args.get_command() {
        Commands::Harvest(harvest_args) => harvest::run_harvest(harvest_args).await,
        Commands::Worlds(worlds_args) => worlds::run_worlds(worlds_args).await,
    }
}
