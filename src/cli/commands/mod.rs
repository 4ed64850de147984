//! Command implementations for the DGA processor CLI
//!
//! Each command is implemented in its own module; common setup and report
//! printing live in [`shared`].

pub mod analyze;
pub mod config;
pub mod demo;
pub mod gases;
pub mod shared;

pub use shared::ProcessingStats;

use crate::cli::args::Commands;
use anyhow::Result;

/// Main command runner
///
/// Dispatches to the handler of the given subcommand:
/// - `analyze`: load, classify, filter, report and export
/// - `demo`: the same report over the built-in samples
/// - `gases`: classify one gas set given as flags
/// - `config`: print the effective configuration
pub async fn run(command: Commands) -> Result<ProcessingStats> {
    match command {
        Commands::Analyze(args) => analyze::run_analyze(args).await,
        Commands::Demo(args) => demo::run_demo(args).await,
        Commands::Gases(args) => gases::run_gases(args).await,
        Commands::Config(args) => config::run_config(args).await,
    }
}
