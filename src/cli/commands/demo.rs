//! Demo command implementation
//!
//! Runs the built-in three-sample dataset through the same parser, engine
//! and report as `analyze`.

use super::analyze::print_report;
use super::shared::{ProcessingStats, load_configuration, print_batch_stats, setup_logging};
use crate::app::demo::demo_records;
use crate::app::services::diagnostic_engine::DiagnosticEngine;
use crate::cli::args::DemoArgs;
use anyhow::{Context, Result};
use colored::*;
use std::time::Instant;
use tracing::info;

/// Demo command runner
pub async fn run_demo(args: DemoArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging)?;

    let config = load_configuration(args.config_file.as_deref(), args.profile)?;
    let engine = DiagnosticEngine::new(config.scoring_table())
        .context("Scoring table rejected")?;

    let records = demo_records().context("Could not build the demo dataset")?;
    info!("Loaded {} demo sample(s)", records.len());

    let batch = engine.classify_batch_with_stats(records);

    if !args.logging.quiet {
        println!(
            "{}",
            "DGA Processor - built-in demo samples".bright_green().bold()
        );
        print_batch_stats(&batch.stats);
        print_report(&batch.records, &config);
    }

    Ok(ProcessingStats {
        files_processed: 0,
        records_classified: batch.stats.total,
        records_selected: batch.records.len(),
        files_written: 0,
        processing_time: start_time.elapsed(),
    })
}
