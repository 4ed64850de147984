//! Analyze command implementation
//!
//! Discovers input files, loads them concurrently, classifies every sample,
//! applies the cohort filter, prints the report and optionally exports the
//! enriched records.

use super::shared::{
    ProcessingStats, apply_cli_overrides, create_progress_bar, load_configuration,
    print_batch_stats, print_summary, print_top_records, setup_logging,
};
use crate::app::models::EnrichedRecord;
use crate::app::services::aggregate::{
    RecordFilter, distinct_equipment, distinct_stations, summarize_with_threshold, top_by_risk,
};
use crate::app::services::diagnostic_engine::DiagnosticEngine;
use crate::app::services::export::{top_n_path, with_format_extension, write_records};
use crate::app::services::record_loader::{RecordLoader, discover_inputs};
use crate::cli::args::AnalyzeArgs;
use crate::config::Config;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Analyze command runner
pub async fn run_analyze(args: AnalyzeArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging)?;
    debug!("Analyze arguments: {:?}", args);

    args.validate()?;

    let mut config = load_configuration(args.config_file.as_deref(), args.profile)?;
    apply_cli_overrides(&mut config, &args)?;

    let engine = DiagnosticEngine::new(config.scoring_table())
        .context("Scoring table rejected")?;

    let files = discover_inputs(&args.inputs).context("Could not resolve input files")?;
    info!("Discovered {} input file(s)", files.len());

    let progress = args
        .logging
        .show_progress()
        .then(|| create_progress_bar(files.len() as u64, "Loading files"));

    let loader = RecordLoader::new(config.workers)?;
    let loaded = loader.load_files(files, progress.as_ref()).await;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let loaded = loaded.context("Loading input files failed")?;

    info!("{}", loaded.stats.summary());
    if !loaded.stats.missing_columns.is_empty() {
        warn!(
            "Columns absent from at least one input (treated as missing): {}",
            loaded.stats.missing_columns.join(", ")
        );
    }

    let batch = engine.classify_batch_with_stats(loaded.records);

    let filter = build_filter(&args);
    let selected: Vec<EnrichedRecord> = if filter.is_empty() {
        batch.records
    } else {
        filter.apply(&batch.records).into_iter().cloned().collect()
    };
    debug!("{} sample(s) selected by filter", selected.len());

    if !args.logging.quiet {
        print_batch_stats(&batch.stats);
        print_report(&selected, &config);
    }

    let mut stats = ProcessingStats {
        files_processed: loaded.files.len(),
        records_classified: batch.stats.total,
        records_selected: selected.len(),
        ..Default::default()
    };

    if let Some(output) = &args.output {
        stats.files_written = export(&selected, output, &config)?;
    }

    stats.processing_time = start_time.elapsed();
    info!(
        "Analyzed {} sample(s) from {} file(s) in {:.2?}",
        stats.records_classified, stats.files_processed, stats.processing_time
    );
    Ok(stats)
}

fn build_filter(args: &AnalyzeArgs) -> RecordFilter {
    let mut filter = RecordFilter::new();
    if let Some(station) = &args.station {
        filter = filter.with_station(station.as_str());
    }
    if let Some(equipment) = &args.equipment {
        filter = filter.with_equipment(equipment.as_str());
    }
    if let Some((min, max)) = args.risk_range() {
        filter = filter.with_risk_range(min, max);
    }
    filter
}

/// Print the cohort summary and the top-N listing
pub fn print_report(records: &[EnrichedRecord], config: &Config) {
    let summary = summarize_with_threshold(records, config.report.high_tcg_threshold);
    print_summary(&summary);

    if !records.is_empty() {
        let stations = distinct_stations(records);
        let equipment = distinct_equipment(records);
        println!(
            "\n{} ({}): {}",
            "Stations".bright_yellow(),
            stations.len(),
            stations.join(", ")
        );
        println!(
            "{} ({}): {}",
            "Equipment".bright_yellow(),
            equipment.len(),
            equipment.join(", ")
        );
    }

    print_top_records(&top_by_risk(records, config.report.top_n));
}

/// Write the selected records, plus the top-N file when configured
fn export(records: &[EnrichedRecord], output: &Path, config: &Config) -> Result<usize> {
    let format = config.export.format;
    let path = with_format_extension(output, format);

    let written = write_records(records, &path, format, config.export.compression)
        .with_context(|| format!("Export to {} failed", path.display()))?;
    println!(
        "\n{} {} rows -> {}",
        "Exported".bright_green().bold(),
        written.rows,
        written.path.display()
    );

    if !config.export.include_top_n {
        return Ok(1);
    }

    let top_path = top_n_path(&path);
    let top = top_by_risk(records, config.report.top_n);
    let written = write_records(top, &top_path, format, config.export.compression)
        .with_context(|| format!("Export to {} failed", top_path.display()))?;
    println!(
        "{} {} rows -> {}",
        "Exported".bright_green().bold(),
        written.rows,
        written.path.display()
    );

    Ok(2)
}
