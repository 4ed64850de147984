//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading, progress bars and the
//! terminal report printed by `analyze` and `demo`.

use crate::app::models::{EnrichedRecord, RiskFlag};
use crate::app::services::aggregate::AggregateSummary;
use crate::app::services::diagnostic_engine::BatchStats;
use crate::cli::args::{AnalyzeArgs, LoggingArgs};
use crate::config::{Config, ScoringProfile};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Counters reported at the end of a command
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of input files read
    pub files_processed: usize,
    /// Number of samples classified
    pub records_classified: usize,
    /// Number of samples left after filtering
    pub records_selected: usize,
    /// Files written by the export step
    pub files_written: usize,
    /// Total processing time
    pub processing_time: Duration,
}

/// Set up structured logging to stderr
pub fn setup_logging(args: &LoggingArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dga_processor={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
///
/// An explicit file must exist. Without one, the default location is used
/// only when a file is present there.
pub fn load_configuration(
    config_file: Option<&Path>,
    profile: Option<ScoringProfile>,
) -> Result<Config> {
    let default_path = match config_file {
        Some(_) => None,
        None => Config::default_config_path().ok().filter(|p| p.exists()),
    };

    let source = config_file.or(default_path.as_deref());
    match source {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let mut config = Config::load(source)
        .with_context(|| match source {
            Some(path) => format!("Could not load configuration from {}", path.display()),
            None => "Could not build default configuration".to_string(),
        })?;

    if let Some(profile) = profile {
        apply_profile(&mut config, profile);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Apply analyze command overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &AnalyzeArgs) -> Result<()> {
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(top) = args.top {
        config.report.top_n = top;
    }
    if let Some(threshold) = args.high_tcg {
        config.report.high_tcg_threshold = threshold;
    }
    if let Some(format) = args.format {
        config.export.format = format;
    }
    if let Some(compression) = args.compression {
        config.export.compression = compression;
    }
    if args.export_top {
        config.export.include_top_n = true;
    }

    config
        .validate()
        .context("Invalid configuration after applying command-line options")?;
    Ok(())
}

fn apply_profile(config: &mut Config, profile: ScoringProfile) {
    if config.scoring.table.take().is_some() {
        info!(
            "--profile {} replaces the scoring table from the config file",
            profile.as_str()
        );
    }
    config.scoring.profile = profile;
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

fn colored_flag(flag: RiskFlag) -> ColoredString {
    match flag {
        RiskFlag::High => flag.as_str().bright_red().bold(),
        RiskFlag::Medium => flag.as_str().bright_yellow().bold(),
        RiskFlag::Low => flag.as_str().bright_green(),
    }
}

fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

/// Print the cohort summary block
pub fn print_summary(summary: &AggregateSummary) {
    println!("\n{}", "Cohort Summary".bright_green().bold());

    if summary.is_empty() {
        println!("  {}", "No samples selected".bright_black());
        return;
    }

    println!(
        "  {} {}",
        "Samples:".bright_cyan(),
        summary.total_records.to_string().bright_white().bold()
    );
    println!(
        "  {} {} ({:.1}%)",
        "High risk:".bright_cyan(),
        summary.high_count.to_string().bright_red().bold(),
        summary.high_share
    );
    println!(
        "  {} {}",
        "Medium risk:".bright_cyan(),
        summary.medium_count.to_string().bright_yellow()
    );
    println!(
        "  {} {}",
        "Mean risk score:".bright_cyan(),
        format_optional(summary.mean_risk_score, 1)
    );
    println!(
        "  {} {} ppm",
        "Mean TCG:".bright_cyan(),
        format_optional(summary.mean_tcg, 0)
    );
    println!(
        "  {} {}",
        format!("TCG > {:.0} ppm:", summary.high_tcg_threshold).bright_cyan(),
        summary.high_tcg_count
    );
    if let Some(range) = &summary.date_range {
        println!(
            "  {} {} .. {}",
            "Sample dates:".bright_cyan(),
            range.first,
            range.last
        );
    }
    if let Some(zone) = summary.dominant_duval_zone {
        println!(
            "  {} {}",
            "Dominant Duval zone:".bright_cyan(),
            zone.as_str().bright_white().bold()
        );
    }

    println!("\n{}", "By risk category".bright_yellow());
    for group in &summary.risk_groups {
        println!(
            "  {} {:<8} {:>5}  score {:>5}  TCG {:>7}  TAN {:>6}  BV {:>5}",
            group.flag.symbol(),
            colored_flag(group.flag),
            group.count,
            format_optional(group.mean_risk_score, 1),
            format_optional(group.mean_tcg, 0),
            format_optional(group.mean_tan, 3),
            format_optional(group.mean_breakdown_voltage, 1)
        );
    }

    println!("\n{}", "By Duval zone".bright_yellow());
    for group in &summary.duval_zones {
        println!(
            "  {:<20} {:>5}  score {:>5}  TCG {:>7}",
            group.zone.as_str(),
            group.count,
            format_optional(group.mean_risk_score, 1),
            format_optional(group.mean_tcg, 0)
        );
    }

    println!("\n{}", "By ternary zone".bright_yellow());
    for entry in &summary.ternary_zones {
        println!("  {:<20} {:>5}", entry.zone.as_str(), entry.count);
    }
}

/// Print the highest-risk samples
pub fn print_top_records(records: &[&EnrichedRecord]) {
    if records.is_empty() {
        return;
    }

    println!(
        "\n{}",
        format!("Top {} by risk", records.len()).bright_green().bold()
    );
    for (rank, record) in records.iter().enumerate() {
        println!(
            "  {:>2}. {:>3} {:<8} {:<40} {:<18} {}",
            (rank + 1).to_string().bright_yellow().bold(),
            record.risk_score,
            colored_flag(record.risk_flag),
            record.record.display_id(),
            record.duval.zone.as_str(),
            record.ternary.zone.as_str().bright_black()
        );
    }
}

/// Print classification counters
pub fn print_batch_stats(stats: &BatchStats) {
    println!("\n{}", "Classification".bright_green().bold());
    println!("  {} {}", "Classified:".bright_cyan(), stats.total);
    println!(
        "  {} {:.1}%",
        "Duval coverage:".bright_cyan(),
        stats.duval_coverage()
    );
    println!(
        "  {} {}",
        "Ternary insufficient data:".bright_cyan(),
        stats.ternary_insufficient
    );
}
