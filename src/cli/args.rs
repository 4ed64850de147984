//! Command-line argument definitions for the DGA processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::{CompressionAlgorithm, ExportFormat, ScoringProfile};
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the DGA processor
///
/// Scores transformer oil samples for risk and classifies their fault type
/// from dissolved gas analysis.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dga-processor",
    version,
    about = "Risk scoring and fault classification for transformer oil DGA records",
    long_about = "Reads oil test exports (dissolved gases plus oil quality measurements), \
                  assigns each sample an additive risk score and category, classifies the \
                  fault type with a simplified Duval Triangle 1 and a ternary gas-ratio \
                  method, and reports cohort summaries with optional CSV or Parquet export."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load oil test exports, classify every sample and report
    Analyze(AnalyzeArgs),
    /// Run the pipeline on the built-in demo samples
    Demo(DemoArgs),
    /// Classify a single set of gas concentrations
    Gases(GasesArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

/// Verbosity flags shared by every command
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LoggingArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl LoggingArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Arguments for the analyze command
#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    /// Input files, directories or glob patterns
    ///
    /// Directories are searched recursively for CSV files. Quote glob
    /// patterns so the shell does not expand them.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/dga-processor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Built-in scoring table, replaces any table from the config file
    #[arg(short = 'p', long = "profile", value_enum)]
    pub profile: Option<ScoringProfile>,

    /// Keep only samples from this station (exact match)
    #[arg(long = "station", value_name = "NAME")]
    pub station: Option<String>,

    /// Keep only samples from this equipment (exact match)
    #[arg(long = "equipment", value_name = "ID")]
    pub equipment: Option<String>,

    /// Lowest risk score kept (inclusive)
    #[arg(long = "min-risk", value_name = "SCORE")]
    pub min_risk: Option<u32>,

    /// Highest risk score kept (inclusive)
    #[arg(long = "max-risk", value_name = "SCORE")]
    pub max_risk: Option<u32>,

    /// Number of highest-risk samples to list
    #[arg(short = 'n', long = "top", value_name = "COUNT")]
    pub top: Option<usize>,

    /// TCG level (ppm) counted as elevated in the summary
    #[arg(long = "high-tcg", value_name = "PPM")]
    pub high_tcg: Option<f64>,

    /// Write the enriched records to this file
    ///
    /// The extension is added from --format when the path has none.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<ExportFormat>,

    /// Parquet compression algorithm
    #[arg(long = "compression", value_enum)]
    pub compression: Option<CompressionAlgorithm>,

    /// Also write the top-ranked samples next to the main export
    #[arg(long = "export-top")]
    pub export_top: bool,

    /// Number of files loaded concurrently
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl AnalyzeArgs {
    /// Validate the analyze command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_risk, self.max_risk) {
            if min > max {
                return Err(Error::configuration(format!(
                    "--min-risk ({}) cannot exceed --max-risk ({})",
                    min, max
                )));
            }
        }

        if self.workers == Some(0) {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if self.export_top && self.output.is_none() {
            return Err(Error::configuration("--export-top requires --output"));
        }

        Ok(())
    }

    /// Inclusive risk score window, if either bound was given
    pub fn risk_range(&self) -> Option<(u32, u32)> {
        if self.min_risk.is_none() && self.max_risk.is_none() {
            return None;
        }
        Some((self.min_risk.unwrap_or(0), self.max_risk.unwrap_or(u32::MAX)))
    }
}

/// Arguments for the demo command
#[derive(Debug, Clone, Parser)]
pub struct DemoArgs {
    /// Path to configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Built-in scoring table
    #[arg(short = 'p', long = "profile", value_enum)]
    pub profile: Option<ScoringProfile>,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the gases command
///
/// Concentrations are in ppm. Absent gases are treated as missing, which
/// makes the corresponding classifier report insufficient data.
#[derive(Debug, Clone, Parser)]
pub struct GasesArgs {
    /// Hydrogen (H2)
    #[arg(long = "h2", value_name = "PPM")]
    pub hydrogen: Option<f64>,

    /// Methane (CH4)
    #[arg(long = "ch4", value_name = "PPM")]
    pub methane: Option<f64>,

    /// Ethane (C2H6)
    #[arg(long = "c2h6", value_name = "PPM")]
    pub ethane: Option<f64>,

    /// Ethylene (C2H4)
    #[arg(long = "c2h4", value_name = "PPM")]
    pub ethylene: Option<f64>,

    /// Acetylene (C2H2)
    #[arg(long = "c2h2", value_name = "PPM")]
    pub acetylene: Option<f64>,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl GasesArgs {
    /// Validate that at least one gas was given and none is negative
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("h2", self.hydrogen),
            ("ch4", self.methane),
            ("c2h6", self.ethane),
            ("c2h4", self.ethylene),
            ("c2h2", self.acetylene),
        ];

        if values.iter().all(|(_, v)| v.is_none()) {
            return Err(Error::configuration(
                "Provide at least one gas concentration (--h2, --ch4, --c2h6, --c2h4, --c2h2)",
            ));
        }

        for (name, value) in values {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::configuration(format!(
                        "--{} must be a non-negative number, got {}",
                        name, v
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Arguments for the config command
#[derive(Debug, Clone, Parser)]
pub struct ConfigArgs {
    /// Path to configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Built-in scoring table
    #[arg(short = 'p', long = "profile", value_enum)]
    pub profile: Option<ScoringProfile>,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}
