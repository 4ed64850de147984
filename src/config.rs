//! Configuration management and validation.
//!
//! Provides the layered configuration for the DGA processor: the scoring
//! point table, report options and export settings. Values come from the
//! built-in defaults, then an optional TOML file, then CLI overrides.

use crate::app::services::risk_scorer::ScoringTable;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_HIGH_TCG_THRESHOLD, DEFAULT_TOP_N, DEFAULT_WORKERS,
};
use crate::{Error, Result};
use clap::ValueEnum;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Built-in point table selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScoringProfile {
    /// Three TCG bands, two bands for the other factors, three markers
    #[default]
    Standard,
    /// One band per factor, no partial discharge marker
    Simplified,
}

impl ScoringProfile {
    /// Point table behind this profile
    pub fn table(self) -> ScoringTable {
        match self {
            ScoringProfile::Standard => ScoringTable::standard(),
            ScoringProfile::Simplified => ScoringTable::simplified(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoringProfile::Standard => "standard",
            ScoringProfile::Simplified => "simplified",
        }
    }
}

/// Compression algorithms for Parquet export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Output file format for enriched records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    Parquet,
}

impl ExportFormat {
    /// File extension written for this format
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Parquet => "parquet",
        }
    }
}

/// Risk scoring settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Built-in table used when no custom table is given
    pub profile: ScoringProfile,

    /// Fully specified point table, overrides `profile`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<ScoringTable>,
}

/// Cohort report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of highest-risk records listed
    pub top_n: usize,

    /// TCG level (ppm) counted as elevated in the summary
    pub high_tcg_threshold: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            high_tcg_threshold: DEFAULT_HIGH_TCG_THRESHOLD,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,

    /// Parquet compression (ignored for CSV)
    pub compression: CompressionAlgorithm,

    /// Also write the top-N records next to the full export
    pub include_top_n: bool,
}

/// Main configuration structure for the DGA processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of input files loaded concurrently
    pub workers: usize,

    pub scoring: ScoringConfig,

    pub report: ReportConfig,

    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS.min(num_cpus::get().max(1)),
            scoring: ScoringConfig::default(),
            report: ReportConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::config_parse(path.display().to_string(), e))?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default configuration file location (`<config_dir>/dga-processor/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine configuration directory"))
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigSerialize {
            message: e.to_string(),
        })
    }

    /// Point table in effect: the custom table if present, else the profile's
    pub fn scoring_table(&self) -> ScoringTable {
        self.scoring
            .table
            .clone()
            .unwrap_or_else(|| self.scoring.profile.table())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration("workers must be at least 1"));
        }

        if !self.report.high_tcg_threshold.is_finite() || self.report.high_tcg_threshold < 0.0 {
            return Err(Error::configuration(format!(
                "report.high_tcg_threshold must be a non-negative number, got {}",
                self.report.high_tcg_threshold
            )));
        }

        if let Some(table) = &self.scoring.table {
            table.validate()?;
        }

        Ok(())
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Create configuration with a built-in scoring profile
    pub fn with_profile(mut self, profile: ScoringProfile) -> Self {
        self.scoring.profile = profile;
        self
    }

    /// Create configuration with a custom point table
    pub fn with_scoring_table(mut self, table: ScoringTable) -> Self {
        self.scoring.table = Some(table);
        self
    }

    /// Create configuration with a custom top-N size
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.report.top_n = top_n;
        self
    }

    /// Create configuration with a custom elevated-TCG threshold
    pub fn with_high_tcg_threshold(mut self, threshold: f64) -> Self {
        self.report.high_tcg_threshold = threshold;
        self
    }

    /// Create configuration with a custom export format
    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        self.export.format = format;
        self
    }

    /// Create configuration with a custom Parquet compression
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.export.compression = compression;
        self
    }
}
