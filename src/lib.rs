//! DGA Processor Library
//!
//! A Rust library for diagnosing power transformer condition from dissolved
//! gas analysis (DGA) and oil quality test records.
//!
//! This library provides tools for:
//! - Parsing oil test exports, including the composite `SampleName` label
//! - Scoring each sample with a configurable additive risk point table
//! - Classifying fault type with a simplified Duval Triangle 1
//! - Classifying fault type with a ternary gas-ratio method
//! - Aggregating classified samples into cohort summaries
//! - Filtering, ranking and exporting the enriched records

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod demo;
    pub mod models;
    pub mod services {
        pub mod aggregate;
        pub mod diagnostic_engine;
        pub mod duval;
        pub mod export;
        pub mod record_loader;
        pub mod record_parser;
        pub mod risk_scorer;
        pub mod ternary;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    DuvalPercentages, DuvalResult, DuvalZone, EnrichedRecord, GasConcentrations, OilQuality,
    RiskFlag, SampleRecord, TernaryPercentages, TernaryResult, TernaryZone,
};
pub use app::services::aggregate::{AggregateSummary, summarize};
pub use app::services::diagnostic_engine::{DiagnosticEngine, classify, classify_batch};
pub use app::services::duval::duval_projection;
pub use config::Config;

/// Result type alias for the DGA processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for DGA processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Tabular read or write failed inside polars
    #[error("Table processing error: {message}")]
    Table {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// A column the whole batch depends on is absent
    #[error("Required column '{column}' not found in '{source_name}' (available: {available})")]
    MissingColumn {
        column: String,
        source_name: String,
        available: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration file '{path}'")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration could not be rendered
    #[error("Failed to serialize configuration: {message}")]
    ConfigSerialize { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Label pattern failed to compile
    #[error("Invalid pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Input path does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Input path or pattern resolved to no tabular files
    #[error("No input files found for '{input}'")]
    NoInputFiles { input: String },

    /// Input glob could not be expanded
    #[error("Invalid input pattern: {message}")]
    InputPattern { message: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Export failed
    #[error("Export to '{path}' failed: {message}")]
    Export { path: String, message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a table processing error with context
    pub fn table(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Table {
            message: message.into(),
            source,
        }
    }

    /// Create a missing column error
    pub fn missing_column(
        column: impl Into<String>,
        source_name: impl Into<String>,
        available: &[String],
    ) -> Self {
        Self::MissingColumn {
            column: column.into(),
            source_name: source_name.into(),
            available: available.join(", "),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration parse error
    pub fn config_parse(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a pattern compilation error
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a no input files error
    pub fn no_input_files(input: impl Into<String>) -> Self {
        Self::NoInputFiles {
            input: input.into(),
        }
    }

    /// Create an export error
    pub fn export(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Export {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for errors that abort a whole batch rather than one file
    pub fn is_input_shape_error(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Table {
            message: "Table operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: "<inline>".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Self {
        Self::InputPattern {
            message: error.to_string(),
        }
    }
}
