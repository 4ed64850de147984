//! Record parser for oil test exports
//!
//! Turns a loaded table into typed [`SampleRecord`](crate::app::models::SampleRecord)s.
//!
//! ## Architecture
//!
//! - [`parser`] - Row iteration and record assembly
//! - [`label`] - Composite `SampleName` label splitting
//! - [`column_mapping`] - Header aliases and column presence
//! - [`field_parsers`] - Numeric, timestamp and text coercion
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use dga_processor::app::services::record_parser::RecordParser;
//! use polars::prelude::*;
//!
//! # fn example() -> dga_processor::Result<()> {
//! let df = df!(
//!     "SampleName" => ["6515A T1 SANATI BAHARESTAN 1404-09-29"],
//!     "TCG" => ["1500"],
//! )?;
//!
//! let result = RecordParser::new()?.parse_frame(&df, "inline")?;
//! assert_eq!(result.records[0].station_name.as_deref(), Some("SANATI BAHARESTAN"));
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod label;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use column_mapping::ColumnMapping;
pub use label::{LabelFields, LabelParse, LabelParser};
pub use parser::RecordParser;
pub use stats::{ParseResult, ParseStats};
