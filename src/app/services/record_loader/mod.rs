//! Loading oil test exports from disk
//!
//! - [`discovery`] - Resolving files, directories and glob patterns
//! - [`loader`] - Concurrent CSV reading and parsing

pub mod discovery;
pub mod loader;

pub use discovery::{discover_inputs, scan_directory};
pub use loader::{LoadResult, RecordLoader, load_file, read_table};
