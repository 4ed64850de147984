//! Concurrent loading of oil test files into sample records

use crate::app::models::SampleRecord;
use crate::app::services::record_parser::{ParseResult, ParseStats, RecordParser};
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info};

/// Records loaded from a set of files
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// Records of every file, files in input order, rows in file order
    pub records: Vec<SampleRecord>,

    /// Parse statistics summed over all files
    pub stats: ParseStats,

    /// Files read, with the number of records each produced
    pub files: Vec<(PathBuf, usize)>,
}

/// Loader reading CSV exports with polars and parsing them into records
#[derive(Debug, Clone)]
pub struct RecordLoader {
    parser: Arc<RecordParser>,
    workers: usize,
}

impl RecordLoader {
    /// Create a loader reading up to `workers` files at once
    pub fn new(workers: usize) -> Result<Self> {
        Ok(Self {
            parser: Arc::new(RecordParser::new()?),
            workers: workers.max(1),
        })
    }

    /// Load files concurrently
    ///
    /// Results are collected in input order so downstream tie-breaks stay
    /// reproducible. The first failing file aborts the whole load.
    pub async fn load_files(
        &self,
        paths: Vec<PathBuf>,
        progress: Option<&ProgressBar>,
    ) -> Result<LoadResult> {
        info!(
            "Loading {} file(s) with {} worker(s)",
            paths.len(),
            self.workers
        );

        let outcomes: Vec<Result<(PathBuf, ParseResult)>> = stream::iter(paths)
            .map(|path| {
                let parser = Arc::clone(&self.parser);
                let progress = progress.cloned();
                async move {
                    let task_path = path.clone();
                    let parsed = task::spawn_blocking(move || load_file(&parser, &task_path))
                        .await
                        .map_err(|e| {
                            Error::processing_interrupted(format!(
                                "Loading {} did not complete: {}",
                                path.display(),
                                e
                            ))
                        })?;

                    if let Some(pb) = progress {
                        pb.inc(1);
                    }
                    parsed.map(|result| (path, result))
                }
            })
            .buffered(self.workers)
            .collect()
            .await;

        let mut records = Vec::new();
        let mut stats = ParseStats::new();
        let mut files = Vec::new();

        for outcome in outcomes {
            let (path, result) = outcome?;

            stats.merge(&result.stats);
            files.push((path, result.records.len()));
            records.extend(result.records);
        }

        info!(
            "Loaded {} records from {} file(s)",
            records.len(),
            files.len()
        );

        Ok(LoadResult {
            records,
            stats,
            files,
        })
    }
}

/// Read one CSV file and parse it
pub fn load_file(parser: &RecordParser, path: &Path) -> Result<ParseResult> {
    let df = read_table(path)?;
    debug!(
        "Read {} rows, {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    parser.parse_frame(&df, &path.display().to_string())
}

/// Read a CSV file with every column kept as text
pub fn read_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| Error::table(format!("Failed to read {}", path.display()), e))
}
