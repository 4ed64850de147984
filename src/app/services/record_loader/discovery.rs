//! Input file discovery
//!
//! Each input argument may name a file, a directory (searched recursively for
//! CSV files) or a glob pattern. Files are returned in argument order; files
//! found under one directory or pattern are sorted by path.

use crate::constants::INPUT_EXTENSION;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Resolve input arguments to a de-duplicated, ordered list of files
pub fn discover_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        let found = resolve_input(input)?;
        if found.is_empty() {
            return Err(Error::no_input_files(input));
        }

        debug!("{} -> {} file(s)", input, found.len());
        for file in found {
            if !files.contains(&file) {
                files.push(file);
            }
        }
    }

    Ok(files)
}

fn resolve_input(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if path.is_dir() {
        return scan_directory(path);
    }

    if is_pattern(input) {
        return expand_pattern(input);
    }

    Err(Error::file_not_found(input))
}

/// Recursively collect CSV files under a directory
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_input_extension(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in glob::glob(pattern)? {
        let path = entry.map_err(|e| Error::InputPattern {
            message: e.to_string(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn is_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(INPUT_EXTENSION))
}
