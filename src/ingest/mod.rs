// ABOUTME: Input discovery and loading of exercise-test samples from CSV and JSON files
// ABOUTME: Directories are scanned with glob patterns and every failure is tagged with its source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! # Ingestion
//!
//! Turns a file or directory path into [`BatchInput`]s. A file that cannot be
//! read or parsed becomes a failed input rather than an error, so one bad file
//! never hides the others.

/// Tabular CSV input
pub mod csv_source;

/// JSON column-array input
pub mod json_source;

use gasex_core::{Sample, ThresholdError, ThresholdResult};
use gasex_intelligence::BatchInput;
use glob::{glob_with, MatchOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma separated values with a header row
    Csv,
    /// Object of `t`, `VO2`, `VCO2` arrays
    Json,
}

impl InputFormat {
    /// Glob patterns scanned in directories
    pub const PATTERNS: [&'static str; 2] = ["*.csv", "*.json"];

    /// Detect the format from a file extension (case-insensitive)
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Source identifier for a path: its file name, or the full path when it has none
#[must_use]
pub fn source_id(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Resolve an input path to the files it names, sorted by path
///
/// # Errors
///
/// Returns `ThresholdError::Ingestion` if the path does not exist or the
/// directory cannot be scanned.
pub fn discover_inputs(path: &Path) -> ThresholdResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(ThresholdError::ingestion(
            path.display().to_string(),
            "no such file or directory",
        ));
    }

    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut files = Vec::new();
    for pattern in InputFormat::PATTERNS {
        let pattern = path.join(pattern);
        let entries = glob_with(&pattern.to_string_lossy(), options)
            .map_err(|e| ThresholdError::ingestion(path.display().to_string(), e))?;
        for entry in entries {
            let file =
                entry.map_err(|e| ThresholdError::ingestion(path.display().to_string(), e))?;
            if file.is_file() {
                files.push(file);
            }
        }
    }
    files.sort();
    files.dedup();

    info!(
        directory = %path.display(),
        files = files.len(),
        "Searching for data files"
    );
    Ok(files)
}

/// Load one sample, choosing the parser from the file extension
///
/// # Errors
///
/// Returns `ThresholdError::Ingestion` for unreadable, unparsable or
/// unsupported files, and `ThresholdError::InvalidSample` for misaligned or
/// non-finite data.
pub fn load_sample(path: &Path) -> ThresholdResult<Sample> {
    match InputFormat::from_path(path) {
        Some(InputFormat::Csv) => csv_source::read_path(path),
        Some(InputFormat::Json) => json_source::read_path(path),
        None => Err(ThresholdError::ingestion(
            source_id(path),
            "unsupported file type (expected .csv or .json)",
        )),
    }
}

/// Discover and load every input under `path`
///
/// # Errors
///
/// Only discovery failures are returned; per-file load failures are carried
/// inside the corresponding [`BatchInput`].
pub fn load_inputs(path: &Path) -> ThresholdResult<Vec<BatchInput>> {
    let files = discover_inputs(path)?;
    Ok(files
        .iter()
        .map(|file| {
            let source = source_id(file);
            debug!(source = %source, path = %file.display(), "Processing file");
            match load_sample(file) {
                Ok(sample) => BatchInput::loaded(source, sample),
                Err(e) => BatchInput::failed(source, e),
            }
        })
        .collect())
}
