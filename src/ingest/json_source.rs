// ABOUTME: JSON reader for samples stored as parallel t, VO2, and VCO2 arrays
// ABOUTME: Deserializes with serde and defers alignment checks to the Sample constructor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

use super::source_id;
use gasex_core::{Sample, ThresholdError, ThresholdResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk layout: `{"t": [...], "VO2": [...], "VCO2": [...]}`
#[derive(Debug, Deserialize)]
struct SampleColumns {
    #[serde(rename = "t", alias = "time")]
    time: Vec<f64>,
    #[serde(rename = "VO2", alias = "vo2")]
    vo2: Vec<f64>,
    #[serde(rename = "VCO2", alias = "vco2")]
    vco2: Vec<f64>,
}

/// Read a sample from a JSON file
///
/// # Errors
///
/// Returns `ThresholdError::Ingestion` if the file cannot be read or does not
/// have the expected shape.
pub fn read_path(path: &Path) -> ThresholdResult<Sample> {
    let source = source_id(path);
    let text = fs::read_to_string(path)
        .map_err(|e| ThresholdError::ingestion(&source, format!("failed to read file: {e}")))?;
    read_str(&source, &text)
}

/// Read a sample from a JSON document
///
/// # Errors
///
/// Returns `ThresholdError::Ingestion` if the document is malformed or a
/// column is missing.
pub fn read_str(source: &str, text: &str) -> ThresholdResult<Sample> {
    let columns: SampleColumns = serde_json::from_str(text)
        .map_err(|e| ThresholdError::ingestion(source, format!("invalid JSON: {e}")))?;
    Sample::new(columns.time, columns.vo2, columns.vco2)
}
