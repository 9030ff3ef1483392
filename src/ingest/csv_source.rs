// ABOUTME: CSV reader for time, VO2, and VCO2 columns located by header name
// ABOUTME: Headers are matched case-insensitively after trimming and extra columns are ignored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

use super::source_id;
use gasex_core::constants::columns;
use gasex_core::{Sample, ThresholdError, ThresholdResult};
use std::io::Read;
use std::path::Path;

/// Read a sample from a CSV file
///
/// # Errors
///
/// Returns `ThresholdError::Ingestion` if the file cannot be opened or parsed.
pub fn read_path(path: &Path) -> ThresholdResult<Sample> {
    let source = source_id(path);
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ThresholdError::ingestion(&source, format!("failed to open CSV: {e}")))?;
    read_records(&source, reader)
}

/// Read a sample from any CSV byte stream
///
/// # Errors
///
/// Returns `ThresholdError::Ingestion` if a required column is missing or a
/// cell is not a number.
pub fn read_from<R: Read>(source: &str, input: R) -> ThresholdResult<Sample> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    read_records(source, reader)
}

fn read_records<R: Read>(source: &str, mut reader: csv::Reader<R>) -> ThresholdResult<Sample> {
    let headers = reader
        .headers()
        .map_err(|e| ThresholdError::ingestion(source, format!("failed to read headers: {e}")))?
        .clone();

    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|name| h.eq_ignore_ascii_case(name)))
    };
    let missing = |name: &str| {
        ThresholdError::ingestion(
            source,
            format!(
                "missing column {name} (available: {})",
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        )
    };

    let time_idx =
        find(&[columns::TIME, columns::TIME_LONG]).ok_or_else(|| missing(columns::TIME))?;
    let vo2_idx = find(&[columns::VO2]).ok_or_else(|| missing(columns::VO2))?;
    let vco2_idx = find(&[columns::VCO2]).ok_or_else(|| missing(columns::VCO2))?;

    let mut time = Vec::new();
    let mut vo2 = Vec::new();
    let mut vco2 = Vec::new();

    // Line 1 is the header
    for (line, record) in (2..).zip(reader.records()) {
        let record = record
            .map_err(|e| ThresholdError::ingestion(source, format!("line {line}: {e}")))?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let cell = |index: usize, name: &str| -> ThresholdResult<f64> {
            let raw = record.get(index).unwrap_or_default();
            raw.parse::<f64>().map_err(|_| {
                ThresholdError::ingestion(
                    source,
                    format!("line {line}: {name} value '{raw}' is not a number"),
                )
            })
        };

        time.push(cell(time_idx, columns::TIME)?);
        vo2.push(cell(vo2_idx, columns::VO2)?);
        vco2.push(cell(vco2_idx, columns::VCO2)?);
    }

    Sample::new(time, vo2, vco2)
}
