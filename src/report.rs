// ABOUTME: Aggregate batch report as an aligned text table or a JSON summary
// ABOUTME: Failed sources stay visible with their error and carry no numeric fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! # Report
//!
//! The table lists successful sources under `File | GET | Timestamp | Slope
//! difference` and then the failures. The JSON summary keeps one row per
//! source in input order.

use crate::sinks::SinkError;
use chrono::{DateTime, Utc};
use gasex_core::constants::report::HEADERS;
use gasex_intelligence::{BatchReport, SampleOutcome, ThresholdConfig};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// One source in the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Source identifier
    pub file: String,
    /// Gas Exchange Threshold (VO2 at the breakpoint)
    #[serde(rename = "GET")]
    pub get: Option<f64>,
    /// Timestamp of the breakpoint sample
    pub timestamp: Option<f64>,
    /// Upper minus lower segment slope
    pub slope_difference: Option<f64>,
    /// Quality warnings attached to a successful result
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Error code of a failed source
    pub error_code: Option<&'static str>,
    /// Human-readable meaning of the error code
    pub error_description: Option<&'static str>,
    /// Error message of a failed source
    pub error: Option<String>,
}

impl From<&SampleOutcome> for ReportRow {
    fn from(outcome: &SampleOutcome) -> Self {
        match &outcome.result {
            Ok(result) => Self {
                file: outcome.source.clone(),
                get: Some(result.threshold()),
                timestamp: Some(result.timestamp()),
                slope_difference: Some(result.slope_difference),
                warnings: result.warnings().iter().map(ToString::to_string).collect(),
                error_code: None,
                error_description: None,
                error: None,
            },
            Err(e) => Self {
                file: outcome.source.clone(),
                get: None,
                timestamp: None,
                slope_difference: None,
                warnings: Vec::new(),
                error_code: Some(e.code().as_str()),
                error_description: Some(e.code().description()),
                error: Some(e.to_string()),
            },
        }
    }
}

/// JSON summary of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Unique identifier of this run
    pub run_id: Uuid,
    /// When the summary was produced
    pub generated_at: DateTime<Utc>,
    /// Number of sources
    pub total: usize,
    /// Sources analysed successfully
    pub succeeded: usize,
    /// Sources that failed to load or analyse
    pub failed: usize,
    /// Configuration used for the run
    pub config: ThresholdConfig,
    /// One row per source, in input order
    pub rows: Vec<ReportRow>,
}

impl Summary {
    /// Build a summary of `report`
    #[must_use]
    pub fn new(report: &BatchReport, config: ThresholdConfig) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            total: report.outcomes.len(),
            succeeded: report.success_count(),
            failed: report.failure_count(),
            config,
            rows: rows(report),
        }
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Serialization` if serialization fails.
    pub fn to_json(&self) -> Result<String, SinkError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON summary to `path`
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<(), SinkError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| SinkError::io(path.display().to_string(), e))
    }
}

/// Summary rows in input order
#[must_use]
pub fn rows(report: &BatchReport) -> Vec<ReportRow> {
    report.outcomes.iter().map(ReportRow::from).collect()
}

/// Aligned text table of successes followed by the failure list
#[must_use]
pub fn render_table(report: &BatchReport) -> String {
    let body: Vec<[String; 4]> = report
        .successes()
        .map(|(outcome, result)| {
            let marker = if result.is_low_confidence() { " *" } else { "" };
            [
                format!("{}{marker}", outcome.source),
                result.threshold().to_string(),
                result.timestamp().to_string(),
                format!("{:.4}", result.slope_difference),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_owned), &widths);
    push_row(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &body {
        push_row(&mut out, row, &widths);
    }

    if report
        .successes()
        .any(|(_, result)| result.is_low_confidence())
    {
        out.push_str("\n* breakpoint outside the observed VO2 range (low confidence)\n");
    }

    if report.failure_count() > 0 {
        let _ = writeln!(out, "\nFailed ({}):", report.failure_count());
        for (source, error) in report.failures() {
            let _ = writeln!(out, "  {source}: [{}] {error}", error.code());
            let _ = writeln!(out, "    {}", error.code().description());
        }
    }
    out
}

/// First column left-aligned, numeric columns right-aligned
fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
