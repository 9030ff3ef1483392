// ABOUTME: Tests for the text table and JSON summary of a batch
// ABOUTME: Failed sources must be listed with their error and no numeric fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use gasex::report::{self, Summary};
use gasex::{BatchInput, BatchReport, GasExchangeAnalyzer, Runner, Sample, ThresholdConfig};
use tempfile::TempDir;

fn sample(rows: &[(f64, f64, f64)]) -> Sample {
    Sample::new(
        rows.iter().map(|r| r.0).collect(),
        rows.iter().map(|r| r.1).collect(),
        rows.iter().map(|r| r.2).collect(),
    )
    .unwrap()
}

fn mixed_report() -> BatchReport {
    let inputs = vec![
        BatchInput::loaded("piecewise.csv", sample(&common::piecewise_rows())),
        BatchInput::loaded("short.csv", sample(&common::piecewise_rows()[..2])),
    ];
    Runner::new(GasExchangeAnalyzer::default()).run(inputs).report
}

#[test]
fn test_table_lists_successes_then_failures() {
    let table = report::render_table(&mixed_report());
    let lines: Vec<&str> = table.lines().collect();

    assert!(lines[0].starts_with("File"));
    assert!(lines[0].contains("GET"));
    assert!(lines[0].contains("Timestamp"));
    assert!(lines[0].ends_with("Slope difference"));
    assert!(lines[1].starts_with("----"));
    assert!(lines[2].starts_with("piecewise.csv"));
    assert!(lines[2].contains(" 5 "));
    assert!(lines[2].contains(" 40 "));
    assert!(lines[2].ends_with("1.0000"));

    assert!(table.contains("Failed (1):"));
    assert!(table.contains("short.csv: [DEGENERATE_FIT]"));
    assert!(table.contains("    A regression was underdetermined or numerically singular\n"));
}

#[test]
fn test_summary_rows_null_numbers_for_failures() {
    let summary = Summary::new(&mixed_report(), ThresholdConfig::default());
    assert_eq!(summary.total, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);

    let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
    let rows = value["rows"].as_array().unwrap();

    assert_eq!(rows[0]["file"], "piecewise.csv");
    assert_eq!(rows[0]["GET"], 5.0);
    assert_eq!(rows[0]["timestamp"], 40.0);
    assert!(rows[0]["error"].is_null());

    assert_eq!(rows[1]["file"], "short.csv");
    assert!(rows[1]["GET"].is_null());
    assert!(rows[1]["slope_difference"].is_null());
    assert_eq!(rows[1]["error_code"], "DEGENERATE_FIT");
    assert_eq!(
        rows[1]["error_description"],
        "A regression was underdetermined or numerically singular"
    );
    assert!(rows[0]["error_description"].is_null());
    assert!(rows[1]["error"].as_str().unwrap().contains("curve_fitting"));

    assert!(value["generated_at"].is_string());
    assert_eq!(value["config"]["out_of_range_policy"], "flag");
}

#[test]
fn test_summary_written_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.json");

    Summary::new(&mixed_report(), ThresholdConfig::default())
        .write_to(&path)
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["rows"].as_array().unwrap().len(), 2);
}

#[test]
fn test_summary_to_unwritable_path_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("summary.json");

    let err = Summary::new(&mixed_report(), ThresholdConfig::default())
        .write_to(&path)
        .unwrap_err();
    assert!(err.to_string().contains("summary.json"));
}
