// ABOUTME: Shared test utilities for gasex integration tests
// ABOUTME: Writes synthetic exercise-test files into temporary directories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `gasex`

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// (t, VO2, VCO2) rows with a slope change at VO2 = 5
pub fn piecewise_rows() -> Vec<(f64, f64, f64)> {
    (1..=10)
        .map(|i| {
            let vo2 = f64::from(i);
            let vco2 = if vo2 <= 5.0 { vo2 } else { 2.0f64.mul_add(vo2, -5.0) };
            (10.0 * (vo2 - 1.0), vo2, vco2)
        })
        .collect()
}

/// Rows of a 60-step ramp breaking at VO2 = 2.3
pub fn ramp_rows() -> Vec<(f64, f64, f64)> {
    (0..60)
        .map(|k| {
            let vo2 = 0.04f64.mul_add(f64::from(k), 0.8);
            let clean = if vo2 <= 2.3 {
                0.9 * vo2
            } else {
                1.35f64.mul_add(vo2 - 2.3, 2.07)
            };
            (
                10.0 * f64::from(k),
                vo2,
                0.01f64.mul_add((1.7 * f64::from(k)).sin(), clean),
            )
        })
        .collect()
}

/// CSV text with the standard header
pub fn csv_text(rows: &[(f64, f64, f64)]) -> String {
    let mut out = String::from("t,VO2,VCO2\n");
    for (t, vo2, vco2) in rows {
        writeln!(out, "{t},{vo2},{vco2}").unwrap();
    }
    out
}

/// JSON text with parallel column arrays
pub fn json_text(rows: &[(f64, f64, f64)]) -> String {
    serde_json::json!({
        "t": rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        "VO2": rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        "VCO2": rows.iter().map(|r| r.2).collect::<Vec<_>>(),
    })
    .to_string()
}

/// Write `contents` to `dir/name`
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
