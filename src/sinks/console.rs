// ABOUTME: Console sink printing the threshold, its timestamp, and the slope difference
// ABOUTME: Writes a short block per sample to stdout, flagging low-confidence results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

use super::{OutputSink, SinkError};
use gasex_core::Sample;
use gasex_intelligence::AnalysisResult;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Prints each result to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Text block written for one result
    #[must_use]
    pub fn render(source: &str, result: &AnalysisResult) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{source}");
        let _ = writeln!(
            out,
            "  Gas Exchange Threshold (GET): {}",
            result.threshold()
        );
        let _ = writeln!(out, "  Timestamp of GET: {}", result.timestamp());
        let _ = writeln!(
            out,
            "  Difference between the two slopes: {}",
            result.slope_difference
        );
        for warning in result.warnings() {
            let _ = writeln!(out, "  Warning: {warning}");
        }
        out
    }
}

impl OutputSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn deliver(
        &self,
        source: &str,
        _sample: &Sample,
        result: &AnalysisResult,
    ) -> Result<(), SinkError> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(Self::render(source, result).as_bytes())
            .map_err(|e| SinkError::io("stdout", e))
    }
}
