// ABOUTME: Tests for console and chart output sinks
// ABOUTME: Covers display text, chart file naming, and delivery errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use gasex::sinks::ConsoleSink;
use gasex::{GasExchangeAnalyzer, Sample};

fn piecewise() -> Sample {
    let rows = common::piecewise_rows();
    Sample::new(
        rows.iter().map(|r| r.0).collect(),
        rows.iter().map(|r| r.1).collect(),
        rows.iter().map(|r| r.2).collect(),
    )
    .unwrap()
}

#[test]
fn test_console_render_lists_threshold_timestamp_and_slope() {
    let result = GasExchangeAnalyzer::default().analyze(&piecewise()).unwrap();
    let text = ConsoleSink::render("piecewise.csv", &result);

    assert!(text.starts_with("piecewise.csv\n"));
    assert!(text.contains("Gas Exchange Threshold (GET): 5\n"));
    assert!(text.contains("Timestamp of GET: 40\n"));
    assert!(text.contains("Difference between the two slopes: "));
    assert!(!text.contains("Warning"));
}

#[cfg(feature = "charts")]
mod charts {
    use super::piecewise;
    use gasex::sinks::{ChartFormat, ChartSink, OutputSink, SinkError};
    use gasex::GasExchangeAnalyzer;
    use tempfile::TempDir;

    #[test]
    fn test_chart_paths_follow_source_stem() {
        let sink = ChartSink::new("/plots", ChartFormat::Svg);
        let [scatter, lin_quad, segments] = sink.chart_paths("athlete_07.csv");

        assert!(scatter.ends_with("athlete_07_scatter.svg"));
        assert!(lin_quad.ends_with("athlete_07_lin_quad.svg"));
        assert!(segments.ends_with("athlete_07_lwr_upr_reg.svg"));
        assert!(scatter.starts_with("/plots"));
    }

    #[test]
    fn test_png_is_default_format() {
        assert_eq!(ChartFormat::default(), ChartFormat::Png);
        let [scatter, ..] = ChartSink::new("out", ChartFormat::default()).chart_paths("x.json");
        assert!(scatter.ends_with("x_scatter.png"));
    }

    #[test]
    fn test_default_and_custom_chart_size() {
        let sink = ChartSink::new("out", ChartFormat::Png);
        assert_eq!(sink.size(), (1024, 768));
        assert_eq!(sink.with_size(640, 480).size(), (640, 480));
    }

    #[test]
    fn test_unusable_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("plots");
        std::fs::write(&blocker, "occupied").unwrap();

        let sample = piecewise();
        let result = GasExchangeAnalyzer::default().analyze(&sample).unwrap();
        let err = ChartSink::new(&blocker, ChartFormat::Png)
            .deliver("piecewise.csv", &sample, &result)
            .unwrap_err();

        assert!(matches!(err, SinkError::Io { .. }));
        assert!(!blocker.join("piecewise_scatter.png").exists());
    }
}
