// ABOUTME: Integration tests for parallel batch analysis
// ABOUTME: Verifies failure isolation and ordering across independent samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use gasex_core::{AnalysisStage, ThresholdError};
use gasex_intelligence::{BatchAnalyzer, BatchInput, GasExchangeAnalyzer};

fn inputs_with_degenerate_at(position: usize) -> Vec<BatchInput> {
    let mut inputs = vec![
        BatchInput::loaded("piecewise.csv", common::piecewise_sample()),
        BatchInput::loaded("ramp.csv", common::ramp_sample()),
    ];
    inputs.insert(
        position,
        BatchInput::loaded("short.csv", common::two_point_sample()),
    );
    inputs
}

#[test]
fn test_one_degenerate_sample_does_not_stop_batch() {
    let analyzer = GasExchangeAnalyzer::default();
    let piecewise = analyzer.analyze(&common::piecewise_sample()).unwrap();
    let ramp = analyzer.analyze(&common::ramp_sample()).unwrap();

    for position in 0..3 {
        let report = BatchAnalyzer::new(analyzer).analyze_all(inputs_with_degenerate_at(position));

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 1);

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures[0].0, "short.csv");
        assert_eq!(failures[0].1.stage(), Some(AnalysisStage::CurveFitting));
        assert_eq!(report.outcomes[position].source, "short.csv");

        let successes: Vec<_> = report.successes().collect();
        assert_eq!(successes[0].0.source, "piecewise.csv");
        assert_eq!(successes[0].1, &piecewise);
        assert_eq!(successes[1].0.source, "ramp.csv");
        assert_eq!(successes[1].1, &ramp);
    }
}

#[test]
fn test_ingestion_failures_are_recorded() {
    let inputs = vec![
        BatchInput::failed(
            "broken.csv",
            ThresholdError::ingestion("broken.csv", "missing column VO2"),
        ),
        BatchInput::loaded("ramp.csv", common::ramp_sample()),
    ];
    let report = BatchAnalyzer::default().analyze_all(inputs);

    assert_eq!(report.success_count(), 1);
    let broken = &report.outcomes[0];
    assert!(broken.sample.is_none());
    assert!(!broken.is_success());
    assert!(broken
        .result
        .as_ref()
        .unwrap_err()
        .to_string()
        .contains("missing column VO2"));
    assert!(report.outcomes[1].sample.is_some());
}

#[test]
fn test_empty_batch() {
    let report = BatchAnalyzer::default().analyze_all(Vec::new());
    assert_eq!(report.success_count(), 0);
    assert_eq!(report.failure_count(), 0);
}
