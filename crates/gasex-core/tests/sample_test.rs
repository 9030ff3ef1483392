// ABOUTME: Tests for sample construction and the error taxonomy
// ABOUTME: Alignment and finiteness checks, VO2 range, and stable error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use gasex_core::models::sample::Observation;
use gasex_core::{AnalysisStage, ErrorCode, Sample, ThresholdError};

#[test]
fn test_misaligned_columns_rejected() {
    let err = Sample::new(vec![0.0, 10.0], vec![1.0, 2.0], vec![1.0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidSample);
    assert!(err.to_string().contains("VCO2=1"));
}

#[test]
fn test_non_finite_value_rejected() {
    let err = Sample::new(vec![0.0, 10.0], vec![1.0, f64::NAN], vec![1.0, 2.0]).unwrap_err();
    assert!(err.to_string().contains("non-finite VO2 value at row 1"));
}

#[test]
fn test_short_samples_are_representable() {
    let sample = Sample::new(vec![0.0], vec![1.0], vec![0.8]).unwrap();
    assert_eq!(sample.len(), 1);
    assert!(!sample.is_empty());
    assert!(Sample::new(vec![], vec![], vec![]).unwrap().is_empty());
}

#[test]
fn test_vo2_range_and_observations() {
    let sample = Sample::from_observations(&[
        Observation { time: 0.0, vo2: 2.0, vco2: 1.8 },
        Observation { time: 10.0, vo2: 1.0, vco2: 0.9 },
        Observation { time: 20.0, vo2: 3.5, vco2: 3.6 },
    ])
    .unwrap();

    assert_eq!(sample.vo2_range(), Some((1.0, 3.5)));
    assert_eq!(sample.observation(1).unwrap().vco2, 0.9);
    assert!(sample.observation(3).is_none());
    assert_eq!(sample.observations().map(|o| o.time).collect::<Vec<_>>(), vec![0.0, 10.0, 20.0]);
    assert_eq!(Sample::new(vec![], vec![], vec![]).unwrap().vo2_range(), None);
}

#[test]
fn test_error_codes_and_stages() {
    let degenerate = ThresholdError::degenerate(AnalysisStage::SegmentAnalysis, "upper partition empty");
    assert_eq!(degenerate.code(), ErrorCode::DegenerateFit);
    assert_eq!(degenerate.stage(), Some(AnalysisStage::SegmentAnalysis));
    assert_eq!(
        degenerate.to_string(),
        "degenerate fit during segment_analysis: upper partition empty"
    );

    let out_of_range = ThresholdError::BreakpointOutOfRange { computed: 12.0, min: 1.0, max: 10.0 };
    assert_eq!(out_of_range.stage(), Some(AnalysisStage::BreakpointLocation));

    let ingestion = ThresholdError::ingestion("a.csv", "missing column VO2");
    assert_eq!(ingestion.code().as_str(), "INGESTION_FAILED");
    assert_eq!(ingestion.stage(), None);
    assert_eq!(
        ingestion.code().description(),
        "The data source could not be read"
    );
    assert_eq!(
        out_of_range.code().description(),
        "The computed breakpoint lies outside the observed VO2 range"
    );
}
