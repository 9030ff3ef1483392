// ABOUTME: Gas Exchange Threshold detection engine
// ABOUTME: Curve fitting, breakpoint location, segment slopes, pipeline, and parallel batches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

#![deny(unsafe_code)]

//! # Gasex Intelligence
//!
//! Identifies the Gas Exchange Threshold from paired VO2/VCO2 measurements.
//!
//! 1. **Curve fitting**: quadratic and linear least-squares fits of VCO2 on VO2
//! 2. **Breakpoint location**: VO2 where the quadratic's tangent parallels the
//!    line, anchored to the nearest observed sample
//! 3. **Segment analysis**: independent lines either side of the breakpoint and
//!    the change in slope between them

/// Regression, curve fitting, breakpoint and segment algorithms
pub mod algorithms;

/// Parallel batch analysis
pub mod batch;

/// Tolerances and policies
pub mod config;

/// Sequential per-sample pipeline
pub mod pipeline;

pub use algorithms::{
    Breakpoint, CurveFits, Partition, QualityWarning, RegressionModel, SegmentAnalysis,
};
pub use batch::{BatchAnalyzer, BatchInput, BatchReport, SampleOutcome};
pub use config::{ConfigError, OutOfRangePolicy, ThresholdConfig};
pub use pipeline::{AnalysisResult, GasExchangeAnalyzer};
