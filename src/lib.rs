// ABOUTME: Gas Exchange Threshold batch tool: ingestion, output sinks, reports, and logging
// ABOUTME: Builds on gasex-core models and the gasex-intelligence analysis engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

#![deny(unsafe_code)]

//! # Gasex
//!
//! Detects the Gas Exchange Threshold (GET) in VO2/VCO2 exercise-test data.
//!
//! ```text
//! path ──► ingest ──► BatchAnalyzer (rayon) ──► report
//!                              │
//!                              └──► OutputSink (charts, console)
//! ```

/// Loading samples from CSV and JSON files
pub mod ingest;

/// Structured logging setup
pub mod logging;

/// Text table and JSON summary
pub mod report;

/// Ingestion, analysis and delivery in one pass
pub mod runner;

/// Pluggable result destinations
pub mod sinks;

pub use gasex_core::{AnalysisStage, ErrorCode, Sample, ThresholdError, ThresholdResult};
pub use gasex_intelligence::{
    AnalysisResult, BatchInput, BatchReport, GasExchangeAnalyzer, OutOfRangePolicy,
    ThresholdConfig,
};
pub use runner::{DeliveryFailure, RunOutput, Runner};
