// ABOUTME: Parallel batch analysis of independent samples with per-sample failure isolation
// ABOUTME: Uses rayon for CPU-bound fan-out while preserving input order in the report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! # Batch Analysis
//!
//! Samples share no state, so each pipeline runs on the rayon pool without
//! coordination. A failed sample is recorded against its source identifier
//! and never affects the others.

use crate::pipeline::{AnalysisResult, GasExchangeAnalyzer};
use gasex_core::{Sample, ThresholdError, ThresholdResult};
use rayon::prelude::*;
use tracing::{info, warn};

/// One input of a batch: a source identifier and its loaded sample (or load failure)
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Source identifier, usually a file name
    pub source: String,
    /// Loaded sample, or the ingestion error
    pub sample: ThresholdResult<Sample>,
}

impl BatchInput {
    /// Input with a loaded sample
    #[must_use]
    pub fn loaded(source: impl Into<String>, sample: Sample) -> Self {
        Self {
            source: source.into(),
            sample: Ok(sample),
        }
    }

    /// Input whose loading already failed
    #[must_use]
    pub fn failed(source: impl Into<String>, error: ThresholdError) -> Self {
        Self {
            source: source.into(),
            sample: Err(error),
        }
    }
}

/// Outcome of one source
#[derive(Debug, Clone)]
pub struct SampleOutcome {
    /// Source identifier
    pub source: String,
    /// Sample, when loading succeeded
    pub sample: Option<Sample>,
    /// Analysis result or the failure that aborted it
    pub result: ThresholdResult<AnalysisResult>,
}

impl SampleOutcome {
    /// Whether analysis succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Ordered outcomes of a batch
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One outcome per input, in input order
    pub outcomes: Vec<SampleOutcome>,
}

impl BatchReport {
    /// Successful outcomes with their results
    pub fn successes(&self) -> impl Iterator<Item = (&SampleOutcome, &AnalysisResult)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|r| (o, r)))
    }

    /// Failed outcomes with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ThresholdError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.source.as_str(), e)))
    }

    /// Number of successful samples
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of failed samples
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }
}

/// Runs the pipeline over many samples in parallel
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchAnalyzer {
    analyzer: GasExchangeAnalyzer,
}

impl BatchAnalyzer {
    /// Wrap a single-sample analyzer
    #[must_use]
    pub const fn new(analyzer: GasExchangeAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Analyze every input; failures are recorded, never propagated
    #[must_use]
    pub fn analyze_all(&self, inputs: Vec<BatchInput>) -> BatchReport {
        let outcomes: Vec<SampleOutcome> = inputs
            .into_par_iter()
            .map(|input| self.analyze_one(input))
            .collect();

        let report = BatchReport { outcomes };
        info!(
            total = report.outcomes.len(),
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "Batch analysis finished"
        );
        report
    }

    fn analyze_one(&self, input: BatchInput) -> SampleOutcome {
        let BatchInput { source, sample } = input;
        let (sample, result) = match sample {
            Ok(sample) => {
                let result = self.analyzer.analyze(&sample);
                (Some(sample), result)
            }
            Err(e) => (None, Err(e)),
        };

        match &result {
            Ok(analysis) => info!(
                source = %source,
                threshold = analysis.threshold(),
                timestamp = analysis.timestamp(),
                slope_difference = analysis.slope_difference,
                low_confidence = analysis.is_low_confidence(),
                "Sample analyzed"
            ),
            Err(e) => warn!(
                source = %source,
                code = %e.code(),
                stage = e.stage().map_or("ingestion", |s| s.name()),
                error = %e,
                "Sample analysis failed"
            ),
        }

        SampleOutcome {
            source,
            sample,
            result,
        }
    }
}
