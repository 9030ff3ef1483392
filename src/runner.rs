// ABOUTME: Batch runner tying ingestion, parallel analysis, and output sink delivery together
// ABOUTME: Sink failures are logged per source and never change any analysis outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

use crate::ingest;
use crate::sinks::OutputSink;
use gasex_core::ThresholdResult;
use gasex_intelligence::{BatchAnalyzer, BatchInput, BatchReport, GasExchangeAnalyzer};
use std::path::Path;
use tracing::{info, warn};

/// A sink delivery that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    /// Source whose result was being delivered
    pub source: String,
    /// Sink name
    pub sink: &'static str,
    /// Error message
    pub error: String,
}

/// Batch report plus the sink deliveries that failed
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Per-source analysis outcomes
    pub report: BatchReport,
    /// Failed deliveries, in source then sink order
    pub delivery_failures: Vec<DeliveryFailure>,
}

/// Loads inputs, analyses them in parallel and hands successes to sinks
pub struct Runner {
    batch: BatchAnalyzer,
    sinks: Vec<Box<dyn OutputSink>>,
}

impl Runner {
    /// Runner without sinks
    #[must_use]
    pub fn new(analyzer: GasExchangeAnalyzer) -> Self {
        Self {
            batch: BatchAnalyzer::new(analyzer),
            sinks: Vec::new(),
        }
    }

    /// Add an output sink
    #[must_use]
    pub fn with_sink(mut self, sink: impl OutputSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Names of the configured sinks
    #[must_use]
    pub fn sink_names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Discover, load and analyse everything under `path`
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError::Ingestion` only when `path` itself cannot be
    /// resolved; per-file problems are recorded in the report.
    pub fn run_path(&self, path: &Path) -> ThresholdResult<RunOutput> {
        let inputs = ingest::load_inputs(path)?;
        if inputs.is_empty() {
            warn!(path = %path.display(), "No .csv or .json files found");
        }
        Ok(self.run(inputs))
    }

    /// Analyse already loaded inputs and deliver the successes
    #[must_use]
    pub fn run(&self, inputs: Vec<BatchInput>) -> RunOutput {
        let report = self.batch.analyze_all(inputs);
        let delivery_failures = self.deliver(&report);
        RunOutput {
            report,
            delivery_failures,
        }
    }

    /// Hand every successful result to every sink, in input order
    #[must_use]
    pub fn deliver(&self, report: &BatchReport) -> Vec<DeliveryFailure> {
        let mut failures = Vec::new();
        for (outcome, result) in report.successes() {
            let Some(sample) = outcome.sample.as_ref() else {
                continue;
            };
            for sink in &self.sinks {
                if let Err(e) = sink.deliver(&outcome.source, sample, result) {
                    warn!(
                        source = %outcome.source,
                        sink = sink.name(),
                        error = %e,
                        "Output delivery failed"
                    );
                    failures.push(DeliveryFailure {
                        source: outcome.source.clone(),
                        sink: sink.name(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if !self.sinks.is_empty() {
            info!(
                sinks = ?self.sink_names(),
                delivered = report.success_count(),
                failed = failures.len(),
                "Output delivery finished"
            );
        }
        failures
    }
}
