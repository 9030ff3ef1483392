// ABOUTME: Sequential Gas Exchange Threshold pipeline producing an immutable result chain
// ABOUTME: Sample -> CurveFits -> Breakpoint -> SegmentAnalysis -> AnalysisResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! # Analysis Pipeline
//!
//! Each stage takes the previous stage's output by reference and returns a new,
//! fully populated value. A failure at any stage aborts the sample; nothing is
//! retried since every step is deterministic for a given input.

use crate::algorithms::{
    Breakpoint, BreakpointLocator, CurveFits, CurveFitter, PolynomialRegression, QualityWarning,
    RegressionModel, SegmentAnalysis, SegmentSlopeAnalyzer,
};
use crate::config::ThresholdConfig;
use gasex_core::{Sample, ThresholdResult};
use serde::Serialize;
use tracing::{debug, debug_span};

/// Per-sample output with the fits and partitions kept for visualization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Observed breakpoint
    pub breakpoint: Breakpoint,
    /// Upper-segment slope minus lower-segment slope
    pub slope_difference: f64,
    /// Full-sample quadratic and linear fits
    pub fits: CurveFits,
    /// Partitions and segment fits
    pub segments: SegmentAnalysis,
}

impl AnalysisResult {
    /// VO2 at the breakpoint (the GET)
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.breakpoint.vo2
    }

    /// Timestamp of the breakpoint sample
    #[must_use]
    pub const fn timestamp(&self) -> f64 {
        self.breakpoint.timestamp
    }

    /// Quality warnings raised during analysis
    #[must_use]
    pub fn warnings(&self) -> &[QualityWarning] {
        &self.breakpoint.warnings
    }

    /// Whether the result should be treated as low-confidence
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.breakpoint.is_low_confidence()
    }

    /// Models a plotter overlays on the raw scatter
    #[must_use]
    pub fn models(&self) -> [(&'static str, &RegressionModel); 4] {
        [
            ("linear", &self.fits.linear),
            ("quadratic", &self.fits.quadratic),
            ("lower", &self.segments.lower_model),
            ("upper", &self.segments.upper_model),
        ]
    }
}

/// Runs curve fitting, breakpoint location and segment analysis for one sample
#[derive(Debug, Clone, Copy)]
pub struct GasExchangeAnalyzer {
    config: ThresholdConfig,
    fitter: CurveFitter,
    locator: BreakpointLocator,
    segments: SegmentSlopeAnalyzer,
}

impl Default for GasExchangeAnalyzer {
    fn default() -> Self {
        Self::new(ThresholdConfig::default())
    }
}

impl GasExchangeAnalyzer {
    /// Create an analyzer from configuration
    #[must_use]
    pub const fn new(config: ThresholdConfig) -> Self {
        let regression = PolynomialRegression::new(config.singularity_tolerance);
        Self {
            config,
            fitter: CurveFitter::new(regression),
            locator: BreakpointLocator::from_config(&config),
            segments: SegmentSlopeAnalyzer::new(regression),
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Analyze one sample
    ///
    /// # Errors
    ///
    /// Returns the first stage failure: `DegenerateFit` from any stage, or
    /// `BreakpointOutOfRange` under the reject policy.
    pub fn analyze(&self, sample: &Sample) -> ThresholdResult<AnalysisResult> {
        let span = debug_span!("gas_exchange_analysis", points = sample.len());
        let _guard = span.enter();

        let fits = self.fitter.fit(sample)?;
        let breakpoint = self.locator.locate(sample, &fits)?;
        let segments = self.segments.analyze(sample, &breakpoint)?;

        debug!(
            threshold = breakpoint.vo2,
            timestamp = breakpoint.timestamp,
            slope_difference = segments.slope_difference,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            slope_difference: segments.slope_difference,
            breakpoint,
            fits,
            segments,
        })
    }
}
