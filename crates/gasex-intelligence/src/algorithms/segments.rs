// ABOUTME: Splits a sample at the breakpoint and compares linear slopes on each side
// ABOUTME: Reports post-breakpoint slope minus pre-breakpoint slope as the threshold signature
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

use super::breakpoint::Breakpoint;
use super::regression::{PolynomialRegression, RegressionModel};
use gasex_core::constants::fitting;
use gasex_core::{AnalysisStage, Sample, ThresholdError, ThresholdResult};
use serde::Serialize;
use tracing::debug;

/// Subsequence of a sample on one side of the breakpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Partition {
    indices: Vec<usize>,
    vo2: Vec<f64>,
    vco2: Vec<f64>,
}

impl Partition {
    fn push(&mut self, index: usize, vo2: f64, vco2: f64) {
        self.indices.push(index);
        self.vo2.push(vo2);
        self.vco2.push(vco2);
    }

    /// Original sample indices, in sequence order
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// VO2 values
    #[must_use]
    pub fn vo2(&self) -> &[f64] {
        &self.vo2
    }

    /// VCO2 values
    #[must_use]
    pub fn vco2(&self) -> &[f64] {
        &self.vco2
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the partition is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Split `sample` into `VO2 <= threshold` (lower) and `VO2 > threshold` (upper)
#[must_use]
pub fn partition(sample: &Sample, threshold: f64) -> (Partition, Partition) {
    let mut lower = Partition::default();
    let mut upper = Partition::default();
    for (index, (&vo2, &vco2)) in sample.vo2().iter().zip(sample.vco2()).enumerate() {
        if vo2 <= threshold {
            lower.push(index, vo2, vco2);
        } else {
            upper.push(index, vo2, vco2);
        }
    }
    (lower, upper)
}

/// Partitions and their independent linear fits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentAnalysis {
    /// Points at or below the threshold
    pub lower: Partition,
    /// Points above the threshold
    pub upper: Partition,
    /// Linear fit of the lower partition
    pub lower_model: RegressionModel,
    /// Linear fit of the upper partition
    pub upper_model: RegressionModel,
    /// `upper_model` slope minus `lower_model` slope
    pub slope_difference: f64,
}

/// Fits a line to each side of the breakpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentSlopeAnalyzer {
    regression: PolynomialRegression,
}

impl SegmentSlopeAnalyzer {
    /// Create an analyzer around a configured regression
    #[must_use]
    pub const fn new(regression: PolynomialRegression) -> Self {
        Self { regression }
    }

    /// Partition the sample at the breakpoint and compare slopes
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError::DegenerateFit` at segment analysis when either
    /// partition has fewer than two points or cannot support a line.
    pub fn analyze(
        &self,
        sample: &Sample,
        breakpoint: &Breakpoint,
    ) -> ThresholdResult<SegmentAnalysis> {
        let (lower, upper) = partition(sample, breakpoint.vo2);
        let boundary_note = if breakpoint.is_low_confidence() {
            " (breakpoint collapsed to the edge of the observed VO2 range)"
        } else {
            ""
        };

        for (name, part) in [("lower", &lower), ("upper", &upper)] {
            if part.len() < fitting::MIN_LINEAR_POINTS {
                return Err(ThresholdError::degenerate(
                    AnalysisStage::SegmentAnalysis,
                    format!(
                        "{name} partition has {} point(s), need at least {}{boundary_note}",
                        part.len(),
                        fitting::MIN_LINEAR_POINTS
                    ),
                ));
            }
        }

        let fit = |name: &str, part: &Partition| {
            self.regression.fit_linear(part.vo2(), part.vco2()).map_err(|e| {
                ThresholdError::degenerate(
                    AnalysisStage::SegmentAnalysis,
                    format!("{name} partition: {e}{boundary_note}"),
                )
            })
        };
        let lower_model = fit("lower", &lower)?;
        let upper_model = fit("upper", &upper)?;
        let slope_difference = upper_model.slope() - lower_model.slope();

        debug!(
            lower_points = lower.len(),
            upper_points = upper.len(),
            lower_slope = lower_model.slope(),
            upper_slope = upper_model.slope(),
            slope_difference,
            "Analyzed segments"
        );

        Ok(SegmentAnalysis {
            lower,
            upper,
            lower_model,
            upper_model,
            slope_difference,
        })
    }
}
