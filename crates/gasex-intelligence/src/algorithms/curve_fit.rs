// ABOUTME: Competing quadratic and linear fits of VCO2 on VO2 over a full sample
// ABOUTME: First pipeline stage; any regression failure is attributed to curve fitting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

use super::regression::{PolynomialRegression, RegressionModel};
use gasex_core::constants::fitting;
use gasex_core::{AnalysisStage, Sample, ThresholdError, ThresholdResult};
use serde::Serialize;
use tracing::debug;

/// Quadratic and linear models fit over the whole sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveFits {
    /// `VCO2 = a·VO2² + b·VO2 + c`
    pub quadratic: RegressionModel,
    /// `VCO2 = m·VO2 + C`
    pub linear: RegressionModel,
}

/// Fits the competing curve models
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveFitter {
    regression: PolynomialRegression,
}

impl CurveFitter {
    /// Create a fitter around a configured regression
    #[must_use]
    pub const fn new(regression: PolynomialRegression) -> Self {
        Self { regression }
    }

    /// Fit both models to the sample's (VO2, VCO2) pairs
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError::DegenerateFit` at the curve-fitting stage when
    /// the sample has fewer than three points or VO2 is (near-)constant.
    pub fn fit(&self, sample: &Sample) -> ThresholdResult<CurveFits> {
        if sample.len() < fitting::MIN_QUADRATIC_POINTS {
            return Err(ThresholdError::degenerate(
                AnalysisStage::CurveFitting,
                format!(
                    "quadratic fit needs at least {} points, sample has {}",
                    fitting::MIN_QUADRATIC_POINTS,
                    sample.len()
                ),
            ));
        }

        let quadratic = self
            .regression
            .fit_quadratic(sample.vo2(), sample.vco2())
            .map_err(|e| e.at_stage(AnalysisStage::CurveFitting))?;
        let linear = self
            .regression
            .fit_linear(sample.vo2(), sample.vco2())
            .map_err(|e| e.at_stage(AnalysisStage::CurveFitting))?;

        debug!(
            a = quadratic.curvature(),
            b = quadratic.slope(),
            c = quadratic.intercept(),
            m = linear.slope(),
            intercept = linear.intercept(),
            "Fitted quadratic and linear models"
        );

        Ok(CurveFits { quadratic, linear })
    }
}
