// ABOUTME: Locates the Gas Exchange Threshold as the quadratic tangent parallel to the linear fit
// ABOUTME: Anchors the computed VO2 to the nearest observed sample and flags out-of-range results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! Breakpoint location
//!
//! The vertical gap between `q(x) = a·x² + b·x + c` and `l(x) = m·x + C` is
//! extremal where `q'(x) = 2a·x + b` equals `m`, i.e. at `X = (m − b) / (2a)`.
//! The breakpoint is the observed sample whose VO2 is closest to `X`.

use super::curve_fit::CurveFits;
use crate::config::{OutOfRangePolicy, ThresholdConfig};
use gasex_core::{AnalysisStage, Sample, ThresholdError, ThresholdResult};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Non-fatal quality issue attached to a result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityWarning {
    /// Tangent point outside the observed VO2 range; breakpoint collapsed to an endpoint
    OutOfRange {
        /// Computed tangent-parallel VO2
        computed_vo2: f64,
        /// Smallest observed VO2
        min_vo2: f64,
        /// Largest observed VO2
        max_vo2: f64,
    },
}

impl fmt::Display for QualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                computed_vo2,
                min_vo2,
                max_vo2,
            } => write!(
                f,
                "computed breakpoint {computed_vo2:.4} outside observed VO2 range [{min_vo2:.4}, {max_vo2:.4}]"
            ),
        }
    }
}

/// Observed sample marking the threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakpoint {
    /// Observed VO2 at the breakpoint (the threshold)
    pub vo2: f64,
    /// Timestamp of the breakpoint sample
    pub timestamp: f64,
    /// Index of the breakpoint sample
    pub index: usize,
    /// Computed tangent-parallel VO2 (may be unobserved)
    pub tangent_vo2: f64,
    /// Quadratic model evaluated at `tangent_vo2`
    pub tangent_vco2: f64,
    /// Quadratic minus linear model at `tangent_vo2`
    pub separation: f64,
    /// Quality warnings raised while locating
    pub warnings: Vec<QualityWarning>,
}

impl Breakpoint {
    /// Whether any quality warning was raised
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Finds the tangent-parallel point and anchors it to an observation
#[derive(Debug, Clone, Copy)]
pub struct BreakpointLocator {
    curvature_tolerance: f64,
    tie_tolerance: f64,
    policy: OutOfRangePolicy,
}

impl Default for BreakpointLocator {
    fn default() -> Self {
        Self::from_config(&ThresholdConfig::default())
    }
}

impl BreakpointLocator {
    /// Build from configuration
    #[must_use]
    pub const fn from_config(config: &ThresholdConfig) -> Self {
        Self {
            curvature_tolerance: config.curvature_tolerance,
            tie_tolerance: config.tie_tolerance,
            policy: config.out_of_range_policy,
        }
    }

    /// Locate the breakpoint for a sample and its fitted curves
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError::DegenerateFit` at breakpoint location when the
    /// quadratic's curvature is negligible, and
    /// `ThresholdError::BreakpointOutOfRange` when the tangent point lies outside
    /// the observed VO2 range under the reject policy.
    pub fn locate(&self, sample: &Sample, fits: &CurveFits) -> ThresholdResult<Breakpoint> {
        let (min_vo2, max_vo2) = sample.vo2_range().ok_or_else(|| {
            ThresholdError::degenerate(AnalysisStage::BreakpointLocation, "sample is empty")
        })?;

        let a = fits.quadratic.curvature();
        let b = fits.quadratic.slope();
        let m = fits.linear.slope();

        self.check_curvature(a, max_vo2 - min_vo2, sample.vco2())?;

        let tangent_vo2 = (m - b) / (2.0 * a);
        if !tangent_vo2.is_finite() {
            return Err(ThresholdError::degenerate(
                AnalysisStage::BreakpointLocation,
                format!("tangent point is not finite (a={a:e}, b={b}, m={m})"),
            ));
        }

        let mut warnings = Vec::new();
        if tangent_vo2 < min_vo2 || tangent_vo2 > max_vo2 {
            match self.policy {
                OutOfRangePolicy::Reject => {
                    return Err(ThresholdError::BreakpointOutOfRange {
                        computed: tangent_vo2,
                        min: min_vo2,
                        max: max_vo2,
                    });
                }
                OutOfRangePolicy::Flag => {
                    let warning = QualityWarning::OutOfRange {
                        computed_vo2: tangent_vo2,
                        min_vo2,
                        max_vo2,
                    };
                    warn!(%warning, "Low-confidence breakpoint");
                    warnings.push(warning);
                }
            }
        }

        let index = self.nearest_index(sample.vo2(), tangent_vo2, max_vo2 - min_vo2);
        let tangent_vco2 = fits.quadratic.evaluate(tangent_vo2);
        let separation = tangent_vco2 - fits.linear.evaluate(tangent_vo2);

        debug!(
            tangent_vo2,
            index,
            vo2 = sample.vo2()[index],
            separation,
            "Located breakpoint"
        );

        Ok(Breakpoint {
            vo2: sample.vo2()[index],
            timestamp: sample.time()[index],
            index,
            tangent_vo2,
            tangent_vco2,
            separation,
            warnings,
        })
    }

    /// Reject a quadratic whose curvature contributes nothing over the data span
    fn check_curvature(&self, a: f64, vo2_span: f64, vco2: &[f64]) -> ThresholdResult<()> {
        let (lo, hi, magnitude) = vco2.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64),
            |(lo, hi, mag), &v| (lo.min(v), hi.max(v), mag.max(v.abs())),
        );
        let vco2_scale = (hi - lo).max(magnitude).max(f64::MIN_POSITIVE);
        let bend = a.abs() * vo2_span * vo2_span;

        if a == 0.0 || bend <= self.curvature_tolerance * vco2_scale {
            return Err(ThresholdError::degenerate(
                AnalysisStage::BreakpointLocation,
                format!("quadratic curvature {a:e} is negligible; VCO2 is linear in VO2"),
            ));
        }
        Ok(())
    }

    /// Index of the observation closest to `target`; near-ties go to the earliest
    fn nearest_index(&self, vo2: &[f64], target: f64, vo2_span: f64) -> usize {
        let tie_window = self.tie_tolerance * vo2_span;
        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;

        for (index, &value) in vo2.iter().enumerate() {
            let distance = (value - target).abs();
            if distance < best_distance - tie_window {
                best_index = index;
                best_distance = distance;
            }
        }
        best_index
    }
}
