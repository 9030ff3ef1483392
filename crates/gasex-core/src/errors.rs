// ABOUTME: Unified error taxonomy for threshold detection, ingestion, and batch processing
// ABOUTME: Defines ThresholdError, the ErrorCode catalogue, and the AnalysisStage attribution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! # Error Handling
//!
//! Every analysis failure is attributable to a pipeline stage. Errors are
//! per-sample: a batch driver records them against the source identifier and
//! moves on to the next sample.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type used across the workspace
pub type ThresholdResult<T> = Result<T, ThresholdError>;

/// Stable error codes, grouped by concern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Input validation (3000-3999)
    /// Sample sequences are malformed
    #[serde(rename = "INVALID_SAMPLE")]
    InvalidSample = 3000,
    /// Source could not be read or parsed
    #[serde(rename = "INGESTION_FAILED")]
    IngestionFailed = 3001,

    // Numerical analysis (7000-7999)
    /// Regression underdetermined or numerically singular
    #[serde(rename = "DEGENERATE_FIT")]
    DegenerateFit = 7000,
    /// Tangent point outside observed VO2 range under the reject policy
    #[serde(rename = "BREAKPOINT_OUT_OF_RANGE")]
    BreakpointOutOfRange = 7001,
}

impl ErrorCode {
    /// Stable machine-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSample => "INVALID_SAMPLE",
            Self::IngestionFailed => "INGESTION_FAILED",
            Self::DegenerateFit => "DEGENERATE_FIT",
            Self::BreakpointOutOfRange => "BREAKPOINT_OUT_OF_RANGE",
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidSample => "The sample sequences are malformed",
            Self::IngestionFailed => "The data source could not be read",
            Self::DegenerateFit => "A regression was underdetermined or numerically singular",
            Self::BreakpointOutOfRange => {
                "The computed breakpoint lies outside the observed VO2 range"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stage that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    /// Quadratic and linear regression over the full sample
    CurveFitting,
    /// Tangent-parallel point search and nearest-sample mapping
    BreakpointLocation,
    /// Partitioning and per-segment linear regression
    SegmentAnalysis,
}

impl AnalysisStage {
    /// Stage name used in logs and reports
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CurveFitting => "curve_fitting",
            Self::BreakpointLocation => "breakpoint_location",
            Self::SegmentAnalysis => "segment_analysis",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors produced while loading or analysing a single sample
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    /// Regression underdetermined or singular
    #[error("degenerate fit during {stage}: {reason}")]
    DegenerateFit {
        /// Stage that attempted the fit
        stage: AnalysisStage,
        /// What made the fit degenerate
        reason: String,
    },

    /// Tangent point outside the observed VO2 range (reject policy only)
    #[error("breakpoint VO2 {computed:.4} outside observed range [{min:.4}, {max:.4}]")]
    BreakpointOutOfRange {
        /// Computed tangent-parallel VO2
        computed: f64,
        /// Smallest observed VO2
        min: f64,
        /// Largest observed VO2
        max: f64,
    },

    /// Sequences are malformed
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    /// Source could not be read or parsed
    #[error("failed to load {source_id}: {reason}")]
    Ingestion {
        /// Source identifier (usually a file name)
        source_id: String,
        /// Underlying failure
        reason: String,
    },
}

impl ThresholdError {
    /// Create a degenerate-fit error for a stage
    #[must_use]
    pub fn degenerate(stage: AnalysisStage, reason: impl Into<String>) -> Self {
        Self::DegenerateFit {
            stage,
            reason: reason.into(),
        }
    }

    /// Create an invalid-sample error
    #[must_use]
    pub fn invalid_sample(reason: impl Into<String>) -> Self {
        Self::InvalidSample(reason.into())
    }

    /// Create an ingestion error
    #[must_use]
    pub fn ingestion(source_id: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Ingestion {
            source_id: source_id.into(),
            reason: reason.to_string(),
        }
    }

    /// Error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DegenerateFit { .. } => ErrorCode::DegenerateFit,
            Self::BreakpointOutOfRange { .. } => ErrorCode::BreakpointOutOfRange,
            Self::InvalidSample(_) => ErrorCode::InvalidSample,
            Self::Ingestion { .. } => ErrorCode::IngestionFailed,
        }
    }

    /// Pipeline stage the error is attributed to, if it came from analysis
    #[must_use]
    pub const fn stage(&self) -> Option<AnalysisStage> {
        match self {
            Self::DegenerateFit { stage, .. } => Some(*stage),
            Self::BreakpointOutOfRange { .. } => Some(AnalysisStage::BreakpointLocation),
            Self::InvalidSample(_) | Self::Ingestion { .. } => None,
        }
    }
}
