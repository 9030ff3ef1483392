// ABOUTME: Breakpoint-detection algorithms for the Gas Exchange Threshold
// ABOUTME: Regression, competing curve fits, tangent-point location, and segment slopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

/// Least-squares polynomial regression
pub mod regression;

/// Quadratic and linear fits over the full sample
pub mod curve_fit;

/// Tangent-parallel breakpoint location
pub mod breakpoint;

/// Partitioning and per-segment slopes
pub mod segments;

pub use breakpoint::{Breakpoint, BreakpointLocator, QualityWarning};
pub use curve_fit::{CurveFits, CurveFitter};
pub use regression::{FitFailure, Polynomial, PolynomialRegression, RegressionModel};
pub use segments::{partition, Partition, SegmentAnalysis, SegmentSlopeAnalyzer};
