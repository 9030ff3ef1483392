// ABOUTME: Constants for regression sizing, numerical tolerances, and input column names
// ABOUTME: Pure data constants organized by domain for the threshold detection engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! Constants grouped by domain

/// Minimum point counts for each regression
pub mod fitting {
    /// Points needed to determine a quadratic fit
    pub const MIN_QUADRATIC_POINTS: usize = 3;
    /// Points needed to determine a linear fit
    pub const MIN_LINEAR_POINTS: usize = 2;
    /// Highest polynomial degree the fitter supports
    pub const MAX_DEGREE: usize = 2;
}

/// Default numerical tolerances
pub mod tolerances {
    /// Relative curvature below which the quadratic counts as linear
    pub const CURVATURE: f64 = 1e-9;
    /// Normal-equation pivot below which the design matrix counts as singular
    pub const SINGULARITY: f64 = 1e-10;
    /// Relative distance under which two candidates tie for nearest sample
    pub const TIE: f64 = 1e-9;
    /// Relative spread under which an input column counts as constant
    pub const CONSTANT_SPREAD: f64 = 1e-12;
}

/// Column names accepted by tabular ingestion (matched case-insensitively)
pub mod columns {
    /// Elapsed time in seconds
    pub const TIME: &str = "t";
    /// Alternative spelling for the time column
    pub const TIME_LONG: &str = "time";
    /// Oxygen uptake
    pub const VO2: &str = "VO2";
    /// Carbon dioxide output
    pub const VCO2: &str = "VCO2";
}

/// Report headings
pub mod report {
    /// Table header row
    pub const HEADERS: [&str; 4] = ["File", "GET", "Timestamp", "Slope difference"];
}
