// ABOUTME: Core types and constants for Gas Exchange Threshold detection
// ABOUTME: Foundation crate with error taxonomy, constants, and the Sample model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

#![deny(unsafe_code)]

//! # Gasex Core
//!
//! Foundation crate shared by the analysis engine and the I/O layer.
//!
//! ## Modules
//!
//! - **errors**: `ThresholdError`, `ErrorCode` and `AnalysisStage`
//! - **constants**: fitting sizes, tolerances, column names
//! - **models**: the immutable `Sample`

/// Error taxonomy with stage attribution
pub mod errors;

/// Constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

pub use errors::{AnalysisStage, ErrorCode, ThresholdError, ThresholdResult};
pub use models::Sample;
