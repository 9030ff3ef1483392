// ABOUTME: Configuration module for the threshold engine
// ABOUTME: Re-exports tolerance and policy configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

/// Configuration error types
pub mod error;

/// Numerical tolerances and out-of-range policy
pub mod threshold;

pub use error::ConfigError;
pub use threshold::{OutOfRangePolicy, ThresholdConfig};
