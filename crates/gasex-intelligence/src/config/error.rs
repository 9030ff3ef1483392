// ABOUTME: Configuration error types for threshold engine validation
// ABOUTME: Defines error variants for invalid tolerances, policies, and environment values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment variable present but unparsable
    #[error("Invalid value for {name}: {value}")]
    InvalidEnvValue {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),
}
