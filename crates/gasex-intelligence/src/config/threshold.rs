// ABOUTME: Threshold engine configuration with environment overrides and validation
// ABOUTME: Numerical tolerances and the policy for breakpoints outside the observed VO2 range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! Threshold engine configuration
//!
//! | Variable                      | Default | Meaning                                  |
//! |-------------------------------|---------|------------------------------------------|
//! | `GASEX_CURVATURE_TOLERANCE`   | `1e-9`  | relative curvature treated as linear     |
//! | `GASEX_SINGULARITY_TOLERANCE` | `1e-10` | normal-equation pivot floor (per point)  |
//! | `GASEX_TIE_TOLERANCE`         | `1e-9`  | relative nearest-sample tie window       |
//! | `GASEX_OUT_OF_RANGE_POLICY`   | `flag`  | `flag` or `reject`                       |

use super::error::ConfigError;
use gasex_core::constants::tolerances;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable names
pub mod env_vars {
    /// Relative curvature tolerance
    pub const CURVATURE_TOLERANCE: &str = "GASEX_CURVATURE_TOLERANCE";
    /// Singularity tolerance
    pub const SINGULARITY_TOLERANCE: &str = "GASEX_SINGULARITY_TOLERANCE";
    /// Tie tolerance
    pub const TIE_TOLERANCE: &str = "GASEX_TIE_TOLERANCE";
    /// Out-of-range policy
    pub const OUT_OF_RANGE_POLICY: &str = "GASEX_OUT_OF_RANGE_POLICY";
}

/// What to do when the tangent point falls outside the observed VO2 range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Keep the endpoint breakpoint and attach a low-confidence warning
    #[default]
    Flag,
    /// Fail the sample at breakpoint location
    Reject,
}

impl OutOfRangePolicy {
    /// Policy name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for OutOfRangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutOfRangePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flag" | "warn" => Ok(Self::Flag),
            "reject" | "error" => Ok(Self::Reject),
            other => Err(ConfigError::Parse(format!(
                "Unknown out-of-range policy: '{other}'. Valid options: flag, reject"
            ))),
        }
    }
}

/// Tolerances and policies for the analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// `|a|·span(VO2)²` relative to the VCO2 scale below which the quadratic is linear
    pub curvature_tolerance: f64,
    /// Pivot floor of the normal equations, per data point
    pub singularity_tolerance: f64,
    /// Nearest-sample candidates closer than this fraction of the VO2 span tie
    pub tie_tolerance: f64,
    /// Handling of tangent points outside the observed VO2 range
    pub out_of_range_policy: OutOfRangePolicy,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            curvature_tolerance: tolerances::CURVATURE,
            singularity_tolerance: tolerances::SINGULARITY,
            tie_tolerance: tolerances::TIE,
            out_of_range_policy: OutOfRangePolicy::Flag,
        }
    }
}

impl ThresholdConfig {
    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparsable value or
    /// the resulting configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied, not yet validated
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvValue` or `ConfigError::Parse` if an
    /// environment variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env_overrides()
    }

    /// Override the out-of-range policy
    #[must_use]
    pub const fn with_out_of_range_policy(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range_policy = policy;
        self
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(value) = env_f64(env_vars::CURVATURE_TOLERANCE)? {
            self.curvature_tolerance = value;
        }
        if let Some(value) = env_f64(env_vars::SINGULARITY_TOLERANCE)? {
            self.singularity_tolerance = value;
        }
        if let Some(value) = env_f64(env_vars::TIE_TOLERANCE)? {
            self.tie_tolerance = value;
        }
        if let Ok(raw) = env::var(env_vars::OUT_OF_RANGE_POLICY) {
            self.out_of_range_policy = raw.parse()?;
        }
        Ok(self)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` when a tolerance is not a finite
    /// value strictly between 0 and 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_unit_interval = |v: f64| v.is_finite() && v > 0.0 && v < 1.0;

        if !in_unit_interval(self.curvature_tolerance) {
            return Err(ConfigError::InvalidRange(
                "curvature_tolerance must be in (0, 1)",
            ));
        }
        if !in_unit_interval(self.singularity_tolerance) {
            return Err(ConfigError::InvalidRange(
                "singularity_tolerance must be in (0, 1)",
            ));
        }
        if !in_unit_interval(self.tie_tolerance) {
            return Err(ConfigError::InvalidRange("tie_tolerance must be in (0, 1)"));
        }
        Ok(())
    }
}

fn env_f64(name: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvValue { name, value: raw }),
        Err(_) => Ok(None),
    }
}
