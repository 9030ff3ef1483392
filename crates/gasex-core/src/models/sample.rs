// ABOUTME: Immutable exercise-test sample holding aligned time, VO2, and VCO2 sequences
// ABOUTME: Validates alignment and finiteness once at construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

use crate::errors::{ThresholdError, ThresholdResult};
use serde::Serialize;

/// One observation of a ramp test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Elapsed time (seconds)
    pub time: f64,
    /// Oxygen uptake
    pub vo2: f64,
    /// Carbon dioxide output
    pub vco2: f64,
}

/// Ordered (time, VO2, VCO2) sequences for one exercise test
///
/// The three sequences always have equal length and hold only finite values.
/// Short samples are representable; the curve fitter rejects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    time: Vec<f64>,
    vo2: Vec<f64>,
    vco2: Vec<f64>,
}

impl Sample {
    /// Build a sample from three aligned sequences
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError::InvalidSample` if the lengths differ or any
    /// value is NaN or infinite.
    pub fn new(time: Vec<f64>, vo2: Vec<f64>, vco2: Vec<f64>) -> ThresholdResult<Self> {
        if time.len() != vo2.len() || vo2.len() != vco2.len() {
            return Err(ThresholdError::invalid_sample(format!(
                "column lengths differ (t={}, VO2={}, VCO2={})",
                time.len(),
                vo2.len(),
                vco2.len()
            )));
        }

        for (name, column) in [("t", &time), ("VO2", &vo2), ("VCO2", &vco2)] {
            if let Some(index) = column.iter().position(|v| !v.is_finite()) {
                return Err(ThresholdError::invalid_sample(format!(
                    "non-finite {name} value at row {index}"
                )));
            }
        }

        Ok(Self { time, vo2, vco2 })
    }

    /// Build a sample from observations
    ///
    /// # Errors
    ///
    /// Returns `ThresholdError::InvalidSample` if any value is not finite.
    pub fn from_observations(observations: &[Observation]) -> ThresholdResult<Self> {
        Self::new(
            observations.iter().map(|o| o.time).collect(),
            observations.iter().map(|o| o.vo2).collect(),
            observations.iter().map(|o| o.vco2).collect(),
        )
    }

    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.vo2.len()
    }

    /// Whether the sample has no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vo2.is_empty()
    }

    /// Elapsed times
    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Oxygen uptake values
    #[must_use]
    pub fn vo2(&self) -> &[f64] {
        &self.vo2
    }

    /// Carbon dioxide output values
    #[must_use]
    pub fn vco2(&self) -> &[f64] {
        &self.vco2
    }

    /// Observation at `index`
    #[must_use]
    pub fn observation(&self, index: usize) -> Option<Observation> {
        Some(Observation {
            time: *self.time.get(index)?,
            vo2: *self.vo2.get(index)?,
            vco2: *self.vco2.get(index)?,
        })
    }

    /// Iterate observations in sequence order
    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        self.time
            .iter()
            .zip(&self.vo2)
            .zip(&self.vco2)
            .map(|((&time, &vo2), &vco2)| Observation { time, vo2, vco2 })
    }

    /// Smallest and largest observed VO2, `None` for an empty sample
    #[must_use]
    pub fn vo2_range(&self) -> Option<(f64, f64)> {
        let first = *self.vo2.first()?;
        Some(
            self.vo2
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }
}
