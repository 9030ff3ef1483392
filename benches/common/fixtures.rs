// ABOUTME: Benchmark fixtures generating synthetic ramp-protocol exercise tests
// ABOUTME: Deterministic data so measurements are reproducible across runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! Benchmark fixtures for synthetic exercise tests.

use gasex::{BatchInput, Sample};

/// Predefined test lengths (observations per sample)
#[derive(Debug, Clone, Copy)]
pub enum RampLength {
    /// 10 s averages over 10 minutes
    Short,
    /// Breath-by-breath over a typical ramp
    Typical,
    /// Long breath-by-breath recording
    Long,
}

impl RampLength {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Short => 60,
            Self::Typical => 400,
            Self::Long => 2000,
        }
    }
}

/// Ramp with a slope change and deterministic noise
///
/// `seed` shifts the breakpoint and noise phase so batch members differ.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::expect_used)]
pub fn ramp_sample(length: RampLength, seed: usize) -> Sample {
    let n = length.count();
    let step = 3.2 / n as f64;
    let phase = seed as f64 * 0.37;
    let breakpoint = ((seed % 7) as f64).mul_add(0.05, 2.0);

    let (mut time, mut vo2, mut vco2) = (Vec::new(), Vec::new(), Vec::new());
    for i in 0..n {
        let x = step.mul_add(i as f64, 0.8);
        let clean = if x <= breakpoint {
            0.9 * x
        } else {
            1.35f64.mul_add(x - breakpoint, 0.9 * breakpoint)
        };
        time.push(i as f64 * 3.0);
        vo2.push(x);
        vco2.push(0.015f64.mul_add(1.7f64.mul_add(i as f64, phase).sin(), clean));
    }

    Sample::new(time, vo2, vco2).expect("generated values are finite and aligned")
}

/// Batch of `count` ramps named like files in a test directory
#[must_use]
pub fn ramp_batch(length: RampLength, count: usize) -> Vec<BatchInput> {
    (0..count)
        .map(|i| BatchInput::loaded(format!("athlete_{i:03}.csv"), ramp_sample(length, i)))
        .collect()
}
