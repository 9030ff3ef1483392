// ABOUTME: Shared sample fixtures for threshold engine integration tests
// ABOUTME: Synthetic ramp-protocol samples with known breakpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers
#![allow(dead_code, clippy::missing_panics_doc, clippy::must_use_candidate)]

use gasex_core::Sample;

/// VO2 = 1..10, VCO2 = VO2 up to 5 then 2·VO2 − 5
pub fn piecewise_sample() -> Sample {
    let vo2: Vec<f64> = (1..=10).map(f64::from).collect();
    let vco2 = vo2
        .iter()
        .map(|&v| if v <= 5.0 { v } else { 2.0f64.mul_add(v, -5.0) })
        .collect();
    Sample::new(times(vo2.len()), vo2, vco2).unwrap()
}

/// 60-step ramp with a slope change at VO2 = 2.3 and small deterministic noise
pub fn ramp_sample() -> Sample {
    let vo2: Vec<f64> = (0..60).map(|k| 0.04f64.mul_add(f64::from(k), 0.8)).collect();
    let vco2 = vo2
        .iter()
        .enumerate()
        .map(|(k, &v)| {
            let clean = if v <= 2.3 {
                0.9 * v
            } else {
                1.35f64.mul_add(v - 2.3, 2.07)
            };
            clean + 0.01 * (1.7 * k as f64).sin()
        })
        .collect();
    Sample::new(times(vo2.len()), vo2, vco2).unwrap()
}

/// VCO2 an exact linear function of VO2
pub fn linear_sample() -> Sample {
    let vo2: Vec<f64> = (0..20).map(|k| 0.1f64.mul_add(f64::from(k), 0.8)).collect();
    let vco2 = vo2.iter().map(|&v| 1.2f64.mul_add(v, 0.3)).collect();
    Sample::new(times(vo2.len()), vo2, vco2).unwrap()
}

/// Two observations, too few for any curve fit
pub fn two_point_sample() -> Sample {
    Sample::new(vec![0.0, 10.0], vec![1.0, 1.5], vec![0.9, 1.4]).unwrap()
}

/// Timestamps in 10 s steps
pub fn times(len: usize) -> Vec<f64> {
    (0..len).map(|i| 10.0 * i as f64).collect()
}
