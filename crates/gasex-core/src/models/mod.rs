// ABOUTME: Core data models shared across the workspace
// ABOUTME: Re-exports the gas-exchange Sample type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

/// Exercise-test sample of (time, VO2, VCO2) triples
pub mod sample;

pub use sample::Sample;
