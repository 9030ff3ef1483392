// ABOUTME: Common benchmark utilities and test fixtures for performance testing
// ABOUTME: Provides reusable ramp-test generators for Criterion benchmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! Common benchmark utilities and test fixtures.

pub mod fixtures;
