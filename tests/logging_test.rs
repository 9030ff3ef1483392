// ABOUTME: Tests for logging configuration
// ABOUTME: Validates environment handling, format parsing, and filter construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use gasex::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const VARS: [&str; 4] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
];

fn clear_env() {
    for name in VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("LOG_INCLUDE_LOCATION", "1");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(!config.include_thread);
}

#[test]
#[serial]
fn test_default_logging_config() {
    clear_env();
    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert!(!config.include_location);
}

#[test]
fn test_verbose_raises_level() {
    assert_eq!(LoggingConfig::default().verbose(true).level, "debug");
    assert_eq!(LoggingConfig::default().verbose(false).level, "info");
}

#[test]
fn test_log_format_names() {
    assert_eq!(LogFormat::from_name("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::from_name("compact"), LogFormat::Compact);
    assert_eq!(LogFormat::from_name("anything"), LogFormat::Pretty);
    assert_eq!(LogFormat::Compact.to_string(), "compact");
}

#[test]
#[serial]
fn test_env_filter_pins_gasex_targets() {
    clear_env();
    let filter = LoggingConfig::default().verbose(true).env_filter().to_string();

    assert!(filter.contains("gasex=debug"));
    assert!(filter.contains("gasex_intelligence=debug"));
}
