// ABOUTME: Pluggable output sinks that receive each successful analysis
// ABOUTME: Chart files and console display share one trait so delivery never touches the algorithms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! # Output Sinks
//!
//! A sink gets the source identifier, the sample and its result. Sinks never
//! alter results; a failed delivery is reported to the caller, who logs it.
//! Email delivery is left to external tooling that consumes the chart files.

/// Chart rendering with plotters
#[cfg(feature = "charts")]
pub mod chart;

/// Plain-text display
pub mod console;

#[cfg(feature = "charts")]
pub use chart::{ChartFormat, ChartSink};
pub use console::ConsoleSink;

use gasex_core::Sample;
use gasex_intelligence::AnalysisResult;
use std::io;
use thiserror::Error;

/// Errors raised while delivering a result
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing a file or stream failed
    #[error("I/O error on {target}: {source}")]
    Io {
        /// File or stream being written
        target: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A chart could not be drawn
    #[error("failed to render {target}: {reason}")]
    Render {
        /// Output file
        target: String,
        /// Backend message
        reason: String,
    },

    /// Output could not be serialized
    #[error("failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SinkError {
    /// Wrap an I/O error with its target
    #[must_use]
    pub fn io(target: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            target: target.into(),
            source,
        }
    }
}

/// Destination for per-sample results
pub trait OutputSink: Send + Sync {
    /// Short sink name for logs
    fn name(&self) -> &'static str;

    /// Deliver one successful analysis
    ///
    /// # Errors
    ///
    /// Returns a `SinkError` when the output cannot be produced.
    fn deliver(
        &self,
        source: &str,
        sample: &Sample,
        result: &AnalysisResult,
    ) -> Result<(), SinkError>;
}
