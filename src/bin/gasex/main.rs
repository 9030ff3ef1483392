// ABOUTME: gasex CLI - Gas Exchange Threshold detection for one file or a directory of tests
// ABOUTME: Prints a result table or JSON summary and optionally renders charts per sample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers
//!
//! Usage:
//! ```bash
//! # Analyse one test and print the result
//! gasex analyze data/athlete_01.csv --display
//!
//! # Analyse a directory, render charts, and keep a JSON summary
//! gasex analyze data/ --plot-dir plots --plot-format svg --summary summary.json
//!
//! # Larger charts
//! gasex analyze data/ --plot-dir plots --plot-size 1600x1200
//!
//! # Machine-readable output with strict out-of-range handling
//! gasex analyze data/ --format json --policy reject
//!
//! # Show the effective configuration
//! gasex config
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gasex::logging::LoggingConfig;
use gasex::report::{self, Summary};
use gasex::sinks::ConsoleSink;
use gasex::{GasExchangeAnalyzer, OutOfRangePolicy, Runner, ThresholdConfig};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "gasex",
    version,
    about = "Gas Exchange Threshold detection",
    long_about = "Detects the Gas Exchange Threshold (GET) from VO2/VCO2 exercise-test data using competing quadratic and linear fits."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyse a CSV/JSON file or every such file in a directory
    Analyze {
        /// Input file or directory
        path: PathBuf,

        /// Report format written to stdout
        #[arg(long, value_enum, default_value = "table")]
        format: ReportFormat,

        /// Print each result as it is delivered (table format only)
        #[arg(long)]
        display: bool,

        /// Directory for chart files (charts are skipped when omitted)
        #[arg(long)]
        plot_dir: Option<PathBuf>,

        /// Chart image format
        #[arg(long, value_enum, default_value = "png")]
        plot_format: PlotFormat,

        /// Chart image size in pixels, as WIDTHxHEIGHT
        #[arg(long, value_parser = parse_plot_size, default_value = "1024x768")]
        plot_size: (u32, u32),

        /// Also write the JSON summary to this file
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Handling of breakpoints outside the observed VO2 range (overrides environment)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },

    /// Print the effective threshold configuration as JSON
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlotFormat {
    Png,
    Svg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Flag,
    Reject,
}

impl From<PolicyArg> for OutOfRangePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Flag => Self::Flag,
            PolicyArg::Reject => Self::Reject,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env().verbose(cli.verbose).init()?;

    let config = ThresholdConfig::load().context("invalid threshold configuration")?;

    match cli.command {
        Command::Analyze {
            path,
            format,
            display,
            plot_dir,
            plot_format,
            plot_size,
            summary,
            policy,
        } => {
            let config = policy.map_or(config, |p| config.with_out_of_range_policy(p.into()));
            let options = AnalyzeOptions {
                format,
                display,
                plot_dir,
                plot_format,
                plot_size,
                summary,
            };
            analyze(&path, config, options)
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

struct AnalyzeOptions {
    format: ReportFormat,
    display: bool,
    plot_dir: Option<PathBuf>,
    plot_format: PlotFormat,
    plot_size: (u32, u32),
    summary: Option<PathBuf>,
}

fn analyze(path: &Path, config: ThresholdConfig, options: AnalyzeOptions) -> Result<()> {
    if options.display && options.format == ReportFormat::Json {
        bail!("--display writes plain text to stdout and cannot be combined with --format json");
    }
    info!(path = %path.display(), policy = %config.out_of_range_policy, "Starting analysis");

    let mut runner = Runner::new(GasExchangeAnalyzer::new(config));
    if options.display {
        runner = runner.with_sink(ConsoleSink);
    }
    runner = with_chart_sink(
        runner,
        options.plot_dir,
        options.plot_format,
        options.plot_size,
    );

    let output = runner
        .run_path(path)
        .with_context(|| format!("cannot read input {}", path.display()))?;
    if output.report.outcomes.is_empty() {
        bail!("no .csv or .json files found in {}", path.display());
    }

    let summary = Summary::new(&output.report, config);
    match options.format {
        ReportFormat::Table => print!("{}", report::render_table(&output.report)),
        ReportFormat::Json => println!("{}", summary.to_json()?),
    }

    if let Some(summary_path) = options.summary {
        summary
            .write_to(&summary_path)
            .with_context(|| format!("cannot write summary {}", summary_path.display()))?;
        info!(path = %summary_path.display(), "Summary written");
    }

    Ok(())
}

#[cfg(feature = "charts")]
fn with_chart_sink(
    runner: Runner,
    plot_dir: Option<PathBuf>,
    format: PlotFormat,
    (width, height): (u32, u32),
) -> Runner {
    use gasex::sinks::{ChartFormat, ChartSink};

    let format = match format {
        PlotFormat::Png => ChartFormat::Png,
        PlotFormat::Svg => ChartFormat::Svg,
    };
    match plot_dir {
        Some(dir) => {
            let sink = ChartSink::new(dir, format).with_size(width, height);
            let (width, height) = sink.size();
            info!(width, height, "Chart output enabled");
            runner.with_sink(sink)
        }
        None => runner,
    }
}

#[cfg(not(feature = "charts"))]
fn with_chart_sink(
    runner: Runner,
    plot_dir: Option<PathBuf>,
    _format: PlotFormat,
    _size: (u32, u32),
) -> Runner {
    if plot_dir.is_some() {
        tracing::warn!("Built without the charts feature; --plot-dir is ignored");
    }
    runner
}

fn parse_plot_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let dimension = |raw: &str| match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(format!("'{raw}' is not a positive pixel count")),
        Ok(n) => Ok(n),
    };
    Ok((dimension(width)?, dimension(height)?))
}
