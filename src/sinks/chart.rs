// ABOUTME: Chart sink rendering scatter, fitted-curve, and segment-regression plots with plotters
// ABOUTME: Writes three PNG or SVG files per sample into an output directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The gasex Developers

//! # Chart Sink
//!
//! For a source `ramp.csv` the sink writes:
//!
//! | File                     | Content                                   |
//! |--------------------------|-------------------------------------------|
//! | `ramp_scatter.<ext>`     | raw VCO2 against VO2                      |
//! | `ramp_lin_quad.<ext>`    | raw data with the linear and quadratic fit |
//! | `ramp_lwr_upr_reg.<ext>` | raw data with the lower and upper lines   |

use super::{OutputSink, SinkError};
use gasex_core::Sample;
use gasex_intelligence::{AnalysisResult, Partition, RegressionModel};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::panic;
use std::path::{Path, PathBuf};
use tracing::debug;

const CURVE_RESOLUTION: usize = 500;
const POINT_SIZE: i32 = 3;

const DATA_COLOR: RGBColor = RGBColor(50, 50, 50);
const LINEAR_COLOR: RGBColor = RGBColor(30, 144, 255);
const QUADRATIC_COLOR: RGBColor = RGBColor(220, 20, 60);
const LOWER_COLOR: RGBColor = RGBColor(34, 139, 34);
const UPPER_COLOR: RGBColor = RGBColor(255, 140, 0);

/// Image format of rendered charts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartFormat {
    /// Raster image
    #[default]
    Png,
    /// Vector image
    Svg,
}

impl ChartFormat {
    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Kinds of chart written per sample, with their file-name suffixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartKind {
    Scatter,
    LinearQuadratic,
    Segments,
}

impl ChartKind {
    const ALL: [Self; 3] = [Self::Scatter, Self::LinearQuadratic, Self::Segments];

    const fn suffix(self) -> &'static str {
        match self {
            Self::Scatter => "scatter",
            Self::LinearQuadratic => "lin_quad",
            Self::Segments => "lwr_upr_reg",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Scatter | Self::LinearQuadratic => "VCO2 v VO2",
            Self::Segments => "VCO2 v VO2 Split graph",
        }
    }
}

enum SeriesStyle {
    Points,
    Line,
}

struct ChartSeries {
    label: &'static str,
    points: Vec<(f64, f64)>,
    color: RGBColor,
    style: SeriesStyle,
}

/// Renders charts into a directory
#[derive(Debug, Clone)]
pub struct ChartSink {
    directory: PathBuf,
    format: ChartFormat,
    size: (u32, u32),
}

impl ChartSink {
    /// Sink writing `format` images into `directory`
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, format: ChartFormat) -> Self {
        Self {
            directory: directory.into(),
            format,
            size: (1024, 768),
        }
    }

    /// Override the image size in pixels
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Image size in pixels as `(width, height)`
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Files written for `source`, in scatter, linear/quadratic, segment order
    #[must_use]
    pub fn chart_paths(&self, source: &str) -> [PathBuf; 3] {
        let stem = Path::new(source)
            .file_stem()
            .map_or_else(|| source.to_owned(), |s| s.to_string_lossy().into_owned());
        ChartKind::ALL.map(|kind| {
            self.directory.join(format!(
                "{stem}_{}.{}",
                kind.suffix(),
                self.format.extension()
            ))
        })
    }

    fn render(
        &self,
        path: &Path,
        kind: ChartKind,
        series: &[ChartSeries],
    ) -> Result<(), SinkError> {
        let target = path.display().to_string();
        let draw = || match self.format {
            ChartFormat::Png => {
                let root = BitMapBackend::new(path, self.size).into_drawing_area();
                draw_chart(&root, kind.title(), series).map_err(|e| e.to_string())
            }
            ChartFormat::Svg => {
                let root = SVGBackend::new(path, self.size).into_drawing_area();
                draw_chart(&root, kind.title(), series).map_err(|e| e.to_string())
            }
        };

        panic::catch_unwind(panic::AssertUnwindSafe(draw))
            .map_err(|_| SinkError::Render {
                target: target.clone(),
                reason: "plotting backend panicked".into(),
            })?
            .map_err(|reason| SinkError::Render { target, reason })
    }
}

impl OutputSink for ChartSink {
    fn name(&self) -> &'static str {
        "chart"
    }

    fn deliver(
        &self,
        source: &str,
        sample: &Sample,
        result: &AnalysisResult,
    ) -> Result<(), SinkError> {
        fs::create_dir_all(&self.directory)
            .map_err(|e| SinkError::io(self.directory.display().to_string(), e))?;

        let paths = self.chart_paths(source);
        for (kind, path) in ChartKind::ALL.into_iter().zip(&paths) {
            let series = chart_series(kind, sample, result);
            self.render(path, kind, &series)?;
            debug!(source = %source, path = %path.display(), "Chart written");
        }
        Ok(())
    }
}

fn chart_series(kind: ChartKind, sample: &Sample, result: &AnalysisResult) -> Vec<ChartSeries> {
    let data = ChartSeries {
        label: "data",
        points: sample
            .vo2()
            .iter()
            .copied()
            .zip(sample.vco2().iter().copied())
            .collect(),
        color: DATA_COLOR,
        style: SeriesStyle::Points,
    };
    let (lo, hi) = sample.vo2_range().unwrap_or((0.0, 1.0));

    match kind {
        ChartKind::Scatter => vec![data],
        ChartKind::LinearQuadratic => vec![
            data,
            curve("linear", &result.fits.linear, lo, hi, LINEAR_COLOR),
            curve("quadratic", &result.fits.quadratic, lo, hi, QUADRATIC_COLOR),
        ],
        ChartKind::Segments => vec![
            data,
            segment_line(
                "lower",
                &result.segments.lower,
                &result.segments.lower_model,
                LOWER_COLOR,
            ),
            segment_line(
                "upper",
                &result.segments.upper,
                &result.segments.upper_model,
                UPPER_COLOR,
            ),
        ],
    }
}

fn curve(
    label: &'static str,
    model: &RegressionModel,
    lo: f64,
    hi: f64,
    color: RGBColor,
) -> ChartSeries {
    let step = (hi - lo) / (CURVE_RESOLUTION - 1) as f64;
    ChartSeries {
        label,
        points: (0..CURVE_RESOLUTION)
            .map(|i| {
                let x = step.mul_add(i as f64, lo);
                (x, model.evaluate(x))
            })
            .collect(),
        color,
        style: SeriesStyle::Line,
    }
}

/// Fitted line evaluated at the partition's own VO2 values, in VO2 order
fn segment_line(
    label: &'static str,
    partition: &Partition,
    model: &RegressionModel,
    color: RGBColor,
) -> ChartSeries {
    let mut points: Vec<(f64, f64)> = partition
        .vo2()
        .iter()
        .map(|&x| (x, model.evaluate(x)))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    ChartSeries {
        label,
        points,
        color,
        style: SeriesStyle::Line,
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    series: &[ChartSeries],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;

    let x_range = padded_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
    let y_range = padded_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("VO2")
        .y_desc("VCO2")
        .draw()?;

    for s in series {
        let color = s.color;
        match s.style {
            SeriesStyle::Points => {
                chart
                    .draw_series(
                        s.points
                            .iter()
                            .map(|&p| Circle::new(p, POINT_SIZE, color.filled())),
                    )?
                    .label(s.label)
                    .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, color.filled()));
            }
            SeriesStyle::Line => {
                chart
                    .draw_series(LineSeries::new(s.points.iter().copied(), &color))?
                    .label(s.label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &color));
            }
        }
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.7))
            .border_style(&BLACK.mix(0.3))
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
