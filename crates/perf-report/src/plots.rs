//! Diagnostic PNG plots.
//!
//! All charts are drawn with the [`plotters`] bitmap backend and saved as
//! PNG files: a density histogram of the raw scores, one histogram panel per
//! transformation strategy, and the fitted normal curve with the tier
//! thresholds marked.

use std::path::Path;

use perf_common::{finite_values, mean, population_std_dev};
use perf_model::{PerformanceTier, TierThresholds};
use perf_transform::Evaluation;
use plotters::coord::Shift;
use plotters::prelude::*;
use statrs::distribution::{Continuous, Normal};
use thiserror::Error;

pub const PERFORMANCE_HISTOGRAM_FILE: &str = "performance_histogram.png";
pub const TRANSFORMATION_HISTOGRAMS_FILE: &str = "transformation_histograms.png";
pub const NORMAL_PLOT_FILE: &str = "normal_distribution.png";

const SINGLE_SIZE: (u32, u32) = (1000, 600);
const GRID_SIZE: (u32, u32) = (1500, 1000);
const GRID_LAYOUT: (usize, usize) = (2, 3);
const NORMAL_CURVE_POINTS: usize = 200;
const NORMAL_SPAN_STD: f64 = 2.5;
const DASH_SEGMENTS: usize = 24;

const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// `count / (n * width)`, so the bars integrate to 1.
    pub density: f64,
}

/// Density histogram of the finite elements of `values` with `bins`
/// equal-width bins spanning their range.
///
/// The last bin includes its upper edge. A zero-range sample is spread over
/// `[v - 0.5, v + 0.5]`. Returns no bins for an empty sample or `bins == 0`.
pub fn density_histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite = finite_values(values);
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }
    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let total = finite.len() as f64;
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            start: lo + idx as f64 * width,
            end: lo + (idx + 1) as f64 * width,
            count,
            density: count as f64 / (total * width),
        })
        .collect()
}

/// Histogram of the raw composite scores.
pub fn plot_performance_histogram(output_path: &Path, scores: &[f64], bins: usize) -> Result<()> {
    let histogram = density_histogram(scores, bins);
    if histogram.is_empty() {
        return Err(PlotError::InvalidData(
            "Scores cannot be empty".to_string(),
        ));
    }

    let root = BitMapBackend::new(output_path, SINGLE_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
    draw_histogram(&root, "Distribution of Performance Scores", &histogram, 40)?;
    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// One panel per evaluated strategy, in catalog order.
///
/// Panels show the finite part of each transformed sample. A strategy that
/// could not be applied, or whose test failed, gets an empty panel with its
/// name.
pub fn plot_transformation_histograms(
    output_path: &Path,
    evaluation: &Evaluation,
    bins: usize,
) -> Result<()> {
    let root = BitMapBackend::new(output_path, GRID_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
    let panels = root.split_evenly(GRID_LAYOUT);

    for (panel, entry) in panels.iter().zip(evaluation.entries()) {
        let histogram = match (&entry.outcome, &entry.transformed) {
            (Ok(_), Some(transformed)) => density_histogram(transformed, bins),
            _ => Vec::new(),
        };
        let title = format!("{} Transformation", entry.strategy);
        if histogram.is_empty() {
            draw_empty_panel(panel, &title)?;
        } else {
            draw_histogram(panel, &title, &histogram, 24)?;
        }
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

/// Normal curve fitted to `scores` with a dashed line per tier threshold.
///
/// The curve uses the mean and population standard deviation of the finite
/// scores and spans 2.5 standard deviations either side. Thresholds outside
/// that span are not drawn.
pub fn plot_normal_distribution(
    output_path: &Path,
    scores: &[f64],
    thresholds: &TierThresholds,
) -> Result<()> {
    let (Some(center), Some(std_dev)) = (mean(scores), population_std_dev(scores)) else {
        return Err(PlotError::InvalidData(
            "Scores cannot be empty".to_string(),
        ));
    };
    if std_dev <= 0.0 {
        return Err(PlotError::InvalidData(
            "Scores have no spread".to_string(),
        ));
    }
    let normal = Normal::new(center, std_dev)
        .map_err(|e| PlotError::InvalidData(format!("no normal fit for scores: {e}")))?;

    let x_min = center - NORMAL_SPAN_STD * std_dev;
    let x_max = center + NORMAL_SPAN_STD * std_dev;
    let step = (x_max - x_min) / (NORMAL_CURVE_POINTS - 1) as f64;
    let curve: Vec<(f64, f64)> = (0..NORMAL_CURVE_POINTS)
        .map(|i| {
            let x = x_min + i as f64 * step;
            (x, normal.pdf(x))
        })
        .collect();
    let y_max = normal.pdf(center) * 1.1;

    let root = BitMapBackend::new(output_path, SINGLE_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Normal Distribution of Performance Scores",
            ("sans-serif", 40),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Total Rating")
        .y_desc("Density")
        .label_style(("sans-serif", 20))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(curve, BLUE.stroke_width(2)))
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label("Normal fit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    for (tier, threshold) in thresholds.iter() {
        if !(x_min..=x_max).contains(&threshold) {
            continue;
        }
        let color = tier_color(tier);
        chart
            .draw_series(dashed_vertical(threshold, y_max, color))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(format!("{tier} ({threshold:.2})"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 18))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

fn tier_color(tier: PerformanceTier) -> RGBColor {
    match tier {
        PerformanceTier::Poor => RED,
        PerformanceTier::Average => ORANGE,
        PerformanceTier::Good => YELLOW,
        PerformanceTier::Best => GREEN,
    }
}

/// Alternating segments of a vertical line at `x` from 0 to `y_max`.
fn dashed_vertical(x: f64, y_max: f64, color: RGBColor) -> Vec<PathElement<(f64, f64)>> {
    let segment = y_max / DASH_SEGMENTS as f64;
    (0..DASH_SEGMENTS)
        .step_by(2)
        .map(|i| {
            let y0 = i as f64 * segment;
            PathElement::new(vec![(x, y0), (x, y0 + segment)], color.stroke_width(2))
        })
        .collect()
}

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    histogram: &[HistogramBin],
    caption_size: u32,
) -> Result<()> {
    let x_min = histogram.first().map_or(0.0, |bin| bin.start);
    let x_max = histogram.last().map_or(1.0, |bin| bin.end);
    let y_max = histogram
        .iter()
        .map(|bin| bin.density)
        .fold(0.0, f64::max)
        .max(f64::MIN_POSITIVE)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", caption_size))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Value")
        .y_desc("Density")
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(histogram.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.density)],
                BLUE.mix(0.6).filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

fn draw_empty_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, title: &str) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;
    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}
