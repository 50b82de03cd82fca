//! Chart generation for throughput results.
//!
//! Produces one image with two stacked bar charts: measured bases per
//! microsecond on top, derived sequences per microsecond below. The chart is
//! built as a plain [`Panel`] model first and then drawn with `plotters`; the
//! backend follows the output extension (`.svg` → SVG, anything else → PNG).

use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters::prelude::*;
use std::path::Path;

use crate::data::BenchmarkResult;
use crate::errors::{Error, Result};
use crate::fsutil;
use crate::metrics::{AlgorithmThroughput, ThroughputSeries};

// ---------------------------------------------------------------------------
// Palette and layout
// ---------------------------------------------------------------------------

const COLOR_BASES: RGBColor = RGBColor(52, 152, 219); //  blue
const COLOR_SEQUENCES: RGBColor = RGBColor(46, 204, 113); //  emerald

/// Canvas size in pixels (both panels).
pub const CHART_SIZE: (u32, u32) = (1000, 1200);

/// Rotate category labels past this many bars.
const MAX_FLAT_LABELS: usize = 4;
/// Rotate category labels when any is longer than this.
const MAX_FLAT_LABEL_CHARS: usize = 10;

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// One bar of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category label (algorithm name).
    pub label: String,
    /// Bar height.
    pub value: f64,
}

/// One bar chart of the stacked image.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Panel caption.
    pub title: &'static str,
    /// X-axis description.
    pub x_desc: &'static str,
    /// Y-axis description.
    pub y_desc: &'static str,
    /// Fill color of the bars.
    pub color: RGBColor,
    /// Bars in display order.
    pub bars: Vec<Bar>,
}

impl Panel {
    /// Upper bound of the y axis, with headroom above the tallest bar.
    #[must_use]
    pub fn y_max(&self) -> f64 {
        let max = self.bars.iter().map(|b| b.value).fold(0.0f64, f64::max);
        if max > 0.0 { max * 1.15 } else { 1.0 }
    }
}

fn bars(series: &ThroughputSeries, value: impl Fn(&AlgorithmThroughput) -> f64) -> Vec<Bar> {
    series
        .iter()
        .map(|e| Bar {
            label: e.name.clone(),
            value: value(e),
        })
        .collect()
}

/// Build the two panels for `series`: bases/µs on top, sequences/µs below.
#[must_use]
pub fn panels(series: &ThroughputSeries) -> [Panel; 2] {
    [
        Panel {
            title: "DNA Processing Algorithm Performance (Bases)",
            x_desc: "Algorithm",
            y_desc: "Processing Speed (bases/µs)",
            color: COLOR_BASES,
            bars: bars(series, |e| e.per_base),
        },
        Panel {
            title: "DNA Processing Algorithm Performance (Sequences)",
            x_desc: "Algorithm",
            y_desc: "Processing Speed (sequences/µs)",
            color: COLOR_SEQUENCES,
            bars: bars(series, |e| e.per_sequence),
        },
    ]
}

/// Whether category labels should be drawn rotated.
#[must_use]
pub fn rotate_labels(labels: &[&str]) -> bool {
    labels.len() > MAX_FLAT_LABELS
        || labels
            .iter()
            .any(|l| l.chars().count() > MAX_FLAT_LABEL_CHARS)
}

// ---------------------------------------------------------------------------
// Y-axis label formatter (K / M suffixes)
// ---------------------------------------------------------------------------

fn y_fmt(y: &f64) -> String {
    let v = *y;
    if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else if v >= 10.0 {
        format!("{:.0}", v)
    } else if v >= 1.0 {
        format!("{:.1}", v)
    } else {
        format!("{:.2}", v)
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    rotate: bool,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = panel.bars.len();

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(if rotate { 130 } else { 50 })
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..n as f64, 0f64..panel.y_max())?;

    let label_font = if rotate {
        ("sans-serif", 14).into_font().transform(FontTransform::Rotate90)
    } else {
        ("sans-serif", 14).into_font()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n * 2 + 1)
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .x_label_style(label_font)
        .y_label_formatter(&y_fmt)
        .x_label_formatter(&|x| {
            // Only label bar centers (0.5, 1.5, …).
            let centered = x - 0.5;
            if (centered - centered.round()).abs() > 0.1 || centered < 0.0 {
                return String::new();
            }
            let idx = centered.round() as usize;
            panel
                .bars
                .get(idx)
                .map(|b| b.label.clone())
                .unwrap_or_default()
        })
        .draw()?;

    for (i, bar) in panel.bars.iter().enumerate() {
        let x0 = i as f64 + 0.1;
        let x1 = i as f64 + 0.9;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x0, 0.0), (x1, bar.value)],
            panel.color.mix(0.85).filled(),
        )))?;
    }
    Ok(())
}

fn draw_panels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    panels: &[Panel; 2],
    rotate: bool,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));
    for (area, panel) in areas.iter().zip(panels) {
        draw_panel(area, panel, rotate)?;
    }
    root.present()?;
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Draw the two-panel chart for `series` and atomically replace `output` with it.
///
/// # Errors
///
/// [`Error::Render`] if drawing fails, [`Error::Write`] if the file cannot be
/// put in place.
pub fn render_chart(series: &ThroughputSeries, output: &Path) -> Result<()> {
    let panels = panels(series);
    let rotate = rotate_labels(&series.names());
    let render_err = |reason: String| Error::Render {
        path: output.to_path_buf(),
        reason,
    };

    fsutil::atomic_write_with_path(output, |tmp| {
        if is_svg(output) {
            let root = SVGBackend::new(tmp, CHART_SIZE).into_drawing_area();
            draw_panels(&root, &panels, rotate).map_err(|e| render_err(e.to_string()))
        } else {
            let root = BitMapBackend::new(tmp, CHART_SIZE).into_drawing_area();
            draw_panels(&root, &panels, rotate).map_err(|e| render_err(e.to_string()))
        }
    })?;

    tracing::info!(
        path = %output.display(),
        bars = series.len(),
        fastest = series.fastest().map_or("", |e| e.name.as_str()),
        "saved chart"
    );
    Ok(())
}

/// Chart entry point: load `results`, derive per-sequence throughput and
/// render the chart to `output`.
///
/// Nothing is written when loading fails.
///
/// # Errors
///
/// Any error of [`BenchmarkResult::load`], [`ThroughputSeries::from_result`]
/// or [`render_chart`].
pub fn generate_chart(results: &Path, output: &Path) -> Result<ThroughputSeries> {
    let result = BenchmarkResult::load(results)?;
    let series = ThroughputSeries::from_result(&result)?;
    render_chart(&series, output)?;
    Ok(series)
}
