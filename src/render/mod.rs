//! Static chart rendering with plotters. Each chart draws onto a generic
//! backend so the same code writes PNG (bitmap) and SVG files.
//!
//! Text goes through plotters' `ab_glyph` rasterizer using a DejaVu Sans face
//! compiled into the binary, so output does not depend on system fonts.

pub mod contributors;
pub mod trends;
pub mod weekly;

pub use contributors::render_contributors;
pub use trends::render_trends;
pub use weekly::render_weekly;

use crate::error::{PlotError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

/// Family name every caption, tick label and legend is drawn with.
pub const FONT_FAMILY: &str = "sans-serif";

static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

pub const TAB_BLUE: RGBColor = RGBColor(31, 119, 180);
pub const TAB_ORANGE: RGBColor = RGBColor(255, 127, 14);
pub const TAB_GREEN: RGBColor = RGBColor(44, 160, 44);
pub const TAB_RED: RGBColor = RGBColor(214, 39, 40);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// `.svg` selects SVG; every other extension is written as PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub size: (u32, u32),
    pub max_labels: usize,
    pub title: Option<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            size: (1500, 1200),
            max_labels: 12,
            title: None,
        }
    }
}

/// One line on a panel, indexed by row position.
pub(crate) struct Series<'a> {
    pub label: &'a str,
    pub values: Vec<f64>,
    pub color: RGBColor,
}

/// Registers the bundled face under [`FONT_FAMILY`]; later calls are no-ops.
pub fn register_fonts() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *REGISTERED.get_or_init(|| {
        plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok()
    });
    if registered {
        Ok(())
    } else {
        Err(PlotError::Render("bundled font could not be loaded".to_string()))
    }
}

pub(crate) fn prepare_output(path: &Path, rows: usize) -> Result<()> {
    register_fonts()?;
    if rows == 0 {
        return Err(PlotError::EmptyData(format!(
            "nothing to draw into {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub(crate) fn render_error<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Render(err.to_string())
}

/// A failed draw leaves no half-written image behind.
pub(crate) fn finish(path: &Path, result: Result<()>) -> Result<()> {
    if result.is_err() && path.exists() {
        std::fs::remove_file(path)?;
    }
    result
}

pub(crate) fn index_range(len: usize) -> Range<i32> {
    let last = len.saturating_sub(1).max(1);
    0..i32::try_from(last).unwrap_or(i32::MAX)
}

/// Distance between labelled ticks so that at most `max_labels` are shown.
pub(crate) fn label_step(len: usize, max_labels: usize) -> usize {
    if max_labels == 0 || len <= max_labels {
        1
    } else {
        len.div_ceil(max_labels)
    }
}

pub(crate) fn sparse_label(labels: &[String], index: i32, step: usize) -> String {
    let Ok(idx) = usize::try_from(index) else {
        return String::new();
    };
    if idx % step.max(1) != 0 {
        return String::new();
    }
    labels.get(idx).cloned().unwrap_or_default()
}

pub(crate) fn padded_max(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values.into_iter().fold(0f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// Draws a single-axis line panel with a legend in the upper left.
pub(crate) fn draw_line_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    x_desc: Option<&str>,
    y_desc: &str,
    labels: &[String],
    step: usize,
    series: &[Series],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let y_max = padded_max(series.iter().flat_map(|s| s.values.iter().copied()));
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT_FAMILY, 22))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(index_range(labels.len()), 0f64..y_max)?;

    let fmt = |i: &i32| sparse_label(labels, *i, step);
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(labels.len().max(2))
        .x_label_formatter(&fmt)
        .y_desc(y_desc);
    if let Some(desc) = x_desc {
        mesh.x_desc(desc);
    }
    mesh.draw()?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(
                s.values.iter().enumerate().map(|(i, v)| (i as i32, *v)),
                color.stroke_width(2),
            ))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
