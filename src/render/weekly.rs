use super::{
    draw_line_panel, finish, label_step, prepare_output, render_error, ChartOptions, OutputFormat, Series,
    TAB_BLUE, TAB_GREEN, TAB_RED,
};
use crate::error::Result;
use crate::model::{EventKind, WeeklyTable};
use crate::util::week_key;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const DEFAULT_TITLE: &str = "GitHub Activity (weekly)";

pub fn render_weekly(table: &WeeklyTable, path: &Path, opts: &ChartOptions) -> Result<()> {
    prepare_output(path, table.len())?;
    let drawn = match OutputFormat::from_path(path) {
        OutputFormat::Png => {
            draw_weekly(BitMapBackend::new(path, opts.size).into_drawing_area(), table, opts)
                .map_err(render_error)
        }
        OutputFormat::Svg => {
            draw_weekly(SVGBackend::new(path, opts.size).into_drawing_area(), table, opts)
                .map_err(render_error)
        }
    };
    finish(path, drawn)
}

fn draw_weekly<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    table: &WeeklyTable,
    opts: &ChartOptions,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let labels: Vec<String> = table.buckets().iter().map(|b| week_key(&b.week_ending)).collect();
    let step = label_step(labels.len(), opts.max_labels);
    let series: Vec<Series> = [
        (EventKind::Commits, TAB_BLUE),
        (EventKind::PullRequests, TAB_GREEN),
        (EventKind::Issues, TAB_RED),
    ]
    .into_iter()
    .map(|(kind, color)| Series {
        label: kind.label(),
        values: table.series(kind).into_iter().map(|c| c as f64).collect(),
        color,
    })
    .collect();

    draw_line_panel(
        &root,
        opts.title.as_deref().unwrap_or(DEFAULT_TITLE),
        Some("Time"),
        "Number of Events",
        &labels,
        step,
        &series,
    )?;

    root.present()?;
    Ok(())
}
