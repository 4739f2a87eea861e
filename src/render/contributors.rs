use super::{
    draw_line_panel, finish, label_step, prepare_output, render_error, ChartOptions, OutputFormat, Series,
    TAB_BLUE, TAB_GREEN, TAB_ORANGE,
};
use crate::error::Result;
use crate::model::MonthlyTable;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Three stacked panels with a tick per month and at most
/// `opts.max_labels` month labels on each.
pub fn render_contributors(table: &MonthlyTable, path: &Path, opts: &ChartOptions) -> Result<()> {
    prepare_output(path, table.len())?;
    let drawn = match OutputFormat::from_path(path) {
        OutputFormat::Png => draw_contributors(
            BitMapBackend::new(path, opts.size).into_drawing_area(),
            table,
            opts,
        )
        .map_err(render_error),
        OutputFormat::Svg => draw_contributors(
            SVGBackend::new(path, opts.size).into_drawing_area(),
            table,
            opts,
        )
        .map_err(render_error),
    };
    finish(path, drawn)
}

fn draw_contributors<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    table: &MonthlyTable,
    opts: &ChartOptions,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 1));

    let labels = table.month_labels();
    let step = label_step(labels.len(), opts.max_labels);
    let records = table.records();

    let panel_specs = [
        (
            "Unique Contributors per Month",
            None,
            "Unique Contributors",
            records.iter().map(|r| r.unique_contributors as f64).collect::<Vec<_>>(),
            TAB_ORANGE,
        ),
        (
            "Total Commits per Month",
            None,
            "Total Commits",
            records.iter().map(|r| r.total_commits as f64).collect(),
            TAB_BLUE,
        ),
        (
            "Mean Commits per Contributor",
            Some("Month"),
            "Mean Commits per Contributor",
            records.iter().map(|r| r.avg_commits_per_contributor).collect(),
            TAB_GREEN,
        ),
    ];

    for (area, (title, x_desc, y_desc, values, color)) in panels.iter().zip(panel_specs) {
        draw_line_panel(
            area,
            title,
            x_desc,
            y_desc,
            &labels,
            step,
            &[Series {
                label: y_desc,
                values,
                color,
            }],
        )?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonthlyRecord;
    use chrono::{Months, NaiveDate};

    #[test]
    fn long_histories_render() {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let records = (0..60u32)
            .map(|i| MonthlyRecord {
                month: start + Months::new(i),
                total_commits: u64::from(i * 3 + 1),
                unique_contributors: u64::from(i % 7 + 1),
                avg_commits_per_contributor: f64::from(i * 3 + 1) / f64::from(i % 7 + 1),
            })
            .collect();
        let table = MonthlyTable::new(records);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributors.svg");
        let opts = ChartOptions {
            size: (600, 600),
            max_labels: 6,
            title: None,
        };
        render_contributors(&table, &path, &opts).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.contains("2019-01"));
        assert!(body.contains("2019-11"));
        // Step of 10 months: 2019-02 is a tick without a label.
        assert!(!body.contains("2019-02"));
    }
}
