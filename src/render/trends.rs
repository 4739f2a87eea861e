use super::{
    draw_line_panel, finish, index_range, label_step, padded_max, prepare_output, render_error,
    sparse_label, ChartOptions, OutputFormat, Series, FONT_FAMILY, TAB_BLUE, TAB_ORANGE, TAB_RED,
};
use crate::error::Result;
use crate::model::MonthlyTable;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Two stacked panels: commits vs. contributors on twin y-axes, then the
/// average commits per contributor.
pub fn render_trends(table: &MonthlyTable, path: &Path, opts: &ChartOptions) -> Result<()> {
    prepare_output(path, table.len())?;
    let drawn = match OutputFormat::from_path(path) {
        OutputFormat::Png => {
            draw_trends(BitMapBackend::new(path, opts.size).into_drawing_area(), table, opts)
                .map_err(render_error)
        }
        OutputFormat::Svg => {
            draw_trends(SVGBackend::new(path, opts.size).into_drawing_area(), table, opts)
                .map_err(render_error)
        }
    };
    finish(path, drawn)
}

fn draw_trends<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    table: &MonthlyTable,
    opts: &ChartOptions,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));

    let labels = table.month_labels();
    let step = label_step(labels.len(), opts.max_labels);
    let records = table.records();

    let commits: Vec<f64> = records.iter().map(|r| r.total_commits as f64).collect();
    let contributors: Vec<f64> = records.iter().map(|r| r.unique_contributors as f64).collect();
    let averages: Vec<f64> = records.iter().map(|r| r.avg_commits_per_contributor).collect();

    draw_dual_axis_panel(&panels[0], &labels, step, &commits, &contributors)?;
    draw_line_panel(
        &panels[1],
        "Average Commits per Contributor Over Time",
        Some("Month"),
        "Average Commits per Contributor",
        &labels,
        step,
        &[Series {
            label: "Average Commits per Contributor",
            values: averages,
            color: TAB_RED,
        }],
    )?;

    root.present()?;
    Ok(())
}

fn draw_dual_axis_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    labels: &[String],
    step: usize,
    commits: &[f64],
    contributors: &[f64],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let x_range = index_range(labels.len());
    let mut chart = ChartBuilder::on(area)
        .caption("Total Commits and Unique Contributors Over Time", (FONT_FAMILY, 22))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .right_y_label_area_size(64)
        .build_cartesian_2d(x_range.clone(), 0f64..padded_max(commits.iter().copied()))?
        .set_secondary_coord(x_range, 0f64..padded_max(contributors.iter().copied()));

    let fmt = |i: &i32| sparse_label(labels, *i, step);
    chart
        .configure_mesh()
        .x_labels(labels.len().max(2))
        .x_label_formatter(&fmt)
        .y_desc("Total Commits")
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc("Unique Contributors")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            commits.iter().enumerate().map(|(i, v)| (i as i32, *v)),
            TAB_BLUE.stroke_width(2),
        ))?
        .label("Total Commits")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TAB_BLUE.stroke_width(2)));

    chart
        .draw_secondary_series(LineSeries::new(
            contributors.iter().enumerate().map(|(i, v)| (i as i32, *v)),
            TAB_ORANGE.stroke_width(2),
        ))?
        .label("Unique Contributors")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TAB_ORANGE.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonthlyRecord;
    use crate::util::parse_month;

    fn table() -> MonthlyTable {
        MonthlyTable::new(vec![
            MonthlyRecord {
                month: parse_month("2024-02").unwrap(),
                total_commits: 12,
                unique_contributors: 4,
                avg_commits_per_contributor: 3.0,
            },
            MonthlyRecord {
                month: parse_month("2024-01").unwrap(),
                total_commits: 10,
                unique_contributors: 5,
                avg_commits_per_contributor: 2.0,
            },
        ])
    }

    #[test]
    fn writes_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ChartOptions {
            size: (400, 300),
            ..ChartOptions::default()
        };

        let png = dir.path().join("nested/trends.png");
        render_trends(&table(), &png, &opts).unwrap();
        assert!(std::fs::metadata(&png).unwrap().len() > 0);

        let svg = dir.path().join("trends.svg");
        render_trends(&table(), &svg, &opts).unwrap();
        let body = std::fs::read_to_string(&svg).unwrap();
        assert!(body.contains("<svg"));
        assert!(body.contains("Unique Contributors"));
    }
}
