use super::{output_json, output_ndjson};
use crate::cli::CommonArgs;
use crate::ingest::read_monthly;
use crate::model::MonthlyTable;
use crate::render::{render_contributors, render_trends, ChartOptions};
use crate::util::{month_key, resolve_range};
use anyhow::Context;
use console::style;
use std::path::PathBuf;
use tracing::{info, warn};

/// Averages in exports are usually rounded to two decimals.
const RATIO_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Dual-axis commits/contributors panel over an average panel.
    Trends,
    /// Contributors, commits and mean commits in three panels.
    Contributors,
}

#[derive(Debug, Clone)]
pub struct MonthlyPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

pub fn exec(
    common: &CommonArgs,
    layout: Layout,
    paths: MonthlyPaths,
    size: (u32, u32),
    max_labels: usize,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let range = resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;

    let table = read_monthly(&paths.input)
        .with_context(|| format!("Failed to read monthly metrics from {}", paths.input.display()))?
        .filter(&range);
    info!("Loaded {} months from {}", table.len(), paths.input.display());

    check_ratios(&table);

    if json {
        output_json(&table, &paths.input, common)?;
    } else if ndjson {
        output_ndjson(&table)?;
    } else {
        let opts = ChartOptions {
            size,
            max_labels,
            title: None,
        };
        match layout {
            Layout::Trends => render_trends(&table, &paths.output, &opts),
            Layout::Contributors => render_contributors(&table, &paths.output, &opts),
        }
        .with_context(|| format!("Failed to render {}", paths.output.display()))?;

        println!("Plot saved to {}", style(paths.output.display()).green());
    }

    Ok(())
}

fn check_ratios(table: &MonthlyTable) {
    for record in table.ratio_mismatches(RATIO_TOLERANCE) {
        warn!(
            "{}: average {} does not match {} commits / {} contributors",
            month_key(&record.month),
            record.avg_commits_per_contributor,
            record.total_commits,
            record.unique_contributors
        );
    }
}
