use super::{build_weekly_table, load_event_sources, output_json, output_ndjson, output_table, SourcePaths};
use crate::cli::CommonArgs;
use crate::render::{render_weekly, ChartOptions};
use crate::util::resolve_range;
use anyhow::Context;
use console::{style, Term};
use std::path::PathBuf;
use tracing::info;

const MAX_WEEK_LABELS: usize = 16;

#[derive(Debug, Clone)]
pub struct WeeklyOptions {
    pub output: Option<PathBuf>,
    pub title: String,
    pub size: (u32, u32),
    pub json: bool,
    pub ndjson: bool,
}

pub fn exec(common: &CommonArgs, paths: SourcePaths, opts: WeeklyOptions) -> anyhow::Result<()> {
    let range = resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;

    let (sources, summary) = load_event_sources(&paths, Term::stderr().is_term())?;
    let table = build_weekly_table(&sources, &range);
    info!("Aggregated {} weekly buckets", table.len());

    if opts.json {
        output_json(&table, &summary, common)?;
    } else if opts.ndjson {
        output_ndjson(&table)?;
    } else if let Some(path) = &opts.output {
        let chart = ChartOptions {
            size: opts.size,
            max_labels: MAX_WEEK_LABELS,
            title: Some(opts.title.clone()),
        };
        render_weekly(&table, path, &chart)
            .with_context(|| format!("Failed to render {}", path.display()))?;
        println!("Plot saved to {}", style(path.display()).green());
    } else if Term::stdout().is_term() {
        crate::tui::run(&table, &opts.title).map_err(|e| anyhow::anyhow!(e))?;
    } else {
        output_table(&table)?;
    }

    Ok(())
}
