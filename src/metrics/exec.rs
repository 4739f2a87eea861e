use super::{
    count_states, days_since, last_commit, monthly_from_commits, newcomer_retention,
    output_aggregate_json, output_aggregate_summary, output_states_json, output_states_table,
    write_monthly_csv,
};
use crate::cli::CommonArgs;
use crate::error::PlotError;
use crate::ingest::{read_commits, read_states};
use crate::model::{AggregateOutput, CommitEvent, StateCounts, StatesOutput, SCHEMA_VERSION};
use crate::util::resolve_range;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub commits: PathBuf,
    pub output: PathBuf,
    pub json: bool,
}

pub fn exec_aggregate(common: &CommonArgs, opts: AggregateOptions) -> anyhow::Result<()> {
    let range = resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;

    let column = read_commits(&opts.commits)
        .with_context(|| format!("Failed to read commits from {}", opts.commits.display()))?;
    if column.dropped > 0 {
        warn!(
            "Dropped {} commit(s) without an author or a parseable date from {}",
            column.dropped,
            opts.commits.display()
        );
    }

    let commits: Vec<CommitEvent> = column
        .commits
        .into_iter()
        .filter(|c| range.contains(&c.timestamp))
        .collect();
    let table = monthly_from_commits(&commits);
    info!("Aggregated {} commits into {} months", commits.len(), table.len());

    let last = last_commit(&commits);
    let output = AggregateOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: opts.commits.to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        commits: commits.len(),
        dropped: column.dropped,
        last_commit: last,
        days_since_last_commit: last.map(|t| days_since(t, Utc::now())),
        retention: newcomer_retention(&commits),
        records: table.records().to_vec(),
    };

    if opts.json {
        return output_aggregate_json(&output);
    }

    if table.is_empty() {
        return Err(PlotError::EmptyData(format!(
            "no attributed commits in {}",
            opts.commits.display()
        )))
        .context("Nothing to aggregate");
    }
    write_monthly_csv(&table, &opts.output)
        .with_context(|| format!("Failed to write {}", opts.output.display()))?;

    output_aggregate_summary(&output);
    println!("Metrics saved to {}", style(opts.output.display()).green());
    Ok(())
}

#[derive(Debug, Clone)]
pub struct StatesOptions {
    pub prs: Option<PathBuf>,
    pub issues: Option<PathBuf>,
    pub json: bool,
}

pub fn exec_states(opts: StatesOptions) -> anyhow::Result<()> {
    if opts.prs.is_none() && opts.issues.is_none() {
        anyhow::bail!("Nothing to summarize: pass --prs and/or --issues");
    }

    let output = StatesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        pull_requests: opts.prs.as_deref().map(load_counts).transpose()?,
        issues: opts.issues.as_deref().map(load_counts).transpose()?,
    };

    if opts.json {
        output_states_json(&output)
    } else {
        output_states_table(&output);
        Ok(())
    }
}

fn load_counts(path: &Path) -> anyhow::Result<StateCounts> {
    let states = read_states(path)
        .with_context(|| format!("Failed to read states from {}", path.display()))?;
    Ok(count_states(&states))
}
