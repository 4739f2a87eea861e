use crate::cli::CommonArgs;
use crate::model::{WeeklySource, WeeklyOutput, WeeklyTable, SCHEMA_VERSION};
use crate::util::week_key;
use anyhow::Result;
use chrono::Utc;
use console::style;

pub fn output_json(table: &WeeklyTable, sources: &[WeeklySource], common: &CommonArgs) -> Result<()> {
    let output = WeeklyOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        week_ends_on: "sunday".to_string(),
        sources: sources.to_vec(),
        since: common.since.clone(),
        until: common.until.clone(),
        buckets: table.buckets().to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(table: &WeeklyTable) -> Result<()> {
    for bucket in table.buckets() {
        println!("{}", serde_json::to_string(bucket)?);
    }
    Ok(())
}

/// Plain table fallback used when no terminal is attached.
pub fn output_table(table: &WeeklyTable) -> Result<()> {
    if table.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!(
        "{:<12} {:>8} {:>6} {:>7}",
        style("Week ending").bold(),
        style("Commits").bold(),
        style("PRs").bold(),
        style("Issues").bold()
    );
    println!("{}", "─".repeat(36));
    for bucket in table.buckets() {
        println!(
            "{:<12} {:>8} {:>6} {:>7}",
            week_key(&bucket.week_ending),
            style(bucket.commits).blue(),
            style(bucket.prs).green(),
            style(bucket.issues).red()
        );
    }
    Ok(())
}
