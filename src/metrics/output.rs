use crate::error::Result;
use crate::model::{AggregateOutput, MonthlyTable, StateCounts, StatesOutput};
use crate::util::month_key;
use console::style;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct MonthlyCsvRow {
    month: String,
    total_commits: u64,
    unique_contributors: u64,
    avg_commits_per_contributor: String,
}

/// Writes the table in the layout `trends` reads back.
pub fn write_monthly_csv(table: &MonthlyTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in table.records() {
        writer.serialize(MonthlyCsvRow {
            month: month_key(&record.month),
            total_commits: record.total_commits,
            unique_contributors: record.unique_contributors,
            avg_commits_per_contributor: format!("{:.2}", record.avg_commits_per_contributor),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn output_aggregate_json(output: &AggregateOutput) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

pub fn output_aggregate_summary(output: &AggregateOutput) {
    println!(
        "{:<8} {:>8} {:>13} {:>9}",
        style("Month").bold(),
        style("Commits").bold(),
        style("Contributors").bold(),
        style("Average").bold()
    );
    println!("{}", "─".repeat(41));
    for record in &output.records {
        println!(
            "{:<8} {:>8} {:>13} {:>9.2}",
            month_key(&record.month),
            style(record.total_commits).blue(),
            style(record.unique_contributors).yellow(),
            record.avg_commits_per_contributor
        );
    }
    println!();

    match (output.last_commit, output.days_since_last_commit) {
        (Some(last), Some(days)) => println!(
            "Time since last commit: {} days ({})",
            style(days).cyan(),
            last.format("%Y-%m-%d")
        ),
        _ => println!("Time since last commit: no commits"),
    }
    let retention = &output.retention;
    println!(
        "Newcomer retention: {}% ({} out of {})",
        style(format!("{:.2}", retention.percent)).green(),
        retention.returning,
        retention.contributors
    );
}

pub fn output_states_json(output: &StatesOutput) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

pub fn output_states_table(output: &StatesOutput) {
    println!(
        "{:<14} {:>6} {:>7} {:>7} {:>6}",
        style("").bold(),
        style("Open").bold(),
        style("Closed").bold(),
        style("Merged").bold(),
        style("Total").bold()
    );
    for (label, counts) in [("Pull requests", output.pull_requests), ("Issues", output.issues)] {
        if let Some(counts) = counts {
            print_counts(label, &counts);
        }
    }
}

fn print_counts(label: &str, counts: &StateCounts) {
    println!(
        "{:<14} {:>6} {:>7} {:>7} {:>6}",
        label,
        style(counts.open).green(),
        style(counts.closed).red(),
        style(counts.merged).magenta(),
        counts.total()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonthlyRecord;
    use crate::util::parse_month;

    #[test]
    fn monthly_csv_round_trips_through_the_trends_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/monthly.csv");
        let table = MonthlyTable::new(vec![MonthlyRecord {
            month: parse_month("2024-01").unwrap(),
            total_commits: 4,
            unique_contributors: 3,
            avg_commits_per_contributor: 1.33,
        }]);

        write_monthly_csv(&table, &path).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            body,
            "month,total_commits,unique_contributors,avg_commits_per_contributor\n2024-01,4,3,1.33\n"
        );
        assert_eq!(crate::ingest::read_monthly(&path).unwrap(), table);
    }
}
