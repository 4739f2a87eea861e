//! CSV readers. Monthly metric exports, per-commit author exports and
//! PR/issue state exports carry a header row; event timestamp dumps are a
//! single headerless column.

use crate::error::{PlotError, Result};
use crate::model::{CommitEvent, ItemState, MonthlyRecord, MonthlyTable};
use crate::util::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Timestamps that survived parsing, plus how many rows were thrown away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimestampColumn {
    pub timestamps: Vec<DateTime<Utc>>,
    pub dropped: usize,
}

pub fn read_monthly(path: &Path) -> Result<MonthlyTable> {
    let file = open(path)?;
    let table = read_monthly_from_reader(file)?;
    debug!("Read {} monthly rows from {}", table.len(), path.display());
    Ok(table)
}

pub fn read_monthly_from_reader<R: Read>(reader: R) -> Result<MonthlyTable> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = rdr
        .deserialize::<MonthlyRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(MonthlyTable::new(records))
}

pub fn read_timestamps(path: &Path) -> Result<TimestampColumn> {
    let file = open(path)?;
    let column = read_timestamps_from_reader(file)?;
    debug!(
        "Read {} timestamps from {} ({} dropped)",
        column.timestamps.len(),
        path.display(),
        column.dropped
    );
    Ok(column)
}

pub fn read_timestamps_from_reader<R: Read>(reader: R) -> Result<TimestampColumn> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut column = TimestampColumn::default();
    for record in rdr.records() {
        let record = record?;
        match record.get(0).and_then(parse_timestamp) {
            Some(ts) => column.timestamps.push(ts),
            None => column.dropped += 1,
        }
    }
    Ok(column)
}

const AUTHOR_COLUMNS: [&str; 3] = ["author", "login", "author_login"];
const DATE_COLUMNS: [&str; 3] = ["date", "timestamp", "committed_at"];

#[derive(Debug, Deserialize)]
struct CommitRow {
    #[serde(default, alias = "login", alias = "author_login")]
    author: Option<String>,
    #[serde(default, alias = "timestamp", alias = "committed_at")]
    date: Option<String>,
}

/// Attributed commits, plus rows lacking an author or a parseable date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitColumn {
    pub commits: Vec<CommitEvent>,
    pub dropped: usize,
}

pub fn read_commits(path: &Path) -> Result<CommitColumn> {
    let file = open(path)?;
    let column = read_commits_from_reader(file)?;
    debug!(
        "Read {} commits from {} ({} dropped)",
        column.commits.len(),
        path.display(),
        column.dropped
    );
    Ok(column)
}

pub fn read_commits_from_reader<R: Read>(reader: R) -> Result<CommitColumn> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let has = |names: &[&str]| headers.iter().any(|h| names.contains(&h));
    if !has(&AUTHOR_COLUMNS[..]) || !has(&DATE_COLUMNS[..]) {
        return Err(PlotError::Parse(format!(
            "commit export needs an author ({}) and a date ({}) column",
            AUTHOR_COLUMNS.join("/"),
            DATE_COLUMNS.join("/")
        )));
    }

    let mut column = CommitColumn::default();
    for row in rdr.deserialize::<CommitRow>() {
        let row = row?;
        let author = row.author.filter(|a| !a.is_empty());
        let timestamp = row.date.as_deref().and_then(parse_timestamp);
        match (author, timestamp) {
            (Some(author), Some(timestamp)) => column.commits.push(CommitEvent { author, timestamp }),
            _ => column.dropped += 1,
        }
    }
    Ok(column)
}

#[derive(Debug, Deserialize)]
struct StateRow {
    state: String,
    #[serde(default)]
    merged_at: Option<String>,
}

/// Reads a `state[,merged_at]` export. A non-empty `merged_at` marks the row
/// merged whatever its state says.
pub fn read_states(path: &Path) -> Result<Vec<ItemState>> {
    let file = open(path)?;
    let states = read_states_from_reader(file)?;
    debug!("Read {} states from {}", states.len(), path.display());
    Ok(states)
}

pub fn read_states_from_reader<R: Read>(reader: R) -> Result<Vec<ItemState>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut states = Vec::new();
    for (idx, row) in rdr.deserialize::<StateRow>().enumerate() {
        let row = row?;
        if row.merged_at.as_deref().is_some_and(|m| !m.is_empty()) {
            states.push(ItemState::Merged);
            continue;
        }
        let state = match row.state.to_lowercase().as_str() {
            "open" => ItemState::Open,
            "closed" => ItemState::Closed,
            "merged" => ItemState::Merged,
            other => {
                return Err(PlotError::Parse(format!(
                    "row {}: unknown state '{other}'",
                    idx + 1
                )))
            }
        };
        states.push(state);
    }
    Ok(states)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        PlotError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })
}
