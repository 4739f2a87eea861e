use crate::util::{month_key, parse_month};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One row of a precomputed monthly activity export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    #[serde(deserialize_with = "deserialize_month")]
    pub month: NaiveDate,
    pub total_commits: u64,
    pub unique_contributors: u64,
    #[serde(alias = "mean_commits_per_contributor")]
    pub avg_commits_per_contributor: f64,
}

fn deserialize_month<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_month(&raw).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTable {
    records: Vec<MonthlyRecord>,
}

impl MonthlyTable {
    /// Builds a table ordered by month, oldest first.
    pub fn new(mut records: Vec<MonthlyRecord>) -> Self {
        records.sort_by(|a, b| a.month.cmp(&b.month));
        Self { records }
    }

    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter(self, range: &DateRange) -> Self {
        let records = self
            .records
            .into_iter()
            .filter(|r| range.contains_date(&r.month))
            .collect();
        Self { records }
    }

    pub fn month_labels(&self) -> Vec<String> {
        self.records.iter().map(|r| month_key(&r.month)).collect()
    }

    /// Rows whose average column disagrees with `total_commits / unique_contributors`.
    /// Rows with no contributors carry no ratio and are skipped.
    pub fn ratio_mismatches(&self, tolerance: f64) -> Vec<&MonthlyRecord> {
        self.records
            .iter()
            .filter(|r| r.unique_contributors > 0)
            .filter(|r| {
                let expected = r.total_commits as f64 / r.unique_contributors as f64;
                (expected - r.avg_commits_per_contributor).abs() > tolerance
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Commits,
    PullRequests,
    Issues,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Commits, EventKind::PullRequests, EventKind::Issues];

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Commits => "Commits",
            EventKind::PullRequests => "PRs",
            EventKind::Issues => "Issues",
        }
    }
}

/// Event counts for the week closing on `week_ending` (a Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    pub week_ending: NaiveDate,
    pub commits: u64,
    pub prs: u64,
    pub issues: u64,
}

impl WeeklyBucket {
    pub fn empty(week_ending: NaiveDate) -> Self {
        Self {
            week_ending,
            commits: 0,
            prs: 0,
            issues: 0,
        }
    }

    pub fn count(&self, kind: EventKind) -> u64 {
        match kind {
            EventKind::Commits => self.commits,
            EventKind::PullRequests => self.prs,
            EventKind::Issues => self.issues,
        }
    }

    pub fn count_mut(&mut self, kind: EventKind) -> &mut u64 {
        match kind {
            EventKind::Commits => &mut self.commits,
            EventKind::PullRequests => &mut self.prs,
            EventKind::Issues => &mut self.issues,
        }
    }

    pub fn total(&self) -> u64 {
        self.commits + self.prs + self.issues
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyTable {
    buckets: Vec<WeeklyBucket>,
}

impl WeeklyTable {
    pub fn new(mut buckets: Vec<WeeklyBucket>) -> Self {
        buckets.sort_by(|a, b| a.week_ending.cmp(&b.week_ending));
        Self { buckets }
    }

    pub fn buckets(&self) -> &[WeeklyBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn series(&self, kind: EventKind) -> Vec<u64> {
        self.buckets.iter().map(|b| b.count(kind)).collect()
    }

    pub fn max_count(&self) -> u64 {
        self.buckets
            .iter()
            .flat_map(|b| EventKind::ALL.map(|k| b.count(k)))
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub records: Vec<MonthlyRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySource {
    pub kind: EventKind,
    pub path: String,
    pub events: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub week_ends_on: String,
    pub sources: Vec<WeeklySource>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub buckets: Vec<WeeklyBucket>,
}

/// A commit attributed to an author, from a per-commit export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEvent {
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// Share of contributors with more than one commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Retention {
    pub contributors: u64,
    pub returning: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub commits: usize,
    pub dropped: usize,
    pub last_commit: Option<DateTime<Utc>>,
    pub days_since_last_commit: Option<i64>,
    pub retention: Retention,
    pub records: Vec<MonthlyRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Open,
    Closed,
    Merged,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub open: u64,
    pub closed: u64,
    pub merged: u64,
}

impl StateCounts {
    pub fn add(&mut self, state: ItemState) {
        match state {
            ItemState::Open => self.open += 1,
            ItemState::Closed => self.closed += 1,
            ItemState::Merged => self.merged += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.open + self.closed + self.merged
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub pull_requests: Option<StateCounts>,
    pub issues: Option<StateCounts>,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }

    /// Calendar-day comparison, so a month starting on `since`'s day is kept.
    pub fn contains_date(&self, date: &NaiveDate) -> bool {
        if let Some(since) = self.since {
            if date < &since.date_naive() {
                return false;
            }
        }
        if let Some(until) = self.until {
            if date > &until.date_naive() {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn record(month: &str, commits: u64, contributors: u64, avg: f64) -> MonthlyRecord {
        MonthlyRecord {
            month: parse_month(month).unwrap(),
            total_commits: commits,
            unique_contributors: contributors,
            avg_commits_per_contributor: avg,
        }
    }

    #[test]
    fn monthly_table_sorts_chronologically() {
        let table = MonthlyTable::new(vec![
            record("2024-03", 9, 3, 3.0),
            record("2023-12", 4, 2, 2.0),
            record("2024-01", 5, 5, 1.0),
        ]);
        assert_eq!(table.month_labels(), vec!["2023-12", "2024-01", "2024-03"]);
    }

    #[test]
    fn ratio_mismatches_flags_only_disagreeing_rows() {
        let table = MonthlyTable::new(vec![
            record("2024-01", 10, 4, 2.5),
            record("2024-02", 10, 3, 3.3333),
            record("2024-03", 10, 2, 9.0),
            record("2024-04", 0, 0, 0.0),
        ]);
        let bad: Vec<String> = table
            .ratio_mismatches(0.01)
            .iter()
            .map(|r| month_key(&r.month))
            .collect();
        assert_eq!(bad, vec!["2024-03"]);
    }

    #[test]
    fn filter_keeps_months_inside_range() {
        let table = MonthlyTable::new(vec![
            record("2024-01", 1, 1, 1.0),
            record("2024-02", 1, 1, 1.0),
            record("2024-03", 1, 1, 1.0),
        ]);
        let range = DateRange::new()
            .with_since(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
            .with_until(Utc.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap());
        assert_eq!(table.filter(&range).month_labels(), vec!["2024-02"]);
    }

    #[test]
    fn weekly_max_count_spans_all_kinds() {
        let week = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let mut bucket = WeeklyBucket::empty(week);
        *bucket.count_mut(EventKind::Issues) = 7;
        *bucket.count_mut(EventKind::Commits) = 3;
        let table = WeeklyTable::new(vec![bucket]);
        assert_eq!(table.max_count(), 7);
        assert_eq!(table.series(EventKind::Commits), vec![3]);
        assert_eq!(bucket.total(), 10);
    }
}
