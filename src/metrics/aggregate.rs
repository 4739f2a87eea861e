use crate::model::{CommitEvent, ItemState, MonthlyRecord, MonthlyTable, Retention, StateCounts};
use crate::util::month_start;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Averages are stored with two decimals, like the exports this feeds.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Commit count, distinct authors and their ratio for every month with
/// at least one commit.
pub fn monthly_from_commits(commits: &[CommitEvent]) -> MonthlyTable {
    let mut months: BTreeMap<NaiveDate, (u64, HashSet<&str>)> = BTreeMap::new();
    for commit in commits {
        let entry = months
            .entry(month_start(commit.timestamp.date_naive()))
            .or_default();
        entry.0 += 1;
        entry.1.insert(commit.author.as_str());
    }

    let records = months
        .into_iter()
        .map(|(month, (total, authors))| {
            let contributors = authors.len() as u64;
            MonthlyRecord {
                month,
                total_commits: total,
                unique_contributors: contributors,
                avg_commits_per_contributor: round2(total as f64 / contributors as f64),
            }
        })
        .collect();
    MonthlyTable::new(records)
}

/// Contributors who came back for a second commit, out of everyone seen.
pub fn newcomer_retention(commits: &[CommitEvent]) -> Retention {
    let mut per_author: HashMap<&str, u64> = HashMap::new();
    for commit in commits {
        *per_author.entry(commit.author.as_str()).or_insert(0) += 1;
    }

    let contributors = per_author.len() as u64;
    let returning = per_author.values().filter(|&&n| n > 1).count() as u64;
    let percent = if contributors == 0 {
        0.0
    } else {
        round2(returning as f64 / contributors as f64 * 100.0)
    };

    Retention {
        contributors,
        returning,
        percent,
    }
}

pub fn last_commit(commits: &[CommitEvent]) -> Option<DateTime<Utc>> {
    commits.iter().map(|c| c.timestamp).max()
}

/// Whole days between `last` and `now`.
pub fn days_since(last: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last).num_days()
}

pub fn count_states(states: &[ItemState]) -> StateCounts {
    let mut counts = StateCounts::default();
    for &state in states {
        counts.add(state);
    }
    counts
}
