use crate::model::{DateRange, EventKind, WeeklyBucket, WeeklyTable};
use crate::util::week_ending;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Raw event timestamps per source category.
#[derive(Debug, Clone, Default)]
pub struct EventSources {
    pub commits: Vec<DateTime<Utc>>,
    pub prs: Vec<DateTime<Utc>>,
    pub issues: Vec<DateTime<Utc>>,
}

impl EventSources {
    pub fn events(&self, kind: EventKind) -> &[DateTime<Utc>] {
        match kind {
            EventKind::Commits => &self.commits,
            EventKind::PullRequests => &self.prs,
            EventKind::Issues => &self.issues,
        }
    }

    pub fn events_mut(&mut self, kind: EventKind) -> &mut Vec<DateTime<Utc>> {
        match kind {
            EventKind::Commits => &mut self.commits,
            EventKind::PullRequests => &mut self.prs,
            EventKind::Issues => &mut self.issues,
        }
    }
}

/// Counts events per Sunday-ending week. Weeks between the first and last
/// observed week are present even when empty.
pub fn resample_weekly(timestamps: &[DateTime<Utc>]) -> BTreeMap<NaiveDate, u64> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for ts in timestamps {
        *counts.entry(week_ending(ts.date_naive())).or_insert(0) += 1;
    }

    let first = counts.keys().next().copied();
    let last = counts.keys().next_back().copied();
    if let (Some(first), Some(last)) = (first, last) {
        let mut week = first;
        while week < last {
            counts.entry(week).or_insert(0);
            week += Duration::weeks(1);
        }
    }

    counts
}

/// Outer join of the three weekly series on their week keys, zero filled.
pub fn combine(
    commits: &BTreeMap<NaiveDate, u64>,
    prs: &BTreeMap<NaiveDate, u64>,
    issues: &BTreeMap<NaiveDate, u64>,
) -> WeeklyTable {
    let mut buckets: BTreeMap<NaiveDate, WeeklyBucket> = BTreeMap::new();

    for (kind, series) in [
        (EventKind::Commits, commits),
        (EventKind::PullRequests, prs),
        (EventKind::Issues, issues),
    ] {
        for (&week, &count) in series {
            *buckets
                .entry(week)
                .or_insert_with(|| WeeklyBucket::empty(week))
                .count_mut(kind) += count;
        }
    }

    WeeklyTable::new(buckets.into_values().collect())
}

pub fn build_weekly_table(sources: &EventSources, range: &DateRange) -> WeeklyTable {
    let series = EventKind::ALL.map(|kind| {
        let in_range: Vec<DateTime<Utc>> = sources
            .events(kind)
            .iter()
            .filter(|ts| range.contains(ts))
            .copied()
            .collect();
        resample_weekly(&in_range)
    });
    let [commits, prs, issues] = series;
    combine(&commits, &prs, &issues)
}
