use crate::error::{PlotError, Result};
use crate::model::DateRange;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::time::SystemTime;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses an event timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Parses a `YYYY-MM` month into the first day of that month.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map_err(|e| PlotError::InvalidDate(format!("'{trimmed}' is not a YYYY-MM month: {e}")))
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_key(month: &NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

/// The Sunday closing the week that contains `date`.
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = (7 - date.weekday().num_days_from_sunday()) % 7;
    date + Duration::days(i64::from(days_to_sunday))
}

pub fn week_key(week_ending: &NaiveDate) -> String {
    week_ending.format("%Y-%m-%d").to_string()
}

pub fn resolve_range(since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
    let mut range = DateRange::new();

    let since_dt = since.map(parse_date_bound).transpose()?;
    let until_dt = until.map(parse_until_bound).transpose()?;

    if let (Some(s), Some(u)) = (since_dt, until_dt) {
        if s > u {
            return Err(PlotError::InvalidDate(format!(
                "Invalid range: since ({}) is after until ({})",
                s, u
            )));
        }
    }

    if let Some(s) = since_dt {
        range = range.with_since(s);
    }
    if let Some(u) = until_dt {
        range = range.with_until(u);
    }

    Ok(range)
}

/// Resolves a `--since`/`--until` bound.
pub fn parse_date_bound(input: &str) -> Result<DateTime<Utc>> {
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    // YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    // Relative duration (e.g., "90d", "2 weeks ago")
    let duration = parse_natural_duration(input)
        .or_else(|| humantime::parse_duration(input.trim()).ok())
        .ok_or_else(|| PlotError::InvalidDate(format!("Unrecognized date '{input}'")))?;

    let target = SystemTime::now()
        .checked_sub(duration)
        .ok_or_else(|| PlotError::InvalidDate(format!("Duration overflow for '{input}'")))?;
    Ok(DateTime::<Utc>::from(target))
}

/// Like [`parse_date_bound`], except a bare `YYYY-MM-DD` covers that whole day.
pub fn parse_until_bound(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(end) = date.and_hms_nano_opt(23, 59, 59, 999_999_999) {
            return Ok(Utc.from_utc_datetime(&end));
        }
    }
    parse_date_bound(input)
}

fn parse_natural_duration(input: &str) -> Option<std::time::Duration> {
    let input = input.trim().to_lowercase();

    let units: [(&str, u64); 3] = [
        (" days ago", 86400),
        (" weeks ago", 7 * 86400),
        (" months ago", 30 * 86400),
    ];

    for (suffix, secs) in units {
        if let Some(n) = input.strip_suffix(suffix) {
            if let Ok(n) = n.trim().parse::<u64>() {
                return Some(std::time::Duration::from_secs(n * secs));
            }
        }
    }

    None
}
