//! Lenient date handling shared across the compute modules.
//!
//! The record store delivers dates as strings and is not strict about shape:
//! plain dates, RFC 3339 timestamps, and offset-less timestamps all occur.
//! Everything funnels through here so "unparseable behaves as absent" holds
//! in exactly one place. "Now" is never read here; callers resolve it once
//! per pass and thread it through.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Parse a date-bearing string into a calendar date.
///
/// Timestamps keep the calendar date as written; the offset is not
/// re-projected into another zone. Returns `None` for anything unparseable.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return Some(dt.date());
    }
    None
}

/// Parse a timestamp string into UTC. Offset-less timestamps are taken as
/// already-UTC; plain dates resolve to midnight UTC.
pub fn parse_datetime_utc(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

/// Resolve an injected instant to the dashboard's calendar date.
///
/// This is the one place the "compared by calendar date only" rule picks a
/// zone: a render pass resolves `today` here once, then every classifier,
/// subtotal, and highlight check compares plain `NaiveDate`s.
pub fn local_today(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}
