//! Month-grid layout for the calendar page.
//!
//! Given a month and a list of date-bearing records, produces the cell layout
//! the page renders directly: leading blanks before day 1, then one entry per
//! calendar day with that day's records bucketed in input order. The builder
//! never reads the clock; "today" highlighting is the caller comparing
//! `day.date` against a date it resolved itself (see `dates::local_today`).

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// First rendered column of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDay<T> {
    pub date: NaiveDate,
    pub records: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid<T> {
    /// Blank cells to render before day 1, under the chosen week start.
    pub leading_blanks: u32,
    /// Day 1 through the last day of the month, ascending.
    pub days: Vec<MonthDay<T>>,
}

/// Number of days in a month, `None` for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// Build the month grid with the default Sunday week start.
pub fn month_grid<T, F>(year: i32, month: u32, records: &[T], date_of: F) -> MonthGrid<T>
where
    T: Clone,
    F: Fn(&T) -> Option<NaiveDate>,
{
    month_grid_with_start(year, month, records, date_of, WeekStart::Sunday)
}

/// Build the month grid for an explicit week start.
///
/// A record lands in a day iff `date_of` yields exactly that calendar date;
/// dateless records are skipped. An out-of-range month yields an empty grid.
pub fn month_grid_with_start<T, F>(
    year: i32,
    month: u32,
    records: &[T],
    date_of: F,
    week_start: WeekStart,
) -> MonthGrid<T>
where
    T: Clone,
    F: Fn(&T) -> Option<NaiveDate>,
{
    let (Some(first), Some(day_count)) = (
        NaiveDate::from_ymd_opt(year, month, 1),
        days_in_month(year, month),
    ) else {
        return MonthGrid {
            leading_blanks: 0,
            days: Vec::new(),
        };
    };

    let mut by_day: HashMap<u32, Vec<T>> = HashMap::new();
    for record in records {
        if let Some(date) = date_of(record) {
            if date.year() == year && date.month() == month {
                by_day.entry(date.day()).or_default().push(record.clone());
            }
        }
    }

    let leading_blanks = match week_start {
        WeekStart::Sunday => first.weekday().num_days_from_sunday(),
        WeekStart::Monday => first.weekday().num_days_from_monday(),
    };

    let days = (1..=day_count)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| MonthDay {
            records: by_day.remove(&date.day()).unwrap_or_default(),
            date,
        })
        .collect();

    MonthGrid {
        leading_blanks,
        days,
    }
}

/// Calendar page navigation: the month after `(year, month)`.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Calendar page navigation: the month before `(year, month)`.
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
