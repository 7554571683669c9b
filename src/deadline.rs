//! Deadline proximity classification.
//!
//! Maps a due date to the urgency token the task and project cards style by.
//! Total over every input: no date means [`DeadlineClass::NoDue`], and the
//! raw-string variant folds unparseable input into the same bucket.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_date;

/// Due dates this many days out (inclusive) still count as due-soon.
pub const DUE_SOON_WINDOW_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeadlineClass {
    Overdue,
    DueSoon,
    OnTrack,
    #[serde(rename = "none")]
    NoDue,
}

impl DeadlineClass {
    /// Styling token consumed by the UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineClass::Overdue => "overdue",
            DeadlineClass::DueSoon => "dueSoon",
            DeadlineClass::OnTrack => "onTrack",
            DeadlineClass::NoDue => "none",
        }
    }
}

/// Classify a due date against an injected `today`.
pub fn classify(due: Option<NaiveDate>, today: NaiveDate) -> DeadlineClass {
    let Some(due_date) = due else {
        return DeadlineClass::NoDue;
    };

    let delta = (due_date - today).num_days();
    if delta < 0 {
        DeadlineClass::Overdue
    } else if delta <= DUE_SOON_WINDOW_DAYS {
        DeadlineClass::DueSoon
    } else {
        DeadlineClass::OnTrack
    }
}

/// Classify straight off the wire shape. Absent or unparseable dates are
/// [`DeadlineClass::NoDue`].
pub fn classify_raw(due: Option<&str>, today: NaiveDate) -> DeadlineClass {
    classify(due.and_then(parse_date), today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_boundaries_around_fixed_today() {
        let today = day(2024, 1, 10);
        assert_eq!(classify(Some(day(2024, 1, 8)), today), DeadlineClass::Overdue);
        assert_eq!(classify(Some(day(2024, 1, 9)), today), DeadlineClass::Overdue);
        // Due today and the full 2-day window are due-soon.
        assert_eq!(classify(Some(day(2024, 1, 10)), today), DeadlineClass::DueSoon);
        assert_eq!(classify(Some(day(2024, 1, 11)), today), DeadlineClass::DueSoon);
        assert_eq!(classify(Some(day(2024, 1, 12)), today), DeadlineClass::DueSoon);
        assert_eq!(classify(Some(day(2024, 1, 13)), today), DeadlineClass::OnTrack);
    }

    #[test]
    fn test_absent_due_date_is_none_class() {
        assert_eq!(classify(None, day(2024, 1, 10)), DeadlineClass::NoDue);
    }

    #[test]
    fn test_raw_parse_failures_fold_to_none_class() {
        let today = day(2024, 1, 10);
        assert_eq!(classify_raw(None, today), DeadlineClass::NoDue);
        assert_eq!(classify_raw(Some("soon"), today), DeadlineClass::NoDue);
        assert_eq!(classify_raw(Some(""), today), DeadlineClass::NoDue);
        assert_eq!(
            classify_raw(Some("2024-01-08"), today),
            DeadlineClass::Overdue
        );
    }

    #[test]
    fn test_wire_names_match_ui_tokens() {
        assert_eq!(
            serde_json::to_string(&DeadlineClass::DueSoon).unwrap(),
            "\"dueSoon\""
        );
        assert_eq!(
            serde_json::to_string(&DeadlineClass::NoDue).unwrap(),
            "\"none\""
        );
        assert_eq!(DeadlineClass::OnTrack.as_str(), "onTrack");
    }

    #[test]
    fn test_classification_spans_year_boundary() {
        let today = day(2023, 12, 31);
        assert_eq!(classify(Some(day(2024, 1, 2)), today), DeadlineClass::DueSoon);
        assert_eq!(classify(Some(day(2024, 1, 3)), today), DeadlineClass::OnTrack);
    }
}
