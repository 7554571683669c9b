//! Filter engine over in-memory record collections.
//!
//! Every list page funnels its UI state through [`FilterCriteria`] and calls
//! [`filter`]. Active constraints AND together; output keeps input order; a
//! record whose field is absent never matches an active constraint on that
//! field. The `"all"` select sentinel is normalized away at criteria
//! construction, so engine code only ever sees `None` or a real constraint.

use chrono::NaiveDate;

use crate::dates::parse_date;
use crate::types::{Customer, Investment, Note, Project, Sale, Task};

/// Active filter constraints for one view. Built per render from UI state,
/// discarded after producing the filtered list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub payment: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria straight from raw UI inputs. Empty strings and the
    /// `"all"` select sentinel mean "no constraint"; date bounds parse
    /// leniently and unparseable bounds are dropped.
    pub fn from_ui(
        search: &str,
        category: &str,
        status: &str,
        payment: &str,
        date_from: &str,
        date_to: &str,
    ) -> Self {
        FilterCriteria {
            search: non_empty(search),
            category: selection(category),
            status: selection(status),
            payment: selection(payment),
            date_from: parse_date(date_from),
            date_to: parse_date(date_to),
        }
    }

    pub fn with_search(mut self, needle: &str) -> Self {
        self.search = non_empty(needle);
        self
    }

    pub fn with_category(mut self, value: &str) -> Self {
        self.category = selection(value);
        self
    }

    pub fn with_status(mut self, value: &str) -> Self {
        self.status = selection(value);
        self
    }

    pub fn with_payment(mut self, value: &str) -> Self {
        self.payment = selection(value);
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn selection(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Per-entity seam the engine filters through.
///
/// `filter_date` picks the first present date candidate for that entity
/// (domain date, else creation date); a present but unparseable value
/// behaves as absent.
pub trait Filterable {
    /// Haystacks for the free-text search; a hit in any of them matches.
    fn search_fields(&self) -> Vec<&str>;

    fn category(&self) -> Option<&str> {
        None
    }

    fn status_key(&self) -> Option<&str> {
        None
    }

    fn payment_key(&self) -> Option<&str> {
        None
    }

    fn filter_date(&self) -> Option<NaiveDate>;
}

/// Stable AND-filter: keeps every record matching all active constraints,
/// in input order.
pub fn filter<T: Filterable + Clone>(records: &[T], criteria: &FilterCriteria) -> Vec<T> {
    records
        .iter()
        .filter(|record| matches_criteria(*record, criteria))
        .cloned()
        .collect()
}

/// Single-record predicate behind [`filter`].
pub fn matches_criteria<T: Filterable>(record: &T, criteria: &FilterCriteria) -> bool {
    if let Some(needle) = criteria.search.as_deref() {
        let needle = needle.to_lowercase();
        let hit = record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    if let Some(want) = criteria.category.as_deref() {
        if !field_equals(record.category(), want) {
            return false;
        }
    }
    if let Some(want) = criteria.status.as_deref() {
        if !field_equals(record.status_key(), want) {
            return false;
        }
    }
    if let Some(want) = criteria.payment.as_deref() {
        if !field_equals(record.payment_key(), want) {
            return false;
        }
    }

    if criteria.date_from.is_some() || criteria.date_to.is_some() {
        let Some(date) = record.filter_date() else {
            return false;
        };
        if let Some(from) = criteria.date_from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = criteria.date_to {
            if date > to {
                return false;
            }
        }
    }

    true
}

fn field_equals(actual: Option<&str>, want: &str) -> bool {
    actual.map(|value| value == want).unwrap_or(false)
}

// ============================================================================
// Entity wiring
// ============================================================================

impl Filterable for Project {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = self.description.as_deref() {
            fields.push(description);
        }
        if let Some(category) = self.category.as_deref() {
            fields.push(category);
        }
        fields
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.start_date
            .as_deref()
            .or(self.created_at.as_deref())
            .and_then(parse_date)
    }
}

impl Filterable for Task {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(description) = self.description.as_deref() {
            fields.push(description);
        }
        fields
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .or(self.created_at.as_deref())
            .and_then(parse_date)
    }
}

impl Filterable for Sale {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        if let Some(client) = self.client_name.as_deref() {
            fields.push(client);
        }
        if let Some(category) = self.category.as_deref() {
            fields.push(category);
        }
        fields
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn payment_key(&self) -> Option<&str> {
        self.payment_method.map(|method| method.as_str())
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.sale_date
            .as_deref()
            .or(self.created_at.as_deref())
            .and_then(parse_date)
    }
}

impl Filterable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(email) = self.email.as_deref() {
            fields.push(email);
        }
        if let Some(company) = self.company.as_deref() {
            fields.push(company);
        }
        fields
    }

    // The customers page exposes its industry select as the category filter.
    fn category(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_date)
    }
}

impl Filterable for Note {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(content) = self.content.as_deref() {
            fields.push(content);
        }
        if let Some(category) = self.category.as_deref() {
            fields.push(category);
        }
        fields
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_date)
    }
}

impl Filterable for Investment {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(category) = self.category.as_deref() {
            fields.push(category);
        }
        fields
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn filter_date(&self) -> Option<NaiveDate> {
        self.invest_date
            .as_deref()
            .or(self.created_at.as_deref())
            .and_then(parse_date)
    }
}
