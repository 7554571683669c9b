//! Summary statistics over filtered record collections.
//!
//! Four reduction shapes cover every stat card in the app: count, decimal
//! sum, unique-value count, and a current-month subtotal. Sums accumulate in
//! `Decimal`, so totals stay exact at currency precision; rounding belongs to
//! the presentation layer. `today` is resolved once by the caller (see
//! `dates::local_today`) and threaded in, never read here, so a render pass
//! sees one consistent notion of "this month".

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::dates::parse_date;
use crate::deadline::{classify_raw, DeadlineClass};
use crate::filter::Filterable;
use crate::snapshot::Snapshot;
use crate::types::{Customer, Investment, Note, Project, ProjectStatus, Sale, Task, TaskStatus};

// ============================================================================
// Reductions
// ============================================================================

/// Sum of a designated amount across records; absent amounts contribute zero.
pub fn sum_by<T, F>(records: &[T], amount_of: F) -> Decimal
where
    F: Fn(&T) -> Option<Decimal>,
{
    records.iter().filter_map(amount_of).sum()
}

/// Distinct non-absent values of a designated field.
pub fn unique_by<T, F>(records: &[T], key_of: F) -> usize
where
    F: Fn(&T) -> Option<&str>,
{
    records
        .iter()
        .filter_map(key_of)
        .collect::<std::collections::HashSet<&str>>()
        .len()
}

/// Sum restricted to records whose date falls in `today`'s calendar month.
pub fn month_subtotal<T, D, A>(records: &[T], today: NaiveDate, date_of: D, amount_of: A) -> Decimal
where
    D: Fn(&T) -> Option<NaiveDate>,
    A: Fn(&T) -> Option<Decimal>,
{
    records
        .iter()
        .filter(|record| in_month(date_of(record), today))
        .filter_map(amount_of)
        .sum()
}

/// Count of records whose date falls in `today`'s calendar month.
pub fn count_in_month<T, D>(records: &[T], today: NaiveDate, date_of: D) -> usize
where
    D: Fn(&T) -> Option<NaiveDate>,
{
    records
        .iter()
        .filter(|record| in_month(date_of(record), today))
        .count()
}

fn in_month(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    date.map(|d| d.year() == today.year() && d.month() == today.month())
        .unwrap_or(false)
}

// ============================================================================
// Per-page summaries
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub unique_clients: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub month_total: Decimal,
}

pub fn summarize_sales(sales: &[Sale], today: NaiveDate) -> SalesSummary {
    SalesSummary {
        count: sales.len(),
        total: sum_by(sales, |sale| sale.amount),
        unique_clients: unique_by(sales, |sale| sale.client_name.as_deref()),
        month_total: month_subtotal(sales, today, Filterable::filter_date, |sale| sale.amount),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSummary {
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub unique_categories: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub month_total: Decimal,
}

pub fn summarize_investments(investments: &[Investment], today: NaiveDate) -> InvestmentSummary {
    InvestmentSummary {
        count: investments.len(),
        total: sum_by(investments, |investment| investment.amount),
        unique_categories: unique_by(investments, |investment| investment.category.as_deref()),
        month_total: month_subtotal(investments, today, Filterable::filter_date, |investment| {
            investment.amount
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    /// Open tasks whose due date is already past.
    pub overdue: usize,
}

pub fn summarize_tasks(tasks: &[Task], today: NaiveDate) -> TaskSummary {
    let mut summary = TaskSummary {
        total: tasks.len(),
        completed: 0,
        in_progress: 0,
        pending: 0,
        overdue: 0,
    };
    for task in tasks {
        match task.status {
            TaskStatus::Completed => summary.completed += 1,
            TaskStatus::InProgress => summary.in_progress += 1,
            TaskStatus::Pending => summary.pending += 1,
        }
        if task.status != TaskStatus::Completed
            && classify_raw(task.due_date.as_deref(), today) == DeadlineClass::Overdue
        {
            summary.overdue += 1;
        }
    }
    summary
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub total: usize,
    /// Keyed by status wire name; every status present, zero or not.
    pub by_status: HashMap<String, usize>,
}

pub fn summarize_projects(projects: &[Project]) -> ProjectSummary {
    let mut by_status: HashMap<String, usize> = ProjectStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), 0))
        .collect();
    for project in projects {
        *by_status.entry(project.status.as_str().to_string()).or_insert(0) += 1;
    }
    ProjectSummary {
        total: projects.len(),
        by_status,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub count: usize,
    pub unique_companies: usize,
    pub new_this_month: usize,
}

pub fn summarize_customers(customers: &[Customer], today: NaiveDate) -> CustomerSummary {
    CustomerSummary {
        count: customers.len(),
        unique_companies: unique_by(customers, |customer| customer.company.as_deref()),
        new_this_month: count_in_month(customers, today, |customer| {
            customer.created_at.as_deref().and_then(parse_date)
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub count: usize,
    pub unique_categories: usize,
    pub pinned: usize,
}

pub fn summarize_notes(notes: &[Note]) -> NoteSummary {
    NoteSummary {
        count: notes.len(),
        unique_categories: unique_by(notes, |note| note.category.as_deref()),
        pinned: notes.iter().filter(|note| note.pinned).count(),
    }
}

/// The Reports page aggregate: every page's stat card from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardOverview {
    pub projects: ProjectSummary,
    pub tasks: TaskSummary,
    pub sales: SalesSummary,
    pub customers: CustomerSummary,
    pub notes: NoteSummary,
    pub investments: InvestmentSummary,
}

pub fn board_overview(snapshot: &Snapshot, today: NaiveDate) -> BoardOverview {
    BoardOverview {
        projects: summarize_projects(&snapshot.projects),
        tasks: summarize_tasks(&snapshot.tasks, today),
        sales: summarize_sales(&snapshot.sales, today),
        customers: summarize_customers(&snapshot.customers, today),
        notes: summarize_notes(&snapshot.notes),
        investments: summarize_investments(&snapshot.investments, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, FilterCriteria};
    use crate::types::PaymentMethod;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sale(id: &str, client: Option<&str>, amount: Option<Decimal>, category: &str, date: &str) -> Sale {
        Sale {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            client_name: client.map(|s| s.to_string()),
            amount,
            category: Some(category.to_string()),
            payment_method: Some(PaymentMethod::Card),
            sale_date: Some(date.to_string()),
            created_at: None,
        }
    }

    fn task(id: &str, status: TaskStatus, due: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            title: format!("Task {}", id),
            description: None,
            status,
            priority: None,
            project_id: None,
            parent_id: None,
            due_date: due.map(|s| s.to_string()),
            created_at: None,
        }
    }

    #[test]
    fn test_sum_skips_absent_amounts() {
        let sales = vec![
            sale("s1", Some("Acme"), Some(Decimal::new(1005, 1)), "software", "2024-01-05"),
            sale("s2", Some("Globex"), None, "software", "2024-01-06"),
        ];
        assert_eq!(sum_by(&sales, |s| s.amount), Decimal::new(1005, 1));
    }

    #[test]
    fn test_decimal_sum_is_exact_at_currency_precision() {
        // 0.1 + 0.2 is exactly 0.3 in decimal accumulation.
        let sales = vec![
            sale("s1", None, Some(Decimal::new(1, 1)), "misc", "2024-01-05"),
            sale("s2", None, Some(Decimal::new(2, 1)), "misc", "2024-01-06"),
        ];
        assert_eq!(sum_by(&sales, |s| s.amount), Decimal::new(3, 1));
    }

    #[test]
    fn test_unique_ignores_absent_values() {
        let sales = vec![
            sale("s1", Some("Acme"), None, "a", "2024-01-05"),
            sale("s2", Some("Acme"), None, "b", "2024-01-06"),
            sale("s3", Some("Globex"), None, "c", "2024-01-07"),
            sale("s4", None, None, "d", "2024-01-08"),
        ];
        assert_eq!(unique_by(&sales, |s| s.client_name.as_deref()), 2);
    }

    #[test]
    fn test_month_subtotal_uses_injected_today() {
        let sales = vec![
            sale("s1", None, Some(Decimal::new(100, 0)), "a", "2024-01-05"),
            sale("s2", None, Some(Decimal::new(40, 0)), "a", "2024-01-28"),
            sale("s3", None, Some(Decimal::new(7, 0)), "a", "2024-02-01"),
            sale("s4", None, Some(Decimal::new(9, 0)), "a", "2023-01-15"),
        ];
        let subtotal = month_subtotal(&sales, day(2024, 1, 10), Filterable::filter_date, |s| s.amount);
        assert_eq!(subtotal, Decimal::new(140, 0));
    }

    #[test]
    fn test_count_is_additive_over_disjoint_slices() {
        let a = vec![
            sale("s1", None, None, "a", "2024-01-05"),
            sale("s2", None, None, "a", "2024-01-06"),
        ];
        let b = vec![sale("s3", None, None, "b", "2024-02-05")];
        let combined: Vec<Sale> = a.iter().chain(b.iter()).cloned().collect();
        let today = day(2024, 1, 10);
        assert_eq!(
            summarize_sales(&combined, today).count,
            summarize_sales(&a, today).count + summarize_sales(&b, today).count
        );
    }

    #[test]
    fn test_filter_then_summarize_scenario() {
        let records = vec![
            sale("s1", Some("Acme"), Some(Decimal::new(100, 0)), "software", "2024-01-05"),
            sale("s2", Some("Globex"), Some(Decimal::new(50, 0)), "hardware", "2024-02-01"),
        ];
        let filtered = filter(&records, &FilterCriteria::new().with_category("software"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "s1");
        assert_eq!(sum_by(&filtered, |s| s.amount), Decimal::new(100, 0));
        assert_eq!(unique_by(&filtered, |s| s.category.as_deref()), 1);
    }

    #[test]
    fn test_task_summary_counts_states_and_overdue() {
        let today = day(2024, 1, 10);
        let tasks = vec![
            task("t1", TaskStatus::Pending, Some("2024-01-08")),
            task("t2", TaskStatus::InProgress, Some("2024-01-09")),
            task("t3", TaskStatus::Completed, Some("2024-01-01")),
            task("t4", TaskStatus::Pending, Some("2024-01-15")),
            task("t5", TaskStatus::Pending, None),
        ];
        let summary = summarize_tasks(&tasks, today);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.pending, 3);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.completed, 1);
        // Completed-but-past tasks are not overdue; undated tasks are not overdue.
        assert_eq!(summary.overdue, 2);
    }

    #[test]
    fn test_project_summary_seeds_every_status() {
        let summary = summarize_projects(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.by_status.len(), 4);
        assert_eq!(summary.by_status.get("active"), Some(&0));
        assert_eq!(summary.by_status.get("archived"), Some(&0));
    }

    #[test]
    fn test_overview_wires_every_entity() {
        let snapshot = Snapshot {
            projects: vec![],
            tasks: vec![task("t1", TaskStatus::Pending, None)],
            sales: vec![sale("s1", Some("Acme"), Some(Decimal::new(5, 0)), "a", "2024-01-05")],
            customers: vec![],
            notes: vec![],
            investments: vec![],
        };
        let overview = board_overview(&snapshot, day(2024, 1, 10));
        assert_eq!(overview.tasks.total, 1);
        assert_eq!(overview.sales.count, 1);
        assert_eq!(overview.sales.month_total, Decimal::new(5, 0));
        assert_eq!(overview.customers.count, 0);
    }
}
