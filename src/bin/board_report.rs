//! Renders a snapshot file as a plain-text board report.
//!
//! Usage: `board_report <snapshot.json> [YYYY-MM]`
//!
//! Reads ~/.opsboard/settings.json for the timezone and week start, resolves
//! today once, then prints the overview stats, the task calendar for the
//! requested month (default: the current one), and the nested task tree.
//! Developer surface, not the product UI.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use chrono::{Datelike, NaiveDate, Utc};

use opsboard::calendar_grid::{month_grid_with_start, WeekStart};
use opsboard::dates::{local_today, parse_date};
use opsboard::deadline::classify_raw;
use opsboard::settings::BoardSettings;
use opsboard::snapshot::{load_snapshot, Snapshot};
use opsboard::stats::board_overview;
use opsboard::task_tree::compose;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(path) = args.first() else {
        eprintln!("usage: board_report <snapshot.json> [YYYY-MM]");
        return ExitCode::FAILURE;
    };

    let settings = BoardSettings::load_default();
    let tz = settings.tz();
    let today = local_today(Utc::now(), &tz);

    let snapshot = match load_snapshot(Path::new(path)) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("board_report: {}", err);
            return ExitCode::FAILURE;
        }
    };
    log::info!("loaded {} records from {}", snapshot.total_records(), path);

    let (year, month) = match args.get(1) {
        Some(raw) => match parse_month(raw) {
            Some(pair) => pair,
            None => {
                eprintln!("board_report: bad month \"{}\", expected YYYY-MM", raw);
                return ExitCode::FAILURE;
            }
        },
        None => (today.year(), today.month()),
    };

    print_overview(&snapshot, today);
    print_calendar(&snapshot, year, month, settings.week_start, today);
    print_task_tree(&snapshot, today);

    ExitCode::SUCCESS
}

fn parse_month(raw: &str) -> Option<(i32, u32)> {
    let (year, month) = raw.split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}

fn print_overview(snapshot: &Snapshot, today: NaiveDate) {
    let overview = board_overview(snapshot, today);
    println!("== Overview ({}) ==", today);
    println!(
        "projects:    {} ({} active)",
        overview.projects.total,
        overview.projects.by_status.get("active").copied().unwrap_or(0)
    );
    println!(
        "tasks:       {} ({} open, {} overdue)",
        overview.tasks.total,
        overview.tasks.pending + overview.tasks.in_progress,
        overview.tasks.overdue
    );
    println!(
        "sales:       {} totaling {} ({} this month)",
        overview.sales.count, overview.sales.total, overview.sales.month_total
    );
    println!(
        "customers:   {} ({} new this month)",
        overview.customers.count, overview.customers.new_this_month
    );
    println!(
        "notes:       {} ({} pinned)",
        overview.notes.count, overview.notes.pinned
    );
    println!(
        "investments: {} totaling {}",
        overview.investments.count, overview.investments.total
    );
}

fn print_calendar(
    snapshot: &Snapshot,
    year: i32,
    month: u32,
    week_start: WeekStart,
    today: NaiveDate,
) {
    let grid = month_grid_with_start(
        year,
        month,
        &snapshot.tasks,
        |task| task.due_date.as_deref().and_then(parse_date),
        week_start,
    );
    println!();
    println!("== Task calendar {}-{:02} (day:due count, * = today) ==", year, month);
    if grid.days.is_empty() {
        println!("no such month");
        return;
    }

    let mut cells: Vec<String> = vec!["      ".to_string(); grid.leading_blanks as usize];
    for day in &grid.days {
        let mark = if day.date == today { '*' } else { ' ' };
        cells.push(format!("{}{:2}:{:<2}", mark, day.date.day(), day.records.len()));
    }
    for week in cells.chunks(7) {
        println!("{}", week.join(" "));
    }
}

fn print_task_tree(snapshot: &Snapshot, today: NaiveDate) {
    let tree = compose(&snapshot.tasks);
    println!();
    println!("== Tasks ==");
    for parent in &tree.parents {
        println!(
            "[{}] {} ({})",
            parent.task.status.as_str(),
            parent.task.title,
            classify_raw(parent.task.due_date.as_deref(), today).as_str()
        );
        for subtask in &parent.subtasks {
            println!("    - [{}] {}", subtask.status.as_str(), subtask.title);
        }
    }
    if !tree.orphans.is_empty() {
        println!("unassigned:");
        for task in &tree.orphans {
            println!("    - [{}] {}", task.status.as_str(), task.title);
        }
    }
}
