//! Bucketing scenarios: the board must sort every task into exactly one column,
//! keeping the input order within each column

use std::collections::HashSet;

use chrono::{TimeZone, Utc};

use corkboard::board::{classify, tasks_on_date, Board};
use corkboard::{Task, TodoEntry};

fn task(name: &str, done: bool, progress: &[u8]) -> Task {
    let mut task = Task::new(name.to_string());
    task.set_done(done);
    for percentage in progress {
        task.push_progress(*percentage);
    }
    task
}

#[test]
fn scenario_buckets() {
    let tasks = vec![
        task("zero progress, not done", false, &[0]),
        task("done, empty history", true, &[]),
        task("forty-five percent", false, &[45]),
    ];

    let buckets = classify(&tasks);
    assert_eq!(buckets.review.len(), 1);
    assert_eq!(buckets.review[0].name(), "zero progress, not done");
    assert_eq!(buckets.ready.len(), 1);
    assert_eq!(buckets.ready[0].name(), "done, empty history");
    assert_eq!(buckets.in_progress.len(), 1);
    assert_eq!(buckets.in_progress[0].name(), "forty-five percent");
}

#[test]
fn done_wins_over_zero_progress() {
    let tasks = vec![task("done at 0%", true, &[0])];
    let buckets = classify(&tasks);
    assert_eq!(buckets.ready.len(), 1);
    assert!(buckets.review.is_empty());
}

#[test]
fn full_progress_is_ready_even_when_not_marked_done() {
    let tasks = vec![task("finished", false, &[80, 100])];
    let buckets = classify(&tasks);
    assert_eq!(buckets.ready.len(), 1);
}

#[test]
fn classification_is_a_stable_partition() {
    let tasks = vec![
        task("a", false, &[10]),
        task("b", true, &[]),
        task("c", false, &[]),
        task("d", false, &[100]),
        task("e", false, &[99]),
        task("f", true, &[0]),
        task("g", false, &[0, 30, 0]),
        task("h", false, &[50, 100, 20]),
    ];

    let buckets = classify(&tasks);

    // Total and disjoint
    assert_eq!(buckets.total(), tasks.len());
    let mut seen = HashSet::new();
    for task in buckets.ready.iter().chain(&buckets.in_progress).chain(&buckets.review) {
        assert!(seen.insert(task.id().to_string()));
    }

    // Stable: each column keeps the input's relative order
    let names = |column: &[&Task]| column.iter().map(|t| t.name().to_string()).collect::<Vec<_>>();
    assert_eq!(names(&buckets.ready), vec!["b", "d", "f"]);
    assert_eq!(names(&buckets.in_progress), vec!["a", "e", "h"]);
    assert_eq!(names(&buckets.review), vec!["c", "g"]);
}

#[test]
fn last_appended_entry_wins() {
    let reopened = task("reopened", false, &[50, 100, 20]);
    assert_eq!(reopened.current_progress(), 20);

    let untouched = task("untouched", false, &[]);
    assert_eq!(untouched.current_progress(), 0);
}

#[test]
fn the_todo_column_is_a_passthrough() {
    let tasks = vec![task("a", false, &[10])];
    let todos = vec![
        TodoEntry::new("first".to_string()),
        TodoEntry::new("second".to_string()),
    ];

    let board = Board::build(&tasks, &todos);
    assert_eq!(board.todo.len(), 2);
    assert_eq!(board.todo[0].title(), "first");
    assert_eq!(board.todo[1].title(), "second");
}

#[test]
fn tasks_on_date_matches_the_calendar_day_in_input_order() {
    let mut morning = Task::new("morning".to_string());
    morning.set_due_date(Some(Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()));
    let mut evening = Task::new("evening".to_string());
    evening.set_due_date(Some(Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap()));
    let mut next_day = Task::new("next day".to_string());
    next_day.set_due_date(Some(Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap()));
    let date_less = Task::new("date-less".to_string());

    let tasks = vec![morning, evening, next_day, date_less];
    let due = tasks_on_date(&tasks, chrono::NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());

    assert_eq!(due.len(), 2);
    assert_eq!(due[0].name(), "morning");
    assert_eq!(due[1].name(), "evening");
}

#[test]
fn a_task_with_a_malformed_due_date_never_matches() {
    let task: Task = serde_json::from_str(
        r#"{ "_id": "1", "taskName": "bad date", "dueDate": "pas une date" }"#,
    ).unwrap();
    let tasks = vec![task];

    let due = tasks_on_date(&tasks, chrono::NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    assert!(due.is_empty());
}
