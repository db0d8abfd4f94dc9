//! Grid-shape and navigation properties of the calendar views

use chrono::{Datelike, Days, NaiveDate, TimeZone, Utc, Weekday};

use corkboard::schedule::{
    build_grid, cells, is_in_month, is_same_calendar_day, navigate, Direction, ViewMode,
};
use corkboard::Task;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn assert_consecutive(days: &[NaiveDate]) {
    for pair in days.windows(2) {
        assert_eq!(pair[0].checked_add_days(Days::new(1)).unwrap(), pair[1]);
    }
}

#[test]
fn day_grid_is_the_reference_itself() {
    let reference = date(2024, 5, 1);
    assert_eq!(build_grid(reference, ViewMode::Day).unwrap(), vec![reference]);
}

#[test]
fn week_grid_runs_monday_to_sunday_and_contains_the_reference() {
    // Every day of a leap year, to cover every weekday and both year boundaries
    let mut reference = date(2024, 1, 1);
    while reference.year() == 2024 {
        let days = build_grid(reference, ViewMode::Week).unwrap();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday(), Weekday::Mon);
        assert_eq!(days[6].weekday(), Weekday::Sun);
        assert!(days.contains(&reference));
        assert_consecutive(&days);

        reference = reference.succ_opt().unwrap();
    }
}

#[test]
fn week_grid_treats_sunday_as_the_last_day() {
    // 2024-06-02 is a Sunday; its week starts the Monday before, not the day after
    let days = build_grid(date(2024, 6, 2), ViewMode::Week).unwrap();
    assert_eq!(days[0], date(2024, 5, 27));
    assert_eq!(days[6], date(2024, 6, 2));
}

#[test]
fn month_grid_is_six_sunday_started_weeks() {
    for year in &[2023, 2024] {
        for month in 1..=12 {
            let reference = date(*year, month, 15);
            let days = build_grid(reference, ViewMode::Month).unwrap();

            assert_eq!(days.len(), 42);
            assert_eq!(days[0].weekday(), Weekday::Sun);
            assert!(days[0] <= date(*year, month, 1));
            assert_consecutive(&days);

            // Every day of the reference month is displayed
            let in_month = days.iter().filter(|day| is_in_month(**day, reference)).count();
            let days_in_month = navigate(date(*year, month, 1), ViewMode::Month, Direction::Next)
                .unwrap()
                .signed_duration_since(date(*year, month, 1))
                .num_days();
            assert_eq!(in_month as i64, days_in_month);
        }
    }
}

#[test]
fn month_grid_starts_in_the_previous_month_when_needed() {
    // September 2024 starts on a Sunday: the grid starts on the 1st itself
    let days = build_grid(date(2024, 9, 10), ViewMode::Month).unwrap();
    assert_eq!(days[0], date(2024, 9, 1));

    // May 2024 starts on a Wednesday: the grid starts the Sunday before
    let days = build_grid(date(2024, 5, 20), ViewMode::Month).unwrap();
    assert_eq!(days[0], date(2024, 4, 28));
}

#[test]
fn same_calendar_day_ignores_the_time_of_day() {
    let morning = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let evening = Utc.with_ymd_and_hms(2024, 5, 1, 23, 0, 0).unwrap();
    let next_day = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();

    assert!(is_same_calendar_day(morning, morning));
    assert!(is_same_calendar_day(morning, evening));
    assert!(is_same_calendar_day(evening, morning));
    assert!(is_same_calendar_day(morning, next_day) == false);
}

#[test]
fn day_and_week_navigation_step_linearly() {
    let reference = date(2024, 5, 1);
    assert_eq!(navigate(reference, ViewMode::Day, Direction::Next).unwrap(), date(2024, 5, 2));
    assert_eq!(navigate(reference, ViewMode::Day, Direction::Previous).unwrap(), date(2024, 4, 30));
    assert_eq!(navigate(reference, ViewMode::Week, Direction::Next).unwrap(), date(2024, 5, 8));
    assert_eq!(navigate(reference, ViewMode::Week, Direction::Previous).unwrap(), date(2024, 4, 24));
}

#[test]
fn month_navigation_clamps_to_the_target_month_end() {
    // chrono's month arithmetic clamps the day-of-month rather than overflowing
    assert_eq!(
        navigate(date(2024, 1, 31), ViewMode::Month, Direction::Next).unwrap(),
        date(2024, 2, 29)
    );
    assert_eq!(
        navigate(date(2023, 1, 31), ViewMode::Month, Direction::Next).unwrap(),
        date(2023, 2, 28)
    );
    assert_eq!(
        navigate(date(2024, 3, 31), ViewMode::Month, Direction::Previous).unwrap(),
        date(2024, 2, 29)
    );
    // No clamping when the target month is long enough
    assert_eq!(
        navigate(date(2024, 7, 31), ViewMode::Month, Direction::Next).unwrap(),
        date(2024, 8, 31)
    );
}

#[test]
fn navigation_and_grids_err_at_the_date_range_edge() {
    assert!(navigate(NaiveDate::MAX, ViewMode::Day, Direction::Next).is_err());
    assert!(navigate(NaiveDate::MIN, ViewMode::Week, Direction::Previous).is_err());
    assert!(build_grid(NaiveDate::MAX, ViewMode::Month).is_err());
}

#[test]
fn grid_cells_carry_flags_and_due_tasks() {
    let mut due_in_month = Task::new("due mid-month".to_string());
    due_in_month.set_due_date(Some(Utc.with_ymd_and_hms(2024, 5, 15, 9, 30, 0).unwrap()));
    let mut due_outside = Task::new("due next month".to_string());
    due_outside.set_due_date(Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()));
    let tasks = vec![due_in_month, due_outside];

    let reference = date(2024, 5, 20);
    let today = date(2024, 5, 15);
    let grid = cells(&tasks, reference, ViewMode::Month, today).unwrap();

    assert_eq!(grid.len(), 42);
    let today_cells: Vec<_> = grid.iter().filter(|cell| cell.is_today).collect();
    assert_eq!(today_cells.len(), 1);
    assert_eq!(today_cells[0].date, today);
    assert_eq!(today_cells[0].tasks.len(), 1);
    assert_eq!(today_cells[0].tasks[0].name(), "due mid-month");

    // May 2024 has 31 days; the other 11 cells belong to April and June
    let in_month = grid.iter().filter(|cell| cell.in_reference_month).count();
    assert_eq!(in_month, 31);

    // The June 1st spill-over cell still shows its task
    let spill = grid.iter().find(|cell| cell.date == date(2024, 6, 1)).unwrap();
    assert!(spill.in_reference_month == false);
    assert_eq!(spill.tasks.len(), 1);
}

#[test]
fn grids_are_deterministic() {
    let reference = date(2024, 2, 29);
    for mode in &[ViewMode::Day, ViewMode::Week, ViewMode::Month] {
        assert_eq!(
            build_grid(reference, *mode).unwrap(),
            build_grid(reference, *mode).unwrap()
        );
    }
}
