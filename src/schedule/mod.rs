//! Calendar grids for the day, week and month views
//!
//! Everything in this module is pure arithmetic over calendar dates: no clock reads,
//! no timezone conversions, no retained state. The same `(reference, mode)` pair
//! always produces the same grid, and every call returns freshly built values.
//!
//! Week grids start on Monday; month grids are six Sunday-start weeks (42 cells),
//! with the leading and trailing out-of-month days included so the grid shape never
//! changes from one month to the next.

pub mod locale;

use std::error::Error;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};

use crate::board;
use crate::task::Task;

/// Which calendar view is being displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

impl ViewMode {
    /// The number of cells a grid in this mode contains
    pub fn cell_count(&self) -> usize {
        match self {
            ViewMode::Day => 1,
            ViewMode::Week => 7,
            ViewMode::Month => 42,
        }
    }
}

/// Which way the user is paging through the calendar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// One date slot of a rendered grid
#[derive(Clone, Debug)]
pub struct CalendarCell<'t> {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Whether this date belongs to the displayed month. Only meaningful for
    /// [`ViewMode::Month`] grids, where out-of-month cells are usually greyed out.
    pub in_reference_month: bool,
    /// The tasks due on this date, in their original order
    pub tasks: Vec<&'t Task>,
}

/// Compute the ordered list of dates a grid displays.
///
/// * `Day`: the reference date alone.
/// * `Week`: the 7 dates of the Monday-start week containing the reference date.
/// * `Month`: 42 consecutive dates starting at the Sunday on or before the 1st of
///   the reference month.
///
/// The only possible error is date arithmetic leaving the range `chrono` can
/// represent, which a calendar UI will never get close to.
pub fn build_grid(reference: NaiveDate, mode: ViewMode) -> Result<Vec<NaiveDate>, Box<dyn Error>> {
    let start = match mode {
        ViewMode::Day => reference,
        ViewMode::Week => {
            // Sunday counts as the last day of the previous week, not the start of this one
            checked_sub(reference, reference.weekday().num_days_from_monday() as u64)?
        }
        ViewMode::Month => {
            let first = reference.with_day(1).unwrap(/* day 1 exists in every month */);
            checked_sub(first, first.weekday().num_days_from_sunday() as u64)?
        }
    };

    let mut days = Vec::with_capacity(mode.cell_count());
    for offset in 0..mode.cell_count() {
        days.push(checked_add(start, offset as u64)?);
    }
    Ok(days)
}

/// The reference date of the previous/next page of a view.
///
/// Day views step by one day, week views by seven. Month views use calendar month
/// arithmetic, which clamps the day-of-month to the target month's last day:
/// one month after 2024-01-31 is 2024-02-29.
pub fn navigate(
    reference: NaiveDate,
    mode: ViewMode,
    direction: Direction,
) -> Result<NaiveDate, Box<dyn Error>> {
    let target = match (mode, direction) {
        (ViewMode::Day, Direction::Next) => reference.checked_add_days(Days::new(1)),
        (ViewMode::Day, Direction::Previous) => reference.checked_sub_days(Days::new(1)),
        (ViewMode::Week, Direction::Next) => reference.checked_add_days(Days::new(7)),
        (ViewMode::Week, Direction::Previous) => reference.checked_sub_days(Days::new(7)),
        (ViewMode::Month, Direction::Next) => reference.checked_add_months(Months::new(1)),
        (ViewMode::Month, Direction::Previous) => reference.checked_sub_months(Months::new(1)),
    };
    target.ok_or_else(|| {
        format!("Navigating {:?} from {} leaves the supported date range", mode, reference).into()
    })
}

/// Whether two instants fall on the same calendar day, ignoring the time of day
pub fn is_same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Whether `date` belongs to the same year and month as `reference`
pub fn is_in_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// Build the cells of a grid: the dates from [`build_grid`], each annotated with its
/// flags and the tasks due that day. `today` is supplied by the caller so that this
/// stays a pure function of its arguments.
pub fn cells<'t>(
    tasks: &'t [Task],
    reference: NaiveDate,
    mode: ViewMode,
    today: NaiveDate,
) -> Result<Vec<CalendarCell<'t>>, Box<dyn Error>> {
    let days = build_grid(reference, mode)?;
    Ok(days
        .into_iter()
        .map(|date| CalendarCell {
            date,
            is_today: date == today,
            in_reference_month: is_in_month(date, reference),
            tasks: board::tasks_on_date(tasks, date),
        })
        .collect())
}

fn checked_add(date: NaiveDate, days: u64) -> Result<NaiveDate, Box<dyn Error>> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| format!("{} + {} days leaves the supported date range", date, days).into())
}

fn checked_sub(date: NaiveDate, days: u64) -> Result<NaiveDate, Box<dyn Error>> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| format!("{} - {} days leaves the supported date range", date, days).into())
}
