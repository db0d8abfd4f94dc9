//! French labels for the calendar headers
//!
//! Label formatting is a rendering concern; these tables only exist so every view
//! spells the names the same way.

use chrono::{Datelike, NaiveDate};

/// Short day names, indexed with Sunday = 0
pub const DAY_NAMES: [&str; 7] = ["Dim", "Lun", "Mar", "Mer", "Jeu", "Ven", "Sam"];

pub const MONTH_NAMES: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

/// The short name of a date's day of week
pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// The "Janvier 2024"-style heading of a view centered on `reference`
pub fn month_year_label(reference: NaiveDate) -> String {
    format!("{} {}", MONTH_NAMES[reference.month0() as usize], reference.year())
}
