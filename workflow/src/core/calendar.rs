//! Fixed month-name table used for the month folder.
//!
//! Folder names must not depend on the host locale, so the table is internal
//! and always in one language.

use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month folder name for a 1-based month number.
///
/// Returns `None` outside `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Year and month folder names for `date`.
pub fn date_segments(date: NaiveDate) -> (String, &'static str) {
    // chrono guarantees month() is within 1..=12.
    let month = MONTH_NAMES[date.month0() as usize];
    (date.year().to_string(), month)
}
