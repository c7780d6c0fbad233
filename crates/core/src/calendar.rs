//! Option expiry calendar.

use chrono::{Datelike, NaiveDate, Weekday};

/// Standard monthly expiry: the third Friday of the month after `today`.
pub fn next_expiry(today: NaiveDate) -> NaiveDate {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    third_friday(year, month).unwrap_or(today)
}

/// Third Friday of the given month, or `None` for a month outside 1..=12.
/// Always falls on day 15..=21.
fn third_friday(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Fri, 3)
}
