//! Deadline arithmetic for monthly obligations
//!
//! Day counts are inclusive of both today and the due day, so a bill due
//! today still has one day of set-aside left and a count is never zero.

use chrono::{Datelike, Days, NaiveDate};

/// Number of days in the month containing `date` (Gregorian rules)
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Days left until the next occurrence of `day_of_month`, counting today
///
/// - If the target day has not passed this month: `target - today + 1`.
/// - Otherwise the deadline rolls into next month:
///   `(days_in_month - today) + target + 1`.
///
/// The result is always at least 1.
pub fn days_until(today: NaiveDate, day_of_month: u32) -> u32 {
    debug_assert!(
        (1..=31).contains(&day_of_month),
        "day_of_month {} outside 1-31",
        day_of_month
    );
    let target = day_of_month.clamp(1, 31);
    let current = today.day();

    if current <= target {
        target - current + 1
    } else {
        (days_in_month(today) - current) + target + 1
    }
}

/// Calendar date of the deadline that `days_until` counts toward
///
/// The due day is the last day of the inclusive window, i.e.
/// `today + (days_until - 1)`.
pub fn deadline_date(today: NaiveDate, day_of_month: u32) -> NaiveDate {
    let offset = u64::from(days_until(today, day_of_month) - 1);
    today
        .checked_add_days(Days::new(offset))
        .unwrap_or(NaiveDate::MAX)
}

/// Whether a once-a-day job last run on `last_run` is due again on `today`
pub fn has_day_changed(last_run: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_run != Some(today)
}
