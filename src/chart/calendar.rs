//! Day, week and month buckets for a date range.
//!
//! Every enumeration treats an inverted range (`end < start`) as the single
//! day `start`. Stepping saturates at chrono's supported date limits.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

pub use crate::model::timeline::enumerate_days;

/// A Monday-anchored 7-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    /// `W<iso week>`, e.g. `W1`.
    pub label: String,
    pub week_number: u32,
    /// Monday.
    pub start: NaiveDate,
    /// Sunday.
    pub end: NaiveDate,
}

/// A calendar-month bucket.
///
/// `start..=end` is the full month and decides membership;
/// `clipped_start..=clipped_end` is the part inside the enumerated range
/// and decides header width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// Long month name and year, e.g. `January 2024`.
    pub label: String,
    /// Abbreviated month name, e.g. `Jan`.
    pub short_label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub clipped_start: NaiveDate,
    pub clipped_end: NaiveDate,
}

impl MonthBucket {
    pub fn year(&self) -> i32 {
        self.start.year()
    }
}

fn normalize(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    (start, end.max(start))
}

/// The Monday on or before `date`, or `NaiveDate::MIN` when that Monday is
/// out of range.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = Duration::days(date.weekday().num_days_from_monday() as i64);
    date.checked_sub_signed(back).unwrap_or(NaiveDate::MIN)
}

/// Every Monday-anchored week overlapping `start..=end`.
///
/// The first week may begin before `start` and the last may end after `end`.
pub fn enumerate_weeks(start: NaiveDate, end: NaiveDate) -> Vec<WeekBucket> {
    let (start, end) = normalize(start, end);
    let mut weeks = Vec::new();
    let mut monday = week_start(start);

    loop {
        let sunday = monday
            .checked_add_signed(Duration::days(6))
            .unwrap_or(NaiveDate::MAX);
        if sunday >= start {
            let week_number = monday.iso_week().week();
            weeks.push(WeekBucket {
                label: format!("W{week_number}"),
                week_number,
                start: monday,
                end: sunday,
            });
        }
        match monday.checked_add_signed(Duration::days(7)) {
            Some(next) if next <= end => monday = next,
            _ => break,
        }
    }

    weeks
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`, or `NaiveDate::MAX` in the
/// final supported month.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Every calendar month overlapping `start..=end`.
pub fn enumerate_months(start: NaiveDate, end: NaiveDate) -> Vec<MonthBucket> {
    let (start, end) = normalize(start, end);
    let mut months = Vec::new();
    let mut first = first_of_month(start);

    loop {
        let last = last_of_month(first);
        if last >= start {
            months.push(MonthBucket {
                label: first.format("%B %Y").to_string(),
                short_label: first.format("%b").to_string(),
                start: first,
                end: last,
                clipped_start: first.max(start),
                clipped_end: last.min(end),
            });
        }
        match last.succ_opt() {
            Some(next) if next <= end => first = next,
            _ => break,
        }
    }

    months
}
