//! Timeline header rows and the current-day marker.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::{enumerate_months, enumerate_weeks, MonthBucket};
use crate::model::{Interval, TimelineAxis, TimelineScale};

/// A labelled header cell. Zero width marks a tick rather than a span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBucket {
    pub label: String,
    pub left: f64,
    pub width: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HeaderBucket {
    fn spanning(axis: &TimelineAxis, label: String, start: NaiveDate, end: NaiveDate) -> Self {
        let start = start.max(axis.start());
        let end = end.min(axis.end());
        let (left, width) = axis.range_percent(start, end);
        Self {
            label,
            left,
            width,
            start,
            end,
        }
    }

    fn tick(axis: &TimelineAxis, date: NaiveDate) -> Self {
        Self {
            label: date.format("%d").to_string(),
            left: axis.date_to_percent(date),
            width: 0.0,
            start: date,
            end: date,
        }
    }
}

/// Distinct interval start/end dates that fall inside the axis, ascending.
pub fn boundary_dates(axis: &TimelineAxis, intervals: &[Interval]) -> Vec<NaiveDate> {
    intervals
        .iter()
        .flat_map(|interval| [interval.start_date, interval.end_date])
        .filter(|date| axis.contains(*date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The lower header row for `scale`.
pub fn header_buckets(
    axis: &TimelineAxis,
    scale: TimelineScale,
    intervals: &[Interval],
) -> Vec<HeaderBucket> {
    match scale {
        TimelineScale::Weeks => enumerate_weeks(axis.start(), axis.end())
            .into_iter()
            .map(|week| HeaderBucket::spanning(axis, week.label, week.start, week.end))
            .collect(),
        TimelineScale::Months => enumerate_months(axis.start(), axis.end())
            .into_iter()
            .map(|month| {
                HeaderBucket::spanning(axis, month.short_label, month.clipped_start, month.clipped_end)
            })
            .collect(),
        TimelineScale::Intervals => boundary_dates(axis, intervals)
            .into_iter()
            .map(|date| HeaderBucket::tick(axis, date))
            .collect(),
    }
}

/// The upper header row: months for the week and interval scales, years for
/// the month scale.
pub fn header_groups(axis: &TimelineAxis, scale: TimelineScale) -> Vec<HeaderBucket> {
    let months = enumerate_months(axis.start(), axis.end());
    match scale {
        TimelineScale::Weeks | TimelineScale::Intervals => months
            .into_iter()
            .map(|month| {
                HeaderBucket::spanning(axis, month.label, month.clipped_start, month.clipped_end)
            })
            .collect(),
        TimelineScale::Months => year_groups(axis, &months),
    }
}

fn year_groups(axis: &TimelineAxis, months: &[MonthBucket]) -> Vec<HeaderBucket> {
    let mut groups: Vec<HeaderBucket> = Vec::new();
    let mut group_start = 0;
    for (idx, month) in months.iter().enumerate() {
        let closes_group = months
            .get(idx + 1)
            .map_or(true, |next| next.year() != month.year());
        if closes_group {
            let first = &months[group_start];
            groups.push(HeaderBucket::spanning(
                axis,
                month.year().to_string(),
                first.clipped_start,
                month.clipped_end,
            ));
            group_start = idx + 1;
        }
    }
    groups
}

/// Vertical "today" line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentDayMarker {
    pub date: NaiveDate,
    pub left: f64,
    pub label: String,
}

/// The marker for `today`, when enabled and inside the axis.
pub fn current_day_marker(
    axis: &TimelineAxis,
    today: NaiveDate,
    enabled: bool,
) -> Option<CurrentDayMarker> {
    (enabled && axis.contains(today)).then(|| CurrentDayMarker {
        date: today,
        left: axis.date_to_percent(today),
        label: today.format("%Y-%m-%d").to_string(),
    })
}
