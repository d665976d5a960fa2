use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::project::Project;

/// Controls which buckets the timeline header displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineScale {
    #[default]
    Weeks,
    /// Ticks at the distinct interval boundary dates.
    Intervals,
    Months,
}

impl fmt::Display for TimelineScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Weeks => "weeks",
            Self::Intervals => "intervals",
            Self::Months => "months",
        };
        f.write_str(name)
    }
}

impl FromStr for TimelineScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weeks" | "week" | "w" => Ok(Self::Weeks),
            "intervals" | "interval" | "i" => Ok(Self::Intervals),
            "months" | "month" | "m" => Ok(Self::Months),
            other => Err(format!(
                "unknown timeline scale '{other}' (expected weeks, intervals or months)"
            )),
        }
    }
}

/// Every calendar day from `start` to `end`, both inclusive. Never empty:
/// an inverted range yields the single day `start`.
pub fn enumerate_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = vec![start];
    let mut day = start;
    while day < end {
        match day.succ_opt() {
            Some(next) => {
                days.push(next);
                day = next;
            }
            None => break,
        }
    }
    days
}

/// The day axis every horizontal coordinate is derived from.
///
/// One bucket per calendar day of the project window; a date maps to the
/// share of the axis before its bucket.
#[derive(Debug, Clone)]
pub struct TimelineAxis {
    days: Vec<NaiveDate>,
}

impl TimelineAxis {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            days: enumerate_days(start, end),
        }
    }

    pub fn for_project(project: &Project) -> Self {
        let (start, end) = project.effective_range();
        Self::new(start, end)
    }

    /// The first day of the axis.
    pub fn start(&self) -> NaiveDate {
        self.days[0]
    }

    /// The last day of the axis.
    pub fn end(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Number of day buckets; never zero.
    pub fn total_days(&self) -> usize {
        self.days.len()
    }

    pub fn last_index(&self) -> usize {
        self.days.len() - 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    /// Index of the first day bucket on or after `date`, if any.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let idx = self.days.partition_point(|day| *day < date);
        (idx < self.days.len()).then_some(idx)
    }

    /// Like [`index_of`](Self::index_of), clamping dates past the axis to
    /// the last bucket.
    pub fn clamped_index(&self, date: NaiveDate) -> usize {
        self.index_of(date).unwrap_or_else(|| self.last_index())
    }

    pub fn index_to_percent(&self, index: usize) -> f64 {
        index as f64 / self.total_days() as f64 * 100.0
    }

    /// Horizontal offset of `date` as a percentage of the axis width.
    pub fn date_to_percent(&self, date: NaiveDate) -> f64 {
        self.index_to_percent(self.clamped_index(date))
    }

    /// `(left%, width%)` of the inclusive bucket range `first..=last`.
    /// A reversed range collapses to the single bucket `first`.
    pub fn span_percent(&self, first: usize, last: usize) -> (f64, f64) {
        let last = last.max(first);
        let left = self.index_to_percent(first);
        let width = (last - first + 1) as f64 / self.total_days() as f64 * 100.0;
        (left, width)
    }

    /// `(left%, width%)` of the inclusive date range, clamped onto the axis.
    pub fn range_percent(&self, start: NaiveDate, end: NaiveDate) -> (f64, f64) {
        self.span_percent(self.clamped_index(start), self.clamped_index(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> TimelineAxis {
        TimelineAxis::new(date(2024, 1, 1), date(2024, 1, 31))
    }

    #[test]
    fn enumerates_days_inclusively() {
        let days = enumerate_days(date(2024, 2, 27), date(2024, 3, 1));
        assert_eq!(
            days,
            vec![date(2024, 2, 27), date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
        assert_eq!(enumerate_days(date(2024, 3, 1), date(2024, 2, 1)), vec![date(2024, 3, 1)]);
        assert_eq!(enumerate_days(NaiveDate::MAX, NaiveDate::MAX), vec![NaiveDate::MAX]);
    }

    #[test]
    fn first_day_maps_to_zero() {
        assert_eq!(january().date_to_percent(date(2024, 1, 1)), 0.0);
    }

    #[test]
    fn days_map_proportionally() {
        let axis = january();
        let pct = axis.date_to_percent(date(2024, 1, 11));
        assert!((pct - 10.0 / 31.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn dates_before_axis_map_to_zero() {
        assert_eq!(january().date_to_percent(date(2023, 12, 1)), 0.0);
    }

    #[test]
    fn dates_after_axis_clamp_to_last_bucket() {
        let axis = january();
        assert_eq!(axis.index_of(date(2024, 2, 5)), None);
        let pct = axis.date_to_percent(date(2024, 2, 5));
        assert!((pct - 30.0 / 31.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn percent_is_monotonic_across_window() {
        let axis = january();
        let mut prev = -1.0;
        for day in axis.days().to_vec() {
            let pct = axis.date_to_percent(day);
            assert!(pct >= prev);
            prev = pct;
        }
    }

    #[test]
    fn span_covers_whole_axis() {
        let axis = january();
        let (left, width) = axis.span_percent(0, axis.last_index());
        assert_eq!(left, 0.0);
        assert!((width - 100.0).abs() < 1e-9);
    }

    #[test]
    fn reversed_span_is_one_bucket_wide() {
        let axis = january();
        let (left, width) = axis.span_percent(5, 2);
        assert!((left - 5.0 / 31.0 * 100.0).abs() < 1e-9);
        assert!((width - 1.0 / 31.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn parses_scale_names() {
        assert_eq!("Weeks".parse::<TimelineScale>(), Ok(TimelineScale::Weeks));
        assert_eq!("intervals".parse::<TimelineScale>(), Ok(TimelineScale::Intervals));
        assert_eq!("month".parse::<TimelineScale>(), Ok(TimelineScale::Months));
        assert!("years".parse::<TimelineScale>().is_err());
    }
}
