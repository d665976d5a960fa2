//! Chart geometry: one snapshot in, one render-agnostic descriptor out.
//!
//! The row plan is built first; header, interval and milestone geometry all
//! read positions from the same [`TimelineAxis`].

pub mod calendar;
pub mod color;
pub mod header;
pub mod intervals;
pub mod milestones;
pub mod rows;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::model::{Snapshot, TimelineAxis, TimelineScale};
use crate::settings::ChartSettings;
use color::{parse_or, Rgb};
use header::{CurrentDayMarker, HeaderBucket};
use intervals::IntervalShape;
use milestones::{MilestoneMarker, MilestoneTableRow};
use rows::RowShape;

/// Per-call rendering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub scale: TimelineScale,
    pub show_current_day: bool,
    /// The date the current-day marker points at.
    pub today: NaiveDate,
    /// Connector length per row between a milestone and its task.
    pub row_height: f64,
    pub interval_shade_percent: f64,
    pub default_row_color: Rgb,
}

impl RenderOptions {
    pub fn new(scale: TimelineScale, today: NaiveDate) -> Self {
        Self::from_settings(&ChartSettings::default(), today).with_scale(scale)
    }

    pub fn from_settings(settings: &ChartSettings, today: NaiveDate) -> Self {
        Self {
            scale: settings.default_scale,
            show_current_day: settings.show_current_day,
            today,
            row_height: settings.row_height,
            interval_shade_percent: settings.interval_shade_percent as f64,
            default_row_color: parse_or(&settings.default_row_color, color::default_row_color()),
        }
    }

    pub fn with_scale(mut self, scale: TimelineScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_current_day(mut self, show: bool) -> Self {
        self.show_current_day = show;
        self
    }
}

/// Category legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: Rgb,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub scale: TimelineScale,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: usize,
    pub total_rows: usize,
    /// Whether the label column needs a separate subtask column.
    pub has_subtasks: bool,
    pub header_groups: Vec<HeaderBucket>,
    pub header: Vec<HeaderBucket>,
    pub rows: Vec<RowShape>,
    pub intervals: Vec<IntervalShape>,
    pub milestones: Vec<MilestoneMarker>,
    pub milestone_table: Vec<MilestoneTableRow>,
    pub legend: Vec<LegendEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_day: Option<CurrentDayMarker>,
}

/// Compute the full chart geometry for `snapshot`.
pub fn render_chart(snapshot: &Snapshot, options: &RenderOptions) -> ChartGeometry {
    let axis = TimelineAxis::for_project(&snapshot.project);
    let plan = rows::plan_rows(&snapshot.tasks, options.default_row_color);

    let intervals = intervals::place_intervals(
        &axis,
        &plan,
        &snapshot.intervals,
        &snapshot.categories,
        options.interval_shade_percent,
    );
    let markers = milestones::annotate_milestones(
        &axis,
        &plan,
        &snapshot.milestones,
        options.row_height,
    );

    let legend = snapshot
        .categories
        .iter()
        .map(|category| LegendEntry {
            name: category.name.clone(),
            color: parse_or(&category.color, options.default_row_color),
        })
        .collect();

    debug!(
        days = axis.total_days(),
        rows = plan.total_rows(),
        intervals = intervals.len(),
        milestones = markers.len(),
        "computed chart geometry"
    );

    ChartGeometry {
        scale: options.scale,
        start: axis.start(),
        end: axis.end(),
        total_days: axis.total_days(),
        total_rows: plan.total_rows(),
        has_subtasks: plan.has_subtasks(),
        header_groups: header::header_groups(&axis, options.scale),
        header: header::header_buckets(&axis, options.scale, &snapshot.intervals),
        rows: rows::row_shapes(&plan),
        intervals,
        milestone_table: milestones::milestone_table(&markers),
        milestones: markers,
        legend,
        current_day: header::current_day_marker(&axis, options.today, options.show_current_day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Interval, Milestone, Project, Task};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new(Project::new(date(2024, 1, 1), date(2024, 1, 31)));

        let kickoff = Task::new("Kickoff", 0).with_color("#3b82f6");
        let build = Task::new("Build", 1).with_color("#10b981");
        let backend = Task::new_subtask("Backend", build.id, 0);
        let frontend = Task::new_subtask("Frontend", build.id, 1).with_color("#f59e0b");
        let review = Category::new("Review", "#ef4444");

        snapshot.intervals = vec![
            Interval::new(kickoff.id, date(2023, 12, 25), date(2024, 1, 5)),
            Interval::new(backend.id, date(2024, 1, 8), date(2024, 1, 19)).with_category(review.id),
            Interval::new(frontend.id, date(2024, 1, 15), date(2024, 2, 10)),
        ];
        snapshot.milestones = vec![
            Milestone::new("Go live", date(2024, 1, 31), Some(frontend.id)),
            Milestone::new("Plan signed", date(2024, 1, 5), Some(kickoff.id)),
            Milestone::new("Lost", date(2024, 1, 6), Some(uuid::Uuid::from_u128(9))),
        ];
        snapshot.tasks = vec![frontend, kickoff, backend, build];
        snapshot.categories = vec![review];
        snapshot
    }

    #[test]
    fn renders_complete_geometry() {
        let options = RenderOptions::new(TimelineScale::Weeks, date(2024, 1, 16)).with_current_day(true);
        let geometry = render_chart(&sample_snapshot(), &options);

        assert_eq!(geometry.total_days, 31);
        assert_eq!(geometry.total_rows, 3);
        assert!(geometry.has_subtasks);

        let labels: Vec<(&str, usize)> = geometry
            .rows
            .iter()
            .map(|r| (r.label.as_str(), r.row_span))
            .collect();
        assert_eq!(
            labels,
            vec![("Kickoff", 1), ("Build", 2), ("Backend", 1), ("Frontend", 1)]
        );

        assert_eq!(geometry.intervals.len(), 3);
        assert_eq!(geometry.intervals[0].left, 0.0);
        assert_eq!(geometry.intervals[1].border_color.to_hex(), "#ef4444");
        assert_eq!(geometry.intervals[2].row_index, 2);

        let numbered: Vec<(&str, usize)> = geometry
            .milestones
            .iter()
            .map(|m| (m.label.as_str(), m.sequence_number))
            .collect();
        assert_eq!(numbered, vec![("Plan signed", 1), ("Go live", 2)]);
        assert_eq!(geometry.milestones[0].connector_height, 3.0 * 41.0);
        assert_eq!(geometry.milestones[1].connector_height, 41.0);
        assert_eq!(geometry.milestone_table.len(), 2);

        assert_eq!(geometry.header_groups[0].label, "January 2024");
        assert_eq!(geometry.legend[0].name, "Review");
        assert!(geometry.current_day.is_some());
    }

    #[test]
    fn malformed_project_range_renders_one_day() {
        let mut snapshot = sample_snapshot();
        snapshot.project = Project::new(date(2024, 1, 10), date(2024, 1, 1));
        let options = RenderOptions::new(TimelineScale::Months, date(2024, 1, 10));

        let geometry = render_chart(&snapshot, &options);
        assert_eq!(geometry.total_days, 1);
        assert_eq!(geometry.start, geometry.end);
        assert_eq!(geometry.header.len(), 1);
        for shape in &geometry.intervals {
            assert_eq!(shape.left, 0.0);
            assert!((shape.width - 100.0).abs() < 1e-9);
        }
        assert!(geometry.current_day.is_none());
    }

    #[test]
    fn renders_at_the_last_supported_date() {
        let end = NaiveDate::MAX;
        let mut snapshot = sample_snapshot();
        snapshot.project = Project::new(end - chrono::Duration::days(40), end);

        for scale in [TimelineScale::Weeks, TimelineScale::Months, TimelineScale::Intervals] {
            let geometry = render_chart(&snapshot, &RenderOptions::new(scale, end));
            assert_eq!(geometry.total_days, 41);
            assert_eq!(geometry.end, end);
            assert!(geometry.header_groups.iter().all(|g| g.width > 0.0));
        }
    }

    #[test]
    fn geometry_serializes_to_json() {
        let options = RenderOptions::new(TimelineScale::Intervals, date(2024, 1, 16));
        let geometry = render_chart(&sample_snapshot(), &options);

        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["scale"], "intervals");
        assert_eq!(json["rows"][1]["kind"], "merged_parent");
        assert_eq!(json["intervals"][0]["fill_color"], "#0036aa");
        assert!(json.get("current_day").is_none());
    }
}
