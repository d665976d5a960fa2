use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::color::{parse_or, Rgb};
use super::rows::RowPlan;
use crate::model::{Category, CategoryId, Interval, TaskId, TimelineAxis};

/// A positioned interval bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalShape {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_id: Option<Uuid>,
    pub task_id: TaskId,
    pub row_index: usize,
    /// Unclamped dates, for tooltips.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub left: f64,
    pub width: f64,
    pub fill_color: Rgb,
    pub border_color: Rgb,
}

impl IntervalShape {
    /// Tooltip text, `start → end`.
    pub fn title(&self) -> String {
        format!("{} → {}", self.start_date, self.end_date)
    }
}

/// Inclusive day-bucket range covered by `start..=end`, clamped onto the
/// axis. The result always covers at least one bucket.
pub fn bucket_range(axis: &TimelineAxis, start: NaiveDate, end: NaiveDate) -> (usize, usize) {
    let start_idx = axis.index_of(start).unwrap_or_else(|| {
        if start < axis.start() {
            0
        } else {
            axis.last_index()
        }
    });
    let end_idx = axis.index_of(end).unwrap_or_else(|| {
        if end > axis.end() {
            axis.last_index()
        } else {
            0
        }
    });
    (start_idx, end_idx.max(start_idx))
}

/// Place every interval whose task owns a timeline row.
///
/// Fills are the row color shaded by `shade_percent`; borders take the
/// interval's category color when it has one.
pub fn place_intervals(
    axis: &TimelineAxis,
    plan: &RowPlan,
    intervals: &[Interval],
    categories: &[Category],
    shade_percent: f64,
) -> Vec<IntervalShape> {
    let category_by_id: HashMap<CategoryId, &Category> =
        categories.iter().map(|category| (category.id, category)).collect();

    intervals
        .iter()
        .filter_map(|interval| {
            let Some(row) = plan.row_for_task(interval.task_id) else {
                debug!(task_id = %interval.task_id, "skipping interval without a timeline row");
                return None;
            };

            let (first, last) = bucket_range(axis, interval.start_date, interval.end_date);
            let (left, width) = axis.span_percent(first, last);

            let fill_color = row.color.shade(shade_percent);
            let border_color = interval
                .category_id
                .and_then(|id| category_by_id.get(&id))
                .map(|category| parse_or(&category.color, fill_color))
                .unwrap_or(fill_color);

            Some(IntervalShape {
                interval_id: interval.id,
                task_id: interval.task_id,
                row_index: row.row_index,
                start_date: interval.start_date,
                end_date: interval.end_date,
                left,
                width,
                fill_color,
                border_color,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::color::{default_row_color, DEFAULT_SHADE_PERCENT};
    use crate::chart::rows::plan_rows;
    use crate::model::Task;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> TimelineAxis {
        TimelineAxis::new(date(2024, 1, 1), date(2024, 1, 31))
    }

    fn one_task() -> (Task, RowPlan) {
        let task = Task::new("Design", 0).with_color("#3b82f6");
        let plan = plan_rows(std::slice::from_ref(&task), default_row_color());
        (task, plan)
    }

    const SHADE: f64 = DEFAULT_SHADE_PERCENT as f64;

    #[test]
    fn interval_starting_before_project_clamps_to_zero() {
        let axis = january();
        let (first, last) = bucket_range(&axis, date(2023, 12, 25), date(2024, 1, 5));
        assert_eq!(first, 0);
        assert_eq!(last, axis.index_of(date(2024, 1, 5)).unwrap());
        assert_eq!(last, 4);
    }

    #[test]
    fn interval_ending_after_project_clamps_to_last() {
        let axis = january();
        assert_eq!(bucket_range(&axis, date(2024, 1, 20), date(2024, 3, 1)), (19, 30));
    }

    #[test]
    fn interval_fully_after_project_keeps_one_bucket() {
        let axis = january();
        assert_eq!(bucket_range(&axis, date(2024, 2, 10), date(2024, 2, 20)), (30, 30));
    }

    #[test]
    fn inverted_interval_is_one_bucket_wide() {
        let axis = january();
        assert_eq!(bucket_range(&axis, date(2024, 1, 10), date(2024, 1, 3)), (9, 9));
    }

    #[test]
    fn places_interval_with_shaded_fill() {
        let axis = january();
        let (task, plan) = one_task();
        let intervals = vec![Interval::new(task.id, date(2024, 1, 1), date(2024, 1, 31))];

        let shapes = place_intervals(&axis, &plan, &intervals, &[], SHADE);
        assert_eq!(shapes.len(), 1);
        let shape = &shapes[0];
        assert_eq!(shape.left, 0.0);
        assert!((shape.width - 100.0).abs() < 1e-9);
        assert_eq!(shape.fill_color.to_hex(), "#0036aa");
        assert_eq!(shape.border_color, shape.fill_color);
        assert_eq!(shape.title(), "2024-01-01 → 2024-01-31");
    }

    #[test]
    fn inside_intervals_stay_within_axis() {
        let axis = january();
        let (task, plan) = one_task();
        let intervals: Vec<Interval> = (1..=31)
            .map(|d| Interval::new(task.id, date(2024, 1, d), date(2024, 1, 31)))
            .collect();

        for shape in place_intervals(&axis, &plan, &intervals, &[], SHADE) {
            assert!(shape.width > 0.0);
            assert!(shape.left + shape.width <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn category_color_outlines_interval() {
        let axis = january();
        let (task, plan) = one_task();
        let category = Category::new("Review", "#f59e0b");
        let broken = Category::new("Broken", "orange");
        let intervals = vec![
            Interval::new(task.id, date(2024, 1, 2), date(2024, 1, 4)).with_category(category.id),
            Interval::new(task.id, date(2024, 1, 5), date(2024, 1, 6)).with_category(broken.id),
            Interval::new(task.id, date(2024, 1, 7), date(2024, 1, 8)).with_category(Uuid::from_u128(42)),
        ];

        let shapes = place_intervals(&axis, &plan, &intervals, &[category, broken], SHADE);
        assert_eq!(shapes[0].border_color, Rgb::new(0xf5, 0x9e, 0x0b));
        assert_eq!(shapes[1].border_color, shapes[1].fill_color);
        assert_eq!(shapes[2].border_color, shapes[2].fill_color);
    }

    #[test]
    fn intervals_without_a_row_are_skipped() {
        let axis = january();
        let parent = Task::new("Phase", 0);
        let child = Task::new_subtask("Step", parent.id, 0);
        let plan = plan_rows(&[parent.clone(), child.clone()], default_row_color());
        let intervals = vec![
            Interval::new(parent.id, date(2024, 1, 1), date(2024, 1, 2)),
            Interval::new(child.id, date(2024, 1, 3), date(2024, 1, 4)),
            Interval::new(Uuid::from_u128(7), date(2024, 1, 3), date(2024, 1, 4)),
        ];

        let shapes = place_intervals(&axis, &plan, &intervals, &[], SHADE);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].task_id, child.id);
        assert_eq!(shapes[0].row_index, 0);
    }
}
