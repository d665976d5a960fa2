use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::rows::RowPlan;
use crate::model::{Milestone, TaskId, TimelineAxis};

/// Vertical distance between the milestone lane and consecutive task rows.
pub const DEFAULT_ROW_HEIGHT: f64 = 41.0;

/// A numbered milestone marker with its connector line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneMarker {
    /// 1-based rank by date.
    pub sequence_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<Uuid>,
    pub task_id: TaskId,
    pub task_label: String,
    pub label: String,
    pub date: NaiveDate,
    pub left: f64,
    /// Row the connector ends on.
    pub row_index: usize,
    /// Connector length upward from the milestone lane; it stops at the top
    /// edge of `row_index`.
    pub connector_height: f64,
}

/// Number and position every milestone whose task is in the row plan.
///
/// Milestones pointing at a missing task, or at no task, are left out of
/// both the output and the numbering. Equal dates keep input order.
pub fn annotate_milestones(
    axis: &TimelineAxis,
    plan: &RowPlan,
    milestones: &[Milestone],
    row_height: f64,
) -> Vec<MilestoneMarker> {
    let mut anchored: Vec<(&Milestone, TaskId, usize)> = milestones
        .iter()
        .filter_map(|milestone| {
            let anchor = milestone
                .task_id
                .and_then(|task_id| plan.row_index_of(task_id).map(|row| (task_id, row)));
            if anchor.is_none() {
                debug!(title = %milestone.title, "dropping milestone without a task row");
            }
            anchor.map(|(task_id, row)| (milestone, task_id, row))
        })
        .collect();

    anchored.sort_by_key(|(milestone, ..)| milestone.date);

    let total_rows = plan.total_rows();
    anchored
        .into_iter()
        .enumerate()
        .map(|(rank, (milestone, task_id, row_index))| MilestoneMarker {
            sequence_number: rank + 1,
            milestone_id: milestone.id,
            task_id,
            task_label: plan.label_of(task_id).unwrap_or_default().to_string(),
            label: milestone.title.clone(),
            date: milestone.date,
            left: axis.date_to_percent(milestone.date),
            row_index,
            connector_height: (total_rows - row_index) as f64 * row_height,
        })
        .collect()
}

/// One line of the milestone legend table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneTableRow {
    pub number: usize,
    pub title: String,
    pub date: NaiveDate,
    pub task: String,
}

/// The legend table listing markers by number.
pub fn milestone_table(markers: &[MilestoneMarker]) -> Vec<MilestoneTableRow> {
    markers
        .iter()
        .map(|marker| MilestoneTableRow {
            number: marker.sequence_number,
            title: marker.label.clone(),
            date: marker.date,
            task: marker.task_label.clone(),
        })
        .collect()
}
