//! Task rows after parent/child merging.
//!
//! A top-level task without subtasks gets one row of its own. A top-level
//! task with subtasks gets no row; its label becomes a merged cell spanning
//! the rows of its children.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use super::color::{parse_or, Rgb};
use crate::model::{Task, TaskId};

/// One timeline row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedRow {
    pub row_index: usize,
    pub task_id: TaskId,
    pub label: String,
    pub color: Rgb,
}

/// A label-column entry, in display order. A merged header immediately
/// precedes the child rows it spans.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEntry {
    Standalone(PlannedRow),
    MergedParentHeader {
        task_id: TaskId,
        label: String,
        color: Rgb,
        first_row: usize,
        child_count: usize,
    },
    Child {
        row: PlannedRow,
        parent_id: TaskId,
    },
}

impl RowEntry {
    /// The timeline row this entry occupies, if any.
    pub fn row(&self) -> Option<&PlannedRow> {
        match self {
            Self::Standalone(row) | Self::Child { row, .. } => Some(row),
            Self::MergedParentHeader { .. } => None,
        }
    }
}

/// The ordered row plan every placement step reads from.
#[derive(Debug, Clone, Default)]
pub struct RowPlan {
    entries: Vec<RowEntry>,
    row_count: usize,
}

impl RowPlan {
    pub fn entries(&self) -> &[RowEntry] {
        &self.entries
    }

    /// Timeline rows in order, merged headers excluded.
    pub fn rows(&self) -> impl Iterator<Item = &PlannedRow> {
        self.entries.iter().filter_map(RowEntry::row)
    }

    pub fn total_rows(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Whether any parent cell is merged (three-column label layout).
    pub fn has_subtasks(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, RowEntry::MergedParentHeader { .. }))
    }

    /// The timeline row owned by `task_id`. Merged parents own none.
    pub fn row_for_task(&self, task_id: TaskId) -> Option<&PlannedRow> {
        self.rows().find(|row| row.task_id == task_id)
    }

    /// The topmost row index covered by `task_id`: its own row, or the first
    /// child row under a merged parent cell.
    pub fn row_index_of(&self, task_id: TaskId) -> Option<usize> {
        self.entries.iter().find_map(|entry| match entry {
            RowEntry::Standalone(row) | RowEntry::Child { row, .. } if row.task_id == task_id => {
                Some(row.row_index)
            }
            RowEntry::MergedParentHeader {
                task_id: id,
                first_row,
                ..
            } if *id == task_id => Some(*first_row),
            _ => None,
        })
    }

    /// Display label of the entry for `task_id`.
    pub fn label_of(&self, task_id: TaskId) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            RowEntry::Standalone(row) | RowEntry::Child { row, .. } if row.task_id == task_id => {
                Some(row.label.as_str())
            }
            RowEntry::MergedParentHeader { task_id: id, label, .. } if *id == task_id => {
                Some(label.as_str())
            }
            _ => None,
        })
    }
}

fn resolve_color(raw: Option<&str>, fallback: Rgb) -> Rgb {
    match raw {
        Some(hex) => parse_or(hex, fallback),
        None => fallback,
    }
}

/// Build the row plan for `tasks`.
///
/// Siblings are ordered by `display_order`, keeping input order on ties.
/// Subtasks whose parent is not a top-level task of the snapshot get no row.
pub fn plan_rows(tasks: &[Task], default_color: Rgb) -> RowPlan {
    let mut by_parent: HashMap<Option<TaskId>, Vec<&Task>> = HashMap::new();
    for task in tasks {
        by_parent.entry(task.parent_task_id).or_default().push(task);
    }
    for siblings in by_parent.values_mut() {
        siblings.sort_by_key(|task| task.display_order);
    }

    let top_level = by_parent.get(&None).cloned().unwrap_or_default();
    let top_ids: HashSet<TaskId> = top_level.iter().map(|task| task.id).collect();

    let orphans = tasks
        .iter()
        .filter(|task| matches!(task.parent_task_id, Some(parent) if !top_ids.contains(&parent)))
        .count();
    if orphans > 0 {
        debug!(orphans, "skipping subtasks without a top-level parent");
    }

    let mut plan = RowPlan::default();

    for parent in top_level {
        let parent_color = resolve_color(parent.color.as_deref(), default_color);
        let children = by_parent.get(&Some(parent.id)).map(Vec::as_slice).unwrap_or_default();

        if children.is_empty() {
            plan.entries.push(RowEntry::Standalone(PlannedRow {
                row_index: plan.row_count,
                task_id: parent.id,
                label: parent.name.clone(),
                color: parent_color,
            }));
            plan.row_count += 1;
            continue;
        }

        plan.entries.push(RowEntry::MergedParentHeader {
            task_id: parent.id,
            label: parent.name.clone(),
            color: parent_color,
            first_row: plan.row_count,
            child_count: children.len(),
        });
        for child in children {
            plan.entries.push(RowEntry::Child {
                row: PlannedRow {
                    row_index: plan.row_count,
                    task_id: child.id,
                    label: child.name.clone(),
                    color: resolve_color(child.color.as_deref(), parent_color),
                },
                parent_id: parent.id,
            });
            plan.row_count += 1;
        }
    }

    plan
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Standalone,
    MergedParent,
    Child,
}

/// A renderable label cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowShape {
    pub kind: RowKind,
    pub task_id: TaskId,
    /// First timeline row covered by the cell.
    pub row_index: usize,
    pub row_span: usize,
    pub label: String,
    pub color: Rgb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TaskId>,
}

/// Label cells for every plan entry, in display order.
pub fn row_shapes(plan: &RowPlan) -> Vec<RowShape> {
    plan.entries()
        .iter()
        .map(|entry| match entry {
            RowEntry::Standalone(row) => RowShape {
                kind: RowKind::Standalone,
                task_id: row.task_id,
                row_index: row.row_index,
                row_span: 1,
                label: row.label.clone(),
                color: row.color,
                parent_id: None,
            },
            RowEntry::MergedParentHeader {
                task_id,
                label,
                color,
                first_row,
                child_count,
            } => RowShape {
                kind: RowKind::MergedParent,
                task_id: *task_id,
                row_index: *first_row,
                row_span: *child_count,
                label: label.clone(),
                color: *color,
                parent_id: None,
            },
            RowEntry::Child { row, parent_id } => RowShape {
                kind: RowKind::Child,
                task_id: row.task_id,
                row_index: row.row_index,
                row_span: 1,
                label: row.label.clone(),
                color: row.color,
                parent_id: Some(*parent_id),
            },
        })
        .collect()
}
