use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

/// A schedule row source. Nesting is one level deep: a subtask never has
/// children of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub parent_task_id: Option<TaskId>,
    /// Sibling ordering, ascending.
    #[serde(default)]
    pub display_order: i32,
    /// Raw `#rrggbb` color, validated when the row plan resolves it.
    #[serde(default)]
    pub color: Option<String>,
}

impl Task {
    /// Create a new top-level task with no color.
    pub fn new(name: impl Into<String>, display_order: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_task_id: None,
            display_order,
            color: None,
        }
    }

    /// Create a new subtask under `parent`.
    pub fn new_subtask(name: impl Into<String>, parent: TaskId, display_order: i32) -> Self {
        Self {
            parent_task_id: Some(parent),
            ..Self::new(name, display_order)
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A span of work on a task. May reach outside the project window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interval {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub task_id: TaskId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

impl Interval {
    pub fn new(task_id: TaskId, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: None,
            task_id,
            start_date,
            end_date,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }
}
