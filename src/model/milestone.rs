use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::TaskId;

/// A dated marker attached to a task row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default)]
    pub id: Option<Uuid>,
    /// May point at a task that is not part of the snapshot.
    #[serde(default)]
    pub task_id: Option<TaskId>,
    pub date: NaiveDate,
    pub title: String,
}

impl Milestone {
    pub fn new(title: impl Into<String>, date: NaiveDate, task_id: Option<TaskId>) -> Self {
        Self {
            id: None,
            task_id,
            date,
            title: title.into(),
        }
    }
}
