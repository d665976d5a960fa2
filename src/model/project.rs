use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::category::Category;
use super::milestone::Milestone;
use super::task::{Interval, Task};

/// The project window every chart is laid out against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Project {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start_date,
            end_date,
        }
    }

    /// The `(start, end)` window used for layout.
    ///
    /// An inverted range collapses to a single day anchored at `start_date`.
    pub fn effective_range(&self) -> (NaiveDate, NaiveDate) {
        if self.end_date < self.start_date {
            warn!(
                start = %self.start_date,
                end = %self.end_date,
                "project ends before it starts, clamping to a 1-day window"
            );
            (self.start_date, self.start_date)
        } else {
            (self.start_date, self.end_date)
        }
    }
}

/// Everything one chart computation needs, as handed over by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub project: Project,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub intervals: Vec<Interval>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Snapshot {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            tasks: Vec::new(),
            intervals: Vec::new(),
            milestones: Vec::new(),
            categories: Vec::new(),
        }
    }
}
