pub mod category;
pub mod milestone;
pub mod project;
pub mod task;
pub mod timeline;

pub use category::{Category, CategoryId};
pub use milestone::Milestone;
pub use project::{Project, Snapshot};
pub use task::{Interval, Task, TaskId};
pub use timeline::{TimelineAxis, TimelineScale};
