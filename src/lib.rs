//! Timeline grid geometry for project schedules.
//!
//! A [`Snapshot`](model::Snapshot) of project, tasks, intervals, milestones
//! and categories goes in; [`render_chart`](chart::render_chart) returns the
//! header buckets, row cells, interval bars and milestone markers as
//! percentages of the day axis.

pub mod chart;
pub mod error;
pub mod io;
pub mod model;
pub mod settings;

pub use chart::{render_chart, ChartGeometry, RenderOptions};
pub use error::{Error, Result};
pub use model::{Snapshot, TimelineScale};
pub use settings::ChartSettings;
