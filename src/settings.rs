//! Persisted chart defaults (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chart::color::{DEFAULT_ROW_COLOR, DEFAULT_SHADE_PERCENT};
use crate::chart::milestones::DEFAULT_ROW_HEIGHT;
use crate::error::Result;
use crate::model::TimelineScale;

const APP_NAME: &str = "GanttGrid";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Connector length per row between the milestone lane and a task row.
    pub row_height: f64,
    /// Shade applied to row colors for interval fills; negative darkens.
    pub interval_shade_percent: i32,
    pub default_row_color: String,
    pub default_scale: TimelineScale,
    pub show_current_day: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            interval_shade_percent: DEFAULT_SHADE_PERCENT,
            default_row_color: DEFAULT_ROW_COLOR.to_string(),
            default_scale: TimelineScale::Weeks,
            show_current_day: false,
        }
    }
}

impl ChartSettings {
    /// Where the settings file is looked up by default.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(".").join(SETTINGS_FILE))
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                debug!(path = %path.display(), %err, "using default chart settings");
                Self::default()
            }
        }
    }

    /// Load from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        info!(path = %path.display(), "loaded chart settings");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
