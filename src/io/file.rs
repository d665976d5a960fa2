use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::chart::ChartGeometry;
use crate::error::Result;
use crate::model::Snapshot;

/// Load a snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let json = std::fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&json)?;
    info!(
        path = %path.display(),
        tasks = snapshot.tasks.len(),
        intervals = snapshot.intervals.len(),
        milestones = snapshot.milestones.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Write geometry as pretty-printed JSON.
pub fn write_geometry<W: Write>(geometry: &ChartGeometry, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, geometry)?;
    writeln!(writer)?;
    Ok(())
}

/// Save geometry to a JSON file.
pub fn save_geometry(geometry: &ChartGeometry, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_geometry(geometry, std::io::BufWriter::new(file))?;
    info!(path = %path.display(), "wrote chart geometry");
    Ok(())
}
