use std::io::Write;
use std::path::Path;

use crate::chart::milestones::MilestoneTableRow;
use crate::error::Result;

/// Write the milestone table as semicolon-delimited CSV.
///
/// Columns: Number ; Description ; Date ; Task
/// Dates are formatted as YYYY-MM-DD.
/// Returns the number of milestones written.
pub fn write_milestones<W: Write>(rows: &[MilestoneTableRow], writer: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(["Number", "Description", "Date", "Task"])?;
    for row in rows {
        wtr.write_record([
            &row.number.to_string(),
            &row.title,
            &row.date.format("%Y-%m-%d").to_string(),
            &row.task,
        ])?;
    }

    wtr.flush()?;
    Ok(rows.len())
}

/// Export the milestone table to a CSV file.
pub fn export_milestones(rows: &[MilestoneTableRow], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    let written = write_milestones(rows, file)?;
    tracing::info!(path = %path.display(), written, "exported milestone table");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rows() -> Vec<MilestoneTableRow> {
        vec![
            MilestoneTableRow {
                number: 1,
                title: "Plan signed".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                task: "Kickoff".to_string(),
            },
            MilestoneTableRow {
                number: 2,
                title: "Go; live".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                task: "Frontend".to_string(),
            },
        ]
    }

    #[test]
    fn writes_header_and_rows() {
        let mut out = Vec::new();
        let written = write_milestones(&rows(), &mut out).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Number;Description;Date;Task");
        assert_eq!(lines[1], "1;Plan signed;2024-01-05;Kickoff");
        assert_eq!(lines[2], "2;\"Go; live\";2024-01-31;Frontend");
    }

    #[test]
    fn exports_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("milestones.csv");
        assert_eq!(export_milestones(&rows(), &path).unwrap(), 2);
        assert!(std::fs::read_to_string(&path).unwrap().contains("Kickoff"));
    }
}
