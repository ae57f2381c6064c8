//! Student directory export.
//!
//! Writes the filtered directory as a spreadsheet-friendly CSV with a
//! short header block (institution, title, filters, totals and the
//! diagnostic footer) followed by the student table.

pub mod diagnostic;

pub use diagnostic::{lookup_public_ip, DiagnosticConfig};

use crate::models::StudentRecord;
use crate::view::RosterFilter;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column headings of the student table.
pub const TABLE_HEADER: [&str; 6] = [
    "S.No",
    "Enrollment No",
    "Name",
    "Section",
    "Elective",
    "Gender",
];

/// Header block contents for an export.
#[derive(Debug, Clone)]
pub struct ExportHeader {
    pub institution: String,
    pub title: String,
    pub generated: NaiveDate,
    /// Public IP, or the placeholder when unavailable.
    pub ip: String,
}

/// Write the directory to any writer.
pub fn write_directory_csv<W: Write>(
    writer: W,
    records: &[&StudentRecord],
    filter: &RosterFilter,
    header: &ExportHeader,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record([header.institution.to_uppercase()])?;
    wtr.write_record([header.title.as_str()])?;
    wtr.write_record([format!("Filters: {}", filter.describe())])?;
    wtr.write_record([format!(
        "Total: {} students | Generated: {} | IP: {}",
        records.len(),
        header.generated.format("%Y-%m-%d"),
        header.ip
    )])?;
    wtr.write_record([""])?;
    wtr.write_record(TABLE_HEADER)?;

    for (index, student) in records.iter().enumerate() {
        wtr.write_record([
            (index + 1).to_string(),
            student.enrollment.clone(),
            student.name.clone(),
            student.section.clone(),
            student.elective.to_string(),
            student.gender.display_name().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export the filtered directory into `dir`, named after the filters.
///
/// Returns the path of the written file.
pub fn export_directory(
    dir: &Path,
    records: &[&StudentRecord],
    filter: &RosterFilter,
    header: &ExportHeader,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(format!("{}.csv", filter.export_file_stem()));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    write_directory_csv(file, records, filter, header)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Exported {} students to {}", records.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Elective, Gender};
    use tempfile::TempDir;

    fn students() -> Vec<StudentRecord> {
        vec![
            StudentRecord {
                id: 1,
                enrollment: "01418002722".to_string(),
                name: "Aarav Sharma".to_string(),
                section: "CSE A".to_string(),
                elective: Elective::Aiml,
                gender: Gender::Male,
            },
            StudentRecord {
                id: 2,
                enrollment: "01718002822".to_string(),
                name: "Meera Nair, Jr".to_string(),
                section: "CST D".to_string(),
                elective: Elective::Ds,
                gender: Gender::Female,
            },
        ]
    }

    fn header() -> ExportHeader {
        ExportHeader {
            institution: "Delhi Technical Campus".to_string(),
            title: "Student Directory".to_string(),
            generated: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            ip: "N/A".to_string(),
        }
    }

    #[test]
    fn test_write_directory_csv() {
        let records = students();
        let refs: Vec<&StudentRecord> = records.iter().collect();
        let mut buffer = Vec::new();

        write_directory_csv(&mut buffer, &refs, &RosterFilter::default(), &header()).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "DELHI TECHNICAL CAMPUS");
        assert_eq!(lines[1], "Student Directory");
        assert_eq!(lines[2], "Filters: All Students");
        assert_eq!(
            lines[3],
            "Total: 2 students | Generated: 2026-03-14 | IP: N/A"
        );
        assert_eq!(lines[5], "S.No,Enrollment No,Name,Section,Elective,Gender");
        assert_eq!(lines[6], "1,01418002722,Aarav Sharma,CSE A,AIML,Male");
        assert_eq!(lines[7], "2,01718002822,\"Meera Nair, Jr\",CST D,DS,Female");
    }

    #[test]
    fn test_export_directory_uses_filter_name() {
        let temp_dir = TempDir::new().unwrap();
        let records = students();
        let filter = RosterFilter {
            section: Some("CST D".to_string()),
            ..Default::default()
        };
        let matching = filter.apply(&records);

        let path =
            export_directory(&temp_dir.path().join("out"), &matching, &filter, &header()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Student_Directory_CST_D.csv"
        );
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Filters: Section: CST D"));
        assert!(content.contains("Total: 1 students"));
        assert!(!content.contains("Aarav"));
    }
}
