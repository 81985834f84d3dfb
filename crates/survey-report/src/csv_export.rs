//! Delimited export of QC issues.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use survey_model::QcIssue;

/// Export columns. The internal row reference is not exported.
pub const QC_CSV_HEADERS: [&str; 8] = [
    "Region",
    "Ward",
    "Community",
    "Household ID",
    "Validation Status",
    "Issue Type",
    "Priority",
    "Description",
];

/// Default download name, e.g. `qc_report_2025-08-14.csv`.
pub fn default_export_name(date: NaiveDate) -> String {
    format!("qc_report_{}.csv", date.format("%Y-%m-%d"))
}

/// Where the export goes: `requested` when given, else the dated default
/// name in the working directory.
pub fn export_path(requested: Option<&Path>, today: NaiveDate) -> PathBuf {
    requested
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_export_name(today)))
}

/// Write issues as CSV with a header row. Absent values are empty cells.
pub fn write_qc_csv<W: Write>(writer: W, issues: &[QcIssue]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(QC_CSV_HEADERS)
        .context("write QC export header")?;
    for issue in issues {
        let priority = issue.severity();
        out.write_record([
            issue.region.as_deref().unwrap_or(""),
            issue.ward.as_deref().unwrap_or(""),
            issue.community.as_deref().unwrap_or(""),
            issue.household_id.as_deref().unwrap_or(""),
            issue.validation_status.as_deref().unwrap_or(""),
            issue.kind.label(),
            priority.label(),
            issue.description.as_str(),
        ])
        .with_context(|| format!("write QC export row for {}", issue.source.sheet))?;
    }
    out.flush().context("flush QC export")?;
    Ok(())
}

/// Write the CSV export to `path`, creating parent directories.
pub fn write_qc_csv_file(path: &Path, issues: &[QcIssue]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_qc_csv(file, issues)
}

#[cfg(test)]
mod tests {
    use survey_model::{IssueKind, SourceRow};

    use super::*;

    #[test]
    fn export_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        assert_eq!(default_export_name(date), "qc_report_2025-08-04.csv");
    }

    #[test]
    fn export_path_defaults_to_dated_name() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        assert_eq!(export_path(None, date), PathBuf::from("qc_report_2025-08-14.csv"));
        assert_eq!(
            export_path(Some(Path::new("out/kiru.csv")), date),
            PathBuf::from("out/kiru.csv")
        );
    }

    #[test]
    fn rows_omit_row_reference() {
        let issue = QcIssue {
            region: Some("Kiru".to_string()),
            ward: None,
            community: Some("Baawa, Cikin Gari".to_string()),
            household_id: Some("HH001".to_string()),
            validation_status: None,
            kind: IssueKind::HouseholdDuplicate,
            description: "Duplicate unique_code: HH001".to_string(),
            source: SourceRow::new("household", 7),
        };
        let mut buf = Vec::new();
        write_qc_csv(&mut buf, &[issue]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Region,Ward,Community,Household ID,Validation Status,Issue Type,Priority,Description"
        );
        assert_eq!(
            lines[1],
            "Kiru,,\"Baawa, Cikin Gari\",HH001,,HH Duplicate,High,Duplicate unique_code: HH001"
        );
    }
}
