//! JSON QC report payload.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use survey_model::{IssueSeverity, QcIssue};
use survey_validate::QcSummary;

pub const REPORT_SCHEMA: &str = "survey-qc.qc-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

const REPORT_FILE_NAME: &str = "qc_report.json";

#[derive(Serialize)]
struct QcReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    summary: &'a QcSummary,
    issues: Vec<QcIssueJson<'a>>,
}

#[derive(Serialize)]
struct QcIssueJson<'a> {
    issue_type: &'a str,
    priority: IssueSeverity,
    region: Option<&'a str>,
    ward: Option<&'a str>,
    community: Option<&'a str>,
    household_id: Option<&'a str>,
    validation_status: Option<&'a str>,
    description: &'a str,
    sheet: &'a str,
    row: usize,
}

/// Write `qc_report.json` into `output_dir` and return its path.
pub fn write_qc_report_json(
    output_dir: &Path,
    issues: &[QcIssue],
    summary: &QcSummary,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let output_path = output_dir.join(REPORT_FILE_NAME);
    let payload = QcReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        summary,
        issues: issues
            .iter()
            .map(|issue| QcIssueJson {
                issue_type: issue.kind.label(),
                priority: issue.severity(),
                region: issue.region.as_deref(),
                ward: issue.ward.as_deref(),
                community: issue.community.as_deref(),
                household_id: issue.household_id.as_deref(),
                validation_status: issue.validation_status.as_deref(),
                description: &issue.description,
                sheet: &issue.source.sheet,
                row: issue.source.row,
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&payload).context("serialize QC report")?;
    std::fs::write(&output_path, format!("{json}\n"))
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(output_path)
}
