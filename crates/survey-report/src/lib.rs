//! Report generation for QC results.
//!
//! - **CSV**: the delimited issue export handed to field supervisors
//! - **JSON**: a machine-readable payload with the summary and every issue

mod csv_export;
mod json;

pub use csv_export::{QC_CSV_HEADERS, default_export_name, export_path, write_qc_csv, write_qc_csv_file};
pub use json::{REPORT_SCHEMA, REPORT_SCHEMA_VERSION, write_qc_report_json};
