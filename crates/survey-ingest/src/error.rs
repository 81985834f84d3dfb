//! Error types for survey ingestion.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while loading survey exports.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported export format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("workbook {path} has no sheets with a header row")]
    EmptyWorkbook { path: PathBuf },

    #[error("sheet '{sheet}' not found in {path}")]
    MissingSheet { path: PathBuf, sheet: String },

    #[error("failed to build record set '{name}': {source}")]
    Frame {
        name: String,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("loading {source_name} timed out after {timeout:?}")]
    Timeout {
        source_name: String,
        timeout: Duration,
    },

    #[error("loading {source_name} failed: {message}")]
    Source {
        source_name: String,
        message: String,
    },
}

impl IngestError {
    pub(crate) fn frame(name: &str, source: polars::error::PolarsError) -> Self {
        Self::Frame {
            name: name.to_string(),
            source,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
