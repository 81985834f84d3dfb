#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference table {origin}: {message}")]
    Csv { origin: String, message: String },

    #[error("reference table {origin} is missing required column: {column}")]
    MissingColumn { origin: String, column: String },

    #[error("reference table {origin} line {line}: empty {column}")]
    EmptyValue {
        origin: String,
        line: u64,
        column: String,
    },

    #[error("reference table {origin} line {line}: invalid planned household count {value:?}")]
    InvalidPlanned {
        origin: String,
        line: u64,
        value: String,
    },

    #[error("reference table {origin} has no rows")]
    Empty { origin: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
