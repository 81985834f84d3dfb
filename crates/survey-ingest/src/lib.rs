//! Ingestion of survey exports into record sets.
//!
//! A [`Workbook`] holds one primary household record set and any number of
//! auxiliary child repeat-group sets keyed by sheet name. Every cell is kept
//! as nullable text; numeric interpretation happens at the point of use.

pub mod dates;
pub mod error;
pub mod polars_utils;
pub mod preprocess;
pub mod reader;
pub mod record;
pub mod source;
pub mod workbook;

pub use dates::parse_submission_date;
pub use error::{IngestError, Result};
pub use polars_utils::{any_to_string, any_to_string_non_empty, format_numeric, parse_f64};
pub use preprocess::{COMMUNITY_CODE_COLUMN, COMMUNITY_NAME_COLUMN, RAW_COMMUNITY_CODE_COLUMN, preprocess};
pub use reader::{read_csv_workbook, read_workbook, read_xlsx_workbook};
pub use record::RecordSet;
pub use source::{
    Clock, FetchCache, FetchOutcome, FileSource, SubmissionSource, SystemClock, TimeoutSource,
    load_or_empty,
};
pub use workbook::Workbook;
