//! Workbook readers for CSV and spreadsheet exports.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::Timelike;
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::polars_utils::format_numeric;
use crate::record::RecordSet;
use crate::workbook::Workbook;

/// Raw sheet contents: header plus rows of nullable cells.
struct SheetTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// Read an export, choosing the reader from the file extension.
///
/// `primary_sheet` selects the household sheet by name; the first sheet is
/// used otherwise. CSV exports always have a single sheet.
pub fn read_workbook(path: &Path, primary_sheet: Option<&str>) -> Result<Workbook> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => read_csv_workbook(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_xlsx_workbook(path, primary_sheet),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

pub fn read_csv_workbook(path: &Path) -> Result<Workbook> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        raw_rows.push(record.iter().map(normalize_cell).collect());
    }

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("household")
        .to_string();
    let table = split_header(name, raw_rows).ok_or_else(|| IngestError::EmptyWorkbook {
        path: path.to_path_buf(),
    })?;
    let primary = table_to_record_set(table)?;
    info!(
        path = %path.display(),
        records = primary.height(),
        fields = primary.field_names().len(),
        "loaded CSV export"
    );
    Ok(Workbook::new(primary))
}

pub fn read_xlsx_workbook(path: &Path, primary_sheet: Option<&str>) -> Result<Workbook> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut tables = Vec::new();
    for sheet in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| IngestError::Workbook {
                path: path.to_path_buf(),
                message: format!("sheet '{sheet}': {e}"),
            })?;
        let raw_rows: Vec<Vec<Option<String>>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        match split_header(sheet.clone(), raw_rows) {
            Some(table) => tables.push(table),
            None => debug!(sheet = %sheet, "skipping sheet without header row"),
        }
    }

    if tables.is_empty() {
        return Err(IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        });
    }
    let primary_idx = match primary_sheet {
        Some(wanted) => tables
            .iter()
            .position(|table| table.name == wanted)
            .ok_or_else(|| IngestError::MissingSheet {
                path: path.to_path_buf(),
                sheet: wanted.to_string(),
            })?,
        None => 0,
    };

    let primary = table_to_record_set(tables.remove(primary_idx))?;
    let mut auxiliary = BTreeMap::new();
    for table in tables {
        let records = table_to_record_set(table)?;
        auxiliary.insert(records.name().to_string(), records);
    }
    info!(
        path = %path.display(),
        primary = primary.name(),
        records = primary.height(),
        auxiliary_sheets = auxiliary.len(),
        "loaded workbook export"
    );
    Ok(Workbook { primary, auxiliary })
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => normalize_cell(s),
        Data::Float(f) => Some(format_numeric(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.num_seconds_from_midnight() == 0 => {
                Some(value.format("%Y-%m-%d").to_string())
            }
            Some(value) => Some(value.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Some(format_numeric(dt.as_f64())),
        },
        other => normalize_cell(&other.to_string()),
    }
}

/// Take the first non-empty row as the header; drop fully empty data rows.
fn split_header(name: String, raw_rows: Vec<Vec<Option<String>>>) -> Option<SheetTable> {
    let mut rows = raw_rows
        .into_iter()
        .filter(|row| row.iter().any(Option::is_some));
    let header_row = rows.next()?;
    let headers = unique_headers(&header_row);
    let rows = rows
        .map(|mut row| {
            row.resize(headers.len(), None);
            row
        })
        .collect();
    Some(SheetTable {
        name,
        headers,
        rows,
    })
}

/// Blank headers become `column_<n>`; repeated headers get the first free
/// `.1`, `.2` suffix.
fn unique_headers(raw: &[Option<String>]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    raw.iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = header
                .as_deref()
                .map(|h| h.split_whitespace().collect::<Vec<_>>().join(" "))
                .unwrap_or_else(|| format!("column_{}", idx + 1));
            let mut name = base.clone();
            if taken.contains(&name) {
                let suffix = next_suffix.entry(base.clone()).or_insert(1);
                loop {
                    name = format!("{base}.{suffix}");
                    *suffix += 1;
                    if !taken.contains(&name) {
                        break;
                    }
                }
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

fn table_to_record_set(table: SheetTable) -> Result<RecordSet> {
    let SheetTable {
        name,
        headers,
        rows,
    } = table;
    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(rows.len()); headers.len()];
    for row in rows {
        for (column, cell) in columns.iter_mut().zip(row) {
            column.push(cell);
        }
    }
    RecordSet::from_columns(name, headers.into_iter().zip(columns))
}
