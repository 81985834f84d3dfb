#![deny(unsafe_code)]

use std::path::Path;

use survey_model::CommunityEntry;
use tracing::debug;

use crate::error::{Result, StandardsError};
use crate::table::ReferenceTable;

pub const COL_REGION: &str = "Q2. Local Government Area";
pub const COL_WARD: &str = "Q3.Ward";
pub const COL_COMMUNITY_CODE: &str = "community_name";
pub const COL_COMMUNITY_NAME: &str = "Q4. Community Name";
pub const COL_PLANNED: &str = "Planned HH";

const REQUIRED_COLUMNS: [&str; 5] = [
    COL_REGION,
    COL_WARD,
    COL_COMMUNITY_CODE,
    COL_COMMUNITY_NAME,
    COL_PLANNED,
];

/// Community table for the Kano deployment.
pub const EMBEDDED_TABLE: &str = include_str!("../data/communities.tsv");

pub fn load_embedded() -> Result<ReferenceTable> {
    parse_table(EMBEDDED_TABLE, "embedded")
}

pub fn load_from_path(path: &Path) -> Result<ReferenceTable> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    parse_table(&text, &path.display().to_string())
}

/// Parse a tab-separated community table.
///
/// Every required column must be present and populated, and planned counts
/// must be positive integers. Duplicate community codes are allowed; lookups
/// keep the last occurrence.
pub fn parse_table(text: &str, origin: &str) -> Result<ReferenceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| StandardsError::Csv {
            origin: origin.to_string(),
            message: e.to_string(),
        })?
        .clone();

    let mut positions = [0usize; 5];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| StandardsError::MissingColumn {
                origin: origin.to_string(),
                column: column.to_string(),
            })?;
    }

    let mut entries = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StandardsError::Csv {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        let line = row.position().map_or(0, csv::Position::line);
        if row.iter().all(str::is_empty) {
            continue;
        }

        let mut values = [""; 5];
        for ((value, position), column) in
            values.iter_mut().zip(positions).zip(REQUIRED_COLUMNS)
        {
            *value = row
                .get(position)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| StandardsError::EmptyValue {
                    origin: origin.to_string(),
                    line,
                    column: column.to_string(),
                })?;
        }
        let [region, ward, code, name, planned] = values;

        let planned_households = planned
            .parse::<u32>()
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| StandardsError::InvalidPlanned {
                origin: origin.to_string(),
                line,
                value: planned.to_string(),
            })?;

        entries.push(CommunityEntry {
            region: region.to_string(),
            ward: ward.to_string(),
            community_code: code.to_string(),
            community_name: name.to_string(),
            planned_households,
        });
    }

    if entries.is_empty() {
        return Err(StandardsError::Empty {
            origin: origin.to_string(),
        });
    }
    debug!(origin, communities = entries.len(), "loaded community reference table");
    Ok(ReferenceTable::new(entries))
}
