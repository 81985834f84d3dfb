//! Planned-versus-actual coverage per reference community.

use std::collections::HashMap;

use survey_ingest::{RecordSet, format_numeric, parse_f64};
use survey_map::{FieldCatalog, LogicalField};
use survey_model::CoverageRow;
use survey_standards::ReferenceTable;
use tracing::debug;

/// Community codes exported as floats (`50111.0`) compare as integers.
pub fn canonical_code(raw: &str) -> String {
    match parse_f64(raw) {
        Some(value) if value.fract() == 0.0 => format_numeric(value),
        _ => raw.trim().to_string(),
    }
}

/// Count records per community code and left-join the reference table.
///
/// One row per reference community, in reference order. Communities seen in
/// the data but absent from the reference table do not appear.
pub fn aggregate_coverage(
    records: &RecordSet,
    community_field: &str,
    reference: &ReferenceTable,
) -> Vec<CoverageRow> {
    let mut actual: HashMap<String, u32> = HashMap::new();
    for row in 0..records.height() {
        if let Some(code) = records.text(community_field, row) {
            *actual.entry(canonical_code(&code)).or_insert(0) += 1;
        }
    }

    let rows: Vec<CoverageRow> = reference
        .communities()
        .into_iter()
        .map(|entry| {
            let count = actual.get(&entry.community_code).copied().unwrap_or(0);
            CoverageRow::from_entry(entry, count)
        })
        .collect();

    let matched: u32 = rows.iter().map(|row| row.actual_households).sum();
    debug!(
        field = community_field,
        communities = rows.len(),
        records = records.height(),
        unmatched = records.height().saturating_sub(matched as usize),
        "aggregated community coverage"
    );
    rows
}

/// Coverage with the community code field resolved from the catalog.
///
/// None when no community code field exists.
pub fn coverage_for(
    records: &RecordSet,
    catalog: &FieldCatalog,
    reference: &ReferenceTable,
) -> Option<Vec<CoverageRow>> {
    let Some(field) = records.resolve_field(catalog, LogicalField::CommunityCode) else {
        debug!(sheet = records.name(), "no community code field, coverage unavailable");
        return None;
    };
    Some(aggregate_coverage(records, field, reference))
}
