//! Submission tallies behind the dashboard charts.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use survey_ingest::{RecordSet, parse_submission_date};
use survey_map::{FieldCatalog, LogicalField, title_case};

/// Ward chart shows the busiest wards only.
pub const TOP_WARDS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub label: String,
    pub count: usize,
}

/// Count records per non-null value, most frequent first, ties by label.
pub fn tally_field(records: &RecordSet, field: &str) -> Vec<Tally> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in 0..records.height() {
        if let Some(value) = records.text(field, row) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    let mut tallies: Vec<Tally> = counts
        .into_iter()
        .map(|(label, count)| Tally { label, count })
        .collect();
    tallies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    tallies
}

fn display_tally(records: &RecordSet, field: &str) -> Vec<Tally> {
    tally_field(records, field)
        .into_iter()
        .map(|tally| Tally {
            label: title_case(&tally.label),
            count: tally.count,
        })
        .collect()
}

pub fn region_distribution(records: &RecordSet, catalog: &FieldCatalog) -> Option<Vec<Tally>> {
    let field = records.resolve_field(catalog, LogicalField::Region)?;
    Some(display_tally(records, field))
}

pub fn ward_distribution(records: &RecordSet, catalog: &FieldCatalog) -> Option<Vec<Tally>> {
    let field = records.resolve_field(catalog, LogicalField::Ward)?;
    let mut tallies = display_tally(records, field);
    tallies.truncate(TOP_WARDS);
    Some(tallies)
}

pub fn status_distribution(records: &RecordSet, catalog: &FieldCatalog) -> Option<Vec<Tally>> {
    let field = records.resolve_field(catalog, LogicalField::ValidationStatus)?;
    Some(tally_field(records, field))
}

/// Submissions per calendar day, in date order. Unparseable dates are dropped.
pub fn timeline(records: &RecordSet, catalog: &FieldCatalog) -> Option<Vec<(NaiveDate, usize)>> {
    let field = records.resolve_field(catalog, LogicalField::SubmissionDate)?;
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for row in 0..records.height() {
        if let Some(date) = records
            .text(field, row)
            .as_deref()
            .and_then(parse_submission_date)
        {
            *days.entry(date).or_insert(0) += 1;
        }
    }
    (!days.is_empty()).then(|| days.into_iter().collect())
}
