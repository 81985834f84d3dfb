//! Scope restriction and dashboard filters.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use survey_ingest::{RecordSet, parse_submission_date};
use survey_map::{FieldCatalog, LogicalField};
use survey_model::AccessScope;
use tracing::debug;

use crate::error::Result;

/// Selecting this option is the same as not filtering.
pub const ALL_OPTION: &str = "All";

/// User-chosen filters, applied in field order after the scope restriction.
///
/// A criterion only applies when its concept resolves in the record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub region: Option<String>,
    pub ward: Option<String>,
    pub community: Option<String>,
    pub validation_status: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty() && self.date_from.is_none() && self.date_to.is_none()
    }

    fn criteria(&self) -> Vec<(LogicalField, &str)> {
        [
            (LogicalField::Region, self.region.as_deref()),
            (LogicalField::Ward, self.ward.as_deref()),
            (LogicalField::Community, self.community.as_deref()),
            (LogicalField::ValidationStatus, self.validation_status.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty() && *v != ALL_OPTION)
                .map(|v| (field, v))
        })
        .collect()
    }

    fn date_matches(&self, date: Option<NaiveDate>) -> bool {
        match date {
            Some(date) => {
                self.date_from.is_none_or(|from| date >= from)
                    && self.date_to.is_none_or(|to| date <= to)
            }
            None => false,
        }
    }
}

/// Restrict to the scope's region, then apply the user filters.
pub fn apply_scope(
    records: &RecordSet,
    scope: &AccessScope,
    filter: &RecordFilter,
    catalog: &FieldCatalog,
) -> Result<RecordSet> {
    let mut keep = vec![true; records.height()];

    let region_field = records.resolve_field(catalog, LogicalField::Region);
    if let (Some(region), Some(field)) = (scope.region(), region_field) {
        restrict(records, field, region, &mut keep);
    }

    for (concept, wanted) in filter.criteria() {
        if let Some(field) = records.resolve_field(catalog, concept) {
            restrict(records, field, wanted, &mut keep);
        }
    }

    if (filter.date_from.is_some() || filter.date_to.is_some())
        && let Some(field) = records.resolve_field(catalog, LogicalField::SubmissionDate)
    {
        for (row, kept) in keep.iter_mut().enumerate() {
            if *kept {
                let date = records
                    .text(field, row)
                    .as_deref()
                    .and_then(parse_submission_date);
                *kept = filter.date_matches(date);
            }
        }
    }

    let kept = keep.iter().filter(|k| **k).count();
    debug!(
        sheet = records.name(),
        records = records.height(),
        kept,
        admin = scope.is_admin(),
        "applied record filters"
    );
    Ok(records.filter(&keep)?)
}

fn restrict(records: &RecordSet, field: &str, wanted: &str, keep: &mut [bool]) {
    for (row, kept) in keep.iter_mut().enumerate() {
        if *kept {
            *kept = records.text(field, row).as_deref() == Some(wanted);
        }
    }
}

/// Sorted distinct values offered for each filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub wards: Vec<String>,
    pub communities: Vec<String>,
    pub statuses: Vec<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl FilterOptions {
    pub fn collect(records: &RecordSet, catalog: &FieldCatalog) -> Self {
        let values = |concept: LogicalField| -> Vec<String> {
            records
                .resolve_field(catalog, concept)
                .map(|field| {
                    (0..records.height())
                        .filter_map(|row| records.text(field, row))
                        .collect::<BTreeSet<_>>()
                        .into_iter()
                        .collect()
                })
                .unwrap_or_default()
        };
        let date_range = records
            .resolve_field(catalog, LogicalField::SubmissionDate)
            .and_then(|field| {
                let dates: BTreeSet<NaiveDate> = (0..records.height())
                    .filter_map(|row| {
                        records
                            .text(field, row)
                            .as_deref()
                            .and_then(parse_submission_date)
                    })
                    .collect();
                Some((*dates.first()?, *dates.last()?))
            });
        Self {
            regions: values(LogicalField::Region),
            wards: values(LogicalField::Ward),
            communities: values(LogicalField::Community),
            statuses: values(LogicalField::ValidationStatus),
            date_range,
        }
    }
}
