//! Summary counts over a record set.

use std::collections::HashSet;

use survey_ingest::RecordSet;
use survey_map::{FieldCatalog, LogicalField};
use survey_model::{SubmissionMetrics, ValidationStatus};

/// Totals, distinct counts and validation tallies.
///
/// A metric whose field does not resolve stays 0.
pub fn compute_metrics(records: &RecordSet, catalog: &FieldCatalog) -> SubmissionMetrics {
    let mut metrics = SubmissionMetrics {
        total_submissions: records.height(),
        ..SubmissionMetrics::default()
    };
    if records.is_empty() {
        return metrics;
    }

    let distinct = |field| {
        records
            .resolve_field(catalog, field)
            .map_or(0, |name| distinct_count(records, name))
    };
    metrics.distinct_regions = distinct(LogicalField::Region);
    metrics.distinct_wards = distinct(LogicalField::Ward);
    metrics.distinct_communities = distinct(LogicalField::Community);
    metrics.distinct_enumerators = distinct(LogicalField::Enumerator);

    if let Some(status_field) = records.resolve_field(catalog, LogicalField::ValidationStatus) {
        for row in 0..records.height() {
            let status = records
                .text(status_field, row)
                .as_deref()
                .and_then(ValidationStatus::parse);
            match status {
                Some(ValidationStatus::Approved) => metrics.approved += 1,
                Some(status) if status.is_pending() => metrics.pending += 1,
                Some(ValidationStatus::Rejected) => metrics.rejected += 1,
                _ => {}
            }
        }
    }

    if let Some(eligible_field) = records.resolve_field(catalog, LogicalField::EligibleTotal) {
        let total: f64 = (0..records.height())
            .filter_map(|row| records.number(eligible_field, row))
            .sum();
        metrics.total_eligible = total.trunc() as i64;
    }

    metrics
}

/// Distinct non-null values of one field.
fn distinct_count(records: &RecordSet, field: &str) -> usize {
    (0..records.height())
        .filter_map(|row| records.text(field, row))
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::from_columns(
            "household",
            vec![
                ("lga", vec![Some("kiru"), Some("kiru"), Some("wudil"), None]),
                ("Q3.Ward", vec![Some("baawa"), Some("badafi"), Some("achika"), Some("achika")]),
                ("username", vec![Some("enum1"), Some("enum1"), Some("enum2"), None]),
                (
                    "_validation_status",
                    vec![
                        Some("Approved"),
                        Some("Not Validated"),
                        Some("On Hold"),
                        Some("Rejected"),
                    ],
                ),
                ("total_eligible", vec![Some("2"), Some("3"), Some("x"), None]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn counts_distinct_non_null_values() {
        let metrics = compute_metrics(&sample(), &FieldCatalog::default());
        assert_eq!(metrics.total_submissions, 4);
        assert_eq!(metrics.distinct_regions, 2);
        assert_eq!(metrics.distinct_wards, 3);
        assert_eq!(metrics.distinct_enumerators, 2);
        assert_eq!(metrics.distinct_communities, 0);
    }

    #[test]
    fn tallies_validation_status() {
        let metrics = compute_metrics(&sample(), &FieldCatalog::default());
        assert_eq!(metrics.approved, 1);
        assert_eq!(metrics.pending, 2);
        assert_eq!(metrics.rejected, 1);
        assert_eq!(metrics.total_eligible, 5);
    }

    #[test]
    fn missing_fields_leave_zeroes() {
        let records = RecordSet::from_columns("household", vec![("other", vec![Some("a")])]).unwrap();
        let metrics = compute_metrics(&records, &FieldCatalog::default());
        assert_eq!(
            metrics,
            SubmissionMetrics {
                total_submissions: 1,
                ..SubmissionMetrics::default()
            }
        );
    }
}
