//! Data-quality alerts shown above the dashboard.

use std::collections::HashSet;

use serde::Serialize;
use survey_ingest::RecordSet;
use survey_map::{FieldCatalog, LogicalField};
use survey_model::ValidationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityAlert {
    pub level: AlertLevel,
    pub message: String,
}

/// Fields whose missing values are reported.
const KEY_FIELDS: [LogicalField; 4] = [
    LogicalField::Region,
    LogicalField::Community,
    LogicalField::SubmissionDate,
    LogicalField::Enumerator,
];

/// Missing key values, repeated submission ids and rejected submissions.
pub fn data_quality_alerts(records: &RecordSet, catalog: &FieldCatalog) -> Vec<QualityAlert> {
    let mut alerts = Vec::new();
    let total = records.height();
    if total == 0 {
        return alerts;
    }

    for concept in KEY_FIELDS {
        let Some(field) = records.resolve_field(catalog, concept) else {
            continue;
        };
        let missing = (0..total)
            .filter(|row| records.text(field, *row).is_none())
            .count();
        if missing > 0 {
            let share = missing as f64 / total as f64 * 100.0;
            alerts.push(QualityAlert {
                level: AlertLevel::Warning,
                message: format!("Missing values in {field}: {missing} records ({share:.1}%)"),
            });
        }
    }

    if let Some(field) = records.resolve_field(catalog, LogicalField::SubmissionId) {
        let mut seen = HashSet::new();
        let repeated = (0..total)
            .filter_map(|row| records.text(field, row))
            .filter(|id| !seen.insert(id.clone()))
            .count();
        if repeated > 0 {
            alerts.push(QualityAlert {
                level: AlertLevel::Danger,
                message: format!("Potential duplicate submissions: {repeated} records"),
            });
        }
    }

    if let Some(field) = records.resolve_field(catalog, LogicalField::ValidationStatus) {
        let rejected = (0..total)
            .filter(|row| {
                records.text(field, *row).as_deref().and_then(ValidationStatus::parse)
                    == Some(ValidationStatus::Rejected)
            })
            .count();
        if rejected > 0 {
            alerts.push(QualityAlert {
                level: AlertLevel::Danger,
                message: format!("Rejected submissions: {rejected} records need review"),
            });
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_problem_once() {
        let records = RecordSet::from_columns(
            "household",
            vec![
                ("Q2. Local Government Area", vec![Some("kiru"), None, Some("kiru"), Some("kiru")]),
                ("_uuid", vec![Some("a"), Some("a"), Some("a"), Some("b")]),
                (
                    "_validation_status",
                    vec![Some("Rejected"), Some("Approved"), None, Some("Rejected")],
                ),
            ],
        )
        .unwrap();
        let alerts = data_quality_alerts(&records, &FieldCatalog::default());
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].level, AlertLevel::Warning);
        assert_eq!(
            alerts[0].message,
            "Missing values in Q2. Local Government Area: 1 records (25.0%)"
        );
        assert_eq!(alerts[1].message, "Potential duplicate submissions: 2 records");
        assert_eq!(alerts[2].message, "Rejected submissions: 2 records need review");
    }

    #[test]
    fn clean_data_has_no_alerts() {
        let records =
            RecordSet::from_columns("household", vec![("_uuid", vec![Some("a"), Some("b")])])
                .unwrap();
        assert!(data_quality_alerts(&records, &FieldCatalog::default()).is_empty());
    }
}
