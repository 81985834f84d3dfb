//! QC rule modules.
//!
//! Each module performs one rule and returns the issues it found.

mod child_age;
mod child_duplicate;
mod education_occupation;
mod eligible_children;
mod household_duplicate;
mod negative_children;
mod residency;
mod treatment_duration;
mod urban_amenities;

use std::collections::HashMap;

use survey_ingest::RecordSet;
use survey_model::QcIssue;
use tracing::debug;

use crate::context::QcContext;
use crate::rules::RuleId;

/// Run one rule.
pub fn run(rule: RuleId, ctx: &QcContext<'_>) -> Vec<QcIssue> {
    match rule {
        RuleId::ResidencyExceedsAge => residency::check(ctx),
        RuleId::EducationOccupationMismatch => education_occupation::check(ctx),
        RuleId::NegativeChildCount => negative_children::check(ctx),
        RuleId::ZeroEligibleChildren => eligible_children::check(ctx),
        RuleId::ChildAgeOverLimit => child_age::check(ctx),
        RuleId::TreatmentDuration => treatment_duration::check(ctx),
        RuleId::ChildDuplicate => child_duplicate::check(ctx),
        RuleId::HouseholdDuplicate => household_duplicate::check(ctx),
        RuleId::UrbanNoAmenities => urban_amenities::check(ctx),
    }
}

/// Log a rule that cannot run on a sheet.
fn skipped(rule: RuleId, records: &RecordSet, missing: &str) {
    debug!(
        rule = %rule,
        sheet = records.name(),
        missing,
        "skipping rule, required field not found"
    );
}

/// Rows whose non-null value in `field` appears more than once, in row order.
///
/// Every copy is returned, not just the repeats.
fn shared_value_rows(records: &RecordSet, field: &str) -> Vec<(usize, String)> {
    let values: Vec<(usize, String)> = (0..records.height())
        .filter_map(|row| records.text(field, row).map(|value| (row, value)))
        .collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, value) in &values {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    let shared: Vec<usize> = values
        .iter()
        .filter(|(_, value)| counts.get(value.as_str()).copied().unwrap_or(0) > 1)
        .map(|(row, _)| *row)
        .collect();
    values
        .into_iter()
        .filter(|(row, _)| shared.binary_search(row).is_ok())
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::records;
    use super::*;

    #[test]
    fn shared_values_include_every_copy() {
        let set = records(
            "household",
            vec![(
                "unique_code",
                vec![Some("A"), Some("B"), Some("A"), None, None, Some("A"), Some("C")],
            )],
        );
        let rows: Vec<usize> = shared_value_rows(&set, "unique_code")
            .into_iter()
            .map(|(row, _)| row)
            .collect();
        assert_eq!(rows, vec![0, 2, 5]);
    }
}
