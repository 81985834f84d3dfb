//! Children above the age limit recorded as treated.

use survey_ingest::format_numeric;
use survey_map::LogicalField;
use survey_model::{IssueKind, QcIssue};

use super::skipped;
use crate::context::QcContext;
use crate::rules::{CHILD_AGE_LIMIT_MONTHS, RuleId};
use crate::values::is_affirmative;

pub fn check(ctx: &QcContext<'_>) -> Vec<QcIssue> {
    let mut issues = Vec::new();
    for child in ctx.auxiliary.values() {
        let (Some(age_field), Some(treated_field)) = (
            ctx.resolve_in(child, LogicalField::ChildAgeMonths),
            ctx.resolve_in(child, LogicalField::TreatmentGiven),
        ) else {
            skipped(RuleId::ChildAgeOverLimit, child, "child age or treatment");
            continue;
        };

        for row in 0..child.height() {
            let Some(age) = child.number(age_field, row) else {
                continue;
            };
            if age > CHILD_AGE_LIMIT_MONTHS
                && is_affirmative(child.text(treated_field, row).as_deref())
            {
                issues.push(ctx.child_issue(
                    child,
                    row,
                    IssueKind::ChildAgeOverLimit,
                    format!("Child age >59 months: {}", format_numeric(age)),
                ));
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::checks::test_support::{records, run_with};
    use crate::rules::RuleSet;

    #[test]
    fn over_age_and_treated_is_flagged_with_household_location() {
        let households = records(
            "household",
            vec![
                ("_uuid", vec![Some("u1"), Some("u2")]),
                ("lga", vec![Some("rimin_gado"), Some("kiru")]),
                ("unique_code", vec![Some("HH001"), Some("HH002")]),
            ],
        );
        let children = records(
            "child_info",
            vec![
                ("_submission__uuid", vec![Some("u2"), Some("u1"), Some("u1"), Some("zz")]),
                ("age_in_months", vec![Some("60"), Some("59"), Some("72"), Some("61")]),
                ("treatment_given", vec![Some("Yes"), Some("Yes"), Some("No"), Some("yes")]),
            ],
        );
        let mut auxiliary = BTreeMap::new();
        auxiliary.insert("child_info".to_string(), children);

        let issues = run_with(&households, &auxiliary, &RuleSet::default(), check);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].region.as_deref(), Some("Kiru"));
        assert_eq!(issues[0].household_id.as_deref(), Some("HH002"));
        assert_eq!(issues[0].description, "Child age >59 months: 60");
        assert_eq!(issues[0].source.sheet, "child_info");
        // Unlinked child keeps an empty location.
        assert_eq!(issues[1].region, None);
        assert_eq!(issues[1].source.row, 3);
    }
}
