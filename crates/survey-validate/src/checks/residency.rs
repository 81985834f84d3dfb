//! Years living in the community must not exceed the reported age.

use survey_ingest::format_numeric;
use survey_map::LogicalField;
use survey_model::{IssueKind, QcIssue};

use super::skipped;
use crate::context::QcContext;
use crate::rules::{ResidencyAgeBasis, RuleId};

pub fn check(ctx: &QcContext<'_>) -> Vec<QcIssue> {
    let mut issues = Vec::new();
    let age_concept = match ctx.rules.residency_age_basis() {
        ResidencyAgeBasis::HouseholdHead => LogicalField::HeadAge,
        ResidencyAgeBasis::Respondent => LogicalField::RespondentAge,
    };

    let Some(years_field) = ctx.resolve(LogicalField::ResidenceYears) else {
        skipped(RuleId::ResidencyExceedsAge, ctx.primary, LogicalField::ResidenceYears.key());
        return issues;
    };
    let Some(age_field) = ctx.resolve(age_concept) else {
        skipped(RuleId::ResidencyExceedsAge, ctx.primary, age_concept.key());
        return issues;
    };

    let records = ctx.primary;
    for row in 0..records.height() {
        // Non-numeric values never compare.
        let (Some(years), Some(age)) = (records.number(years_field, row), records.number(age_field, row))
        else {
            continue;
        };
        if years > age {
            issues.push(ctx.household_issue(
                row,
                IssueKind::AgeInconsistency,
                format!(
                    "Years living ({}) > Age ({})",
                    format_numeric(years),
                    format_numeric(age)
                ),
            ));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::checks::test_support::{records, run_primary, run_with};
    use crate::rules::RuleSet;

    #[test]
    fn flags_strictly_greater_residency() {
        let set = records(
            "household",
            vec![
                ("Q22", vec![Some("30"), Some("20"), Some("25"), Some("ten")]),
                ("Q17", vec![Some("25"), Some("25"), Some("25"), Some("5")]),
                ("lga", vec![Some("kiru"), Some("kiru"), Some("kiru"), Some("kiru")]),
            ],
        );
        let issues = run_primary(&set, check);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::AgeInconsistency);
        assert_eq!(issues[0].description, "Years living (30) > Age (25)");
        assert_eq!(issues[0].region.as_deref(), Some("Kiru"));
        assert_eq!(issues[0].source.row, 0);
    }

    #[test]
    fn respondent_basis_uses_respondent_age() {
        let set = records(
            "household",
            vec![
                ("years_living", vec![Some("30")]),
                ("hh_head_age", vec![Some("50")]),
                ("respondent_age", vec![Some("20")]),
            ],
        );
        assert!(run_primary(&set, check).is_empty());

        let rules = RuleSet::default().with_residency_age_basis(ResidencyAgeBasis::Respondent);
        let issues = run_with(&set, &BTreeMap::new(), &rules, check);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].description, "Years living (30) > Age (20)");
    }

    #[test]
    fn skipped_without_age_field() {
        let set = records("household", vec![("Q22", vec![Some("30")])]);
        assert!(run_primary(&set, check).is_empty());
    }
}
