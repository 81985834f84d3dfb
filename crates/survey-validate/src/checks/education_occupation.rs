//! No formal education paired with a professional occupation.

use survey_map::{LogicalField, contains_ignore_case};
use survey_model::{IssueKind, QcIssue};

use super::skipped;
use crate::context::QcContext;
use crate::rules::RuleId;

const NO_EDUCATION: &str = "no formal education";
const SKILLED_OCCUPATIONS: [&str; 3] = ["professional", "technical", "managerial"];

pub fn check(ctx: &QcContext<'_>) -> Vec<QcIssue> {
    let mut issues = Vec::new();
    let (Some(education_field), Some(occupation_field)) = (
        ctx.resolve(LogicalField::Education),
        ctx.resolve(LogicalField::Occupation),
    ) else {
        skipped(RuleId::EducationOccupationMismatch, ctx.primary, "education or occupation");
        return issues;
    };

    let records = ctx.primary;
    for row in 0..records.height() {
        let (Some(education), Some(occupation)) = (
            records.text(education_field, row),
            records.text(occupation_field, row),
        ) else {
            continue;
        };
        let skilled = SKILLED_OCCUPATIONS
            .iter()
            .any(|needle| contains_ignore_case(&occupation, needle));
        if contains_ignore_case(&education, NO_EDUCATION) && skilled {
            issues.push(ctx.household_issue(
                row,
                IssueKind::EducationOccupationMismatch,
                "No formal education but professional occupation".to_string(),
            ));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{records, run_primary};

    #[test]
    fn requires_both_conditions() {
        let set = records(
            "household",
            vec![
                (
                    "education",
                    vec![
                        Some("No Formal Education"),
                        Some("no formal education"),
                        Some("Secondary"),
                        None,
                    ],
                ),
                (
                    "occupation",
                    vec![
                        Some("Technical/Associate"),
                        Some("Farmer"),
                        Some("Professional"),
                        Some("Managerial"),
                    ],
                ),
            ],
        );
        let issues = run_primary(&set, check);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].source.row, 0);
    }
}
