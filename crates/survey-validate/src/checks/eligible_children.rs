//! Households reporting zero eligible children. Advisory only.

use survey_model::{IssueKind, QcIssue};

use super::skipped;
use crate::context::QcContext;
use crate::rules::RuleId;

pub fn check(ctx: &QcContext<'_>) -> Vec<QcIssue> {
    let mut issues = Vec::new();
    let records = ctx.primary;
    let fields = records.resolver().fields_containing_all(&["eligible", "child"]);
    if fields.is_empty() {
        skipped(RuleId::ZeroEligibleChildren, records, "eligible children");
        return issues;
    }

    for field in fields {
        for row in 0..records.height() {
            if records.number(field, row) == Some(0.0) {
                issues.push(ctx.household_issue(
                    row,
                    IssueKind::NoEligibleChildren,
                    "Household has 0 eligible children".to_string(),
                ));
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{records, run_primary};

    #[test]
    fn flags_zero_only() {
        let set = records(
            "household",
            vec![(
                "No. of Eligible Children",
                vec![Some("0"), Some("0.0"), Some("2"), None, Some("none")],
            )],
        );
        let issues = run_primary(&set, check);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.kind == IssueKind::NoEligibleChildren));
    }
}
