//! Children totals cannot be negative.

use survey_model::{IssueKind, QcIssue};

use super::skipped;
use crate::context::QcContext;
use crate::rules::RuleId;

pub fn check(ctx: &QcContext<'_>) -> Vec<QcIssue> {
    let mut issues = Vec::new();
    let records = ctx.primary;
    let fields = records.resolver().fields_containing_all(&["child", "total"]);
    if fields.is_empty() {
        skipped(RuleId::NegativeChildCount, records, "children total");
        return issues;
    }

    for field in fields {
        for row in 0..records.height() {
            if records.number(field, row).is_some_and(|count| count < 0.0) {
                let raw = records.text(field, row).unwrap_or_default();
                issues.push(ctx.household_issue(
                    row,
                    IssueKind::NegativeChildrenCount,
                    format!("Negative value in {field}: {raw}"),
                ));
            }
        }
    }
    issues
}
