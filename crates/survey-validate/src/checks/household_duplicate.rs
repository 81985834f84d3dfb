//! Household unique codes must not repeat.

use survey_map::LogicalField;
use survey_model::{IssueKind, QcIssue};

use super::{shared_value_rows, skipped};
use crate::context::QcContext;
use crate::rules::RuleId;

pub fn check(ctx: &QcContext<'_>) -> Vec<QcIssue> {
    let records = ctx.primary;
    let Some(code_field) = ctx.resolve(LogicalField::HouseholdCode) else {
        skipped(RuleId::HouseholdDuplicate, records, LogicalField::HouseholdCode.key());
        return Vec::new();
    };
    shared_value_rows(records, code_field)
        .into_iter()
        .map(|(row, code)| {
            ctx.household_issue(
                row,
                IssueKind::HouseholdDuplicate,
                format!("Duplicate {code_field}: {code}"),
            )
        })
        .collect()
}
