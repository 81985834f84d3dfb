//! Distributor visit length for observed treatments.
//!
//! A visit of zero minutes is too fast to have observed a child swallowing;
//! a visit at or above the configured threshold is implausibly long.

use survey_ingest::format_numeric;
use survey_map::LogicalField;
use survey_model::{IssueKind, QcIssue};

use super::skipped;
use crate::context::QcContext;
use crate::rules::RuleId;
use crate::values::is_affirmative;

pub fn check(ctx: &QcContext<'_>) -> Vec<QcIssue> {
    let mut issues = Vec::new();
    let (Some(time_field), Some(_)) = (
        ctx.resolve(LogicalField::CddTimeSpent),
        ctx.resolve(LogicalField::SubmissionId),
    ) else {
        skipped(RuleId::TreatmentDuration, ctx.primary, "distributor time or submission id");
        return issues;
    };
    let too_long = ctx.rules.duration_too_long_minutes();

    for child in ctx.auxiliary.values() {
        let (Some(observed_field), Some(_)) = (
            ctx.resolve_in(child, LogicalField::SwallowedObserved),
            ctx.resolve_in(child, LogicalField::ParentSubmissionId),
        ) else {
            skipped(RuleId::TreatmentDuration, child, "observed swallowing or parent id");
            continue;
        };

        for row in 0..child.height() {
            if !is_affirmative(child.text(observed_field, row).as_deref()) {
                continue;
            }
            let Some(household) = ctx.household_row(child, row) else {
                continue;
            };
            let Some(minutes) = ctx.primary.number(time_field, household) else {
                continue;
            };
            let finding = if minutes == 0.0 {
                Some((
                    IssueKind::CddTimeTooShort,
                    "CDD spent 0 minutes in household but swallowing was observed".to_string(),
                ))
            } else if minutes >= too_long {
                Some((
                    IssueKind::CddTimeTooLong,
                    format!(
                        "CDD spent {} minutes in household (>= {})",
                        format_numeric(minutes),
                        format_numeric(too_long)
                    ),
                ))
            } else {
                None
            };
            if let Some((kind, description)) = finding {
                issues.push(ctx.child_issue(child, row, kind, description));
            }
        }
    }
    issues
}
