//! Enumerators whose every urban household reports no amenities.
//!
//! The unit of judgement is the enumerator, not the record: one urban record
//! showing any amenity clears all of that enumerator's records.

use std::collections::BTreeMap;

use survey_map::{LogicalField, contains_ignore_case};
use survey_model::{IssueKind, QcIssue};

use super::skipped;
use crate::context::QcContext;
use crate::rules::RuleId;
use crate::values::is_absent_or_no;

const URBAN: &str = "urban";

pub fn check(ctx: &QcContext<'_>) -> Vec<QcIssue> {
    let mut issues = Vec::new();
    let records = ctx.primary;
    let (Some(settlement_field), Some(enumerator_field)) = (
        ctx.resolve(LogicalField::SettlementType),
        ctx.resolve(LogicalField::Enumerator),
    ) else {
        skipped(RuleId::UrbanNoAmenities, records, "settlement type or enumerator");
        return issues;
    };
    let amenities = records.resolver().present(ctx.rules.amenity_fields());
    if amenities.is_empty() {
        skipped(RuleId::UrbanNoAmenities, records, "amenity fields");
        return issues;
    }

    // Records without an enumerator cannot be grouped.
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for row in 0..records.height() {
        let urban = records
            .text(settlement_field, row)
            .is_some_and(|settlement| contains_ignore_case(&settlement, URBAN));
        if !urban {
            continue;
        }
        if let Some(enumerator) = records.text(enumerator_field, row) {
            groups.entry(enumerator).or_default().push(row);
        }
    }

    for (enumerator, rows) in groups {
        let none_anywhere = rows.iter().all(|row| {
            amenities
                .iter()
                .all(|field| is_absent_or_no(records.text(field, *row).as_deref()))
        });
        if !none_anywhere {
            continue;
        }
        let description = format!(
            "Enumerator \"{enumerator}\" - ALL {} urban records have NO amenities",
            rows.len()
        );
        for row in rows {
            issues.push(ctx.household_issue(row, IssueKind::UrbanNoAmenities, description.clone()));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{records, run_primary};

    #[test]
    fn one_amenity_clears_the_enumerator() {
        let set = records(
            "household",
            vec![
                (
                    "Q5. Type of Settlement",
                    vec![Some("Urban"), Some("Urban"), Some("urban"), Some("Urban"), Some("Rural")],
                ),
                ("username", vec![Some("ali"), Some("ali"), Some("bala"), Some("bala"), Some("ali")]),
                ("Q23. Electricity", vec![Some("No"), Some("no"), Some("No"), Some("No"), Some("Yes")]),
                ("Q40. Fan", vec![None, Some("No"), Some("Yes"), Some("No"), Some("Yes")]),
            ],
        );
        let issues = run_primary(&set, check);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.source.row < 2));
        assert_eq!(
            issues[0].description,
            "Enumerator \"ali\" - ALL 2 urban records have NO amenities"
        );
    }

    #[test]
    fn skipped_without_amenity_fields() {
        let set = records(
            "household",
            vec![
                ("settlement", vec![Some("Urban")]),
                ("username", vec![Some("ali")]),
            ],
        );
        assert!(run_primary(&set, check).is_empty());
    }

    #[test]
    fn records_without_enumerator_are_ignored() {
        let set = records(
            "household",
            vec![
                ("settlement", vec![Some("Urban"), Some("Urban")]),
                ("username", vec![None, Some("ali")]),
                ("Q24. Radio", vec![Some("No"), Some("No")]),
            ],
        );
        let issues = run_primary(&set, check);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].source.row, 1);
    }
}
