//! Child unique codes must not repeat within a child sheet.

use survey_map::LogicalField;
use survey_model::{IssueKind, QcIssue};

use super::{shared_value_rows, skipped};
use crate::context::QcContext;
use crate::rules::RuleId;

pub fn check(ctx: &QcContext<'_>) -> Vec<QcIssue> {
    let mut issues = Vec::new();
    for child in ctx.auxiliary.values() {
        let Some(code_field) = ctx.resolve_in(child, LogicalField::ChildCode) else {
            skipped(RuleId::ChildDuplicate, child, LogicalField::ChildCode.key());
            continue;
        };
        for (row, code) in shared_value_rows(child, code_field) {
            issues.push(ctx.child_issue(
                child,
                row,
                IssueKind::ChildDuplicate,
                format!("Duplicate {code_field}: {code}"),
            ));
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
    fn duplicates_are_per_sheet() {
        let mut auxiliary = BTreeMap::new();
        auxiliary.insert(
            "child_a".to_string(),
            records("child_a", vec![("unique_code2", vec![Some("C1"), Some("C1"), Some("C2")])]),
        );
        auxiliary.insert(
            "child_b".to_string(),
            records("child_b", vec![("unique_code2", vec![Some("C2")])]),
        );
        let households = records("household", vec![("lga", vec![])]);

        let issues = run_with(&households, &auxiliary, &RuleSet::default(), check);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.description == "Duplicate unique_code2: C1"));
        assert!(issues.iter().all(|i| i.source.sheet == "child_a"));
    }
}
