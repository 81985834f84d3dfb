//! Issue roll-ups and review filters.

use std::collections::BTreeMap;

use serde::Serialize;
use survey_model::{IssueKind, IssueSeverity, QcIssue};

/// Headline counts for a list of issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QcSummary {
    pub total: usize,
    pub age_inconsistencies: usize,
    pub duplicates: usize,
    /// Everything that is neither an age inconsistency nor a duplicate.
    pub other: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Issue counts per kind label, most frequent first.
    pub by_kind: Vec<(String, usize)>,
}

impl QcSummary {
    pub fn from_issues(issues: &[QcIssue]) -> Self {
        let mut summary = Self {
            total: issues.len(),
            ..Self::default()
        };
        let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
        for issue in issues {
            *kinds.entry(issue.kind.label()).or_insert(0) += 1;
            if issue.kind == IssueKind::AgeInconsistency {
                summary.age_inconsistencies += 1;
            }
            if issue.kind.is_duplicate() {
                summary.duplicates += 1;
            }
            match issue.severity() {
                IssueSeverity::High => summary.high += 1,
                IssueSeverity::Medium => summary.medium += 1,
                IssueSeverity::Low => summary.low += 1,
            }
        }
        summary.other = summary.total - summary.age_inconsistencies - summary.duplicates;

        let mut by_kind: Vec<(String, usize)> = kinds
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        by_kind.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        summary.by_kind = by_kind;
        summary
    }
}

/// Narrows an issue list for review or export. Empty lists select everything.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub kinds: Vec<IssueKind>,
    pub regions: Vec<String>,
}

impl IssueFilter {
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty() && self.regions.is_empty()
    }

    pub fn matches(&self, issue: &QcIssue) -> bool {
        let kind_ok = self.kinds.is_empty() || self.kinds.contains(&issue.kind);
        let region_ok = self.regions.is_empty()
            || issue.region.as_deref().is_some_and(|region| {
                self.regions
                    .iter()
                    .any(|wanted| wanted.trim().eq_ignore_ascii_case(region.trim()))
            });
        kind_ok && region_ok
    }

    pub fn apply(&self, issues: &[QcIssue]) -> Vec<QcIssue> {
        issues
            .iter()
            .filter(|issue| self.matches(issue))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use survey_model::SourceRow;

    use super::*;

    fn issue(kind: IssueKind, region: Option<&str>) -> QcIssue {
        QcIssue {
            region: region.map(str::to_string),
            ward: None,
            community: None,
            household_id: None,
            validation_status: None,
            kind,
            description: String::new(),
            source: SourceRow::new("household", 0),
        }
    }

    #[test]
    fn summary_splits_headline_counts() {
        let issues = vec![
            issue(IssueKind::AgeInconsistency, Some("Kiru")),
            issue(IssueKind::HouseholdDuplicate, Some("Kiru")),
            issue(IssueKind::HouseholdDuplicate, Some("Bebeji")),
            issue(IssueKind::ChildDuplicate, None),
            issue(IssueKind::NoEligibleChildren, None),
            issue(IssueKind::CddTimeTooLong, None),
        ];
        let summary = QcSummary::from_issues(&issues);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.age_inconsistencies, 1);
        assert_eq!(summary.duplicates, 3);
        assert_eq!(summary.other, 2);
        assert_eq!((summary.high, summary.medium, summary.low), (4, 1, 1));
        assert_eq!(summary.by_kind[0], ("HH Duplicate".to_string(), 2));
    }

    #[test]
    fn filter_by_kind_and_region() {
        let issues = vec![
            issue(IssueKind::AgeInconsistency, Some("Kiru")),
            issue(IssueKind::HouseholdDuplicate, Some("Kiru")),
            issue(IssueKind::HouseholdDuplicate, Some("Bebeji")),
            issue(IssueKind::HouseholdDuplicate, None),
        ];
        let filter = IssueFilter {
            kinds: vec![IssueKind::HouseholdDuplicate],
            regions: vec!["kiru".to_string()],
        };
        let kept = filter.apply(&issues);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].region.as_deref(), Some("Kiru"));
        assert_eq!(IssueFilter::default().apply(&issues).len(), 4);
    }
}
