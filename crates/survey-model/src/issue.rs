//! Quality-control issue types.
//!
//! A [`QcIssue`] is produced by a single rule for a single record and carries
//! the location metadata the review team needs to find the submission again.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Review priority of an issue kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Review immediately (inconsistencies, duplicates).
    High,
    /// Verify with the field team.
    Medium,
    /// Advisory; the flagged value may be legitimate.
    Low,
}

impl IssueSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of quality-control issue.
///
/// The set is open-ended: deployments may surface kinds this crate does not
/// know about through [`IssueKind::Other`]. Kinds serialize as their label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum IssueKind {
    /// Years living in the community exceed the reported age.
    AgeInconsistency,
    /// No formal education but a professional occupation.
    EducationOccupationMismatch,
    /// A total-children field holds a negative value.
    NegativeChildrenCount,
    /// An eligible-children field is zero.
    NoEligibleChildren,
    /// Child older than 59 months recorded as treated.
    ChildAgeOverLimit,
    /// Observed treatment with zero minutes spent by the distributor.
    CddTimeTooShort,
    /// Observed treatment with an implausibly long distributor visit.
    CddTimeTooLong,
    /// Child unique code shared by several child records.
    ChildDuplicate,
    /// Household unique code shared by several household records.
    HouseholdDuplicate,
    /// Every urban record of an enumerator reports no amenities.
    UrbanNoAmenities,
    Other(String),
}

impl IssueKind {
    pub fn label(&self) -> &str {
        match self {
            Self::AgeInconsistency => "Age Inconsistency",
            Self::EducationOccupationMismatch => "Education-Occupation Mismatch",
            Self::NegativeChildrenCount => "Negative Children Count",
            Self::NoEligibleChildren => "No Eligible Children",
            Self::ChildAgeOverLimit => "Child Age >59 months",
            Self::CddTimeTooShort => "CDD Time Too Short",
            Self::CddTimeTooLong => "CDD Time Too Long",
            Self::ChildDuplicate => "Child Duplicate",
            Self::HouseholdDuplicate => "HH Duplicate",
            Self::UrbanNoAmenities => "Urban HH No Amenities (Enumerator Pattern)",
            Self::Other(label) => label,
        }
    }

    /// Parse a label back into a kind. Unknown labels become [`IssueKind::Other`].
    pub fn from_label(label: &str) -> Self {
        const KNOWN: &[IssueKind] = &[
            IssueKind::AgeInconsistency,
            IssueKind::EducationOccupationMismatch,
            IssueKind::NegativeChildrenCount,
            IssueKind::NoEligibleChildren,
            IssueKind::ChildAgeOverLimit,
            IssueKind::CddTimeTooShort,
            IssueKind::CddTimeTooLong,
            IssueKind::ChildDuplicate,
            IssueKind::HouseholdDuplicate,
            IssueKind::UrbanNoAmenities,
        ];
        let trimmed = label.trim();
        KNOWN
            .iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Self::Other(trimmed.to_string()))
    }

    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::AgeInconsistency
            | Self::NegativeChildrenCount
            | Self::ChildAgeOverLimit
            | Self::ChildDuplicate
            | Self::HouseholdDuplicate => IssueSeverity::High,
            Self::EducationOccupationMismatch
            | Self::CddTimeTooShort
            | Self::CddTimeTooLong
            | Self::UrbanNoAmenities
            | Self::Other(_) => IssueSeverity::Medium,
            Self::NoEligibleChildren => IssueSeverity::Low,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::ChildDuplicate | Self::HouseholdDuplicate)
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<IssueKind> for String {
    fn from(kind: IssueKind) -> Self {
        kind.label().to_string()
    }
}

impl From<String> for IssueKind {
    fn from(label: String) -> Self {
        IssueKind::from_label(&label)
    }
}

/// Where an issue came from: sheet name and zero-based row within it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceRow {
    pub sheet: String,
    pub row: usize,
}

impl SourceRow {
    pub fn new(sheet: impl Into<String>, row: usize) -> Self {
        Self {
            sheet: sheet.into(),
            row,
        }
    }
}

/// A flagged data-quality problem on one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcIssue {
    pub region: Option<String>,
    pub ward: Option<String>,
    pub community: Option<String>,
    /// Household unique code of the (owning) household record.
    pub household_id: Option<String>,
    pub validation_status: Option<String>,
    pub kind: IssueKind,
    /// Human-readable explanation including the offending values.
    pub description: String,
    /// Internal row reference; not part of exports.
    pub source: SourceRow,
}

impl QcIssue {
    pub fn severity(&self) -> IssueSeverity {
        self.kind.severity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for kind in [
            IssueKind::AgeInconsistency,
            IssueKind::CddTimeTooLong,
            IssueKind::UrbanNoAmenities,
        ] {
            assert_eq!(IssueKind::from_label(kind.label()), kind);
        }
        assert_eq!(
            IssueKind::from_label("Custom Check"),
            IssueKind::Other("Custom Check".to_string())
        );
    }

    #[test]
    fn priorities_follow_review_order() {
        assert_eq!(IssueKind::HouseholdDuplicate.severity(), IssueSeverity::High);
        assert_eq!(
            IssueKind::EducationOccupationMismatch.severity(),
            IssueSeverity::Medium
        );
        assert_eq!(IssueKind::NoEligibleChildren.severity(), IssueSeverity::Low);
        assert!(IssueSeverity::High < IssueSeverity::Low);
    }
}
