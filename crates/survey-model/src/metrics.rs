use std::fmt;

use serde::{Deserialize, Serialize};

/// Review outcome of a submission on the survey backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    Approved,
    NotValidated,
    OnHold,
    Rejected,
}

impl ValidationStatus {
    pub const ALL: [ValidationStatus; 4] = [
        ValidationStatus::Approved,
        ValidationStatus::NotValidated,
        ValidationStatus::OnHold,
        ValidationStatus::Rejected,
    ];

    /// Parse an exported status value. Only the backend's fixed vocabulary is
    /// recognised; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label() == trimmed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::NotValidated => "Not Validated",
            Self::OnHold => "On Hold",
            Self::Rejected => "Rejected",
        }
    }

    /// Awaiting review: not yet validated or put on hold.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::NotValidated | Self::OnHold)
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary counts over a (filtered) record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionMetrics {
    pub total_submissions: usize,
    pub distinct_regions: usize,
    pub distinct_wards: usize,
    pub distinct_communities: usize,
    pub distinct_enumerators: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
    /// Sum of the eligible-children totals, when that field exists.
    pub total_eligible: i64,
}

impl SubmissionMetrics {
    pub fn has_validation_tallies(&self) -> bool {
        self.approved > 0 || self.pending > 0 || self.rejected > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_vocabulary_only() {
        assert_eq!(
            ValidationStatus::parse(" Not Validated "),
            Some(ValidationStatus::NotValidated)
        );
        assert_eq!(ValidationStatus::parse("approved"), None);
        assert!(ValidationStatus::OnHold.is_pending());
        assert!(!ValidationStatus::Rejected.is_pending());
    }
}
