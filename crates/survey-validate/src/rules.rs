//! Rule identifiers and per-deployment rule configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use survey_map::fields::AMENITY_FIELDS;
use thiserror::Error;

/// QC rules in declaration order. Ordering follows declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Years living in the community exceed the reported age.
    ResidencyExceedsAge,
    EducationOccupationMismatch,
    NegativeChildCount,
    ZeroEligibleChildren,
    /// Child repeat group: over-age child recorded as treated.
    ChildAgeOverLimit,
    /// Child repeat group joined to households: distributor visit length.
    TreatmentDuration,
    ChildDuplicate,
    HouseholdDuplicate,
    /// Enumerator-level batch pattern over urban households.
    UrbanNoAmenities,
}

impl RuleId {
    pub const ALL: [RuleId; 9] = [
        RuleId::ResidencyExceedsAge,
        RuleId::EducationOccupationMismatch,
        RuleId::NegativeChildCount,
        RuleId::ZeroEligibleChildren,
        RuleId::ChildAgeOverLimit,
        RuleId::TreatmentDuration,
        RuleId::ChildDuplicate,
        RuleId::HouseholdDuplicate,
        RuleId::UrbanNoAmenities,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::ResidencyExceedsAge => "residency_exceeds_age",
            Self::EducationOccupationMismatch => "education_occupation_mismatch",
            Self::NegativeChildCount => "negative_child_count",
            Self::ZeroEligibleChildren => "zero_eligible_children",
            Self::ChildAgeOverLimit => "child_age_over_limit",
            Self::TreatmentDuration => "treatment_duration",
            Self::ChildDuplicate => "child_duplicate",
            Self::HouseholdDuplicate => "household_duplicate",
            Self::UrbanNoAmenities => "urban_no_amenities",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RuleId {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|rule| rule.key() == key)
            .ok_or_else(|| RuleSetError::UnknownRule {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("unknown QC rule: {name}")]
    UnknownRule { name: String },
    #[error("duration threshold must be positive, got {value}")]
    InvalidThreshold { value: f64 },
    #[error("amenity field list is empty")]
    NoAmenityFields,
}

/// Whose age the residency rule compares against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidencyAgeBasis {
    #[default]
    HouseholdHead,
    Respondent,
}

/// Default for "implausibly long" distributor visits, in minutes.
pub const DEFAULT_DURATION_TOO_LONG_MINUTES: f64 = 100.0;
/// Children older than this many months are outside the treatment cohort.
pub const CHILD_AGE_LIMIT_MONTHS: f64 = 59.0;

/// The rules a deployment runs and their parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    enabled: BTreeSet<RuleId>,
    residency_age_basis: ResidencyAgeBasis,
    amenity_fields: Vec<String>,
    duration_too_long_minutes: f64,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            enabled: RuleId::ALL.into_iter().collect(),
            residency_age_basis: ResidencyAgeBasis::default(),
            amenity_fields: AMENITY_FIELDS.iter().map(|f| (*f).to_string()).collect(),
            duration_too_long_minutes: DEFAULT_DURATION_TOO_LONG_MINUTES,
        }
    }
}

impl RuleSet {
    /// Enable exactly the given rules. Order of the input does not matter.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = RuleId>) -> Self {
        self.enabled = rules.into_iter().collect();
        self
    }

    pub fn with_residency_age_basis(mut self, basis: ResidencyAgeBasis) -> Self {
        self.residency_age_basis = basis;
        self
    }

    pub fn with_amenity_fields(mut self, fields: Vec<String>) -> Result<Self, RuleSetError> {
        if fields.iter().all(|f| f.trim().is_empty()) {
            return Err(RuleSetError::NoAmenityFields);
        }
        self.amenity_fields = fields;
        Ok(self)
    }

    pub fn with_duration_too_long(mut self, minutes: f64) -> Result<Self, RuleSetError> {
        if !(minutes.is_finite() && minutes > 0.0) {
            return Err(RuleSetError::InvalidThreshold { value: minutes });
        }
        self.duration_too_long_minutes = minutes;
        Ok(self)
    }

    /// Enabled rules in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.enabled.iter().copied()
    }

    pub fn is_enabled(&self, rule: RuleId) -> bool {
        self.enabled.contains(&rule)
    }

    pub fn residency_age_basis(&self) -> ResidencyAgeBasis {
        self.residency_age_basis
    }

    pub fn amenity_fields(&self) -> &[String] {
        &self.amenity_fields
    }

    pub fn duration_too_long_minutes(&self) -> f64 {
        self.duration_too_long_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_rules_come_out_in_declaration_order() {
        let rules = RuleSet::default().with_rules([
            RuleId::UrbanNoAmenities,
            RuleId::ResidencyExceedsAge,
            RuleId::HouseholdDuplicate,
        ]);
        let order: Vec<_> = rules.enabled().collect();
        assert_eq!(
            order,
            vec![
                RuleId::ResidencyExceedsAge,
                RuleId::HouseholdDuplicate,
                RuleId::UrbanNoAmenities
            ]
        );
        assert!(!rules.is_enabled(RuleId::ChildDuplicate));
    }

    #[test]
    fn rule_ids_parse_from_keys() {
        for rule in RuleId::ALL {
            assert_eq!(rule.key().parse::<RuleId>().unwrap(), rule);
        }
        assert_eq!(
            "HH-Duplicate".parse::<RuleId>().ok(),
            None,
            "labels are not keys"
        );
        assert_eq!(
            "household-duplicate".parse::<RuleId>().unwrap(),
            RuleId::HouseholdDuplicate
        );
    }

    #[test]
    fn thresholds_are_validated() {
        assert!(RuleSet::default().with_duration_too_long(0.0).is_err());
        assert!(RuleSet::default().with_amenity_fields(vec![" ".to_string()]).is_err());
        let rules = RuleSet::default().with_duration_too_long(90.0).unwrap();
        assert_eq!(rules.duration_too_long_minutes(), 90.0);
    }
}
