//! Logical survey concepts and their historical field names.
//!
//! Candidate lists are ordered by priority: resolution always picks the first
//! name present in a record set and never consults later names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

// ============================================================================
// Location and bookkeeping
// ============================================================================

pub const REGION: &[&str] = &[
    "lgas",
    "lga",
    "Q2. Local Government Area",
    "LGA",
    "Local Government Area",
    "Lgas",
];

pub const WARD: &[&str] = &["wards", "ward", "Q3.Ward", "Q3. Ward", "Ward", "Wards"];

pub const COMMUNITY: &[&str] = &["Q4. Community Name", "community", "Community", "Community Name"];

/// Raw community code. `Community_Code_Original` is written by preprocessing.
pub const COMMUNITY_CODE: &[&str] = &["Community_Code_Original", "community_name", "community_code"];

pub const ENUMERATOR: &[&str] = &[
    "username",
    "Enumerator id",
    "Type in your Name",
    "enumerator",
    "Enumerator",
    "enumerator_name",
];

pub const VALIDATION_STATUS: &[&str] =
    &["_validation_status", "validation_status", "Validation Status"];

pub const SUBMISSION_DATE: &[&str] = &[
    "Q8. Date",
    "_submission_time",
    "start",
    "Date",
    "date",
    "submission_time",
];

/// Submission identifier on household records.
pub const SUBMISSION_ID: &[&str] = &["_uuid", "uuid", "_submission_uuid"];

/// Owning-household submission identifier on child repeat records.
pub const PARENT_SUBMISSION_ID: &[&str] = &["_submission__uuid", "_parent_uuid", "submission_uuid"];

pub const HOUSEHOLD_CODE: &[&str] = &["unique_code", "unique_code_1", "household_code"];

pub const CHILD_CODE: &[&str] = &["unique_code2", "unique_code_2", "child_unique_code"];

// ============================================================================
// Household questionnaire
// ============================================================================

pub const RESIDENCE_YEARS: &[&str] = &[
    "Q22. How long have you been living continuously in ${community_confirm}",
    "Q22",
    "years_living",
    "residence_duration",
];

pub const HEAD_AGE: &[&str] = &[
    "Q17. How old is ${name_questionnaire}?",
    "Q17",
    "hh_head_age",
    "head_age",
    "age",
    "Age",
    "age_years",
];

pub const RESPONDENT_AGE: &[&str] = &[
    "respondent_age",
    "Q17. How old is ${name_questionnaire}?",
    "Q17",
    "age",
    "Age",
    "age_years",
];

pub const EDUCATION: &[&str] = &[
    "Q20. Highest education level completed",
    "Q20",
    "education",
    "education_level",
];

pub const OCCUPATION: &[&str] = &["Occupation", "occupation", "Q21. Occupation"];

pub const SETTLEMENT_TYPE: &[&str] = &["Q5. Type of Settlement", "Q5", "settlement_type", "settlement"];

pub const CDD_TIME_SPENT: &[&str] = &[
    "Q60. How much time did the CDD spend in your household (minutes)?",
    "Q60",
    "cdd_time_spent",
    "cdd_time",
    "time_spent_minutes",
];

pub const ELIGIBLE_TOTAL: &[&str] = &["total_eligible", "Total Eligible"];

// ============================================================================
// Child repeat group
// ============================================================================

pub const CHILD_AGE_MONTHS: &[&str] = &[
    "Age of child ${child_idd} in months",
    "child_age_months",
    "age_in_months",
    "age_months",
];

pub const TREATMENT_GIVEN: &[&str] = &[
    "Q91. Did child ${child_idd} swallow the azithromycin?",
    "Q90. Did someone offer child ${child_idd} azithromycin between 24th and 29th of July 2025?",
    "azithromycin_swallowed",
    "azithromycin_offered",
    "treatment_given",
];

pub const SWALLOWED_OBSERVED: &[&str] = &[
    "Q92. Did child ${child_idd} swallow the azithromycin in the presence of the CDD?",
    "Q92",
    "swallowed_in_presence",
    "swallowed_presence_cdd",
];

/// Household asset questions checked by the urban amenity pattern rule.
pub const AMENITY_FIELDS: &[&str] = &[
    "Q23. Electricity",
    "Q24. Radio",
    "Q25. Television",
    "Q26. A non-mobile telephone",
    "Q27. Computer",
    "Q28. Refrigerator",
    "Q29. Chair",
    "Q30. Bed",
    "Q31. Sofa",
    "Q32. Cupboard",
    "Q33. Animal-drawn cart (donkey, horse, camel)",
    "Q34. Bicycle",
    "Q35. Motorcycle or motor scooter",
    "Q36. Car or truck",
    "Q37. Boat with motor",
    "Q38. Canoe",
    "Q39. Keke Napep",
    "Q40. Fan",
    "Q41. Watch",
    "Q42. Mobile telephone",
    "Q43. Table",
    "Q44. Electric Iron",
    "Q45. Bank account",
    "Q46. Air condition",
    "Q47. Generator",
];

/// A logical concept resolved against a record set's field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    Region,
    Ward,
    Community,
    CommunityCode,
    Enumerator,
    ValidationStatus,
    SubmissionDate,
    SubmissionId,
    ParentSubmissionId,
    HouseholdCode,
    ChildCode,
    ResidenceYears,
    HeadAge,
    RespondentAge,
    Education,
    Occupation,
    SettlementType,
    CddTimeSpent,
    EligibleTotal,
    ChildAgeMonths,
    TreatmentGiven,
    SwallowedObserved,
}

impl LogicalField {
    pub const ALL: [LogicalField; 22] = [
        LogicalField::Region,
        LogicalField::Ward,
        LogicalField::Community,
        LogicalField::CommunityCode,
        LogicalField::Enumerator,
        LogicalField::ValidationStatus,
        LogicalField::SubmissionDate,
        LogicalField::SubmissionId,
        LogicalField::ParentSubmissionId,
        LogicalField::HouseholdCode,
        LogicalField::ChildCode,
        LogicalField::ResidenceYears,
        LogicalField::HeadAge,
        LogicalField::RespondentAge,
        LogicalField::Education,
        LogicalField::Occupation,
        LogicalField::SettlementType,
        LogicalField::CddTimeSpent,
        LogicalField::EligibleTotal,
        LogicalField::ChildAgeMonths,
        LogicalField::TreatmentGiven,
        LogicalField::SwallowedObserved,
    ];

    /// Built-in candidate names, highest priority first.
    pub fn default_candidates(&self) -> &'static [&'static str] {
        match self {
            Self::Region => REGION,
            Self::Ward => WARD,
            Self::Community => COMMUNITY,
            Self::CommunityCode => COMMUNITY_CODE,
            Self::Enumerator => ENUMERATOR,
            Self::ValidationStatus => VALIDATION_STATUS,
            Self::SubmissionDate => SUBMISSION_DATE,
            Self::SubmissionId => SUBMISSION_ID,
            Self::ParentSubmissionId => PARENT_SUBMISSION_ID,
            Self::HouseholdCode => HOUSEHOLD_CODE,
            Self::ChildCode => CHILD_CODE,
            Self::ResidenceYears => RESIDENCE_YEARS,
            Self::HeadAge => HEAD_AGE,
            Self::RespondentAge => RESPONDENT_AGE,
            Self::Education => EDUCATION,
            Self::Occupation => OCCUPATION,
            Self::SettlementType => SETTLEMENT_TYPE,
            Self::CddTimeSpent => CDD_TIME_SPENT,
            Self::EligibleTotal => ELIGIBLE_TOTAL,
            Self::ChildAgeMonths => CHILD_AGE_MONTHS,
            Self::TreatmentGiven => TREATMENT_GIVEN,
            Self::SwallowedObserved => SWALLOWED_OBSERVED,
        }
    }

    /// Configuration key, e.g. `community_code`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Ward => "ward",
            Self::Community => "community",
            Self::CommunityCode => "community_code",
            Self::Enumerator => "enumerator",
            Self::ValidationStatus => "validation_status",
            Self::SubmissionDate => "submission_date",
            Self::SubmissionId => "submission_id",
            Self::ParentSubmissionId => "parent_submission_id",
            Self::HouseholdCode => "household_code",
            Self::ChildCode => "child_code",
            Self::ResidenceYears => "residence_years",
            Self::HeadAge => "head_age",
            Self::RespondentAge => "respondent_age",
            Self::Education => "education",
            Self::Occupation => "occupation",
            Self::SettlementType => "settlement_type",
            Self::CddTimeSpent => "cdd_time_spent",
            Self::EligibleTotal => "eligible_total",
            Self::ChildAgeMonths => "child_age_months",
            Self::TreatmentGiven => "treatment_given",
            Self::SwallowedObserved => "swallowed_observed",
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LogicalField {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| MapError::UnknownField {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_candidates() {
        for field in LogicalField::ALL {
            assert!(
                !field.default_candidates().is_empty(),
                "{field} has no candidates"
            );
        }
    }

    #[test]
    fn keys_parse_back() {
        for field in LogicalField::ALL {
            assert_eq!(field.key().parse::<LogicalField>().unwrap(), field);
        }
        assert_eq!(
            "Community-Code".parse::<LogicalField>().unwrap(),
            LogicalField::CommunityCode
        );
        assert!("nonsense".parse::<LogicalField>().is_err());
    }
}
