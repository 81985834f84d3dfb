//! Per-deployment candidate lists.

use std::collections::BTreeMap;

use crate::error::{MapError, Result};
use crate::fields::LogicalField;

/// Candidate field names for every logical concept.
///
/// Starts from the built-in lists in [`crate::fields`]; a deployment profile
/// may replace the list of any concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    candidates: BTreeMap<LogicalField, Vec<String>>,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        let candidates = LogicalField::ALL
            .into_iter()
            .map(|field| {
                let names = field
                    .default_candidates()
                    .iter()
                    .map(|name| (*name).to_string())
                    .collect();
                (field, names)
            })
            .collect();
        Self { candidates }
    }
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the defaults plus overrides keyed by logical field.
    pub fn with_overrides(overrides: &BTreeMap<LogicalField, Vec<String>>) -> Result<Self> {
        let mut catalog = Self::default();
        for (field, names) in overrides {
            catalog.set(*field, names.clone())?;
        }
        Ok(catalog)
    }

    /// Replace the candidate list of one concept.
    pub fn set(&mut self, field: LogicalField, names: Vec<String>) -> Result<()> {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err(MapError::EmptyCandidates {
                field: field.to_string(),
            });
        }
        self.candidates.insert(field, names);
        Ok(())
    }

    pub fn candidates(&self, field: LogicalField) -> &[String] {
        self.candidates
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_builtin_lists() {
        let catalog = FieldCatalog::default();
        assert_eq!(catalog.candidates(LogicalField::Ward)[0], "wards");
        assert_eq!(
            catalog.candidates(LogicalField::HouseholdCode).len(),
            crate::fields::HOUSEHOLD_CODE.len()
        );
    }

    #[test]
    fn overrides_replace_one_concept() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            LogicalField::Region,
            vec!["state_lga".to_string(), " ".to_string()],
        );
        let catalog = FieldCatalog::with_overrides(&overrides).unwrap();
        assert_eq!(catalog.candidates(LogicalField::Region), ["state_lga"]);
        assert_eq!(catalog.candidates(LogicalField::Ward)[0], "wards");
    }

    #[test]
    fn empty_override_is_rejected() {
        let mut catalog = FieldCatalog::default();
        let err = catalog.set(LogicalField::Ward, vec![]).unwrap_err();
        assert!(matches!(err, MapError::EmptyCandidates { .. }));
    }

    #[test]
    fn overrides_deserialize_from_toml_keys() {
        let overrides: BTreeMap<LogicalField, Vec<String>> =
            toml::from_str("community_code = [\"code\"]\nward = [\"w\"]").unwrap();
        let catalog = FieldCatalog::with_overrides(&overrides).unwrap();
        assert_eq!(catalog.candidates(LogicalField::CommunityCode), ["code"]);
    }
}
