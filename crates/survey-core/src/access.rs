//! Static identity-to-region lookup.

use std::collections::{BTreeMap, BTreeSet};

use survey_model::AccessScope;

use crate::error::{CoreError, Result};

/// Who may see what. Identities compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTable {
    admins: BTreeSet<String>,
    regions: BTreeMap<String, String>,
}

impl Default for AccessTable {
    /// The Kano deployment: one administrator and one user per LGA.
    fn default() -> Self {
        let regions = ["kiru", "minjibir", "rimin_gado", "shanono", "tarauni", "wudil"]
            .into_iter()
            .map(|lga| (lga.to_string(), lga.to_string()))
            .collect();
        Self::new(["admin"], regions)
    }
}

impl AccessTable {
    pub fn new<I, S>(admins: I, regions: BTreeMap<String, String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            admins: admins
                .into_iter()
                .map(|identity| normalize_identity(identity.as_ref()))
                .collect(),
            regions: regions
                .into_iter()
                .map(|(identity, region)| (normalize_identity(&identity), region))
                .collect(),
        }
    }

    /// Scope of an identity; unknown identities are rejected.
    pub fn scope_for(&self, identity: &str) -> Result<AccessScope> {
        let key = normalize_identity(identity);
        if self.admins.contains(&key) {
            return Ok(AccessScope::Admin);
        }
        self.regions
            .get(&key)
            .map(|region| AccessScope::Region(region.clone()))
            .ok_or_else(|| CoreError::UnknownIdentity {
                identity: identity.trim().to_string(),
            })
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.admins
            .iter()
            .chain(self.regions.keys())
            .map(String::as_str)
    }
}

fn normalize_identity(identity: &str) -> String {
    identity.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_maps_lga_users() {
        let table = AccessTable::default();
        assert_eq!(table.scope_for(" Admin ").unwrap(), AccessScope::Admin);
        assert_eq!(
            table.scope_for("Rimin_Gado").unwrap(),
            AccessScope::Region("rimin_gado".to_string())
        );
    }

    #[test]
    fn unknown_identity_is_rejected() {
        let err = AccessTable::default().scope_for("mallam").unwrap_err();
        assert!(matches!(err, CoreError::UnknownIdentity { .. }));
    }
}
