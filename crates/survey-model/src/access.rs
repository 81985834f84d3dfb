use serde::{Deserialize, Serialize};

/// What slice of the data a user may see.
///
/// This is authorization by static table, not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "region", rename_all = "lowercase")]
pub enum AccessScope {
    /// Unrestricted administrative access.
    Admin,
    /// Confined to the records of one region.
    Region(String),
}

impl AccessScope {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// The region this scope is restricted to, if any.
    pub fn region(&self) -> Option<&str> {
        match self {
            Self::Admin => None,
            Self::Region(region) => Some(region),
        }
    }

    /// Whether a record in `region` is visible. Region values compare exactly.
    pub fn allows(&self, region: Option<&str>) -> bool {
        match self {
            Self::Admin => true,
            Self::Region(allowed) => region == Some(allowed.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_scope_only_allows_its_region() {
        let scope = AccessScope::Region("kiru".to_string());
        assert!(scope.allows(Some("kiru")));
        assert!(!scope.allows(Some("wudil")));
        assert!(!scope.allows(None));
        assert!(AccessScope::Admin.allows(None));
        assert_eq!(scope.region(), Some("kiru"));
    }
}
