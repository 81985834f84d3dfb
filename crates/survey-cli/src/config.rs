//! Deployment profiles.
//!
//! A profile is an optional TOML file describing one survey deployment: where
//! the export lives, which reference table to use, which QC rules run and how
//! survey concepts map to export fields. Every section is optional and falls
//! back to the built-in Kano deployment.
//!
//! ```toml
//! [source]
//! path = "exports/household.xlsx"
//! primary_sheet = "household"
//!
//! [rules]
//! enabled = ["residency_exceeds_age", "household_duplicate"]
//! residency_age_basis = "respondent"
//!
//! [fields]
//! region = ["lga_name"]
//!
//! [access]
//! admins = ["supervisor"]
//! regions = { kiru_team = "kiru" }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use survey_core::AccessTable;
use survey_map::{FieldCatalog, LogicalField, MapError};
use survey_validate::{ResidencyAgeBasis, RuleId, RuleSet, RuleSetError};
use thiserror::Error;
use tracing::info;

/// Environment variable naming the profile when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "SURVEY_QC_CONFIG";

const DEFAULT_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("invalid [rules] section: {0}")]
    Rules(#[from] RuleSetError),
    #[error("invalid [fields] section: {0}")]
    Fields(#[from] MapError),
    #[error("fetch_timeout_secs must be positive")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub source: SourceConfig,
    pub reference: ReferenceConfig,
    pub rules: RulesConfig,
    pub fields: BTreeMap<LogicalField, Vec<String>>,
    pub access: AccessConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub path: Option<PathBuf>,
    pub primary_sheet: Option<String>,
    pub cache_ttl_secs: u64,
    pub fetch_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            primary_sheet: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn fetch_timeout(&self) -> Result<Duration, ConfigError> {
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Duration::from_secs(self.fetch_timeout_secs))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceConfig {
    /// Tab-separated community table replacing the embedded one.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub enabled: Option<Vec<String>>,
    pub residency_age_basis: ResidencyAgeBasis,
    pub amenity_fields: Option<Vec<String>>,
    pub duration_too_long_minutes: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessConfig {
    pub admins: Vec<String>,
    /// Region-restricted identity to region value.
    pub regions: BTreeMap<String, String>,
}

impl Profile {
    /// Profile path: the explicit flag, then the environment variable.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit.map(Path::to_path_buf).or_else(|| {
            std::env::var_os(CONFIG_ENV_VAR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
    }

    /// Load the located profile, or the defaults when there is none.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::locate(explicit) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_toml(&text, path)?;
        info!(path = %path.display(), "loaded deployment profile");
        Ok(profile)
    }

    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source: Box::new(source),
        })
    }

    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        let rules = &self.rules;
        let mut set = RuleSet::default().with_residency_age_basis(rules.residency_age_basis);
        if let Some(enabled) = &rules.enabled {
            let ids = enabled
                .iter()
                .map(|name| name.parse::<RuleId>())
                .collect::<Result<Vec<_>, _>>()?;
            set = set.with_rules(ids);
        }
        if let Some(fields) = &rules.amenity_fields {
            set = set.with_amenity_fields(fields.clone())?;
        }
        if let Some(minutes) = rules.duration_too_long_minutes {
            set = set.with_duration_too_long(minutes)?;
        }
        Ok(set)
    }

    pub fn catalog(&self) -> Result<FieldCatalog, ConfigError> {
        Ok(FieldCatalog::with_overrides(&self.fields)?)
    }

    /// The profile's access table, or the built-in one when the section is empty.
    pub fn access_table(&self) -> AccessTable {
        if self.access.admins.is_empty() && self.access.regions.is_empty() {
            AccessTable::default()
        } else {
            AccessTable::new(&self.access.admins, self.access.regions.clone())
        }
    }
}
