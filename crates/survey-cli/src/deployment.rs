//! A deployment profile resolved into the objects the commands work with.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use survey_core::{AccessTable, RecordFilter, apply_scope};
use survey_ingest::{
    FetchCache, FetchOutcome, FileSource, RecordSet, TimeoutSource, Workbook, load_or_empty,
    preprocess,
};
use survey_map::{FieldCatalog, LogicalField};
use survey_model::AccessScope;
use survey_standards::{ReferenceTable, load_embedded, load_from_path};
use survey_validate::{QcEngine, RuleSet};
use tracing::{debug, info, warn};

use crate::config::Profile;
use crate::logging::redact_value;

#[derive(Debug, Clone)]
pub struct Deployment {
    pub profile: Profile,
    pub catalog: FieldCatalog,
    pub rules: RuleSet,
    pub reference: ReferenceTable,
    pub access: AccessTable,
}

impl Deployment {
    /// Load the profile named by `--config` (or the environment) and resolve it.
    pub fn load(config: Option<&Path>) -> Result<Self> {
        let profile = Profile::load_or_default(config)?;
        Self::from_profile(profile)
    }

    pub fn from_profile(profile: Profile) -> Result<Self> {
        let catalog = profile.catalog()?;
        let rules = profile.rule_set()?;
        let reference = match &profile.reference.path {
            Some(path) => load_from_path(path)
                .with_context(|| format!("load community table {}", path.display()))?,
            None => load_embedded().context("load embedded community table")?,
        };
        let access = profile.access_table();
        debug!(
            communities = reference.len(),
            rules = rules.enabled().count(),
            "deployment ready"
        );
        Ok(Self {
            profile,
            catalog,
            rules,
            reference,
            access,
        })
    }

    pub fn engine(&self) -> QcEngine {
        QcEngine::new(self.catalog.clone(), self.rules.clone())
    }

    /// The export to read: `input` when given, else the profile's source path.
    pub fn source(
        &self,
        input: Option<&Path>,
        sheet: Option<&str>,
    ) -> Result<TimeoutSource<FileSource>> {
        let path: PathBuf = input
            .map(Path::to_path_buf)
            .or_else(|| self.profile.source.path.clone())
            .ok_or_else(|| {
                anyhow!("no survey export given; pass --input or set [source].path in the profile")
            })?;
        let sheet = sheet
            .map(str::to_string)
            .or_else(|| self.profile.source.primary_sheet.clone());
        let timeout = self.profile.source.fetch_timeout()?;
        Ok(TimeoutSource::new(
            FileSource::new(path).with_primary_sheet(sheet),
            timeout,
        ))
    }

    /// Load and preprocess the export. A failed load yields an empty workbook
    /// and a warning rather than an error.
    pub fn load_workbook(&self, input: Option<&Path>, sheet: Option<&str>) -> Result<FetchOutcome> {
        let source = self.source(input, sheet)?;
        let mut cache = FetchCache::new(self.profile.source.cache_ttl());
        let mut outcome = load_or_empty(&mut cache, &source);
        preprocess(&mut outcome.workbook, &self.reference).context("preprocess workbook")?;
        Ok(outcome)
    }

    /// Scope of the identity; no identity means unrestricted.
    pub fn scope(&self, identity: Option<&str>) -> Result<AccessScope> {
        let Some(identity) = identity else {
            return Ok(AccessScope::Admin);
        };
        let scope = self.access.scope_for(identity)?;
        info!(user = redact_value(identity), admin = scope.is_admin(), "resolved access scope");
        Ok(scope)
    }

    /// Household records visible to `scope` that pass `filter`, with child
    /// sheets cut down to children of those households.
    pub fn select(
        &self,
        workbook: &Workbook,
        scope: &AccessScope,
        filter: &RecordFilter,
    ) -> Result<Workbook> {
        let primary = apply_scope(&workbook.primary, scope, filter, &self.catalog)?;
        let narrowed = primary.height() != workbook.primary.height();
        let mut selected = Workbook::new(primary);
        for children in workbook.auxiliary.values() {
            let children = if narrowed {
                self.linked_children(&selected.primary, children)?
            } else {
                children.clone()
            };
            selected = selected.with_auxiliary(children);
        }
        Ok(selected)
    }

    fn linked_children(&self, households: &RecordSet, children: &RecordSet) -> Result<RecordSet> {
        let (Some(id_field), Some(link_field)) = (
            households.resolve_field(&self.catalog, LogicalField::SubmissionId),
            children.resolve_field(&self.catalog, LogicalField::ParentSubmissionId),
        ) else {
            warn!(
                sheet = children.name(),
                "cannot link child records to households; dropping the sheet from the selection"
            );
            return Ok(children.filter(&vec![false; children.height()])?);
        };
        let ids: HashSet<String> = (0..households.height())
            .filter_map(|row| households.text(id_field, row))
            .collect();
        let keep: Vec<bool> = (0..children.height())
            .map(|row| {
                children
                    .text(link_field, row)
                    .is_some_and(|id| ids.contains(&id))
            })
            .collect();
        Ok(children.filter(&keep)?)
    }
}
