//! Shared inputs of one QC run.

use std::collections::{BTreeMap, HashMap};

use survey_ingest::RecordSet;
use survey_map::{FieldCatalog, LogicalField, title_case};
use survey_model::{IssueKind, QcIssue, SourceRow};

use crate::rules::RuleSet;

/// Location metadata copied onto every issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub region: Option<String>,
    pub ward: Option<String>,
    pub community: Option<String>,
    pub household_id: Option<String>,
    pub validation_status: Option<String>,
}

/// Record sets, resolved household fields and the household join index.
///
/// Built once per run and only read by the rules.
#[derive(Debug)]
pub struct QcContext<'a> {
    pub primary: &'a RecordSet,
    pub auxiliary: &'a BTreeMap<String, RecordSet>,
    pub catalog: &'a FieldCatalog,
    pub rules: &'a RuleSet,
    region: Option<&'a str>,
    ward: Option<&'a str>,
    community: Option<&'a str>,
    household_code: Option<&'a str>,
    status: Option<&'a str>,
    /// Household submission id to its first row in the primary set.
    submissions: HashMap<String, usize>,
}

impl<'a> QcContext<'a> {
    pub fn new(
        primary: &'a RecordSet,
        auxiliary: &'a BTreeMap<String, RecordSet>,
        catalog: &'a FieldCatalog,
        rules: &'a RuleSet,
    ) -> Self {
        let mut submissions = HashMap::new();
        if let Some(field) = primary.resolve_field(catalog, LogicalField::SubmissionId) {
            for row in 0..primary.height() {
                if let Some(id) = primary.text(field, row) {
                    submissions.entry(id).or_insert(row);
                }
            }
        }
        Self {
            primary,
            auxiliary,
            catalog,
            rules,
            region: primary.resolve_field(catalog, LogicalField::Region),
            ward: primary.resolve_field(catalog, LogicalField::Ward),
            community: primary.resolve_field(catalog, LogicalField::Community),
            household_code: primary.resolve_field(catalog, LogicalField::HouseholdCode),
            status: primary.resolve_field(catalog, LogicalField::ValidationStatus),
            submissions,
        }
    }

    /// Resolve a concept on the primary set.
    pub fn resolve(&self, field: LogicalField) -> Option<&'a str> {
        self.primary.resolve_field(self.catalog, field)
    }

    /// Resolve a concept on an auxiliary set.
    pub fn resolve_in(&self, records: &'a RecordSet, field: LogicalField) -> Option<&'a str> {
        records.resolve_field(self.catalog, field)
    }

    /// Location of a household record. Region and ward are title-cased.
    pub fn location(&self, row: usize) -> Location {
        let text = |field: Option<&str>| field.and_then(|f| self.primary.text(f, row));
        Location {
            region: text(self.region).map(|v| title_case(&v)),
            ward: text(self.ward).map(|v| title_case(&v)),
            community: text(self.community),
            household_id: text(self.household_code),
            validation_status: text(self.status),
        }
    }

    /// Owning household row of a child record, via the shared submission id.
    pub fn household_row(&self, child: &RecordSet, row: usize) -> Option<usize> {
        let link = child.resolve_field(self.catalog, LogicalField::ParentSubmissionId)?;
        let id = child.text(link, row)?;
        self.submissions.get(&id).copied()
    }

    /// Location of a child record: its household's, or empty when unlinked.
    pub fn child_location(&self, child: &RecordSet, row: usize) -> Location {
        self.household_row(child, row)
            .map(|household| self.location(household))
            .unwrap_or_default()
    }

    pub fn issue(
        &self,
        location: Location,
        kind: IssueKind,
        description: String,
        source: SourceRow,
    ) -> QcIssue {
        QcIssue {
            region: location.region,
            ward: location.ward,
            community: location.community,
            household_id: location.household_id,
            validation_status: location.validation_status,
            kind,
            description,
            source,
        }
    }

    /// Issue on a household record.
    pub fn household_issue(&self, row: usize, kind: IssueKind, description: String) -> QcIssue {
        self.issue(
            self.location(row),
            kind,
            description,
            SourceRow::new(self.primary.name(), row),
        )
    }

    /// Issue on a child record, located through its household.
    pub fn child_issue(
        &self,
        child: &RecordSet,
        row: usize,
        kind: IssueKind,
        description: String,
    ) -> QcIssue {
        self.issue(
            self.child_location(child, row),
            kind,
            description,
            SourceRow::new(child.name(), row),
        )
    }
}
