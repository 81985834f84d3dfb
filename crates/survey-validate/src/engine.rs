//! Rule engine entry point.

use std::collections::BTreeMap;

use survey_ingest::{RecordSet, Workbook};
use survey_map::FieldCatalog;
use survey_model::QcIssue;
use tracing::{debug, info, info_span};

use crate::checks;
use crate::context::QcContext;
use crate::rules::RuleSet;

/// Runs the enabled QC rules over a primary record set and its child sheets.
#[derive(Debug, Clone, Default)]
pub struct QcEngine {
    catalog: FieldCatalog,
    rules: RuleSet,
}

impl QcEngine {
    pub fn new(catalog: FieldCatalog, rules: RuleSet) -> Self {
        Self { catalog, rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Run every enabled rule and concatenate the issues.
    ///
    /// Output is ordered by rule declaration, then by record order within a
    /// rule. Rules whose fields cannot be resolved contribute nothing.
    pub fn run_checks(
        &self,
        primary: &RecordSet,
        auxiliary: &BTreeMap<String, RecordSet>,
    ) -> Vec<QcIssue> {
        let span = info_span!(
            "qc",
            sheet = primary.name(),
            records = primary.height(),
            child_sheets = auxiliary.len()
        );
        let _guard = span.enter();

        let ctx = QcContext::new(primary, auxiliary, &self.catalog, &self.rules);
        let mut issues = Vec::new();
        for rule in self.rules.enabled() {
            let found = checks::run(rule, &ctx);
            debug!(rule = %rule, issues = found.len(), "rule finished");
            issues.extend(found);
        }
        info!(issues = issues.len(), "QC checks complete");
        issues
    }

    /// Run the checks over a loaded workbook.
    pub fn run_workbook(&self, workbook: &Workbook) -> Vec<QcIssue> {
        self.run_checks(&workbook.primary, &workbook.auxiliary)
    }
}
