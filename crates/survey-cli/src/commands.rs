use anyhow::{Result, bail};
use chrono::Local;
use tracing::{info, info_span};

use survey_cli::deployment::Deployment;
use survey_core::{
    ALL_OPTION, FilterOptions, RecordFilter, compute_metrics, coverage_for, data_quality_alerts,
    region_distribution, status_distribution, timeline, ward_distribution,
};
use survey_ingest::{RecordSet, Workbook};
use survey_map::{FieldCatalog, LogicalField};
use survey_model::{IssueKind, IssueSeverity};
use survey_report::{export_path, write_qc_csv_file, write_qc_report_json};
use survey_validate::{IssueFilter, QcSummary};

use crate::cli::{ColumnsArgs, CommunitiesArgs, DataArgs, QcArgs};
use crate::summary::{
    print_columns, print_communities, print_coverage, print_filter_options, print_metrics,
    print_qc, print_tallies, print_timeline,
};

/// Concepts looked up on child repeat-group sheets.
const CHILD_FIELDS: [LogicalField; 5] = [
    LogicalField::ParentSubmissionId,
    LogicalField::ChildCode,
    LogicalField::ChildAgeMonths,
    LogicalField::TreatmentGiven,
    LogicalField::SwallowedObserved,
];

const SUGGESTION_LIMIT: usize = 3;

/// Outcome of a QC run, for the exit status.
pub struct QcRun {
    pub high_priority: usize,
}

pub fn run_coverage(args: &DataArgs) -> Result<()> {
    let (deployment, workbook) = prepare(args)?;
    let span = info_span!("coverage", records = workbook.primary.height());
    let _guard = span.enter();
    match coverage_for(&workbook.primary, &deployment.catalog, &deployment.reference) {
        Some(rows) => print_coverage(&rows),
        None => println!("No community code field found; coverage is unavailable."),
    }
    Ok(())
}

pub fn run_qc(args: &QcArgs) -> Result<QcRun> {
    let (deployment, workbook) = prepare(&args.data)?;
    let issues = deployment.engine().run_workbook(&workbook);

    let filter = issue_filter(args)?;
    let issues = if filter.is_empty() {
        issues
    } else {
        filter.apply(&issues)
    };
    let summary = QcSummary::from_issues(&issues);
    print_qc(&issues, &summary, args.limit);

    if let Some(requested) = &args.export {
        let path = export_path(requested.as_deref(), Local::now().date_naive());
        write_qc_csv_file(&path, &issues)?;
        info!(path = %path.display(), issues = issues.len(), "wrote QC export");
        println!("QC export: {}", path.display());
    }
    if let Some(dir) = &args.json {
        let path = write_qc_report_json(dir, &issues, &summary)?;
        println!("QC report: {}", path.display());
    }
    let high_priority = issues
        .iter()
        .filter(|issue| issue.severity() == IssueSeverity::High)
        .count();
    Ok(QcRun { high_priority })
}

pub fn run_metrics(args: &DataArgs) -> Result<()> {
    let (deployment, workbook) = prepare(args)?;
    let records = &workbook.primary;
    let catalog = &deployment.catalog;
    let metrics = compute_metrics(records, catalog);
    let alerts = data_quality_alerts(records, catalog);
    print_metrics(&metrics, &alerts);
    if let Some(tallies) = region_distribution(records, catalog) {
        print_tallies("LGA", &tallies);
    }
    if let Some(tallies) = ward_distribution(records, catalog) {
        print_tallies("Ward (top 15)", &tallies);
    }
    if let Some(tallies) = status_distribution(records, catalog) {
        print_tallies("Validation Status", &tallies);
    }
    if let Some(days) = timeline(records, catalog) {
        print_timeline(&days);
    }
    Ok(())
}

pub fn run_communities(args: &CommunitiesArgs) -> Result<()> {
    let deployment = Deployment::load(args.config.as_deref())?;
    let wanted = args.region.as_deref().map(str::trim);
    let entries: Vec<_> = deployment
        .reference
        .communities()
        .into_iter()
        .filter(|entry| wanted.is_none_or(|region| entry.region.eq_ignore_ascii_case(region)))
        .collect();
    print_communities(&entries);
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let deployment = Deployment::load(args.config.as_deref())?;
    let outcome = deployment.load_workbook(args.input.as_deref(), args.sheet.as_deref())?;
    if let Some(warning) = &outcome.warning {
        bail!("{warning}");
    }
    let workbook = outcome.workbook;
    let household_fields: Vec<LogicalField> = LogicalField::ALL
        .into_iter()
        .filter(|field| !CHILD_FIELDS.contains(field))
        .collect();
    print_columns(
        workbook.primary.name(),
        &column_rows(&workbook.primary, &deployment.catalog, &household_fields),
    );
    print_filter_options(&FilterOptions::collect(&workbook.primary, &deployment.catalog));
    for (name, children) in &workbook.auxiliary {
        println!();
        print_columns(name, &column_rows(children, &deployment.catalog, &CHILD_FIELDS));
    }
    Ok(())
}

/// Load the export, then narrow it to the user's scope and filters.
fn prepare(args: &DataArgs) -> Result<(Deployment, Workbook)> {
    let deployment = Deployment::load(args.config.as_deref())?;
    let scope = deployment.scope(args.user.as_deref())?;
    let outcome = deployment.load_workbook(args.input.as_deref(), args.sheet.as_deref())?;
    if let Some(warning) = &outcome.warning {
        eprintln!("warning: {warning}");
    }
    let workbook = deployment.select(&outcome.workbook, &scope, &record_filter(args))?;
    Ok((deployment, workbook))
}

fn record_filter(args: &DataArgs) -> RecordFilter {
    RecordFilter {
        region: args.region.clone(),
        ward: args.ward.clone(),
        community: args.community.clone(),
        validation_status: args.status.clone(),
        date_from: args.from,
        date_to: args.to,
    }
}

fn issue_filter(args: &QcArgs) -> Result<IssueFilter> {
    let mut kinds = Vec::new();
    for label in &args.issue_types {
        let kind = IssueKind::from_label(label);
        if let IssueKind::Other(unknown) = &kind {
            bail!("unknown issue type: {unknown}");
        }
        kinds.push(kind);
    }
    let regions = args
        .data
        .region
        .iter()
        .filter(|region| region.trim() != ALL_OPTION)
        .cloned()
        .collect();
    Ok(IssueFilter { kinds, regions })
}

fn column_rows(
    records: &RecordSet,
    catalog: &FieldCatalog,
    fields: &[LogicalField],
) -> Vec<(String, Option<String>, Vec<String>)> {
    fields
        .iter()
        .map(|field| {
            let resolved = records.resolve_field(catalog, *field).map(str::to_string);
            let suggestions = if resolved.is_some() {
                Vec::new()
            } else {
                records
                    .resolver()
                    .suggest(catalog.candidates(*field), SUGGESTION_LIMIT)
                    .into_iter()
                    .map(|suggestion| suggestion.field)
                    .collect()
            };
            (field.key().to_string(), resolved, suggestions)
        })
        .collect()
}
