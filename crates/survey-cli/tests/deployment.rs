//! Loading, scoping and checking exports through a resolved deployment.

use std::fs;
use std::path::Path;

use survey_cli::config::Profile;
use survey_cli::deployment::Deployment;
use survey_core::{FilterOptions, RecordFilter, coverage_for};
use survey_ingest::{RecordSet, Workbook};
use survey_model::{AccessScope, CoverageStatus, IssueKind};

const HOUSEHOLDS: &str = "\
_uuid,lga,wards,community_name,unique_code,_validation_status,Q22,Q17
u1,kiru,baawa,50111,HH001,Approved,30,25
u2,kiru,baawa,50111,HH002,On Hold,10,40
u3,wudil,achika,50999,HH001,Rejected,5,50
";

fn write_export(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("household.csv");
    fs::write(&path, HOUSEHOLDS).unwrap();
    path
}

fn deployment() -> Deployment {
    Deployment::from_profile(Profile::default()).unwrap()
}

#[test]
fn csv_export_is_loaded_and_preprocessed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path());
    let outcome = deployment().load_workbook(Some(path.as_path()), None).unwrap();

    assert!(outcome.warning.is_none());
    let records = &outcome.workbook.primary;
    assert_eq!(records.height(), 3);
    assert_eq!(
        records.text("Q4. Community Name", 0).as_deref(),
        Some("Baawa Cikin Gari")
    );
    assert_eq!(
        records.text("Community_Code_Original", 2).as_deref(),
        Some("50999")
    );
}

#[test]
fn coverage_counts_matching_households() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path());
    let deployment = deployment();
    let outcome = deployment.load_workbook(Some(path.as_path()), None).unwrap();
    let rows = coverage_for(
        &outcome.workbook.primary,
        &deployment.catalog,
        &deployment.reference,
    )
    .unwrap();
    let baawa = rows.iter().find(|row| row.community_code == "50111").unwrap();
    assert_eq!(baawa.actual_households, 2);
    assert_eq!(baawa.status, CoverageStatus::Partial);
}

#[test]
fn missing_export_degrades_to_empty_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = deployment()
        .load_workbook(Some(dir.path().join("missing.csv").as_path()), None)
        .unwrap();
    assert_eq!(outcome.workbook.primary.height(), 0);
    let warning = outcome.warning.unwrap();
    assert!(warning.starts_with("Error fetching data:"), "{warning}");
}

#[test]
fn an_export_path_is_required() {
    assert!(deployment().load_workbook(None, None).is_err());
}

#[test]
fn region_user_sees_only_their_region() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path());
    let deployment = deployment();
    let outcome = deployment.load_workbook(Some(path.as_path()), None).unwrap();

    let scope = deployment.scope(Some("Kiru")).unwrap();
    assert_eq!(scope, AccessScope::Region("kiru".to_string()));
    let selected = deployment
        .select(&outcome.workbook, &scope, &RecordFilter::default())
        .unwrap();
    assert_eq!(selected.primary.height(), 2);

    // HH001 is shared with a household outside the scope.
    let issues = deployment.engine().run_workbook(&selected);
    assert!(issues.iter().all(|issue| issue.kind != IssueKind::HouseholdDuplicate));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::AgeInconsistency);
}

#[test]
fn filter_options_come_from_the_loaded_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path());
    let deployment = deployment();
    let outcome = deployment.load_workbook(Some(path.as_path()), None).unwrap();

    let options = FilterOptions::collect(&outcome.workbook.primary, &deployment.catalog);
    assert_eq!(options.regions, vec!["kiru", "wudil"]);
    assert_eq!(options.wards, vec!["achika", "baawa"]);
    assert_eq!(options.statuses, vec!["Approved", "On Hold", "Rejected"]);
    assert_eq!(options.date_range, None);
}

#[test]
fn unknown_user_is_rejected_and_no_user_is_unrestricted() {
    let deployment = deployment();
    assert!(deployment.scope(Some("stranger")).is_err());
    assert_eq!(deployment.scope(None).unwrap(), AccessScope::Admin);
}

#[test]
fn child_sheets_follow_selected_households() {
    let households = RecordSet::from_columns(
        "household",
        vec![
            ("_uuid", vec![Some("u1"), Some("u2")]),
            ("lga", vec![Some("kiru"), Some("wudil")]),
        ],
    )
    .unwrap();
    let children = RecordSet::from_columns(
        "child_info",
        vec![
            ("_submission__uuid", vec![Some("u1"), Some("u2"), Some("u2"), None]),
            ("unique_code2", vec![Some("C1"), Some("C2"), Some("C3"), Some("C4")]),
        ],
    )
    .unwrap();
    let workbook = Workbook::new(households).with_auxiliary(children);
    let deployment = deployment();

    let filter = RecordFilter {
        region: Some("wudil".to_string()),
        ..RecordFilter::default()
    };
    let selected = deployment
        .select(&workbook, &AccessScope::Admin, &filter)
        .unwrap();
    let kept = &selected.auxiliary["child_info"];
    assert_eq!(kept.height(), 2);
    assert_eq!(kept.text("unique_code2", 0).as_deref(), Some("C2"));

    let everything = deployment
        .select(&workbook, &AccessScope::Admin, &RecordFilter::default())
        .unwrap();
    assert_eq!(everything.auxiliary["child_info"].height(), 4);
}

#[test]
fn unlinkable_child_sheets_are_dropped_when_households_are_narrowed() {
    // No `_uuid` column, so children cannot be traced back to a household.
    let households = RecordSet::from_columns(
        "household",
        vec![("lga", vec![Some("kiru"), Some("wudil")])],
    )
    .unwrap();
    let children = RecordSet::from_columns(
        "child_info",
        vec![
            ("_submission__uuid", vec![Some("w1"), Some("w2")]),
            ("unique_code2", vec![Some("WUDIL_CHILD"), Some("WUDIL_CHILD")]),
        ],
    )
    .unwrap();
    let workbook = Workbook::new(households).with_auxiliary(children);
    let deployment = deployment();

    let selected = deployment
        .select(
            &workbook,
            &AccessScope::Region("kiru".to_string()),
            &RecordFilter::default(),
        )
        .unwrap();
    assert_eq!(selected.primary.height(), 1);
    assert_eq!(selected.auxiliary["child_info"].height(), 0);
    let issues = deployment.engine().run_workbook(&selected);
    assert!(issues.iter().all(|issue| issue.kind != IssueKind::ChildDuplicate));

    let everything = deployment
        .select(&workbook, &AccessScope::Admin, &RecordFilter::default())
        .unwrap();
    assert_eq!(everything.auxiliary["child_info"].height(), 2);
}

#[test]
fn profile_file_drives_rules_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    let export = write_export(dir.path());
    let profile_path = dir.path().join("profile.toml");
    fs::write(
        &profile_path,
        format!(
            "[source]\npath = {:?}\n\n[rules]\nenabled = [\"household_duplicate\"]\n",
            export.display().to_string()
        ),
    )
    .unwrap();

    let deployment = Deployment::load(Some(profile_path.as_path())).unwrap();
    let outcome = deployment.load_workbook(None, None).unwrap();
    let issues = deployment.engine().run_workbook(&outcome.workbook);
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().all(|issue| issue.kind == IssueKind::HouseholdDuplicate));
}
