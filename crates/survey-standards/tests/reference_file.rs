use std::io::Write;

use survey_standards::{StandardsError, load_from_path};

#[test]
fn loads_override_table_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Q2. Local Government Area\tQ3.Ward\tcommunity_name\tQ4. Community Name\tPlanned HH"
    )
    .unwrap();
    writeln!(file, "gwale\tdorayi\t70111\tDorayi Babba\t40").unwrap();
    writeln!(file, "gwale\tdorayi\t70112\tDorayi Karama\t12").unwrap();

    let table = load_from_path(file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.regions(), vec!["gwale"]);
    assert_eq!(table.code_for("Dorayi Karama"), Some("70112"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.tsv");
    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, StandardsError::Io { .. }));
    assert!(err.to_string().contains("absent.tsv"));
}
