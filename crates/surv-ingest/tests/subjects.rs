use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use surv_ingest::{input_path, load_options, load_subjects, read_tsv_table};
use surv_model::{EventMode, GroupKey, GroupingKey, RowId, SchemaProfile, SurvError};

const INPUT: &str = "sample_id\tdiagnosis_date\tvital_status\tvital_status_change_date\tvital_status_change_day\tprogression_status\tprogression_status_change_date\tprogression_status_change_day\tlabel
1\t2020-01-01\tFalse\t2020-01-10\t9\tTrue\t2020-01-10\t9\tA
2\t2020-02-01\tTrue\t\t20\tFalse\t\t20\tB
3\t2020-03-01\tFalse\t2020-03-15\t14\tTrue\t2020-03-15\t14\tA
";

fn write_input(dir: &TempDir, contents: &str) -> PathBuf {
    let path = input_path(dir.path());
    fs::write(&path, contents).expect("write input");
    path
}

fn without_label(contents: &str) -> String {
    contents
        .lines()
        .map(|line| {
            let mut cells: Vec<&str> = line.split('\t').collect();
            cells.pop();
            cells.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn reads_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, INPUT);
    let table = read_tsv_table(&path).expect("read tsv");
    assert_eq!(table.headers.len(), 9);
    assert_eq!(table.headers[0], "sample_id");
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.cell(1, 3), None);
}

#[test]
fn loads_subjects_for_selected_mode() {
    let dir = TempDir::new().unwrap();
    let table = read_tsv_table(&write_input(&dir, INPUT)).unwrap();
    let columns = SchemaProfile::ProgressionSurvival.columns(EventMode::ProgressionFree);
    let loaded = load_subjects(&table, &columns).expect("load subjects");

    assert_eq!(loaded.grouping, GroupingKey::Column("label".to_string()));
    assert_eq!(loaded.len(), 3);
    let second = &loaded.subjects[1];
    assert_eq!(second.row, RowId(1));
    assert_eq!(second.subject_id, "2");
    assert_eq!(second.group, GroupKey::new("B"));
    assert_eq!(second.change_date, None);
    assert_eq!(second.change_day.as_deref(), Some("20"));
    assert_eq!(second.status.as_deref(), Some("False"));
}

#[test]
fn absent_grouping_column_resolves_to_implicit_group() {
    let dir = TempDir::new().unwrap();
    let table = read_tsv_table(&write_input(&dir, &without_label(INPUT))).unwrap();
    let columns = SchemaProfile::VitalStatus.columns(EventMode::default());
    let loaded = load_subjects(&table, &columns).expect("load subjects");

    assert_eq!(loaded.grouping, GroupingKey::Implicit);
    assert!(
        loaded
            .subjects
            .iter()
            .all(|subject| subject.group == GroupKey::implicit())
    );
    assert_eq!(loaded.subjects[2].subject_id, "3");
}

#[test]
fn missing_required_column_is_a_schema_error() {
    let dir = TempDir::new().unwrap();
    let table = read_tsv_table(&write_input(&dir, INPUT)).unwrap();
    let columns = SchemaProfile::Donor.columns(EventMode::default());
    let error = load_subjects(&table, &columns).unwrap_err();
    assert!(matches!(error, SurvError::MissingColumn { ref column } if column == "donor_id"));
}

#[test]
fn options_file_is_optional() {
    let dir = TempDir::new().unwrap();
    let options = load_options(dir.path()).unwrap();
    assert_eq!(options.event_mode().unwrap(), EventMode::OverallSurvival);

    fs::write(dir.path().join("options.json"), r#"{"mode": "vital"}"#).unwrap();
    let options = load_options(dir.path()).unwrap();
    let error = options.event_mode().unwrap_err();
    assert!(matches!(error, SurvError::InvalidMode { ref value } if value == "vital"));
}
