//! End-to-end analysis over in-memory subject tables.

use proptest::prelude::*;
use surv_core::{AnalysisContext, KaplanMeierAnalyzer, partition, run_analysis};
use surv_ingest::{TsvTable, load_subjects};
use surv_model::{EventMode, RowId, SchemaProfile, SurvError};

fn table(headers: &[&str], rows: &[&[&str]]) -> TsvTable {
    TsvTable {
        headers: headers.iter().map(ToString::to_string).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    }
}

const HEADERS: &[&str] = &[
    "sample_id",
    "diagnosis_date",
    "vital_status",
    "vital_status_change_date",
    "vital_status_change_day",
    "progression_status",
    "progression_status_change_date",
    "progression_status_change_day",
    "label",
];

fn mock_rows() -> TsvTable {
    table(
        HEADERS,
        &[
            &["1", "2020-01-01", "False", "2020-01-10", "9", "True", "2020-01-10", "9", "A"],
            &["2", "2020-02-01", "True", "", "20", "False", "", "20", "B"],
            &["3", "2020-03-01", "False", "2020-03-15", "14", "True", "2020-03-15", "14", "A"],
        ],
    )
}

#[test]
fn overall_survival_over_mock_cohort() {
    let context = AnalysisContext::new(SchemaProfile::ProgressionSurvival, EventMode::OverallSurvival);
    let subjects = load_subjects(&mock_rows(), &context.columns).unwrap();
    let result = run_analysis(&subjects, &context, &KaplanMeierAnalyzer::default()).unwrap();

    let a = &result.groups[0];
    let days: Vec<Option<f64>> = a.records.iter().map(|r| r.survival_days).collect();
    assert_eq!(days, vec![Some(9.0), Some(14.0)]);
    assert_eq!(a.event_count(), 2);
    assert!(a.censored.is_empty());
    assert_eq!(a.curve.len(), 2);

    let b = &result.groups[1];
    assert_eq!(b.records[0].survival_days, Some(20.0));
    assert_eq!(b.censored.len(), 1);
    assert_eq!(b.censored[0].row, RowId(1));
    assert_eq!(b.censored[0].days_at_censoring, Some(20.0));

    let logrank = result.logrank.unwrap();
    assert_eq!(logrank.df, 1);
    assert!(logrank.p > 0.0 && logrank.p <= 1.0);
}

#[test]
fn progression_mode_reads_progression_columns() {
    let context = AnalysisContext::new(SchemaProfile::ProgressionSurvival, EventMode::ProgressionFree);
    let subjects = load_subjects(&mock_rows(), &context.columns).unwrap();
    let result = run_analysis(&subjects, &context, &KaplanMeierAnalyzer::default()).unwrap();
    assert_eq!(result.groups[0].event_count(), 2);
    assert_eq!(result.groups[1].event_count(), 0);
    assert_eq!(result.groups[1].censored[0].subject_id, "2");
}

#[test]
fn censored_subjects_of_reference_group() {
    let table = table(
        &[
            "sample_id",
            "diagnosis_date",
            "progression_status",
            "progression_status_change_date",
            "progression_status_change_day",
        ],
        &[
            &["A", "2020-01-01", "T", "", "5"],
            &["B", "2020-01-01", "F", "", "10"],
            &["C", "2020-01-01", "T", "", "15"],
            &["D", "2020-01-01", "F", "", "20"],
            &["E", "2020-01-01", "T", "", "25"],
        ],
    );

    let context = AnalysisContext::new(SchemaProfile::ProgressionSurvival, EventMode::ProgressionFree);
    let subjects = load_subjects(&table, &context.columns).unwrap();
    let result = run_analysis(&subjects, &context, &KaplanMeierAnalyzer::default()).unwrap();

    assert!(result.logrank.is_none());
    let group = &result.groups[0];
    assert_eq!(group.key.as_str(), "0");
    let censored: Vec<(&str, Option<f64>, RowId)> = group
        .censored
        .iter()
        .map(|entry| (entry.subject_id.as_str(), entry.days_at_censoring, entry.row))
        .collect();
    assert_eq!(
        censored,
        vec![("B", Some(10.0), RowId(1)), ("D", Some(20.0), RowId(3))]
    );
    assert_eq!(group.curve.len(), 5);
}

#[test]
fn negative_duration_aborts() {
    let table = table(
        HEADERS,
        &[&["1", "2020-01-10", "False", "2020-01-01", "", "True", "", "", "A"]],
    );
    let context = AnalysisContext::new(SchemaProfile::VitalStatus, EventMode::OverallSurvival);
    let subjects = load_subjects(&table, &context.columns).unwrap();
    let error = run_analysis(&subjects, &context, &KaplanMeierAnalyzer::default()).unwrap_err();
    assert!(matches!(error, SurvError::NegativeDuration { .. }));
}

#[test]
fn empty_status_cell_is_censored() {
    let table = table(
        &["sample_id", "diagnosis_date", "vital_status", "vital_status_change_date", "vital_status_change_day"],
        &[
            &["A", "2020-01-01", "False", "", "5"],
            &["B", "2020-01-01", "", "", "10"],
            &["C", "2020-01-01", "NA", "", "15"],
        ],
    );
    let context = AnalysisContext::new(SchemaProfile::VitalStatus, EventMode::OverallSurvival);
    let subjects = load_subjects(&table, &context.columns).unwrap();
    let result = run_analysis(&subjects, &context, &KaplanMeierAnalyzer::default()).unwrap();

    let group = &result.groups[0];
    assert_eq!(group.event_count(), 1);
    let censored: Vec<(&str, Option<f64>)> = group
        .censored
        .iter()
        .map(|entry| (entry.subject_id.as_str(), entry.days_at_censoring))
        .collect();
    assert_eq!(censored, vec![("B", Some(10.0)), ("C", Some(15.0))]);
}

proptest! {
    #[test]
    fn partition_preserves_every_subject(labels in prop::collection::vec(0u8..4, 1..40)) {
        let rows: Vec<Vec<String>> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                vec![
                    i.to_string(),
                    "2020-01-01".to_string(),
                    "True".to_string(),
                    String::new(),
                    (i + 1).to_string(),
                    format!("g{label}"),
                ]
            })
            .collect();
        let table = TsvTable {
            headers: [
                "sample_id",
                "diagnosis_date",
                "vital_status",
                "vital_status_change_date",
                "vital_status_change_day",
                "label",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            rows,
        };
        let context = AnalysisContext::new(SchemaProfile::VitalStatus, EventMode::OverallSurvival);
        let subjects = load_subjects(&table, &context.columns).unwrap();
        let parts = partition(&subjects);

        let mut seen: Vec<usize> = parts
            .groups
            .iter()
            .flat_map(|group| group.rows().map(RowId::index))
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..labels.len()).collect::<Vec<_>>());

        for group in &parts.groups {
            let rows: Vec<usize> = group.rows().map(RowId::index).collect();
            let mut sorted = rows.clone();
            sorted.sort_unstable();
            prop_assert_eq!(rows, sorted);
        }
    }
}
