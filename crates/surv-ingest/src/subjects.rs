//! Extraction of typed subjects from a loaded table.

use surv_model::{ColumnSpec, GroupKey, GroupingKey, Result, RowId, Subject};

use crate::tsv_table::TsvTable;

/// Subjects of one input table together with the resolved grouping.
#[derive(Debug, Clone)]
pub struct SubjectTable {
    pub subjects: Vec<Subject>,
    pub grouping: GroupingKey,
}

impl SubjectTable {
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

/// Builds subjects from `table` using the column names in `columns`.
///
/// All required columns are checked before any row is read. The grouping
/// column is optional: when absent every subject gets [`GroupKey::implicit`].
/// A missing cell in a present grouping column becomes the empty key.
///
/// # Errors
///
/// [`SurvError::MissingColumn`](surv_model::SurvError::MissingColumn) for the
/// first required column not found.
pub fn load_subjects(table: &TsvTable, columns: &ColumnSpec) -> Result<SubjectTable> {
    let id_col = table.require_column(columns.subject_id)?;
    let reference_col = table.require_column(columns.reference_date)?;
    let date_col = table.require_column(columns.event.change_date)?;
    let day_col = table.require_column(columns.event.change_day)?;
    let status_col = table.require_column(columns.event.status)?;
    let group_col = table.column_index(columns.grouping);

    let grouping = match group_col {
        Some(_) => GroupingKey::Column(columns.grouping.to_string()),
        None => GroupingKey::Implicit,
    };

    let owned = |row: usize, col: usize| table.cell(row, col).map(str::to_string);
    let subjects = (0..table.row_count())
        .map(|row| Subject {
            row: RowId(row),
            subject_id: owned(row, id_col).unwrap_or_default(),
            group: match group_col {
                Some(col) => GroupKey::new(table.cell(row, col).unwrap_or_default()),
                None => GroupKey::implicit(),
            },
            reference_date: owned(row, reference_col),
            change_date: owned(row, date_col),
            change_day: owned(row, day_col),
            status: owned(row, status_col),
        })
        .collect();

    Ok(SubjectTable { subjects, grouping })
}
