use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use surv_model::SurvError;

/// Cell values read as missing, matching the defaults of common dataframe readers.
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Tab-separated table: one header row followed by data rows padded to the header width.
#[derive(Debug, Clone)]
pub struct TsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TsvTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Index of a column the active profile cannot do without.
    ///
    /// # Errors
    ///
    /// [`SurvError::MissingColumn`] when the header is absent.
    pub fn require_column(&self, name: &str) -> surv_model::Result<usize> {
        self.column_index(name)
            .ok_or_else(|| SurvError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Cell text, or `None` for empty and missing-value cells.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        let value = self.rows.get(row)?.get(column)?.as_str();
        if is_missing_value(value) {
            None
        } else {
            Some(value)
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

pub fn is_missing_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed)
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a tab-separated file whose first non-blank line holds the column names.
pub fn read_tsv_table(path: &Path) -> Result<TsvTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read tsv: {}", path.display()))?;
    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if headers.is_empty() {
            headers = record.iter().map(normalize_cell).collect();
            continue;
        }
        let row: Vec<String> = (0..headers.len())
            .map(|idx| record.get(idx).map(normalize_cell).unwrap_or_default())
            .collect();
        rows.push(row);
    }
    Ok(TsvTable { headers, rows })
}
