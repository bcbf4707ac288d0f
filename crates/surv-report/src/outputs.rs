//! Output layouts and file naming.
//!
//! Every frame is built before the first file is created, so a failure while
//! assembling results leaves the output directory untouched.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use surv_core::CohortAnalysis;
use surv_model::{GroupKey, OutputLayout, SurvError};

use crate::frames::{censored_frame, concat_frames, curve_frame, logrank_frame, with_label};
use crate::tsv::write_tsv;

pub const RESULT_FILE: &str = "result.tsv";
pub const CENSORED_FILE: &str = "censored.tsv";
pub const LOGRANK_FILE: &str = "logrank_test.tsv";

/// `result{key}.tsv`
pub fn group_result_file(key: &GroupKey) -> String {
    format!("result{key}.tsv")
}

/// `censored{key}.tsv`
pub fn group_censored_file(key: &GroupKey) -> String {
    format!("censored{key}.tsv")
}

/// Checks that `key` stays inside the output directory once embedded in a
/// per-group file name.
///
/// # Errors
///
/// [`SurvError::UnsafeGroupKey`] for keys holding a path separator or a NUL
/// byte, and for the `.` and `..` path components.
pub fn check_file_key(key: &GroupKey) -> Result<(), SurvError> {
    let key = key.as_str();
    let unsafe_char = key.contains(['/', '\\', '\0']);
    if unsafe_char || key == "." || key == ".." {
        return Err(SurvError::UnsafeGroupKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// A frame and the file name it is written to.
#[derive(Debug, Clone)]
pub struct OutputTable {
    pub file_name: String,
    pub frame: DataFrame,
}

impl OutputTable {
    fn new(file_name: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            file_name: file_name.into(),
            frame,
        }
    }
}

/// Builds every output table of `analysis` in write order.
///
/// Per-group layouts alternate curve and censored tables group by group; the
/// log-rank table, when present, comes last.
pub fn assemble_outputs(analysis: &CohortAnalysis, layout: OutputLayout) -> Result<Vec<OutputTable>> {
    let mut tables = Vec::new();
    match layout {
        OutputLayout::PerGroup => {
            for key in analysis.keys() {
                check_file_key(key)?;
            }
            for group in &analysis.groups {
                let curve = curve_frame(&group.curve)
                    .with_context(|| format!("curve frame for group {}", group.key))?;
                let censored = censored_frame(&group.censored)
                    .with_context(|| format!("censored frame for group {}", group.key))?;
                tables.push(OutputTable::new(group_result_file(&group.key), curve));
                tables.push(OutputTable::new(group_censored_file(&group.key), censored));
            }
        }
        OutputLayout::Concatenated { label_column } => {
            let mut curves = Vec::with_capacity(analysis.groups.len());
            let mut censored = Vec::with_capacity(analysis.groups.len());
            for group in &analysis.groups {
                let key = group.key.as_str();
                curves.push(
                    curve_frame(&group.curve)
                        .and_then(|frame| with_label(frame, label_column, key))
                        .with_context(|| format!("curve frame for group {key}"))?,
                );
                censored.push(
                    censored_frame(&group.censored)
                        .and_then(|frame| with_label(frame, label_column, key))
                        .with_context(|| format!("censored frame for group {key}"))?,
                );
            }
            if let Some(frame) = concat_frames(curves).context("concatenate curves")? {
                tables.push(OutputTable::new(RESULT_FILE, frame));
            }
            if let Some(frame) = concat_frames(censored).context("concatenate censored sets")? {
                tables.push(OutputTable::new(CENSORED_FILE, frame));
            }
        }
    }
    if let Some(result) = &analysis.logrank {
        tables.push(OutputTable::new(
            LOGRANK_FILE,
            logrank_frame(result).context("log-rank frame")?,
        ));
    }
    Ok(tables)
}

/// Writes all artifacts of `analysis` into `dir` and returns their paths.
pub fn write_outputs(dir: &Path, analysis: &CohortAnalysis) -> Result<Vec<PathBuf>> {
    let start = Instant::now();
    let tables = assemble_outputs(analysis, analysis.profile.layout())?;

    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let mut written = Vec::with_capacity(tables.len());
    for table in &tables {
        let path = dir.join(&table.file_name);
        write_tsv(&table.frame, &path)?;
        debug!(path = %path.display(), rows = table.frame.height(), "wrote table");
        written.push(path);
    }
    info!(
        files = written.len(),
        output_dir = %dir.display(),
        duration_ms = start.elapsed().as_millis(),
        "outputs written"
    );
    Ok(written)
}
