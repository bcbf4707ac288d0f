//! Single-run driver: load, analyze, write.
//!
//! Outputs are written only after the analysis of every group and the
//! cross-group test have succeeded; any error before that leaves the output
//! directory as it was.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use surv_core::{AnalysisContext, KaplanMeierAnalyzer, run_analysis};
use surv_ingest::{input_path, load_options, load_subjects, read_tsv_table};
use surv_model::AnalysisOptions;
use surv_report::write_outputs;

use crate::types::{RunConfig, RunResult};

/// Runs the survival analysis for one working directory.
///
/// # Errors
///
/// Unreadable input, schema and configuration errors, unusable subject data
/// and analyzer failures all abort the run. Typed causes are available
/// through [`anyhow::Error::downcast_ref`] as
/// [`SurvError`](surv_model::SurvError).
pub fn run_workdir(config: &RunConfig) -> Result<RunResult> {
    let run_span = info_span!(
        "run",
        workdir = %config.workdir.display(),
        profile = %config.profile
    );
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let input = input_path(&config.workdir);
    let table = read_tsv_table(&input)?;
    info!(
        rows = table.row_count(),
        columns = table.headers.len(),
        "input loaded"
    );

    let options = if config.profile.uses_event_mode() {
        load_options(&config.workdir)?
    } else {
        AnalysisOptions::default()
    };
    let context = AnalysisContext::from_options(config.profile, &options)?;
    debug!(mode = %context.mode, status = context.columns.event.status, "event columns selected");

    let subjects = load_subjects(&table, &context.columns)
        .with_context(|| format!("load subjects from {}", input.display()))?;
    let analyzer = KaplanMeierAnalyzer::new(context.confidence_level);
    let analysis = run_analysis(&subjects, &context, &analyzer)?;

    let output_dir = config.output_dir().to_path_buf();
    let written = write_outputs(&output_dir, &analysis)?;

    info!(
        groups = analysis.groups.len(),
        files = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunResult {
        output_dir,
        analysis,
        written,
    })
}
