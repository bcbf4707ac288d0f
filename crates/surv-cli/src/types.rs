use std::path::{Path, PathBuf};

use surv_core::CohortAnalysis;
use surv_model::SchemaProfile;

/// Inputs of one run, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding `input.tsv` and, optionally, `options.json`.
    pub workdir: PathBuf,
    /// Where artifacts go; the working directory when `None`.
    pub output_dir: Option<PathBuf>,
    pub profile: SchemaProfile,
}

impl RunConfig {
    pub fn new(workdir: impl Into<PathBuf>, profile: SchemaProfile) -> Self {
        Self {
            workdir: workdir.into(),
            output_dir: None,
            profile,
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.workdir)
    }
}

#[derive(Debug)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub analysis: CohortAnalysis,
    pub written: Vec<PathBuf>,
}
