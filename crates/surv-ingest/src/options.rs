//! Loading of the per-run options file.

use std::fs;
use std::path::Path;

use tracing::debug;

use surv_model::{AnalysisOptions, Result, SurvError};

/// Name of the options file inside the working directory.
pub const OPTIONS_FILE: &str = "options.json";

/// Reads `options.json` from `dir`.
///
/// A missing file yields the default options (overall survival). The mode
/// value itself is validated later by [`AnalysisOptions::event_mode`].
pub fn load_options(dir: &Path) -> Result<AnalysisOptions> {
    let path = dir.join(OPTIONS_FILE);
    if !path.is_file() {
        debug!(path = %path.display(), "no options file, using defaults");
        return Ok(AnalysisOptions::default());
    }
    let contents = fs::read_to_string(&path)?;
    parse_options(&contents)
}

pub fn parse_options(contents: &str) -> Result<AnalysisOptions> {
    serde_json::from_str(contents).map_err(|error| SurvError::InvalidOptions {
        message: format!("{OPTIONS_FILE}: {error}"),
    })
}
