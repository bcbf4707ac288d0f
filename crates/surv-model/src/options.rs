//! Run options read from `options.json`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::profile::EventMode;

/// Contents of the options file.
///
/// Unknown keys are ignored so that option files shared with other tools
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// `"survival"` or `"progression"`; absent means overall survival.
    #[serde(default)]
    pub mode: Option<String>,
}

impl AnalysisOptions {
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Validates the mode value.
    ///
    /// # Errors
    ///
    /// Returns [`SurvError::InvalidMode`](crate::SurvError::InvalidMode) naming
    /// the offending value.
    pub fn event_mode(&self) -> Result<EventMode> {
        match self.mode.as_deref() {
            Some(value) => value.parse(),
            None => Ok(EventMode::default()),
        }
    }
}
