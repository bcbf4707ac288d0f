//! Per-run analysis context.

use surv_model::{AnalysisOptions, ColumnSpec, EventMode, Result, SchemaProfile};
use surv_stats::DEFAULT_CONFIDENCE_LEVEL;

/// Settings fixed for the duration of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisContext {
    pub profile: SchemaProfile,
    /// Event type; always overall survival for profiles without a mode.
    pub mode: EventMode,
    pub confidence_level: f64,
    pub columns: ColumnSpec,
}

impl AnalysisContext {
    pub fn new(profile: SchemaProfile, mode: EventMode) -> Self {
        let mode = if profile.uses_event_mode() {
            mode
        } else {
            EventMode::OverallSurvival
        };
        Self {
            profile,
            mode,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            columns: profile.columns(mode),
        }
    }

    /// Builds the context from the options document.
    ///
    /// Profiles that do not read a mode ignore the options entirely, so a
    /// stray `mode` value cannot fail them.
    ///
    /// # Errors
    ///
    /// [`SurvError::InvalidMode`](surv_model::SurvError::InvalidMode) when the
    /// profile reads a mode and the value is not recognized.
    pub fn from_options(profile: SchemaProfile, options: &AnalysisOptions) -> Result<Self> {
        let mode = if profile.uses_event_mode() {
            options.event_mode()?
        } else {
            EventMode::OverallSurvival
        };
        Ok(Self::new(profile, mode))
    }
}

#[cfg(test)]
mod tests {
    use surv_model::SurvError;

    use super::*;

    #[test]
    fn mode_selects_event_columns() {
        let options = AnalysisOptions::default().with_mode("progression");
        let context =
            AnalysisContext::from_options(SchemaProfile::ProgressionSurvival, &options).unwrap();
        assert_eq!(context.mode, EventMode::ProgressionFree);
        assert_eq!(context.columns.event.status, "progression_status");
    }

    #[test]
    fn modeless_profiles_ignore_options() {
        let options = AnalysisOptions::default().with_mode("vital");
        let context = AnalysisContext::from_options(SchemaProfile::Donor, &options).unwrap();
        assert_eq!(context.mode, EventMode::OverallSurvival);
        assert_eq!(context.columns.subject_id, "donor_id");

        let error =
            AnalysisContext::from_options(SchemaProfile::ProgressionSurvival, &options).unwrap_err();
        assert!(matches!(error, SurvError::InvalidMode { .. }));
    }
}
