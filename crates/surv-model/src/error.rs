use thiserror::Error;

/// Errors raised while loading, resolving, or analyzing a cohort.
///
/// Every variant aborts the run. Missing survival times are not errors; they
/// travel through the pipeline as `None` and are dropped before estimation.
#[derive(Debug, Error)]
pub enum SurvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is absent from the input table.
    #[error("required column '{column}' not found in input table")]
    MissingColumn { column: String },

    /// The event mode option is not one of the recognized values.
    #[error("invalid mode '{value}': expected 'survival' or 'progression'")]
    InvalidMode { value: String },

    /// The options document could not be interpreted.
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },

    /// The status flag of a subject is not a recognizable boolean.
    #[error("subject {subject_id}: invalid status value '{value}'")]
    InvalidStatus { subject_id: String, value: String },

    /// The status change precedes the reference date.
    #[error("subject {subject_id}: negative survival time ({days} days)")]
    NegativeDuration { subject_id: String, days: f64 },

    /// A group key cannot be embedded in an output file name.
    #[error("group key '{key}' cannot be used in an output file name")]
    UnsafeGroupKey { key: String },

    /// The statistics backend rejected the input of a group.
    #[error("analysis failed for group '{group}': {message}")]
    Analyzer { group: String, message: String },
}

pub type Result<T> = std::result::Result<T, SurvError>;
