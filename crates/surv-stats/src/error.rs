//! Error types for the survival estimators.

use thiserror::Error;

/// Errors returned when estimator input is unusable.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// No observations were supplied.
    #[error("no observations")]
    Empty,

    /// Parallel input slices differ in length.
    #[error("length mismatch: {times} times, {other} {what}")]
    LengthMismatch {
        times: usize,
        other: usize,
        what: &'static str,
    },

    /// A time is NaN, infinite or negative.
    #[error("invalid observation time {time} at index {index}")]
    InvalidTime { index: usize, time: f64 },

    /// The comparison needs observations from at least two groups.
    #[error("log-rank test needs at least 2 groups, got {groups}")]
    TooFewGroups { groups: usize },

    /// The variance matrix of the test statistic cannot be inverted.
    #[error("log-rank variance is singular (no informative event times)")]
    SingularVariance,

    /// The confidence level is outside (0, 1).
    #[error("confidence level must be in (0, 1), got {level}")]
    InvalidConfidenceLevel { level: f64 },
}
