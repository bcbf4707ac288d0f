//! Event indicator resolution from the boolean status column.

use surv_model::{EventPolarity, Result, Subject, SurvError};
use tracing::warn;

use crate::redact::redact_value;

const TRUE_TOKENS: &[&str] = &["True", "true", "TRUE", "1", "T", "Y", "yes"];
const FALSE_TOKENS: &[&str] = &["False", "false", "FALSE", "0", "F", "N", "no"];

/// Parses a status cell as a boolean flag.
pub fn parse_flag(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if TRUE_TOKENS.contains(&trimmed) {
        Some(true)
    } else if FALSE_TOKENS.contains(&trimmed) {
        Some(false)
    } else {
        None
    }
}

/// Whether the event occurred for `subject`, given the profile's polarity.
///
/// A missing status cell never counts as an event, whatever the polarity;
/// the subject is treated as censored.
///
/// # Errors
///
/// [`SurvError::InvalidStatus`] when the status cell is present but not a
/// recognized boolean.
pub fn resolve_event(subject: &Subject, polarity: EventPolarity) -> Result<bool> {
    let Some(raw) = subject.status.as_deref() else {
        warn!(
            subject = redact_value(&subject.subject_id),
            "missing status treated as censored"
        );
        return Ok(false);
    };
    let flag = parse_flag(raw).ok_or_else(|| SurvError::InvalidStatus {
        subject_id: subject.subject_id.clone(),
        value: raw.to_string(),
    })?;
    Ok(polarity.event_occurred(flag))
}
