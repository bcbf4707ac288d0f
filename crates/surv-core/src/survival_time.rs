//! Survival time resolution.
//!
//! Each subject gets its survival time from one of two representations: the
//! difference between the status-change date and the reference date, or the
//! recorded status-change day count. The date difference wins wherever it can
//! be computed. All intermediate maps are keyed by [`RowId`], so resolving a
//! filtered subset never misaligns values with subjects.

use std::collections::BTreeMap;

use surv_model::{Result, RowId, Subject, SurvError};

use crate::dates::days_between;

/// Survival days computed from the reference and status-change dates.
///
/// Subjects where either date is missing or unparsable are absent from the map.
pub fn days_from_dates(subjects: &[Subject]) -> BTreeMap<RowId, f64> {
    subjects
        .iter()
        .filter_map(|subject| {
            let reference = subject.reference_date.as_deref()?;
            let change = subject.change_date.as_deref()?;
            let days = days_between(reference, change)?;
            Some((subject.row, days as f64))
        })
        .collect()
}

/// Survival days read from the status-change day count, taken as-is.
pub fn days_from_day_counts(subjects: &[Subject]) -> BTreeMap<RowId, f64> {
    subjects
        .iter()
        .filter_map(|subject| {
            let days = parse_day_count(subject.change_day.as_deref()?)?;
            Some((subject.row, days))
        })
        .collect()
}

fn parse_day_count(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|days| days.is_finite())
}

/// Resolves survival days for every subject, in subject order.
///
/// The date difference is used where available, the day count otherwise.
/// A subject with neither gets `None`.
///
/// # Errors
///
/// [`SurvError::NegativeDuration`] when a resolved value is below zero.
pub fn resolve_survival_days(subjects: &[Subject]) -> Result<Vec<(RowId, Option<f64>)>> {
    let from_dates = days_from_dates(subjects);
    let from_counts = days_from_day_counts(subjects);

    subjects
        .iter()
        .map(|subject| {
            let days = from_dates
                .get(&subject.row)
                .or_else(|| from_counts.get(&subject.row))
                .copied();
            if let Some(days) = days
                && days < 0.0
            {
                return Err(SurvError::NegativeDuration {
                    subject_id: subject.subject_id.clone(),
                    days,
                });
            }
            Ok((subject.row, days))
        })
        .collect()
}
