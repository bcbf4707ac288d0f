//! Right-censored subjects of a group.

use surv_model::{CensoredEntry, SurvivalRecord};

/// Entries for every record without an event, in record order.
pub fn extract_censored(records: &[SurvivalRecord]) -> Vec<CensoredEntry> {
    records
        .iter()
        .filter(|record| !record.event_occurred)
        .map(|record| CensoredEntry {
            row: record.row,
            subject_id: record.subject_id.clone(),
            days_at_censoring: record.survival_days,
        })
        .collect()
}
