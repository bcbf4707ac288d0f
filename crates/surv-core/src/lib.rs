//! Survival analysis of cohorts: resolution of survival times and event
//! flags, partitioning into groups, curve estimation and group comparison.

pub mod analyzer;
pub mod censored;
pub mod context;
pub mod dates;
pub mod exit_status;
pub mod partition;
pub mod pipeline;
pub mod redact;
pub mod survival_time;

pub use analyzer::{KaplanMeierAnalyzer, SurvivalAnalyzer};
pub use censored::extract_censored;
pub use context::AnalysisContext;
pub use dates::{days_between, parse_datetime};
pub use exit_status::{parse_flag, resolve_event};
pub use partition::{Partition, partition};
pub use pipeline::{
    CohortAnalysis, GroupAnalysis, analyze_group, compare_cohorts, resolve_group, run_analysis,
};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
pub use survival_time::{days_from_day_counts, days_from_dates, resolve_survival_days};
