//! Cohort analysis pipeline.
//!
//! Stages run strictly in order and stop at the first error:
//!
//! 1. partition the subject table by group key
//! 2. resolve survival days and event flags per group
//! 3. estimate one curve per group and collect its censored subjects
//! 4. compare groups with the log-rank test when there are at least two
//!
//! Nothing is written here; the caller persists a [`CohortAnalysis`] only
//! after it has been fully computed.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use surv_ingest::SubjectTable;
use surv_model::{
    CensoredEntry, EventMode, EventPolarity, Group, GroupKey, GroupingKey, LogrankResult,
    Result, RowId, SchemaProfile, SurvError, SurvivalCurve, SurvivalRecord,
};

use crate::analyzer::SurvivalAnalyzer;
use crate::censored::extract_censored;
use crate::context::AnalysisContext;
use crate::exit_status::resolve_event;
use crate::partition::partition;
use crate::redact::redact_value;
use crate::survival_time::resolve_survival_days;

/// Group name reported when the cross-group comparison fails.
const ALL_GROUPS: &str = "all groups";

/// Everything computed for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAnalysis {
    pub key: GroupKey,
    /// One record per subject, in input order.
    pub records: Vec<SurvivalRecord>,
    pub curve: SurvivalCurve,
    pub censored: Vec<CensoredEntry>,
}

impl GroupAnalysis {
    pub fn subject_count(&self) -> usize {
        self.records.len()
    }

    pub fn event_count(&self) -> usize {
        self.records.iter().filter(|record| record.event_occurred).count()
    }

    pub fn censored_count(&self) -> usize {
        self.censored.len()
    }

    /// Subjects left out of estimation because no survival time resolved.
    pub fn missing_time_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.survival_days.is_none())
            .count()
    }

    pub fn median_survival(&self) -> Option<f64> {
        self.curve.median_survival()
    }

    /// Survival times and event flags of the records that have a time.
    fn usable(&self) -> (Vec<f64>, Vec<bool>) {
        self.records
            .iter()
            .filter_map(|record| Some((record.survival_days?, record.event_occurred)))
            .unzip()
    }
}

/// Result of a full run, groups in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortAnalysis {
    pub profile: SchemaProfile,
    pub mode: EventMode,
    pub grouping: GroupingKey,
    pub groups: Vec<GroupAnalysis>,
    /// Present only when two or more groups were compared.
    pub logrank: Option<LogrankResult>,
}

impl CohortAnalysis {
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.iter().map(|group| &group.key)
    }

    pub fn subject_count(&self) -> usize {
        self.groups.iter().map(GroupAnalysis::subject_count).sum()
    }
}

/// Resolves survival days and event flags for every subject of `group`.
///
/// Both derived quantities are joined to their subject through its row id.
///
/// # Errors
///
/// [`SurvError::NegativeDuration`] and [`SurvError::InvalidStatus`] from the
/// resolvers.
pub fn resolve_group(group: &Group, polarity: EventPolarity) -> Result<Vec<SurvivalRecord>> {
    let days: BTreeMap<RowId, Option<f64>> = resolve_survival_days(&group.subjects)?
        .into_iter()
        .collect();
    group
        .subjects
        .iter()
        .map(|subject| {
            Ok(SurvivalRecord {
                row: subject.row,
                subject_id: subject.subject_id.clone(),
                survival_days: days.get(&subject.row).copied().flatten(),
                event_occurred: resolve_event(subject, polarity)?,
            })
        })
        .collect()
}

/// Resolves, estimates and extracts the censored set of one group.
///
/// Subjects without a survival time are excluded from estimation but stay in
/// the records and, when censored, in the censored set.
///
/// # Errors
///
/// Resolver errors, or [`SurvError::Analyzer`] when the group has no usable
/// time or the estimator rejects its input.
pub fn analyze_group(
    group: &Group,
    context: &AnalysisContext,
    analyzer: &dyn SurvivalAnalyzer,
) -> Result<GroupAnalysis> {
    let span = info_span!("group", group = %group.key, subjects = group.len());
    let _guard = span.enter();

    let records = resolve_group(group, context.columns.event.polarity)?;
    let censored = extract_censored(&records);
    let mut analysis = GroupAnalysis {
        key: group.key.clone(),
        records,
        curve: SurvivalCurve::default(),
        censored,
    };

    let missing = analysis.missing_time_count();
    if missing > 0 {
        let dropped: Vec<&str> = analysis
            .records
            .iter()
            .filter(|record| record.survival_days.is_none())
            .map(|record| redact_value(&record.subject_id))
            .collect();
        warn!(
            group = %group.key,
            dropped = missing,
            subjects = ?dropped,
            "subjects without a survival time excluded from estimation"
        );
    }

    let (days, events) = analysis.usable();
    if days.is_empty() {
        return Err(SurvError::Analyzer {
            group: group.key.to_string(),
            message: "no subject has a usable survival time".to_string(),
        });
    }

    let curve = analyzer
        .estimate_curve(&days, &events)
        .map_err(|error| SurvError::Analyzer {
            group: group.key.to_string(),
            message: format!("{error:#}"),
        })?;
    analysis.curve = if context.profile.prepends_origin() {
        curve.with_origin()
    } else {
        curve
    };

    debug!(
        group = %group.key,
        analyzer = analyzer.name(),
        events = analysis.event_count(),
        censored = analysis.censored_count(),
        curve_points = analysis.curve.len(),
        "group analyzed"
    );
    Ok(analysis)
}

/// Log-rank comparison across groups; `None` with fewer than two groups.
///
/// # Errors
///
/// [`SurvError::Analyzer`] when the test rejects the pooled data.
pub fn compare_cohorts(
    groups: &[GroupAnalysis],
    analyzer: &dyn SurvivalAnalyzer,
) -> Result<Option<LogrankResult>> {
    if groups.len() < 2 {
        return Ok(None);
    }
    let mut days = Vec::new();
    let mut events = Vec::new();
    let mut labels = Vec::new();
    for group in groups {
        let (group_days, group_events) = group.usable();
        labels.extend(std::iter::repeat_n(group.key.as_str(), group_days.len()));
        days.extend(group_days);
        events.extend(group_events);
    }
    let result = analyzer
        .compare_groups(&days, &events, &labels)
        .map_err(|error| SurvError::Analyzer {
            group: ALL_GROUPS.to_string(),
            message: format!("{error:#}"),
        })?;
    info!(
        groups = groups.len(),
        chi2 = result.chi2,
        p = result.p,
        "log-rank test complete"
    );
    Ok(Some(result))
}

/// Runs the whole analysis over a loaded subject table.
///
/// The analyzer is invoked once per group for the curve and at most once for
/// the comparison.
///
/// # Errors
///
/// The first resolver or analyzer error aborts the run.
pub fn run_analysis(
    table: &SubjectTable,
    context: &AnalysisContext,
    analyzer: &dyn SurvivalAnalyzer,
) -> Result<CohortAnalysis> {
    let span = info_span!(
        "analysis",
        profile = %context.profile,
        mode = %context.mode,
        subjects = table.len()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let partition = partition(table);
    if let GroupingKey::Implicit = table.grouping {
        debug!(
            column = context.columns.grouping,
            "grouping column absent, analyzing one implicit group"
        );
    }
    if partition.is_empty() {
        return Err(SurvError::Analyzer {
            group: GroupKey::IMPLICIT.to_string(),
            message: "input table has no subjects".to_string(),
        });
    }
    info!(groups = partition.len(), "cohort partitioned");

    let groups = partition
        .groups
        .iter()
        .map(|group| analyze_group(group, context, analyzer))
        .collect::<Result<Vec<_>>>()?;
    let logrank = compare_cohorts(&groups, analyzer)?;

    info!(
        groups = groups.len(),
        subjects = table.len(),
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(CohortAnalysis {
        profile: context.profile,
        mode: context.mode,
        grouping: table.grouping.clone(),
        groups,
        logrank,
    })
}
