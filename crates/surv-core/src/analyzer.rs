//! Statistics backend seam.
//!
//! The pipeline talks to survival statistics only through
//! [`SurvivalAnalyzer`], so tests can substitute a recording double and the
//! estimator can be swapped without touching resolution or output code.
//!
//! # Example
//!
//! ```
//! use surv_core::{KaplanMeierAnalyzer, SurvivalAnalyzer};
//!
//! let analyzer = KaplanMeierAnalyzer::default();
//! let curve = analyzer
//!     .estimate_curve(&[5.0, 10.0, 15.0], &[true, false, true])
//!     .unwrap();
//! assert_eq!(curve.len(), 3);
//! ```

use anyhow::Result;
use surv_model::{CurvePoint, LogrankResult, SurvivalCurve};
use surv_stats::{DEFAULT_CONFIDENCE_LEVEL, KaplanMeierCurve, logrank_test};

/// Survival curve estimation and cross-group comparison.
pub trait SurvivalAnalyzer {
    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "survival analyzer"
    }

    /// Estimates the survival curve of one group.
    ///
    /// `days` are finite, non-negative survival times; `events[i]` tells
    /// whether subject `i` had the event.
    fn estimate_curve(&self, days: &[f64], events: &[bool]) -> Result<SurvivalCurve>;

    /// Tests whether the groups named by `labels` share one survival
    /// distribution. Requires at least two distinct labels.
    fn compare_groups(&self, days: &[f64], events: &[bool], labels: &[&str])
    -> Result<LogrankResult>;
}

/// Kaplan-Meier curves with log-log bounds and the log-rank test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KaplanMeierAnalyzer {
    pub confidence_level: f64,
}

impl KaplanMeierAnalyzer {
    pub fn new(confidence_level: f64) -> Self {
        Self { confidence_level }
    }
}

impl Default for KaplanMeierAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_LEVEL)
    }
}

impl SurvivalAnalyzer for KaplanMeierAnalyzer {
    fn name(&self) -> &'static str {
        "kaplan-meier"
    }

    fn estimate_curve(&self, days: &[f64], events: &[bool]) -> Result<SurvivalCurve> {
        let km = KaplanMeierCurve::estimate_with_level(days, events, self.confidence_level)?;
        let points = (0..km.len())
            .map(|i| CurvePoint {
                time: km.times[i],
                survival_prob: km.survival_prob[i],
                ci_lower: km.ci_lower[i],
                ci_upper: km.ci_upper[i],
            })
            .collect();
        Ok(SurvivalCurve::new(points))
    }

    fn compare_groups(
        &self,
        days: &[f64],
        events: &[bool],
        labels: &[&str],
    ) -> Result<LogrankResult> {
        let test = logrank_test(days, events, labels)?;
        Ok(LogrankResult {
            chi2: test.statistic,
            p: test.p_value,
            df: test.df,
        })
    }
}
