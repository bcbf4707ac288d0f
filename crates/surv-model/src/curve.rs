//! Analysis outputs: survival curves, censored entries and log-rank results.

use serde::{Deserialize, Serialize};

use crate::subject::RowId;

/// One step of a survival curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub time: f64,
    pub survival_prob: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

impl CurvePoint {
    /// Synthetic origin `(0, 1, 1, 1)` prepended for plotting continuity.
    pub const ORIGIN: CurvePoint = CurvePoint {
        time: 0.0,
        survival_prob: 1.0,
        ci_lower: 1.0,
        ci_upper: 1.0,
    };
}

/// Survival curve of one group: strictly increasing times, non-increasing probability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurvivalCurve {
    pub points: Vec<CurvePoint>,
}

impl SurvivalCurve {
    pub fn new(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest time at which survival drops to or below one half.
    pub fn median_survival(&self) -> Option<f64> {
        self.points
            .iter()
            .find(|point| point.survival_prob <= 0.5)
            .map(|point| point.time)
    }

    /// Prepends [`CurvePoint::ORIGIN`] unless the curve already starts at time zero.
    ///
    /// A curve with an observation at time zero keeps its own first point so
    /// that times stay strictly increasing.
    #[must_use]
    pub fn with_origin(mut self) -> Self {
        let starts_at_zero = self.points.first().is_some_and(|point| point.time == 0.0);
        if !starts_at_zero {
            self.points.insert(0, CurvePoint::ORIGIN);
        }
        self
    }
}

/// A right-censored subject and the time it was last observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensoredEntry {
    pub row: RowId,
    pub subject_id: String,
    pub days_at_censoring: Option<f64>,
}

/// Cross-group log-rank comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogrankResult {
    pub chi2: f64,
    pub p: f64,
    /// Number of groups minus one.
    pub df: usize,
}
