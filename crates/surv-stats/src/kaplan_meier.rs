use std::f64::consts::SQRT_2;

use statrs::function::erf::erf_inv;

use crate::error::StatsError;

/// Kaplan-Meier survival curve with pointwise log-log confidence bounds.
///
/// The Kaplan-Meier estimator is a non-parametric statistic used to estimate the survival
/// function from lifetime data. It accounts for censored data (observations where the event
/// of interest has not occurred by the end of the study period).
///
/// # Fields
///
/// The curve stores parallel vectors with one entry per distinct observed time, whether an
/// event or only censoring happened at that time:
/// - Observed time
/// - Survival probability and its confidence bounds
/// - Number of subjects at risk just before the time
/// - Number of events at the time
#[derive(Debug, Clone, PartialEq)]
pub struct KaplanMeierCurve {
    /// Distinct observed times, strictly increasing.
    pub times: Vec<f64>,
    /// Survival probability at each corresponding time point.
    /// Values range from 0.0 (no survival) to 1.0 (complete survival).
    pub survival_prob: Vec<f64>,
    /// Lower confidence bound of the survival probability.
    pub ci_lower: Vec<f64>,
    /// Upper confidence bound of the survival probability.
    pub ci_upper: Vec<f64>,
    /// Number of subjects at risk (not yet experienced the event or censored) at each time point.
    pub at_risk: Vec<usize>,
    /// Number of events (non-censored observations) that occurred at each time point.
    pub events: Vec<usize>,
}

/// Confidence level used by [`KaplanMeierCurve::estimate`].
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

impl KaplanMeierCurve {
    /// Estimates the survival curve at the default 95% confidence level.
    ///
    /// # Arguments
    ///
    /// * `times` - Time of event or censoring for each subject
    /// * `events` - `true` if the event occurred, `false` if the subject was censored
    ///
    /// # Examples
    ///
    /// ```
    /// # use surv_stats::KaplanMeierCurve;
    /// let times = [10.0, 20.0, 30.0];
    /// let events = [true, false, true];
    /// let curve = KaplanMeierCurve::estimate(&times, &events).unwrap();
    /// assert_eq!(curve.times, vec![10.0, 20.0, 30.0]);
    /// assert!((curve.survival_prob[0] - 2.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn estimate(times: &[f64], events: &[bool]) -> Result<Self, StatsError> {
        Self::estimate_with_level(times, events, DEFAULT_CONFIDENCE_LEVEL)
    }

    /// Estimates the survival curve with bounds at `confidence_level`.
    ///
    /// The bounds use the log-log transform with Greenwood's variance:
    /// `sigma = sqrt(sum d / (n (n - d))) / |ln S|`, lower `S^exp(z sigma)`,
    /// upper `S^exp(-z sigma)`. Where `S` is 1 both bounds are 1, where `S`
    /// is 0 both bounds are 0.
    pub fn estimate_with_level(
        times: &[f64],
        events: &[bool],
        confidence_level: f64,
    ) -> Result<Self, StatsError> {
        if times.is_empty() {
            return Err(StatsError::Empty);
        }
        if events.len() != times.len() {
            return Err(StatsError::LengthMismatch {
                times: times.len(),
                other: events.len(),
                what: "event flags",
            });
        }
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(StatsError::InvalidConfidenceLevel {
                level: confidence_level,
            });
        }
        if let Some((index, &time)) = times
            .iter()
            .enumerate()
            .find(|(_, time)| !time.is_finite() || **time < 0.0)
        {
            return Err(StatsError::InvalidTime { index, time });
        }

        let z = SQRT_2 * erf_inv(confidence_level);

        // Sort by time
        let mut order: Vec<usize> = (0..times.len()).collect();
        order.sort_by(|&a, &b| times[a].total_cmp(&times[b]));

        let mut curve = Self {
            times: vec![],
            survival_prob: vec![],
            ci_lower: vec![],
            ci_upper: vec![],
            at_risk: vec![],
            events: vec![],
        };

        let mut current_survival = 1.0;
        let mut variance_sum = 0.0;
        let total = order.len();

        let mut i = 0;
        while i < total {
            let current_time = times[order[i]];
            let at_risk = total - i;

            let mut event_count = 0;
            let mut j = i;
            while j < total && times[order[j]] == current_time {
                if events[order[j]] {
                    event_count += 1;
                }
                j += 1;
            }

            if event_count > 0 {
                let d = event_count as f64;
                let n = at_risk as f64;
                current_survival *= 1.0 - d / n;
                variance_sum += if event_count < at_risk {
                    d / (n * (n - d))
                } else {
                    f64::INFINITY
                };
            }

            let (lower, upper) = log_log_bounds(current_survival, variance_sum, z);
            curve.times.push(current_time);
            curve.survival_prob.push(current_survival);
            curve.ci_lower.push(lower);
            curve.ci_upper.push(upper);
            curve.at_risk.push(at_risk);
            curve.events.push(event_count);

            i = j;
        }

        Ok(curve)
    }

    /// Number of points on the curve.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the median survival time.
    ///
    /// The median survival time is the earliest time at which the survival
    /// probability drops to or below 50%. If the survival probability never
    /// reaches 50%, this method returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use surv_stats::KaplanMeierCurve;
    /// let curve = KaplanMeierCurve::estimate(&[10.0, 20.0, 30.0], &[true, true, true]).unwrap();
    /// assert_eq!(curve.median_survival(), Some(20.0));
    /// ```
    #[must_use]
    pub fn median_survival(&self) -> Option<f64> {
        let index = self.survival_prob.iter().position(|&prob| prob <= 0.5)?;
        Some(self.times[index])
    }
}

fn log_log_bounds(survival: f64, variance_sum: f64, z: f64) -> (f64, f64) {
    if survival >= 1.0 {
        return (1.0, 1.0);
    }
    if survival <= 0.0 || !variance_sum.is_finite() {
        return (0.0, 0.0);
    }
    let log_survival = survival.ln();
    let sigma = variance_sum.sqrt() / log_survival.abs();
    let lower = survival.powf((z * sigma).exp());
    let upper = survival.powf((-z * sigma).exp());
    (lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES: [f64; 5] = [5.0, 10.0, 15.0, 20.0, 25.0];
    const EVENTS: [bool; 5] = [true, false, true, false, true];

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn one_point_per_distinct_time() {
        let curve = KaplanMeierCurve::estimate(&TIMES, &EVENTS).unwrap();
        assert_eq!(curve.len(), 5);
        assert_eq!(curve.times, TIMES.to_vec());
        assert_eq!(curve.at_risk, vec![5, 4, 3, 2, 1]);
        assert_eq!(curve.events, vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn survival_steps_only_at_events() {
        let curve = KaplanMeierCurve::estimate(&TIMES, &EVENTS).unwrap();
        assert_close(curve.survival_prob[0], 0.8);
        assert_close(curve.survival_prob[1], 0.8);
        assert_close(curve.survival_prob[2], 0.8 * 2.0 / 3.0);
        assert_close(curve.survival_prob[3], 0.8 * 2.0 / 3.0);
        assert_close(curve.survival_prob[4], 0.0);
    }

    #[test]
    fn log_log_bounds_match_reference() {
        let curve = KaplanMeierCurve::estimate(&TIMES, &EVENTS).unwrap();
        assert_close(curve.ci_lower[0], 0.203_809);
        assert_close(curve.ci_upper[0], 0.969_180);
        assert_close(curve.ci_lower[2], 0.068_332);
        assert_close(curve.ci_upper[2], 0.863_071);
        assert_eq!((curve.ci_lower[4], curve.ci_upper[4]), (0.0, 0.0));
    }

    #[test]
    fn bounds_are_one_before_first_event() {
        let curve = KaplanMeierCurve::estimate(&[3.0, 7.0], &[false, true]).unwrap();
        assert_eq!(curve.survival_prob[0], 1.0);
        assert_eq!((curve.ci_lower[0], curve.ci_upper[0]), (1.0, 1.0));
    }

    #[test]
    fn tied_times_collapse() {
        let curve =
            KaplanMeierCurve::estimate(&[2.0, 2.0, 2.0, 4.0], &[true, false, true, false]).unwrap();
        assert_eq!(curve.times, vec![2.0, 4.0]);
        assert_eq!(curve.events, vec![2, 0]);
        assert_close(curve.survival_prob[0], 0.5);
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let curve = KaplanMeierCurve::estimate(&[25.0, 5.0, 15.0], &[true, true, false]).unwrap();
        assert_eq!(curve.times, vec![5.0, 15.0, 25.0]);
    }

    #[test]
    fn median_is_first_drop_to_half() {
        let curve = KaplanMeierCurve::estimate(&TIMES, &EVENTS).unwrap();
        assert_close(curve.survival_prob[1], 0.8);
        // 0.8 until t=10, 0.5333 until t=20, first drop below 0.5 at t=25
        assert_eq!(curve.median_survival(), Some(25.0));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(KaplanMeierCurve::estimate(&[], &[]), Err(StatsError::Empty));
        assert!(matches!(
            KaplanMeierCurve::estimate(&[1.0, 2.0], &[true]),
            Err(StatsError::LengthMismatch { .. })
        ));
        assert!(matches!(
            KaplanMeierCurve::estimate(&[1.0, f64::NAN], &[true, true]),
            Err(StatsError::InvalidTime { index: 1, .. })
        ));
        assert!(matches!(
            KaplanMeierCurve::estimate(&[-1.0], &[true]),
            Err(StatsError::InvalidTime { index: 0, .. })
        ));
        assert!(matches!(
            KaplanMeierCurve::estimate_with_level(&[1.0], &[true], 1.5),
            Err(StatsError::InvalidConfidenceLevel { .. })
        ));
    }
}
