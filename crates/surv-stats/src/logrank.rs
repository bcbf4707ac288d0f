//! K-sample log-rank test.
//!
//! At every distinct event time the observed events of each group are
//! compared with the events expected if all groups shared one hazard. The
//! statistic `(O - E)' V^-1 (O - E)` over the first `K - 1` groups follows a
//! chi-squared distribution with `K - 1` degrees of freedom under H0.

use crate::error::StatsError;

/// Result of the log-rank test.
#[derive(Debug, Clone, PartialEq)]
pub struct LogrankTest {
    /// Chi-squared test statistic.
    pub statistic: f64,
    /// Degrees of freedom (number of groups minus one).
    pub df: usize,
    /// Upper-tail probability of the statistic.
    pub p_value: f64,
}

/// Compares the survival distributions of the groups named by `groups`.
///
/// Groups are indexed in first-occurrence order of their labels.
///
/// ```
/// # use surv_stats::logrank_test;
/// let times = [5.0, 10.0, 15.0, 20.0, 25.0];
/// let events = [true, false, true, false, true];
/// let groups = ["A", "B", "A", "B", "A"];
/// let test = logrank_test(&times, &events, &groups).unwrap();
/// assert!((test.statistic - 1.163).abs() < 1e-2);
/// assert!((test.p_value - 0.280).abs() < 1e-2);
/// ```
pub fn logrank_test<G: PartialEq>(
    times: &[f64],
    events: &[bool],
    groups: &[G],
) -> Result<LogrankTest, StatsError> {
    let n = times.len();
    if n == 0 {
        return Err(StatsError::Empty);
    }
    if events.len() != n {
        return Err(StatsError::LengthMismatch {
            times: n,
            other: events.len(),
            what: "event flags",
        });
    }
    if groups.len() != n {
        return Err(StatsError::LengthMismatch {
            times: n,
            other: groups.len(),
            what: "group labels",
        });
    }
    if let Some((index, &time)) = times.iter().enumerate().find(|(_, time)| !time.is_finite()) {
        return Err(StatsError::InvalidTime { index, time });
    }

    let (group_index, n_groups) = index_groups(groups);
    if n_groups < 2 {
        return Err(StatsError::TooFewGroups { groups: n_groups });
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| times[a].total_cmp(&times[b]));

    let mut at_risk = vec![0usize; n_groups];
    for &g in &group_index {
        at_risk[g] += 1;
    }

    let mut observed = vec![0.0_f64; n_groups];
    let mut expected = vec![0.0_f64; n_groups];
    // row-major K x K covariance of (O - E)
    let mut variance = vec![0.0_f64; n_groups * n_groups];

    let mut i = 0;
    while i < n {
        let t = times[order[i]];

        let mut deaths = vec![0usize; n_groups];
        let mut leaving = vec![0usize; n_groups];
        let mut j = i;
        while j < n && times[order[j]] == t {
            let g = group_index[order[j]];
            if events[order[j]] {
                deaths[g] += 1;
            }
            leaving[g] += 1;
            j += 1;
        }

        let d_total: usize = deaths.iter().sum();
        let n_total: usize = at_risk.iter().sum();
        if d_total > 0 {
            let d = d_total as f64;
            let nt = n_total as f64;
            for g in 0..n_groups {
                observed[g] += deaths[g] as f64;
                expected[g] += at_risk[g] as f64 * d / nt;
            }
            if n_total > 1 {
                let scale = d * (nt - d) / (nt * nt * (nt - 1.0));
                for g in 0..n_groups {
                    let ng = at_risk[g] as f64;
                    for h in 0..n_groups {
                        let nh = at_risk[h] as f64;
                        variance[g * n_groups + h] += if g == h {
                            ng * (nt - ng) * scale
                        } else {
                            -ng * nh * scale
                        };
                    }
                }
            }
        }

        for g in 0..n_groups {
            at_risk[g] -= leaving[g];
        }
        i = j;
    }

    let df = n_groups - 1;
    let diff: Vec<f64> = (0..df).map(|g| observed[g] - expected[g]).collect();
    let mut sub = vec![0.0_f64; df * df];
    for r in 0..df {
        for c in 0..df {
            sub[r * df + c] = variance[r * n_groups + c];
        }
    }
    let statistic = quad_form_inv(&diff, &sub, df).ok_or(StatsError::SingularVariance)?;
    let p_value = chi2_sf(statistic, df);

    Ok(LogrankTest {
        statistic,
        df,
        p_value,
    })
}

/// Maps labels to dense indices in first-occurrence order.
fn index_groups<G: PartialEq>(groups: &[G]) -> (Vec<usize>, usize) {
    let mut seen: Vec<&G> = Vec::new();
    let mut indices = Vec::with_capacity(groups.len());
    for label in groups {
        let index = match seen.iter().position(|known| *known == label) {
            Some(index) => index,
            None => {
                seen.push(label);
                seen.len() - 1
            }
        };
        indices.push(index);
    }
    (indices, seen.len())
}

/// `u' V^-1 u` through a Cholesky factorization of the symmetric matrix `v`.
///
/// Returns `None` when `v` is not positive definite.
fn quad_form_inv(u: &[f64], v: &[f64], p: usize) -> Option<f64> {
    let scale = (0..p).map(|i| v[i * p + i].abs()).fold(0.0_f64, f64::max);
    if scale <= 0.0 {
        return None;
    }
    let tolerance = scale * 1e-12;

    let mut lower = vec![0.0_f64; p * p];
    for i in 0..p {
        for j in 0..=i {
            let mut sum = v[i * p + j];
            for k in 0..j {
                sum -= lower[i * p + k] * lower[j * p + k];
            }
            if i == j {
                if sum <= tolerance {
                    return None;
                }
                lower[i * p + i] = sum.sqrt();
            } else {
                lower[i * p + j] = sum / lower[j * p + j];
            }
        }
    }

    // Forward substitution: L y = u, then u' V^-1 u = y'y
    let mut y = vec![0.0_f64; p];
    for i in 0..p {
        let mut sum = u[i];
        for k in 0..i {
            sum -= lower[i * p + k] * y[k];
        }
        y[i] = sum / lower[i * p + i];
    }
    Some(y.iter().map(|value| value * value).sum::<f64>().max(0.0))
}

/// Upper tail of chi-squared distribution P(X > x) with `df` degrees of freedom.
fn chi2_sf(x: f64, df: usize) -> f64 {
    if x <= 0.0 || df == 0 {
        return 1.0;
    }
    // P(X > x) = 1 - gamma_lr(df/2, x/2), gamma_lr being the regularized lower incomplete gamma.
    let a = df as f64 / 2.0;
    let b = x / 2.0;
    1.0 - statrs::function::gamma::gamma_lr(a, b)
}
