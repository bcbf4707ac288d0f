//! Survival statistics for right-censored data.
//!
//! - [`KaplanMeierCurve`]: Kaplan-Meier estimator with log-log confidence bounds
//! - [`logrank_test`]: K-sample log-rank comparison of survival distributions
//!
//! ```
//! use surv_stats::{KaplanMeierCurve, logrank_test};
//!
//! let times = [5.0, 10.0, 15.0, 20.0, 25.0];
//! let events = [true, false, true, false, true];
//! let curve = KaplanMeierCurve::estimate(&times, &events).unwrap();
//! assert_eq!(curve.len(), 5);
//!
//! let test = logrank_test(&times, &events, &["A", "B", "A", "B", "A"]).unwrap();
//! assert_eq!(test.df, 1);
//! ```

pub mod error;
pub mod kaplan_meier;
pub mod logrank;

pub use error::StatsError;
pub use kaplan_meier::{DEFAULT_CONFIDENCE_LEVEL, KaplanMeierCurve};
pub use logrank::{LogrankTest, logrank_test};
