//! Result frames for curves, censored sets and the log-rank test.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use surv_model::{CensoredEntry, LogrankResult, SurvivalCurve};

pub const TIME: &str = "time";
pub const SURVIVAL_PROB: &str = "survival_prob";
pub const CONF_INT_LOWER: &str = "conf_int_lower";
pub const CONF_INT_UPPER: &str = "conf_int_upper";
pub const SUBJECT_ID: &str = "subject_id";
pub const DAYS_AT_CENSORING: &str = "days_at_censoring";
pub const CHI2: &str = "chi2";
pub const P_VALUE: &str = "p";

fn float_column(name: &str, values: Vec<f64>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// `time, survival_prob, conf_int_lower, conf_int_upper`, one row per point.
pub fn curve_frame(curve: &SurvivalCurve) -> PolarsResult<DataFrame> {
    let points = &curve.points;
    DataFrame::new(vec![
        float_column(TIME, points.iter().map(|p| p.time).collect()),
        float_column(SURVIVAL_PROB, points.iter().map(|p| p.survival_prob).collect()),
        float_column(CONF_INT_LOWER, points.iter().map(|p| p.ci_lower).collect()),
        float_column(CONF_INT_UPPER, points.iter().map(|p| p.ci_upper).collect()),
    ])
}

/// `subject_id, days_at_censoring`; a missing time is a null cell.
pub fn censored_frame(entries: &[CensoredEntry]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = entries.iter().map(|e| e.subject_id.as_str()).collect();
    let days: Vec<Option<f64>> = entries.iter().map(|e| e.days_at_censoring).collect();
    DataFrame::new(vec![
        Series::new(SUBJECT_ID.into(), ids).into_column(),
        Series::new(DAYS_AT_CENSORING.into(), days).into_column(),
    ])
}

/// Single-row `chi2, p` frame.
pub fn logrank_frame(result: &LogrankResult) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        float_column(CHI2, vec![result.chi2]),
        float_column(P_VALUE, vec![result.p]),
    ])
}

/// Appends a constant string column holding the group key.
pub fn with_label(mut frame: DataFrame, column: &str, key: &str) -> PolarsResult<DataFrame> {
    let labels = Series::new(column.into(), vec![key; frame.height()]);
    frame.with_column(labels)?;
    Ok(frame)
}

/// Stacks labeled per-group frames in the given order.
///
/// Returns `None` when `frames` is empty.
pub fn concat_frames(frames: Vec<DataFrame>) -> PolarsResult<Option<DataFrame>> {
    let mut frames = frames.into_iter();
    let Some(mut combined) = frames.next() else {
        return Ok(None);
    };
    for frame in frames {
        combined.vstack_mut(&frame)?;
    }
    combined.align_chunks();
    Ok(Some(combined))
}

#[cfg(test)]
mod tests {
    use surv_model::{CurvePoint, RowId};

    use super::*;

    #[test]
    fn curve_columns_in_order() {
        let curve = SurvivalCurve::new(vec![CurvePoint::ORIGIN]);
        let frame = curve_frame(&curve).unwrap();
        let names: Vec<&str> = frame.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec![TIME, SURVIVAL_PROB, CONF_INT_LOWER, CONF_INT_UPPER]
        );
        assert_eq!(frame.height(), 1);
    }

    #[test]
    fn labeled_frames_stack_in_group_order() {
        let a = censored_frame(&[CensoredEntry {
            row: RowId(1),
            subject_id: "B".into(),
            days_at_censoring: Some(10.0),
        }])
        .unwrap();
        let b = censored_frame(&[]).unwrap();
        let c = censored_frame(&[CensoredEntry {
            row: RowId(4),
            subject_id: "E".into(),
            days_at_censoring: None,
        }])
        .unwrap();
        let frames = vec![
            with_label(a, "group_label", "x").unwrap(),
            with_label(b, "group_label", "y").unwrap(),
            with_label(c, "group_label", "z").unwrap(),
        ];
        let combined = concat_frames(frames).unwrap().unwrap();
        assert_eq!(combined.height(), 2);
        assert_eq!(combined.width(), 3);
        let labels = combined.column("group_label").unwrap();
        assert_eq!(labels.str().unwrap().get(1), Some("z"));
        assert!(concat_frames(Vec::new()).unwrap().is_none());
    }
}
