//! Date and date-time parsing for reference and status-change columns.
//!
//! A plain date stands for midnight. Offsets are dropped and the local wall
//! time is kept, so both columns compare on the same clock.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const SECONDS_PER_DAY: i64 = 86_400;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a date or date-time cell.
///
/// Returns `None` for anything that is not a recognized date.
///
/// ```
/// # use surv_core::dates::parse_datetime;
/// # use chrono::NaiveDate;
/// let midnight = NaiveDate::from_ymd_opt(2020, 1, 10).and_then(|d| d.and_hms_opt(0, 0, 0));
/// assert_eq!(parse_datetime("2020-01-10"), midnight);
/// assert_eq!(parse_datetime("2020/01/10"), midnight);
/// assert_eq!(parse_datetime("2020-01-10T00:00:00Z"), midnight);
/// assert_eq!(parse_datetime("10 Jan"), None);
/// ```
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime);
        }
    }
    None
}

/// Whole days elapsed from `reference` to `later`, rounded down.
///
/// Partial days are floored, so 18 hours across midnight is zero days and a
/// `later` value six hours before `reference` is minus one.
pub fn days_between(reference: &str, later: &str) -> Option<i64> {
    let start = parse_datetime(reference)?;
    let end = parse_datetime(later)?;
    Some(
        end.signed_duration_since(start)
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_day_difference() {
        assert_eq!(days_between("2020-01-01", "2020-01-10"), Some(9));
        assert_eq!(days_between("2020-03-01", "2020-03-15"), Some(14));
        assert_eq!(days_between("2020-02-28", "2020-03-01"), Some(2));
        assert_eq!(days_between("2020-01-10", "2020-01-01"), Some(-9));
    }

    #[test]
    fn partial_days_round_down() {
        assert_eq!(days_between("2020-01-01T12:00", "2020-01-02T06:00"), Some(0));
        assert_eq!(days_between("2020-01-01T23:59:00", "2020-01-02 00:01"), Some(0));
        assert_eq!(days_between("2020-01-01", "2020-01-05T12:00:00.250+02:00"), Some(4));
        assert_eq!(days_between("2020-01-01 08:00", "2020-01-03 07:59:59"), Some(1));
        assert_eq!(days_between("2020-01-02T06:00", "2020-01-01T12:00"), Some(-1));
    }

    #[test]
    fn unparsable_dates_yield_none() {
        assert_eq!(days_between("2020-01-01", ""), None);
        assert_eq!(days_between("2020-13-01", "2020-01-02"), None);
        assert_eq!(days_between("not a date", "2020-01-02"), None);
        assert_eq!(parse_datetime("20200101"), None);
    }
}
