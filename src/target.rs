// src/target.rs - turning command-line date, time and span into a window
use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::error::ArgumentError;
use crate::timestamp::{Instant, Zone};
use crate::window::hours_to_delta;

pub const DEFAULT_TIME: &str = "12:00:00";
/// Default window radius, in hours
pub const DEFAULT_SPAN: &str = "12";

pub fn parse_date(value: &str) -> Result<NaiveDate, ArgumentError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
        ArgumentError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

pub fn parse_time(value: &str) -> Result<NaiveTime, ArgumentError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M:%S").map_err(|source| {
        ArgumentError::InvalidTime {
            value: value.to_string(),
            source,
        }
    })
}

/// Parse a window radius: plain (possibly fractional) hours like `1.5`, or a
/// humantime duration like `90m` or `1h 30m`.
pub fn parse_span(value: &str) -> Result<TimeDelta, ArgumentError> {
    let value = value.trim();
    if let Ok(hours) = value.parse::<f64>() {
        return hours_to_delta(hours).map_err(|err| match err {
            ArgumentError::InvalidSpan { message, .. } => ArgumentError::InvalidSpan {
                value: value.to_string(),
                message,
            },
            other => other,
        });
    }

    let duration = humantime::parse_duration(value).map_err(|e| ArgumentError::InvalidSpan {
        value: value.to_string(),
        message: e.to_string(),
    })?;
    TimeDelta::from_std(duration).map_err(|_| ArgumentError::InvalidSpan {
        value: value.to_string(),
        message: "too large".to_string(),
    })
}

/// Combine the calendar fields of `date` with the clock fields of `time`
pub fn join_target(date: NaiveDate, time: NaiveTime, zone: Zone) -> Result<Instant, ArgumentError> {
    let naive = date.and_time(time);
    zone.resolve(naive)
        .ok_or_else(|| ArgumentError::UnresolvableTarget(naive.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2023-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
        );
        assert!(matches!(
            parse_date("01/06/2023"),
            Err(ArgumentError::InvalidDate { .. })
        ));
        assert!(parse_date("2023-02-30").is_err());
        assert!(parse_date("12:00:00").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("23:59:59").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        );
        assert_eq!(
            parse_time(DEFAULT_TIME).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap()
        );
        assert!(matches!(
            parse_time("25:00:00"),
            Err(ArgumentError::InvalidTime { .. })
        ));
        assert!(parse_time("2023-06-01").is_err());
        assert!(parse_time("12:00").is_err());
    }

    #[test]
    fn test_parse_span_hours_and_durations() {
        assert_eq!(parse_span(DEFAULT_SPAN).unwrap(), TimeDelta::hours(12));
        assert_eq!(parse_span("0.25").unwrap(), TimeDelta::minutes(15));
        assert_eq!(parse_span("90m").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_span("1h 30m").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_span("45s").unwrap(), TimeDelta::seconds(45));
    }

    #[test]
    fn test_parse_span_rejects_bad_values() {
        for value in ["-1", "NaN", "inf", "soon", ""] {
            match parse_span(value) {
                Err(ArgumentError::InvalidSpan { .. }) => {}
                other => panic!("expected InvalidSpan for {:?}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_join_target_uses_date_and_clock_fields() {
        let date = parse_date("2023-06-01").unwrap();
        let time = parse_time("08:30:15").unwrap();
        assert_eq!(
            join_target(date, time, Zone::Utc).unwrap(),
            Utc.with_ymd_and_hms(2023, 6, 1, 8, 30, 15).unwrap()
        );
    }
}
