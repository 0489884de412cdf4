//! Date utilities operating on [`Date`] primitives.

mod round;

pub use round::{copy_and_round, round_date};

use crate::constants::*;
use crate::date::{Date, Mode};
use crate::datetime::{DateLike, DateTime, Settings};
use crate::error::Result;
use crate::parse::parse_date_string;
use crate::unit::Unit;

/// Convert a date-like value into a [`Date`] using the clock and time zone of the provided settings.
///
/// Text is expected to be ordered year, month, day. Only a compact date string with a zero day or a `00` month
/// is an error: any other unparseable value gives an invalid date.
///
pub fn parse_date_value(value: DateLike, settings: &Settings) -> Result<Date> {
    let time_zone = settings.time_zone().clone();

    let date = match value {
        DateLike::Null => Date::invalid(time_zone),
        DateLike::Now => Date::now(settings.clock(), time_zone),
        DateLike::Date(date) => date.with_time_zone(time_zone),
        DateLike::DateTime(date_time) => date_time.as_date().with_time_zone(time_zone),
        DateLike::Millis(time) => Date::new(time, time_zone),
        DateLike::Number(number) if number.is_finite() => Date::new(number.trunc() as i64, time_zone),
        DateLike::Number(_) => Date::invalid(time_zone),
        DateLike::Text(text) => parse_date_string(&text, time_zone)?,
    };

    Ok(date)
}

/// Set a calendar unit of a date in the provided mode.
///
/// Setting the year, the month or the quarter keeps the day of the month when it exists in the new month,
/// and uses the last day of the new month otherwise. Quarters are one-based.
/// Setting a week has no effect.
///
pub fn set_unit(date: &mut Date, unit: Unit, value: i64, mode: Mode) {
    match unit {
        Unit::Year | Unit::Month | Unit::Quarter => {
            let Some(fields) = date.fields(mode) else { return };
            let day = i64::from(fields.day);

            date.set_date(mode, 1);
            match unit {
                Unit::Year => date.set_full_year(mode, value),
                Unit::Month => date.set_month(mode, value),
                _ => {
                    let month = value
                        .saturating_sub(1)
                        .saturating_mul(MONTHS_PER_QUARTER)
                        .saturating_add(i64::from(fields.month) % MONTHS_PER_QUARTER);
                    date.set_month(mode, month)
                }
            }

            if let Some(days) = days_in_month(date, mode) {
                date.set_date(mode, day.min(days));
            }
        }
        Unit::Week => {}
        Unit::Day => date.set_date(mode, value),
        Unit::Hour => date.set_hours(mode, value),
        Unit::Minute => date.set_minutes(mode, value),
        Unit::Second => date.set_seconds(mode, value),
        Unit::Millisecond => date.set_milliseconds(mode, value),
    }
}

/// Returns the number of days in the month of a date, in the provided mode
pub fn days_in_month(date: &Date, mode: Mode) -> Option<i64> {
    date.fields(mode).map(|x| x.days_in_month().into())
}

/// Compute the signed fractional number of months from `a` to `b`.
///
/// The fractional part is interpolated between the two whole-month anchors surrounding `b`,
/// so that it follows the actual length of the straddling months.
/// Returns `NaN` if one of the values is invalid.
///
pub fn months_apart(a: &DateTime, b: &DateTime) -> f64 {
    let compute = || {
        let whole_months = (b.year()? - a.year()?) * MONTHS_PER_YEAR + (b.month()? - a.month()?);
        let anchor = a.add(whole_months, Unit::Month);
        let from_anchor = b.minus(&anchor)?;

        let adjust = if from_anchor < 0 {
            let anchor_before = a.add(whole_months - 1, Unit::Month);
            from_anchor as f64 / anchor.minus(&anchor_before)? as f64
        } else {
            let anchor_after = a.add(whole_months + 1, Unit::Month);
            from_anchor as f64 / anchor_after.minus(&anchor)? as f64
        };

        Some(whole_months as f64 + adjust)
    };

    compute().unwrap_or(f64::NAN)
}

/// Truncate a number toward zero, never returning a negative zero
pub fn abs_floor(number: f64) -> f64 {
    let truncated = number.trunc();
    if truncated == 0.0 {
        0.0
    } else {
        truncated
    }
}

/// Format an offset in hours west of UTC as a `±HHmm` string, like `-0500` for an offset of 5 hours
pub fn zone_text(offset_hours_west: f64) -> String {
    let minutes = (-offset_hours_west * 60.0).round() as i64;
    let sign = if minutes < 0 { '-' } else { '+' };
    let minutes = minutes.unsigned_abs();

    format!("{sign}{:02}{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::{parse::DateParseError, Error};
    use crate::timezone::TimeZone;

    use std::sync::Arc;

    fn settings() -> Settings {
        // 2018-09-14T07:32:12Z
        Settings::new(FixedClock(1536910332000), TimeZone::utc())
    }

    #[test]
    fn test_parse_date_value() -> Result<()> {
        let settings = settings();

        assert!(!parse_date_value(DateLike::Null, &settings)?.is_valid());
        assert_eq!(parse_date_value(DateLike::Now, &settings)?.time(), Some(1536910332000));
        assert_eq!(parse_date_value(DateLike::Millis(42), &settings)?.time(), Some(42));
        assert_eq!(parse_date_value(DateLike::Number(42.9), &settings)?.time(), Some(42));
        assert_eq!(parse_date_value(DateLike::Number(-42.9), &settings)?.time(), Some(-42));
        assert!(!parse_date_value(DateLike::Number(f64::NAN), &settings)?.is_valid());
        assert!(!parse_date_value(DateLike::Number(f64::INFINITY), &settings)?.is_valid());
        assert!(!parse_date_value(DateLike::Number(1e300), &settings)?.is_valid());

        let compact = parse_date_value("20180808".into(), &settings)?;
        assert_eq!(compact.to_iso_string().as_deref(), Some("2018-08-08T00:00:00.000Z"));

        let dashed = parse_date_value("2018-08-8".into(), &settings)?;
        assert_eq!(dashed.time(), compact.time());

        assert!(!parse_date_value("not a date".into(), &settings)?.is_valid());

        assert!(matches!(
            parse_date_value("2018-08-00".into(), &settings),
            Err(Error::Parse(DateParseError::InvalidCompactDate(x))) if x == "2018-08-00"
        ));
        assert!(matches!(parse_date_value("20180015".into(), &settings), Err(Error::Parse(_))));

        Ok(())
    }

    #[test]
    fn test_parse_date_value_changes_time_zone() -> Result<()> {
        let settings = settings();
        let date = Date::new(1536910332000, Arc::new(TimeZone::fixed(3600)));

        let parsed = parse_date_value(DateLike::Date(date.clone()), &settings)?;
        assert_eq!(parsed.time(), date.time());
        assert_eq!(parsed.hours(Mode::Local), Some(7));
        assert_eq!(date.hours(Mode::Local), Some(8));

        Ok(())
    }

    #[test]
    fn test_set_unit() {
        let utc = Arc::new(TimeZone::utc());

        let mut date = Date::utc([2018, 0, 31, 7, 32, 12, 0], utc.clone());
        set_unit(&mut date, Unit::Month, 1, Mode::Utc);
        assert_eq!(date.to_iso_string().as_deref(), Some("2018-02-28T07:32:12.000Z"));

        let mut date = Date::utc([2016, 1, 29, 0, 0, 0, 0], utc.clone());
        set_unit(&mut date, Unit::Year, 2017, Mode::Utc);
        assert_eq!(date.to_iso_string().as_deref(), Some("2017-02-28T00:00:00.000Z"));

        let mut date = Date::utc([2018, 7, 31, 0, 0, 0, 0], utc.clone());
        set_unit(&mut date, Unit::Quarter, 4, Mode::Utc);
        assert_eq!(date.to_iso_string().as_deref(), Some("2018-11-30T00:00:00.000Z"));

        let mut date = Date::utc([2018, 0, 15, 0, 0, 0, 0], utc.clone());
        set_unit(&mut date, Unit::Month, 13, Mode::Utc);
        assert_eq!(date.to_iso_string().as_deref(), Some("2019-02-15T00:00:00.000Z"));

        set_unit(&mut date, Unit::Week, 3, Mode::Utc);
        assert_eq!(date.to_iso_string().as_deref(), Some("2019-02-15T00:00:00.000Z"));

        set_unit(&mut date, Unit::Day, 0, Mode::Utc);
        set_unit(&mut date, Unit::Hour, 25, Mode::Utc);
        set_unit(&mut date, Unit::Minute, 3, Mode::Utc);
        set_unit(&mut date, Unit::Second, 4, Mode::Utc);
        set_unit(&mut date, Unit::Millisecond, 5, Mode::Utc);
        assert_eq!(date.to_iso_string().as_deref(), Some("2019-02-01T01:03:04.005Z"));

        let mut invalid = Date::invalid(utc);
        set_unit(&mut invalid, Unit::Year, 2018, Mode::Utc);
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_days_in_month() {
        let utc = Arc::new(TimeZone::utc());

        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, days) in (0..).zip(expected) {
            let date = Date::utc([2018, month, 14, 0, 0, 0, 0], utc.clone());
            assert_eq!(days_in_month(&date, Mode::Utc), Some(days));
        }

        assert_eq!(days_in_month(&Date::invalid(utc), Mode::Utc), None);
    }

    #[test]
    fn test_months_apart() -> Result<()> {
        let settings = settings();

        let now = settings.now();
        assert_eq!(months_apart(&now, &now.add(3, Unit::Month)), 3.0);
        assert_eq!(months_apart(&now.add(3, Unit::Month), &now), -3.0);

        let a = settings.date_time("20160115")?;
        let b = settings.date_time("20160215")?;
        assert_eq!(months_apart(&a, &b), 1.0);

        // 2016-01-15 to 2016-01-31 is 16 days of the 31 days between the two anchors
        let c = settings.date_time("20160131")?;
        assert_eq!(months_apart(&a, &c), 16.0 / 31.0);

        assert!(months_apart(&a, &settings.invalid()).is_nan());

        Ok(())
    }

    #[test]
    fn test_abs_floor() {
        assert_eq!(abs_floor(1.9), 1.0);
        assert_eq!(abs_floor(-1.9), -1.0);
        assert!(abs_floor(-0.5).is_sign_positive());
        assert!(abs_floor(f64::NAN).is_nan());
    }

    #[test]
    fn test_zone_text() {
        assert_eq!(zone_text(5.0), "-0500");
        assert_eq!(zone_text(-5.0), "+0500");
        assert_eq!(zone_text(5.5), "-0530");
        assert_eq!(zone_text(-8.5), "+0830");
        assert_eq!(zone_text(10.0), "-1000");
        assert_eq!(zone_text(0.0), "+0000");
        assert_eq!(zone_text(-0.0), "+0000");
    }
}
