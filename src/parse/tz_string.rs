//! Functions used for parsing a POSIX TZ string.

use crate::error::parse::TzStringError;
use crate::error::TzError;
use crate::parse::utils::{parse_int, read_optional_tag, read_sign, read_tag, read_until, read_while, Cursor};
use crate::timezone::{AlternateTime, LocalTimeType, RuleDay, TransitionRule};

/// Default local day time of a DST transition, in seconds
const DEFAULT_RULE_TIME: i32 = 2 * 3600;

/// Parse time zone designation
fn parse_time_zone_designation<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8], TzStringError> {
    if read_optional_tag(cursor, b"<")? {
        let unquoted = read_until(cursor, |&x| x == b'>')?;
        read_tag(cursor, b">")?;
        Ok(unquoted)
    } else {
        Ok(read_while(cursor, u8::is_ascii_alphabetic)?)
    }
}

/// Parse a number made of ASCII digits
fn parse_number<T: std::str::FromStr<Err = std::num::ParseIntError>>(cursor: &mut Cursor<'_>) -> Result<T, TzStringError> {
    Ok(parse_int(read_while(cursor, u8::is_ascii_digit)?)?)
}

/// Parse hours, minutes and seconds, and check them against an hour range
fn parse_hhmmss(cursor: &mut Cursor<'_>, max_hour: i32) -> Result<Result<i32, &'static str>, TzStringError> {
    let hour: i32 = parse_number(cursor)?;

    let mut minute = 0;
    let mut second = 0;

    if read_optional_tag(cursor, b":")? {
        minute = parse_number(cursor)?;

        if read_optional_tag(cursor, b":")? {
            second = parse_number(cursor)?;
        }
    }

    let checked = if hour > max_hour {
        Err("hour")
    } else if !(0..=59).contains(&minute) {
        Err("minute")
    } else if !(0..=59).contains(&second) {
        Err("second")
    } else {
        Ok(hour * 3600 + minute * 60 + second)
    };

    Ok(checked)
}

/// Parse time zone offset, returned in seconds west of UTC
fn parse_offset(cursor: &mut Cursor<'_>) -> Result<i32, TzStringError> {
    let sign = read_sign(cursor)?;
    let seconds = parse_hhmmss(cursor, 24)?.map_err(TzStringError::InvalidOffset)?;
    Ok(sign * seconds)
}

/// Parse transition rule time, optionally with the RFC 8536 extensions allowing negative and larger hours
fn parse_rule_time(cursor: &mut Cursor<'_>, use_string_extensions: bool) -> Result<i32, TzStringError> {
    let (sign, max_hour) = if use_string_extensions { (read_sign(cursor)?, 167) } else { (1, 24) };
    let seconds = parse_hhmmss(cursor, max_hour)?.map_err(TzStringError::InvalidDayTime)?;
    Ok(sign * seconds)
}

/// Parse transition rule day
fn parse_rule_day(cursor: &mut Cursor<'_>) -> Result<RuleDay, TzError> {
    if read_optional_tag(cursor, b"J").map_err(TzStringError::from)? {
        return Ok(RuleDay::julian_1(parse_number(cursor)?)?);
    }

    if read_optional_tag(cursor, b"M").map_err(TzStringError::from)? {
        let month = parse_number(cursor)?;
        read_tag(cursor, b".").map_err(TzStringError::from)?;
        let week = parse_number(cursor)?;
        read_tag(cursor, b".").map_err(TzStringError::from)?;
        let week_day = parse_number(cursor)?;

        return Ok(RuleDay::month_weekday(month, week, week_day)?);
    }

    Ok(RuleDay::julian_0(parse_number(cursor)?)?)
}

/// Parse transition rule, made of a day and an optional day time
fn parse_rule_block(cursor: &mut Cursor<'_>, use_string_extensions: bool) -> Result<(RuleDay, i32), TzError> {
    let date = parse_rule_day(cursor)?;

    let time = if read_optional_tag(cursor, b"/").map_err(TzStringError::from)? {
        parse_rule_time(cursor, use_string_extensions)?
    } else {
        DEFAULT_RULE_TIME
    };

    Ok((date, time))
}

/// Parse a POSIX TZ string containing a time zone description, as described in [the POSIX documentation of the `TZ` environment variable](https://pubs.opengroup.org/onlinepubs/9699919799/basedefs/V1_chap08.html).
///
/// TZ string extensions from [RFC 8536](https://datatracker.ietf.org/doc/html/rfc8536#section-3.3.1) may be used.
///
pub(crate) fn parse_posix_tz(tz_string: &[u8], use_string_extensions: bool) -> Result<TransitionRule, TzError> {
    let mut cursor = tz_string;

    let std_designation = parse_time_zone_designation(&mut cursor)?;
    let std_offset = parse_offset(&mut cursor)?;

    if cursor.is_empty() {
        return Ok(TransitionRule::Fixed(LocalTimeType::new(-std_offset, false, Some(std_designation))?));
    }

    let dst_designation = parse_time_zone_designation(&mut cursor)?;

    let dst_offset = match cursor.first() {
        Some(&b',') => std_offset - 3600,
        Some(_) => parse_offset(&mut cursor)?,
        None => return Err(TzStringError::MissingDstStartEndRules.into()),
    };

    if cursor.is_empty() {
        return Err(TzStringError::MissingDstStartEndRules.into());
    }

    read_tag(&mut cursor, b",").map_err(TzStringError::from)?;
    let (dst_start, dst_start_time) = parse_rule_block(&mut cursor, use_string_extensions)?;

    read_tag(&mut cursor, b",").map_err(TzStringError::from)?;
    let (dst_end, dst_end_time) = parse_rule_block(&mut cursor, use_string_extensions)?;

    if !cursor.is_empty() {
        return Err(TzStringError::RemainingData.into());
    }

    trace!("parsed TZ string with DST rules: {:?}", String::from_utf8_lossy(tz_string));

    Ok(TransitionRule::Alternate(AlternateTime::new(
        LocalTimeType::new(-std_offset, false, Some(std_designation))?,
        LocalTimeType::new(-dst_offset, true, Some(dst_designation))?,
        dst_start,
        dst_start_time,
        dst_end,
        dst_end_time,
    )?))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Result;

    fn alternate(
        std: (i32, &str),
        dst: (i32, &str),
        dst_start: RuleDay,
        dst_start_time: i32,
        dst_end: RuleDay,
        dst_end_time: i32,
    ) -> Result<TransitionRule> {
        Ok(TransitionRule::Alternate(AlternateTime::new(
            LocalTimeType::new(std.0, false, Some(std.1.as_bytes()))?,
            LocalTimeType::new(dst.0, true, Some(dst.1.as_bytes()))?,
            dst_start,
            dst_start_time,
            dst_end,
            dst_end_time,
        )?))
    }

    #[test]
    fn test_no_dst() -> Result<()> {
        let transition_rule = parse_posix_tz(b"HST10", false)?;
        assert_eq!(transition_rule, TransitionRule::Fixed(LocalTimeType::new(-36000, false, Some(b"HST"))?));

        Ok(())
    }

    #[test]
    fn test_quoted() -> Result<()> {
        let transition_rule = parse_posix_tz(b"<-03>+3<+03>-3,J1,J365", false)?;
        let expected = alternate((-10800, "-03"), (10800, "+03"), RuleDay::julian_1(1)?, 7200, RuleDay::julian_1(365)?, 7200)?;
        assert_eq!(transition_rule, expected);

        Ok(())
    }

    #[test]
    fn test_full() -> Result<()> {
        let transition_rule = parse_posix_tz(b"NZST-12:00:00NZDT-13:00:00,M10.1.0/02:00:00,M3.3.0/02:00:00", false)?;
        let expected =
            alternate((43200, "NZST"), (46800, "NZDT"), RuleDay::month_weekday(10, 1, 0)?, 7200, RuleDay::month_weekday(3, 3, 0)?, 7200)?;
        assert_eq!(transition_rule, expected);

        Ok(())
    }

    #[test]
    fn test_eastern() -> Result<()> {
        let transition_rule = parse_posix_tz(b"EST5EDT,M3.2.0,M11.1.0", false)?;
        let expected =
            alternate((-18000, "EST"), (-14400, "EDT"), RuleDay::month_weekday(3, 2, 0)?, 7200, RuleDay::month_weekday(11, 1, 0)?, 7200)?;
        assert_eq!(transition_rule, expected);

        Ok(())
    }

    #[test]
    fn test_negative_dst() -> Result<()> {
        let transition_rule = parse_posix_tz(b"IST-1GMT0,M10.5.0,M3.5.0/1", false)?;
        let expected = alternate((3600, "IST"), (0, "GMT"), RuleDay::month_weekday(10, 5, 0)?, 7200, RuleDay::month_weekday(3, 5, 0)?, 3600)?;
        assert_eq!(transition_rule, expected);

        Ok(())
    }

    #[test]
    fn test_negative_hour() -> Result<()> {
        let tz_string = b"<-03>3<-02>,M3.5.0/-2,M10.5.0/-1";
        assert!(parse_posix_tz(tz_string, false).is_err());

        let transition_rule = parse_posix_tz(tz_string, true)?;
        let expected =
            alternate((-10800, "-03"), (-7200, "-02"), RuleDay::month_weekday(3, 5, 0)?, -7200, RuleDay::month_weekday(10, 5, 0)?, -3600)?;
        assert_eq!(transition_rule, expected);

        Ok(())
    }

    #[test]
    fn test_all_year_dst() -> Result<()> {
        let tz_string = b"EST5EDT,0/0,J365/25";
        assert!(parse_posix_tz(tz_string, false).is_err());

        let transition_rule = parse_posix_tz(tz_string, true)?;
        let expected = alternate((-18000, "EST"), (-14400, "EDT"), RuleDay::julian_0(0)?, 0, RuleDay::julian_1(365)?, 90000)?;
        assert_eq!(transition_rule, expected);

        Ok(())
    }

    #[test]
    fn test_offset_limits() -> Result<()> {
        let transition_rule = parse_posix_tz(b"STD24:59:59DST,J1,J365", false)?;
        let expected = alternate((-89999, "STD"), (-86399, "DST"), RuleDay::julian_1(1)?, 7200, RuleDay::julian_1(365)?, 7200)?;
        assert_eq!(transition_rule, expected);

        let transition_rule = parse_posix_tz(b"STD-24:59:59DST,J1,J365", false)?;
        let expected = alternate((89999, "STD"), (93599, "DST"), RuleDay::julian_1(1)?, 7200, RuleDay::julian_1(365)?, 7200)?;
        assert_eq!(transition_rule, expected);

        assert!(matches!(parse_posix_tz(b"STD25", false), Err(TzError::TzString(TzStringError::InvalidOffset("hour")))));
        assert!(matches!(parse_posix_tz(b"STD1:60", false), Err(TzError::TzString(TzStringError::InvalidOffset("minute")))));

        Ok(())
    }

    #[test]
    fn test_error() {
        assert!(matches!(parse_posix_tz(b"IST-1GMT0", false), Err(TzError::TzString(TzStringError::MissingDstStartEndRules))));
        assert!(matches!(parse_posix_tz(b"EET-2EEST", false), Err(TzError::TzString(TzStringError::MissingDstStartEndRules))));
        assert!(matches!(parse_posix_tz(b"EST5EDT,M3.2.0,M11.1.0x", false), Err(TzError::TzString(TzStringError::RemainingData))));
        assert!(matches!(parse_posix_tz(b"EST5EDT,M13.2.0,M11.1.0", false), Err(TzError::TransitionRule(_))));
    }
}
