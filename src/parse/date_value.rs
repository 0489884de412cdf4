//! Functions used for parsing date strings.
//!
//! A compact `YYYYMMDD` or `YYYY-MM-DD` string is read as a local date. Other strings are read as
//! an ISO 8601 date time (`2018-07-12T04:06:12.345+02:00`, date-only forms being UTC and date-time forms
//! without offset being local), or as an RFC 2822 date time (`Thu, 12 Jul 2018 04:06:12 GMT`).
//! Anything else produces an invalid date.

use crate::constants::*;
use crate::date::{Date, Fields};
use crate::error::parse::{DateParseError, ParseDataError};
use crate::parse::utils::{parse_int, read_exact, read_optional_tag, read_tag, read_while, Cursor};
use crate::timezone::TimeZone;

use regex::Regex;

use std::sync::{Arc, LazyLock};

/// Compact local date, with optional dashes and a one or two digit day
static COMPACT_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]{4})-?([0-9]{2})-?([0-9]{1,2})$").unwrap());

/// Time zone of a parsed date string
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Zone {
    /// Fixed offset from UTC in milliseconds
    Offset(i64),
    /// Local time of the time zone used for parsing
    Local,
}

/// Parse a date string in the provided time zone.
///
/// Only a compact date with a zero day or a `00` month is an error: unparseable strings give an invalid date.
///
pub(crate) fn parse_date_string(text: &str, time_zone: Arc<TimeZone>) -> Result<Date, DateParseError> {
    let compact = COMPACT_DATE.captures(text).and_then(|captures| {
        let component = |index: usize| parse_int::<i64>(captures[index].as_bytes()).ok();
        Some((component(1)?, component(2)? - 1, component(3)?))
    });

    if let Some((year, month, day)) = compact {
        if day == 0 || month < 0 {
            debug!("invalid compact date string: {text:?}");
            return Err(DateParseError::InvalidCompactDate(text.to_owned()));
        }

        return Ok(Date::local([year, month, day, 0, 0, 0, 0], time_zone));
    }

    let trimmed = text.trim();
    let parsed = parse_iso_8601(&mut trimmed.as_bytes()).or_else(|_| parse_rfc_2822(&mut trimmed.as_bytes()));

    match parsed {
        Ok((fields, Zone::Local)) => Ok(Date::local(fields, time_zone)),
        Ok((fields, Zone::Offset(offset))) => {
            let mut date = Date::utc(fields, time_zone);
            date.set_time(date.time().map(|time| time - offset));
            Ok(date)
        }
        Err(_) => {
            trace!("unparseable date string {text:?} gives an invalid date");
            Ok(Date::invalid(time_zone))
        }
    }
}

/// Read exactly `count` ASCII digits
fn read_digits(cursor: &mut Cursor<'_>, count: usize) -> Result<i64, ParseDataError> {
    let digits = read_exact(cursor, count)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(ParseDataError::InvalidData);
    }
    parse_int(digits).map_err(|_| ParseDataError::InvalidData)
}

/// Read between `min` and `max` ASCII digits
fn read_digits_between(cursor: &mut Cursor<'_>, min: usize, max: usize) -> Result<i64, ParseDataError> {
    let count = cursor.iter().take(max).take_while(|x| x.is_ascii_digit()).count();
    if count < min {
        return Err(ParseDataError::InvalidData);
    }
    read_digits(cursor, count)
}

/// Skip ASCII spaces, returning `true` if at least one was found
fn skip_spaces(cursor: &mut Cursor<'_>) -> Result<bool, ParseDataError> {
    Ok(!read_while(cursor, |&x| x == b' ')?.is_empty())
}

/// Check a value against an inclusive range
fn check(value: i64, min: i64, max: i64) -> Result<i64, ParseDataError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParseDataError::InvalidData)
    }
}

/// Parse `HH:mm[:ss[.sss]]`, returning hours, minutes, seconds and milliseconds
fn parse_time(cursor: &mut Cursor<'_>, allow_fraction: bool) -> Result<[i64; 4], ParseDataError> {
    let hour = check(read_digits(cursor, 2)?, 0, 24)?;
    read_tag(cursor, b":")?;
    let minute = check(read_digits(cursor, 2)?, 0, 59)?;

    let mut second = 0;
    let mut millisecond = 0;

    if read_optional_tag(cursor, b":")? {
        second = check(read_digits(cursor, 2)?, 0, 59)?;

        if allow_fraction && (read_optional_tag(cursor, b".")? || read_optional_tag(cursor, b",")?) {
            let digits = read_while(cursor, u8::is_ascii_digit)?;
            if digits.is_empty() {
                return Err(ParseDataError::InvalidData);
            }

            // Only milliseconds are kept
            millisecond = digits.iter().chain([b'0'; 3].iter()).take(3).fold(0, |acc, &x| acc * 10 + i64::from(x - b'0'));
        }
    }

    if hour == 24 && (minute, second, millisecond) != (0, 0, 0) {
        return Err(ParseDataError::InvalidData);
    }

    Ok([hour, minute, second, millisecond])
}

/// Parse a numeric offset `±HH:mm` or `±HHmm`, returned in milliseconds east of UTC
fn parse_numeric_offset(cursor: &mut Cursor<'_>) -> Result<i64, ParseDataError> {
    let sign = match read_exact(cursor, 1)? {
        b"+" => 1,
        b"-" => -1,
        _ => return Err(ParseDataError::InvalidData),
    };

    let hour = check(read_digits(cursor, 2)?, 0, 23)?;
    read_optional_tag(cursor, b":")?;
    let minute = check(read_digits(cursor, 2)?, 0, 59)?;

    Ok(sign * (hour * MILLISECONDS_PER_HOUR + minute * MILLISECONDS_PER_MINUTE))
}

/// Parse an ISO 8601 date or date time
fn parse_iso_8601(cursor: &mut Cursor<'_>) -> Result<(Fields, Zone), ParseDataError> {
    let year = match cursor.first() {
        Some(b'+') | Some(b'-') => {
            let negative = read_exact(cursor, 1)? == b"-";
            let year = read_digits(cursor, 6)?;

            // Negative zero is not a valid expanded year
            if negative && year == 0 {
                return Err(ParseDataError::InvalidData);
            }
            if negative {
                -year
            } else {
                year
            }
        }
        _ => read_digits(cursor, 4)?,
    };

    let mut month = 1;
    let mut day = 1;

    if read_optional_tag(cursor, b"-")? {
        month = check(read_digits(cursor, 2)?, 1, 12)?;

        if read_optional_tag(cursor, b"-")? {
            day = check(read_digits(cursor, 2)?, 1, 31)?;
        }
    }

    if cursor.is_empty() {
        return Ok(([year, month - 1, day, 0, 0, 0, 0], Zone::Offset(0)));
    }

    match read_exact(cursor, 1)? {
        b"T" | b"t" | b" " => {}
        _ => return Err(ParseDataError::InvalidData),
    }

    let [hour, minute, second, millisecond] = parse_time(cursor, true)?;

    let zone = match cursor.first() {
        None => Zone::Local,
        Some(b'Z') | Some(b'z') => {
            read_exact(cursor, 1)?;
            Zone::Offset(0)
        }
        Some(_) => Zone::Offset(parse_numeric_offset(cursor)?),
    };

    if !cursor.is_empty() {
        return Err(ParseDataError::InvalidData);
    }

    Ok(([year, month - 1, day, hour, minute, second, millisecond], zone))
}

/// Find the index of an English name from an unambiguous prefix of at least three letters
fn find_name(names: &[&str], text: &[u8]) -> Result<usize, ParseDataError> {
    names
        .iter()
        .position(|name| text.len() >= 3 && name.len() >= text.len() && name.as_bytes()[..text.len()].eq_ignore_ascii_case(text))
        .ok_or(ParseDataError::InvalidData)
}

/// Parse an RFC 2822 date time, as produced by [`Date::to_utc_string`]
fn parse_rfc_2822(cursor: &mut Cursor<'_>) -> Result<(Fields, Zone), ParseDataError> {
    if cursor.first().is_some_and(u8::is_ascii_alphabetic) {
        find_name(&WEEK_DAY_NAMES, read_while(cursor, u8::is_ascii_alphabetic)?)?;
        read_optional_tag(cursor, b",")?;
        skip_spaces(cursor)?;
    }

    let day = check(read_digits_between(cursor, 1, 2)?, 1, 31)?;
    read_optional_tag(cursor, b"-")?;
    skip_spaces(cursor)?;

    let month = find_name(&MONTH_NAMES, read_while(cursor, u8::is_ascii_alphabetic)?)?;
    read_optional_tag(cursor, b"-")?;
    skip_spaces(cursor)?;

    let negative = read_optional_tag(cursor, b"-")?;
    let year = read_digits_between(cursor, 4, 6)?;
    let year = if negative { -year } else { year };

    let mut time = [0; 4];
    let mut zone = Zone::Local;

    if skip_spaces(cursor)? && !cursor.is_empty() {
        time = parse_time(cursor, false)?;

        if skip_spaces(cursor)? && !cursor.is_empty() {
            zone = match read_while(cursor, u8::is_ascii_alphabetic)? {
                b"" => Zone::Offset(parse_numeric_offset(cursor)?),
                b"GMT" | b"UTC" | b"UT" | b"Z" => match cursor.first() {
                    Some(b'+') | Some(b'-') => Zone::Offset(parse_numeric_offset(cursor)?),
                    _ => Zone::Offset(0),
                },
                _ => return Err(ParseDataError::InvalidData),
            };
        }
    }

    if !cursor.is_empty() {
        return Err(ParseDataError::InvalidData);
    }

    let [hour, minute, second, millisecond] = time;
    Ok(([year, month as i64, day, hour, minute, second, millisecond], zone))
}
