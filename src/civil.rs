//! Conversions between time values and the [proleptic gregorian calendar](https://en.wikipedia.org/wiki/Proleptic_Gregorian_calendar).
//!
//! All computations are done on wall-clock milliseconds: a time value here is already shifted by
//! whatever UTC offset applies, so the functions never look at a time zone.

use crate::constants::*;

/// Broken-down calendar fields of a time value
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CalendarFields {
    /// Full year
    pub year: i32,
    /// Month in `[0, 11]`
    pub month: u8,
    /// Day of the month in `[1, 31]`
    pub day: u8,
    /// Days since Sunday in `[0, 6]`
    pub week_day: u8,
    /// Hours since midnight in `[0, 23]`
    pub hour: u8,
    /// Minutes in `[0, 59]`
    pub minute: u8,
    /// Seconds in `[0, 59]`
    pub second: u8,
    /// Milliseconds in `[0, 999]`
    pub millisecond: u16,
}

impl CalendarFields {
    /// Split a wall-clock time value in milliseconds into calendar fields
    pub(crate) fn from_time(time: i64) -> Self {
        let days = time.div_euclid(MILLISECONDS_PER_DAY);
        let time_in_day = time.rem_euclid(MILLISECONDS_PER_DAY);

        let (year, month, day) = civil_from_days(days);

        // Time values are clipped to roughly ±275760 years, so every narrowing below is lossless
        Self {
            year: year as i32,
            month: month as u8,
            day: day as u8,
            week_day: week_day(days),
            hour: (time_in_day / MILLISECONDS_PER_HOUR) as u8,
            minute: (time_in_day / MILLISECONDS_PER_MINUTE % 60) as u8,
            second: (time_in_day / MILLISECONDS_PER_SECOND % 60) as u8,
            millisecond: (time_in_day % MILLISECONDS_PER_SECOND) as u16,
        }
    }

    /// Returns the number of days in the month of these fields
    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year.into(), self.month.into()) as u8
    }
}

/// Check if a full year is a leap year
pub fn is_leap_year(full_year: i64) -> bool {
    full_year % 400 == 0 || (full_year % 4 == 0 && full_year % 100 != 0)
}

/// Returns the number of days in a month
///
/// ## Inputs
///
/// * `full_year`: Year
/// * `month`: Month in `[0, 11]`
///
pub fn days_in_month(full_year: i64, month: usize) -> i64 {
    let mut days = DAY_IN_MONTHS_NORMAL_YEAR[month];
    if month == 1 && is_leap_year(full_year) {
        days += 1;
    }
    days
}

/// Compute the number of days since Sunday in `[0, 6]` from a number of days since Unix epoch
pub(crate) fn week_day(days_since_unix_epoch: i64) -> u8 {
    (4 + days_since_unix_epoch).rem_euclid(DAYS_PER_WEEK) as u8
}

/// Compute the number of days since Unix epoch (`1970-01-01T00:00:00Z`).
///
/// ## Inputs
///
/// * `full_year`: Year
/// * `month`: Month in `[0, 11]`
/// * `month_day`: Day of the month, which may overflow the month
///
pub(crate) fn days_since_unix_epoch(full_year: i64, month: usize, month_day: i64) -> i64 {
    let is_leap_year = is_leap_year(full_year);

    let mut result = (full_year - 1970) * DAYS_PER_NORMAL_YEAR;

    if full_year >= 1970 {
        result += (full_year - 1968) / 4;
        result -= (full_year - 1900) / 100;
        result += (full_year - 1600) / 400;

        if is_leap_year && month < 2 {
            result -= 1;
        }
    } else {
        result += (full_year - 1972) / 4;
        result -= (full_year - 2000) / 100;
        result += (full_year - 2000) / 400;

        if is_leap_year && month >= 2 {
            result += 1;
        }
    }

    result + CUMUL_DAY_IN_MONTHS_NORMAL_YEAR[month] + month_day - 1
}

/// Compute the full year, month in `[0, 11]` and day of the month in `[1, 31]` of a number of days since Unix epoch
pub(crate) fn civil_from_days(days_since_unix_epoch: i64) -> (i64, i64, i64) {
    let mut remaining_days = days_since_unix_epoch - UNIX_OFFSET_DAYS;

    let cycles_400_years = remaining_days.div_euclid(DAYS_PER_400_YEARS);
    remaining_days = remaining_days.rem_euclid(DAYS_PER_400_YEARS);

    let cycles_100_years = (remaining_days / DAYS_PER_100_YEARS).min(3);
    remaining_days -= cycles_100_years * DAYS_PER_100_YEARS;

    let cycles_4_years = (remaining_days / DAYS_PER_4_YEARS).min(24);
    remaining_days -= cycles_4_years * DAYS_PER_4_YEARS;

    let remaining_years = (remaining_days / DAYS_PER_NORMAL_YEAR).min(3);
    remaining_days -= remaining_years * DAYS_PER_NORMAL_YEAR;

    let mut year = 2000 + remaining_years + cycles_4_years * 4 + cycles_100_years * 100 + cycles_400_years * 400;

    let mut month = 2;
    for days in DAY_IN_MONTHS_LEAP_YEAR_FROM_MARCH {
        if remaining_days < days {
            break;
        }
        remaining_days -= days;
        month += 1;
    }

    if month >= MONTHS_PER_YEAR {
        month -= MONTHS_PER_YEAR;
        year += 1;
    }

    (year, month, 1 + remaining_days)
}

/// Compute a day number from a year, a month and a day of the month, normalizing overflowing months and days.
///
/// Returns `None` when the result cannot be represented.
pub(crate) fn make_day(year: i64, month: i64, month_day: i64) -> Option<i64> {
    // Far outside the range of any valid time value
    const MAX_ABS_YEAR: i64 = 1_000_000;

    let year = year.checked_add(month.div_euclid(MONTHS_PER_YEAR))?;
    if year.abs() > MAX_ABS_YEAR {
        return None;
    }

    let month = month.rem_euclid(MONTHS_PER_YEAR) as usize;
    days_since_unix_epoch(year, month, 1).checked_add(month_day.checked_sub(1)?)
}

/// Compute the milliseconds of a day time, without normalization
pub(crate) fn make_time(hour: i64, minute: i64, second: i64, millisecond: i64) -> Option<i64> {
    hour.checked_mul(MILLISECONDS_PER_HOUR)?
        .checked_add(minute.checked_mul(MILLISECONDS_PER_MINUTE)?)?
        .checked_add(second.checked_mul(MILLISECONDS_PER_SECOND)?)?
        .checked_add(millisecond)
}

/// Combine a day number and a day time
pub(crate) fn make_date(day: i64, time: i64) -> Option<i64> {
    day.checked_mul(MILLISECONDS_PER_DAY)?.checked_add(time)
}

/// Returns the time value if it lies in the representable range
pub(crate) fn time_clip(time: i64) -> Option<i64> {
    (time.unsigned_abs() <= MAX_TIME_VALUE as u64).then_some(time)
}
