//! Truncation of dates to the boundaries of a unit.

use crate::constants::*;
use crate::date::{Date, Mode};
use crate::datetime::DateTime;
use crate::unit::Unit;

/// Day of the week on which weeks start, from Sunday
const WEEK_START_DAY: i64 = 0;

/// Returns a copy of a date truncated to the start or the end of the provided unit, in the provided mode.
///
/// Fields finer than the unit are reset to their minimum value at the start of the unit,
/// and to their maximum value at its end. Weeks start on Sunday. An invalid date stays invalid.
///
pub fn round_date(date: &Date, unit: Unit, mode: Mode, at_start: bool) -> Date {
    let [hour, minute, second, millisecond] = if at_start { [0, 0, 0, 0] } else { [23, 59, 59, 999] };

    let mut result = date.clone();

    match unit {
        Unit::Millisecond => {}
        Unit::Second => result.update_fields(mode, |x| x[6] = millisecond),
        Unit::Minute => result.update_fields(mode, |x| x[5..].copy_from_slice(&[second, millisecond])),
        Unit::Hour => result.update_fields(mode, |x| x[4..].copy_from_slice(&[minute, second, millisecond])),
        Unit::Day => result.update_fields(mode, |x| x[3..].copy_from_slice(&[hour, minute, second, millisecond])),
        Unit::Week | Unit::Month | Unit::Quarter | Unit::Year => {
            let Some(fields) = date.fields(mode) else { return result };

            let year = i64::from(fields.year);
            let month = i64::from(fields.month);
            let day = i64::from(fields.day);

            // Overflowing days and months are normalized when composing the fields
            let (month, day) = match (unit, at_start) {
                (Unit::Week, _) => {
                    let gap = (i64::from(fields.week_day) - WEEK_START_DAY).rem_euclid(DAYS_PER_WEEK);
                    if at_start {
                        (month, day - gap)
                    } else {
                        (month, day + 6 - gap)
                    }
                }
                (Unit::Month, true) => (month, 1),
                (Unit::Month, false) => (month + 1, 0),
                (Unit::Quarter, true) => (month - month % MONTHS_PER_QUARTER, 1),
                (Unit::Quarter, false) => (month - month % MONTHS_PER_QUARTER + MONTHS_PER_QUARTER, 0),
                (_, true) => (0, 1),
                (_, false) => (11, 31),
            };

            result = Date::from_fields(mode, [year, month, day, hour, minute, second, millisecond], date.time_zone().clone());
        }
    }

    result
}

/// Returns a copy of a date time truncated to the start or the end of the provided unit, in its own mode
pub fn copy_and_round(base: &DateTime, unit: Unit, at_start: bool) -> DateTime {
    base.with_date(round_date(base.as_date(), unit, base.mode(), at_start))
}
