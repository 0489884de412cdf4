//! Mutable date primitive with local and UTC accessors.
//!
//! A [`Date`] holds a time value in milliseconds since Unix epoch, or nothing for an invalid date.
//! Its setters accept out-of-range values and roll them over to the neighboring fields,
//! so that setting the day of the month to `0` moves to the last day of the previous month.

use crate::civil::{make_date, make_day, make_time, time_clip, CalendarFields};
use crate::clock::Clock;
use crate::constants::*;
use crate::timezone::TimeZone;

use std::fmt;
use std::sync::Arc;

/// Selects whether calendar fields are read and written in local time or in UTC
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Local time of the date's time zone
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}

/// Calendar fields in the order year, month in `[0, 11]`, day of the month, hours, minutes, seconds and milliseconds
pub type Fields = [i64; 7];

/// Date primitive holding an optional time value and the time zone of its local accessors
#[derive(Debug, Clone)]
pub struct Date {
    /// Milliseconds since Unix epoch, `None` for an invalid date
    time: Option<i64>,
    /// Time zone used for local time
    time_zone: Arc<TimeZone>,
}

impl Date {
    /// Construct a date from a time value in milliseconds, which is invalid outside of `±8.64e15`
    pub fn new(time: i64, time_zone: Arc<TimeZone>) -> Self {
        Self { time: time_clip(time), time_zone }
    }

    /// Construct an invalid date
    pub fn invalid(time_zone: Arc<TimeZone>) -> Self {
        Self { time: None, time_zone }
    }

    /// Construct a date at the current time of a clock
    pub fn now(clock: &dyn Clock, time_zone: Arc<TimeZone>) -> Self {
        Self::new(clock.now(), time_zone)
    }

    /// Construct a date from local calendar fields, which may overflow their range
    pub fn local(fields: Fields, time_zone: Arc<TimeZone>) -> Self {
        Self::from_fields(Mode::Local, fields, time_zone)
    }

    /// Construct a date from UTC calendar fields, which may overflow their range
    pub fn utc(fields: Fields, time_zone: Arc<TimeZone>) -> Self {
        Self::from_fields(Mode::Utc, fields, time_zone)
    }

    /// Construct a date from calendar fields in the provided mode
    pub fn from_fields(mode: Mode, fields: Fields, time_zone: Arc<TimeZone>) -> Self {
        let mut date = Self::invalid(time_zone);
        date.time = date.compose(mode, fields);
        date
    }

    /// Returns the time value in milliseconds since Unix epoch, or `None` for an invalid date
    pub fn time(&self) -> Option<i64> {
        self.time
    }

    /// Returns `true` if the date holds a time value
    pub fn is_valid(&self) -> bool {
        self.time.is_some()
    }

    /// Returns the time zone used for local time
    pub fn time_zone(&self) -> &Arc<TimeZone> {
        &self.time_zone
    }

    /// Returns a copy of the date with the same time value and another time zone
    pub fn with_time_zone(&self, time_zone: Arc<TimeZone>) -> Self {
        Self { time: self.time, time_zone }
    }

    /// Returns the offset from UTC in milliseconds applied to the fields of the provided mode
    fn offset(&self, mode: Mode, time: i64) -> i64 {
        match mode {
            Mode::Local => self.time_zone.offset_at(time),
            Mode::Utc => 0,
        }
    }

    /// Returns the difference between UTC and local time in minutes, positive when local time is behind UTC
    pub fn timezone_offset(&self) -> Option<f64> {
        let time = self.time?;
        Some(-(self.time_zone.offset_at(time) as f64) / MILLISECONDS_PER_MINUTE as f64)
    }

    /// Returns the calendar fields in the provided mode
    pub fn fields(&self, mode: Mode) -> Option<CalendarFields> {
        let time = self.time?;
        Some(CalendarFields::from_time(time + self.offset(mode, time)))
    }

    /// Returns the full year
    pub fn full_year(&self, mode: Mode) -> Option<i64> {
        self.fields(mode).map(|x| x.year.into())
    }

    /// Returns the month in `[0, 11]`
    pub fn month(&self, mode: Mode) -> Option<i64> {
        self.fields(mode).map(|x| x.month.into())
    }

    /// Returns the day of the month in `[1, 31]`
    pub fn date(&self, mode: Mode) -> Option<i64> {
        self.fields(mode).map(|x| x.day.into())
    }

    /// Returns the day of the week in `[0, 6]`, from Sunday
    pub fn day(&self, mode: Mode) -> Option<i64> {
        self.fields(mode).map(|x| x.week_day.into())
    }

    /// Returns the hours in `[0, 23]`
    pub fn hours(&self, mode: Mode) -> Option<i64> {
        self.fields(mode).map(|x| x.hour.into())
    }

    /// Returns the minutes in `[0, 59]`
    pub fn minutes(&self, mode: Mode) -> Option<i64> {
        self.fields(mode).map(|x| x.minute.into())
    }

    /// Returns the seconds in `[0, 59]`
    pub fn seconds(&self, mode: Mode) -> Option<i64> {
        self.fields(mode).map(|x| x.second.into())
    }

    /// Returns the milliseconds in `[0, 999]`
    pub fn milliseconds(&self, mode: Mode) -> Option<i64> {
        self.fields(mode).map(|x| x.millisecond.into())
    }

    /// Set the time value, which is invalid outside of `±8.64e15`
    pub fn set_time(&mut self, time: Option<i64>) {
        self.time = time.and_then(time_clip);
    }

    /// Set the full year
    pub fn set_full_year(&mut self, mode: Mode, year: i64) {
        // An invalid date is first reset to the epoch, read as calendar fields without offset
        let fields = self.fields(mode).unwrap_or_else(|| CalendarFields::from_time(0));

        let mut values = to_values(fields);
        values[0] = year;
        self.time = self.compose(mode, values);
    }

    /// Set the month in `[0, 11]`
    pub fn set_month(&mut self, mode: Mode, month: i64) {
        self.update_fields(mode, |x| x[1] = month);
    }

    /// Set the day of the month
    pub fn set_date(&mut self, mode: Mode, date: i64) {
        self.update_fields(mode, |x| x[2] = date);
    }

    /// Set the hours
    pub fn set_hours(&mut self, mode: Mode, hours: i64) {
        self.update_fields(mode, |x| x[3] = hours);
    }

    /// Set the minutes
    pub fn set_minutes(&mut self, mode: Mode, minutes: i64) {
        self.update_fields(mode, |x| x[4] = minutes);
    }

    /// Set the seconds
    pub fn set_seconds(&mut self, mode: Mode, seconds: i64) {
        self.update_fields(mode, |x| x[5] = seconds);
    }

    /// Set the milliseconds
    pub fn set_milliseconds(&mut self, mode: Mode, milliseconds: i64) {
        self.update_fields(mode, |x| x[6] = milliseconds);
    }

    /// Modify the calendar fields of a valid date and recompute its time value
    pub(crate) fn update_fields<F: FnOnce(&mut Fields)>(&mut self, mode: Mode, f: F) {
        if let Some(fields) = self.fields(mode) {
            let mut values = to_values(fields);
            f(&mut values);
            self.time = self.compose(mode, values);
        }
    }

    /// Compute the time value of calendar fields in the provided mode
    fn compose(&self, mode: Mode, [year, month, day, hour, minute, second, millisecond]: Fields) -> Option<i64> {
        let time = make_date(make_day(year, month, day)?, make_time(hour, minute, second, millisecond)?)?;

        // No UTC offset can bring a value this far back into the valid range
        if time.unsigned_abs() > (MAX_TIME_VALUE + MILLISECONDS_PER_WEEK) as u64 {
            return None;
        }

        match mode {
            Mode::Local => time_clip(self.time_zone.local_to_utc(time)),
            Mode::Utc => time_clip(time),
        }
    }

    /// Returns the date formatted as `YYYY-MM-DDTHH:mm:ss.sssZ` in UTC, or `None` for an invalid date
    pub fn to_iso_string(&self) -> Option<String> {
        let fields = self.fields(Mode::Utc)?;

        let year = if (0..=9999).contains(&fields.year) {
            format!("{:04}", fields.year)
        } else {
            format!("{}{:06}", if fields.year < 0 { '-' } else { '+' }, fields.year.unsigned_abs())
        };

        Some(format!(
            "{year}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            fields.month + 1,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
            fields.millisecond
        ))
    }

    /// Returns the date formatted as `Tue, 14 Sep 2018 07:32:12 GMT`, or `Invalid Date` for an invalid date
    pub fn to_utc_string(&self) -> String {
        match self.fields(Mode::Utc) {
            None => String::from("Invalid Date"),
            Some(fields) => format!(
                "{}, {:02} {} {}{:04} {:02}:{:02}:{:02} GMT",
                &WEEK_DAY_NAMES[usize::from(fields.week_day)][..3],
                fields.day,
                &MONTH_NAMES[usize::from(fields.month)][..3],
                if fields.year < 0 { "-" } else { "" },
                fields.year.unsigned_abs(),
                fields.hour,
                fields.minute,
                fields.second
            ),
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_iso_string() {
            Some(text) => f.write_str(&text),
            None => f.write_str("Invalid Date"),
        }
    }
}

/// Convert calendar fields to composable values
fn to_values(fields: CalendarFields) -> Fields {
    [
        fields.year.into(),
        fields.month.into(),
        fields.day.into(),
        fields.hour.into(),
        fields.minute.into(),
        fields.second.into(),
        fields.millisecond.into(),
    ]
}
