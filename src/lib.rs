#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! This crate provides the `DateTime` struct, an immutable date time with calendar arithmetic compatible with [moment.js](https://momentjs.com).
//!
//! A `DateTime` wraps a time value in milliseconds since Unix epoch, read in local time or in UTC.
//! It can be truncated to the start or the end of a unit, offset by calendar units which are clamped to the end of shorter months,
//! compared and differenced in calendar units, and formatted with a token pattern.
//!
//! Local time is provided by a `TimeZone`, read from the `TZ` environment variable or from the system,
//! and given either as a [POSIX `TZ` string](https://pubs.opengroup.org/onlinepubs/9699919799/basedefs/V1_chap08.html)
//! or as a [TZif file](https://datatracker.ietf.org/doc/html/rfc8536).
//!
//! The current time and the local time zone are injected through `Settings`, so that results can be made deterministic.
//!
//! # Usage
//!
//! ## Date time
//!
//! ```rust
//! # fn main() -> Result<(), datetime::Error> {
//!     use datetime::{FixedClock, Settings, TimeZone, Unit};
//!
//!     // 2018-09-14T11:32:12.345Z, seen from New York
//!     let time_zone = TimeZone::from_posix_tz("EST5EDT,M3.2.0,M11.1.0")?;
//!     let settings = Settings::new(FixedClock(1536924732345), time_zone);
//!
//!     let now = settings.now();
//!     assert_eq!(now.format("YYYY-MM-DD HH:mm:ss ZZ"), "2018-09-14 07:32:12 -0400");
//!     assert_eq!(now.start_of(Unit::Week).format("dddd D MMMM"), "Sunday 9 September");
//!
//!     // Adding a month clamps to the end of a shorter month
//!     let date_time = settings.date_time("2011-10-31")?;
//!     let next_month = date_time.add(1, Unit::Month);
//!     assert_eq!(next_month.day_of_month(), Some(30));
//!     assert_eq!(next_month.diff(&date_time, Unit::Month, false), 1.0);
//!     assert_eq!(date_time.end_of(Unit::Month).format("D HH:mm:ss"), "31 23:59:59");
//!
//!     // A missing value gives an invalid date time
//!     assert!(!settings.date_time(None::<&str>)?.is_valid());
//!
//!     // Get the current date time in the local time zone of the host
//!     let _now = datetime::date_time(())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Time zone
//!
//! ```rust
//! # fn main() -> Result<(), datetime::Error> {
//!     use datetime::TimeZone;
//!
//!     // 2000-01-01T00:00:00Z
//!     let time = 946684800000;
//!
//!     assert_eq!(TimeZone::utc().offset_at(time), 0);
//!     assert_eq!(TimeZone::fixed(-3600).offset_at(time), -3600000);
//!
//!     // 2018-07-12T04:06:12Z is in daylight saving time
//!     let time_zone = TimeZone::from_posix_tz("EST5EDT,M3.2.0,M11.1.0")?;
//!     assert_eq!(time_zone.find_local_time_type(1531368372).ut_offset(), -14400);
//!     assert!(time_zone.find_local_time_type(1531368372).is_dst());
//!
//!     // Get the local time zone of the host
//!     let _ = TimeZone::local();
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod logging;

mod civil;
mod clock;
mod constants;
mod date;
mod datetime;
mod parse;
mod timezone;
mod unit;

pub mod error;
pub mod utils;

pub use civil::{days_in_month, is_leap_year, CalendarFields};
pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{Date, Fields, Mode};
pub use datetime::{DateLike, DateObject, DateTime, Settings, DEFAULT_FORMAT};
pub use error::{Error, Result, TzError};
pub use timezone::{LocalTimeType, TimeZone};
pub use unit::Unit;

/// Construct a date time from a date-like value, using the system clock and the local time zone of the host
pub fn date_time(value: impl Into<DateLike>) -> Result<DateTime> {
    DateTime::new(value)
}
