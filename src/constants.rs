//! Some useful constants.

/// Number of milliseconds in one second
pub const MILLISECONDS_PER_SECOND: i64 = 1000;
/// Number of milliseconds in one minute
pub const MILLISECONDS_PER_MINUTE: i64 = 60 * MILLISECONDS_PER_SECOND;
/// Number of milliseconds in one hour
pub const MILLISECONDS_PER_HOUR: i64 = 60 * MILLISECONDS_PER_MINUTE;
/// Number of milliseconds in one day
pub const MILLISECONDS_PER_DAY: i64 = 24 * MILLISECONDS_PER_HOUR;
/// Number of milliseconds in one week
pub const MILLISECONDS_PER_WEEK: i64 = DAYS_PER_WEEK * MILLISECONDS_PER_DAY;

/// Number of seconds in one minute
pub const SECONDS_PER_MINUTE: i64 = 60;
/// Number of seconds in one hour
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
/// Number of seconds in one day
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
/// Number of seconds in one week
pub const SECONDS_PER_WEEK: i64 = DAYS_PER_WEEK * SECONDS_PER_DAY;

/// Number of days in one week
pub const DAYS_PER_WEEK: i64 = 7;
/// Number of months in one year
pub const MONTHS_PER_YEAR: i64 = 12;
/// Number of months in one quarter
pub const MONTHS_PER_QUARTER: i64 = 3;
/// Number of days in a normal year
pub const DAYS_PER_NORMAL_YEAR: i64 = 365;
/// Number of days in 4 years (including 1 leap year)
pub const DAYS_PER_4_YEARS: i64 = DAYS_PER_NORMAL_YEAR * 4 + 1;
/// Number of days in 100 years (including 24 leap years)
pub const DAYS_PER_100_YEARS: i64 = DAYS_PER_NORMAL_YEAR * 100 + 24;
/// Number of days in 400 years (including 97 leap years)
pub const DAYS_PER_400_YEARS: i64 = DAYS_PER_NORMAL_YEAR * 400 + 97;

/// Largest absolute time value in milliseconds, `±275760-09-13T00:00:00Z`
pub const MAX_TIME_VALUE: i64 = 8_640_000_000_000_000;

/// Month days in a normal year
pub const DAY_IN_MONTHS_NORMAL_YEAR: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
/// Cumulated month days in a normal year
pub const CUMUL_DAY_IN_MONTHS_NORMAL_YEAR: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Days since Unix epoch of `2000-03-01` (Wednesday)
pub const UNIX_OFFSET_DAYS: i64 = 11017;
/// Month days in a leap year from March
pub const DAY_IN_MONTHS_LEAP_YEAR_FROM_MARCH: [i64; 12] = [31, 30, 31, 30, 31, 31, 30, 31, 30, 31, 31, 29];

/// English month names
pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December",
];
/// English week day names, from Sunday
pub const WEEK_DAY_NAMES: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
