//! Units of time.

use crate::constants::*;
use crate::error::parse::UnitParseError;

use std::fmt;
use std::str::FromStr;

/// Unit of time used for truncation, arithmetic and differences
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Unit {
    /// Millisecond
    Millisecond,
    /// Second
    Second,
    /// Minute
    Minute,
    /// Hour
    Hour,
    /// Day of the month
    Day,
    /// Week, starting on Sunday
    Week,
    /// Month
    Month,
    /// Quarter of a year, made of three months
    Quarter,
    /// Year
    Year,
}

impl Unit {
    /// All units, from the finest to the coarsest
    pub const ALL: [Unit; 9] =
        [Self::Millisecond, Self::Second, Self::Minute, Self::Hour, Self::Day, Self::Week, Self::Month, Self::Quarter, Self::Year];

    /// Returns the length of the unit in milliseconds, or `None` for units of variable length
    pub fn fixed_milliseconds(self) -> Option<i64> {
        match self {
            Self::Millisecond => Some(1),
            Self::Second => Some(MILLISECONDS_PER_SECOND),
            Self::Minute => Some(MILLISECONDS_PER_MINUTE),
            Self::Hour => Some(MILLISECONDS_PER_HOUR),
            Self::Day => Some(MILLISECONDS_PER_DAY),
            Self::Week => Some(MILLISECONDS_PER_WEEK),
            Self::Month | Self::Quarter | Self::Year => None,
        }
    }

    /// Returns the singular lowercase name of the unit
    pub fn name(self) -> &'static str {
        match self {
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = UnitParseError;

    /// Parse a unit from its name, its plural, or its short alias.
    ///
    /// Short aliases are case sensitive (`M` is a month and `m` a minute), full names are not.
    ///
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s {
            "ms" => Self::Millisecond,
            "s" => Self::Second,
            "m" => Self::Minute,
            "h" => Self::Hour,
            "d" | "D" => Self::Day,
            "w" => Self::Week,
            "M" => Self::Month,
            "Q" => Self::Quarter,
            "y" | "Y" => Self::Year,
            _ => match s.to_ascii_lowercase().as_str() {
                "millisecond" | "milliseconds" => Self::Millisecond,
                "second" | "seconds" => Self::Second,
                "minute" | "minutes" => Self::Minute,
                "hour" | "hours" => Self::Hour,
                "day" | "days" | "date" | "dates" => Self::Day,
                "week" | "weeks" => Self::Week,
                "month" | "months" => Self::Month,
                "quarter" | "quarters" => Self::Quarter,
                "year" | "years" => Self::Year,
                _ => return Err(UnitParseError(s.to_owned())),
            },
        };

        Ok(unit)
    }
}
