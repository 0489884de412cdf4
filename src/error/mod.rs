//! Error types.

pub mod parse;
pub mod timezone;

use parse::{DateParseError, TzFileError, TzStringError, UnitParseError};
use timezone::{LocalTimeTypeError, TimeZoneError, TransitionRuleError};

use std::error;
use std::fmt;
use std::io;

/// Alias for [`std::result::Result`] with the crate unified error
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for everything in the crate
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading a time zone file
    Io(io::Error),
    /// Unified error type for time zone errors
    Tz(TzError),
    /// Date value parsing error
    Parse(DateParseError),
    /// Unknown time unit name
    Unit(UnitParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(error) => error.fmt(f),
            Self::Tz(error) => error.fmt(f),
            Self::Parse(error) => error.fmt(f),
            Self::Unit(error) => error.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Tz(error) => Some(error),
            Self::Parse(error) => Some(error),
            Self::Unit(error) => Some(error),
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<TzError> for Error {
    fn from(error: TzError) -> Self {
        Self::Tz(error)
    }
}

impl From<DateParseError> for Error {
    fn from(error: DateParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<UnitParseError> for Error {
    fn from(error: UnitParseError) -> Self {
        Self::Unit(error)
    }
}

/// Unified error type for building a time zone
#[non_exhaustive]
#[derive(Debug)]
pub enum TzError {
    /// Unified error for parsing a TZif file
    TzFile(TzFileError),
    /// Unified error for parsing a TZ string
    TzString(TzStringError),
    /// Local time type error
    LocalTimeType(LocalTimeTypeError),
    /// Transition rule error
    TransitionRule(TransitionRuleError),
    /// Time zone error
    TimeZone(TimeZoneError),
}

impl fmt::Display for TzError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::TzFile(error) => write!(f, "invalid TZ file: {error}"),
            Self::TzString(error) => write!(f, "invalid TZ string: {error}"),
            Self::LocalTimeType(error) => write!(f, "invalid local time type: {error}"),
            Self::TransitionRule(error) => write!(f, "invalid transition rule: {error}"),
            Self::TimeZone(error) => write!(f, "invalid time zone: {error}"),
        }
    }
}

impl error::Error for TzError {}

impl From<TzFileError> for TzError {
    fn from(error: TzFileError) -> Self {
        Self::TzFile(error)
    }
}

impl From<TzStringError> for TzError {
    fn from(error: TzStringError) -> Self {
        Self::TzString(error)
    }
}

impl From<LocalTimeTypeError> for TzError {
    fn from(error: LocalTimeTypeError) -> Self {
        Self::LocalTimeType(error)
    }
}

impl From<TransitionRuleError> for TzError {
    fn from(error: TransitionRuleError) -> Self {
        Self::TransitionRule(error)
    }
}

impl From<TimeZoneError> for TzError {
    fn from(error: TimeZoneError) -> Self {
        Self::TimeZone(error)
    }
}

impl From<TzStringError> for Error {
    fn from(error: TzStringError) -> Self {
        Self::Tz(error.into())
    }
}

impl From<TzFileError> for Error {
    fn from(error: TzFileError) -> Self {
        Self::Tz(error.into())
    }
}

impl From<LocalTimeTypeError> for Error {
    fn from(error: LocalTimeTypeError) -> Self {
        Self::Tz(error.into())
    }
}

impl From<TransitionRuleError> for Error {
    fn from(error: TransitionRuleError) -> Self {
        Self::Tz(error.into())
    }
}

impl From<TimeZoneError> for Error {
    fn from(error: TimeZoneError) -> Self {
        Self::Tz(error.into())
    }
}
