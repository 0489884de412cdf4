//! Parsing error types.

use std::error::Error;
use std::fmt;
use std::num::ParseIntError;
use std::str::Utf8Error;

/// Parse data error
#[non_exhaustive]
#[derive(Debug)]
pub enum ParseDataError {
    /// Unexpected end of data
    UnexpectedEof,
    /// Invalid data
    InvalidData,
}

impl fmt::Display for ParseDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnexpectedEof => f.write_str("unexpected end of data"),
            Self::InvalidData => f.write_str("invalid data"),
        }
    }
}

impl Error for ParseDataError {}

/// Unified error type for parsing a TZ string
#[non_exhaustive]
#[derive(Debug)]
pub enum TzStringError {
    /// UTF-8 error
    Utf8(Utf8Error),
    /// Integer parsing error
    ParseInt(ParseIntError),
    /// Parse data error
    ParseData(ParseDataError),
    /// Invalid offset, with the name of the faulty component
    InvalidOffset(&'static str),
    /// Invalid rule day time, with the name of the faulty component
    InvalidDayTime(&'static str),
    /// Missing DST start and end rules
    MissingDstStartEndRules,
    /// Remaining data was found after parsing TZ string
    RemainingData,
    /// Empty TZ string
    Empty,
}

impl fmt::Display for TzStringError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Utf8(error) => error.fmt(f),
            Self::ParseInt(error) => error.fmt(f),
            Self::ParseData(error) => error.fmt(f),
            Self::InvalidOffset(component) => write!(f, "invalid offset {component}"),
            Self::InvalidDayTime(component) => write!(f, "invalid day time {component}"),
            Self::MissingDstStartEndRules => f.write_str("missing DST start and end rules"),
            Self::RemainingData => f.write_str("remaining data after parsing TZ string"),
            Self::Empty => f.write_str("empty TZ string"),
        }
    }
}

impl Error for TzStringError {}

impl From<Utf8Error> for TzStringError {
    fn from(error: Utf8Error) -> Self {
        Self::Utf8(error)
    }
}

impl From<ParseIntError> for TzStringError {
    fn from(error: ParseIntError) -> Self {
        Self::ParseInt(error)
    }
}

impl From<ParseDataError> for TzStringError {
    fn from(error: ParseDataError) -> Self {
        Self::ParseData(error)
    }
}

/// Unified error type for parsing a TZif file
#[non_exhaustive]
#[derive(Debug)]
pub enum TzFileError {
    /// Parse data error
    ParseData(ParseDataError),
    /// Invalid magic number
    InvalidMagicNumber,
    /// Unsupported TZif version
    UnsupportedTzFileVersion,
    /// Invalid header
    InvalidHeader,
    /// Invalid footer
    InvalidFooter,
    /// Invalid DST indicator
    InvalidDstIndicator,
    /// Invalid time zone designation char index
    InvalidTimeZoneDesignationCharIndex,
    /// Invalid leap second record
    InvalidLeapSecond,
    /// Invalid couple of standard/wall and UT/local indicators
    InvalidStdWallUtLocal,
    /// Remaining data after the end of a TZif v1 data block
    RemainingDataV1,
}

impl fmt::Display for TzFileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ParseData(error) => error.fmt(f),
            Self::InvalidMagicNumber => f.write_str("invalid magic number"),
            Self::UnsupportedTzFileVersion => f.write_str("unsupported TZ file version"),
            Self::InvalidHeader => f.write_str("invalid header"),
            Self::InvalidFooter => f.write_str("invalid footer"),
            Self::InvalidDstIndicator => f.write_str("invalid DST indicator"),
            Self::InvalidTimeZoneDesignationCharIndex => f.write_str("invalid time zone designation char index"),
            Self::InvalidLeapSecond => f.write_str("leap seconds must be sorted with a unit correction"),
            Self::InvalidStdWallUtLocal => f.write_str("invalid couple of standard/wall and UT/local indicators"),
            Self::RemainingDataV1 => f.write_str("remaining data after the end of a TZif v1 data block"),
        }
    }
}

impl Error for TzFileError {}

impl From<ParseDataError> for TzFileError {
    fn from(error: ParseDataError) -> Self {
        Self::ParseData(error)
    }
}

/// Date value parsing error
#[non_exhaustive]
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DateParseError {
    /// A compact `YYYY-MM-DD` string with a zero day or a negative month
    InvalidCompactDate(String),
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidCompactDate(text) => write!(f, "invalid date string: {text:?}"),
        }
    }
}

impl Error for DateParseError {}

/// Error returned when parsing an unknown time unit name
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnitParseError(pub(crate) String);

impl fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown time unit: {:?}", self.0)
    }
}

impl Error for UnitParseError {}
