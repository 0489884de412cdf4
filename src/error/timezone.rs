//! Time zone error types.

use std::error::Error;
use std::fmt;

/// Local time type error
#[non_exhaustive]
#[derive(Debug)]
pub enum LocalTimeTypeError {
    /// Invalid time zone designation length
    InvalidTimeZoneDesignationLength,
    /// Invalid characters in time zone designation
    InvalidTimeZoneDesignationChar,
    /// Invalid UTC offset
    InvalidUtcOffset,
}

impl fmt::Display for LocalTimeTypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidTimeZoneDesignationLength => f.write_str("time zone designation must have at least 3 characters"),
            Self::InvalidTimeZoneDesignationChar => f.write_str("invalid characters in time zone designation"),
            Self::InvalidUtcOffset => f.write_str("invalid UTC offset"),
        }
    }
}

impl Error for LocalTimeTypeError {}

/// Transition rule error
#[non_exhaustive]
#[derive(Debug)]
pub enum TransitionRuleError {
    /// Invalid rule day julian day
    InvalidRuleDayJulianDay,
    /// Invalid rule day month
    InvalidRuleDayMonth,
    /// Invalid rule day week
    InvalidRuleDayWeek,
    /// Invalid rule day week day
    InvalidRuleDayWeekDay,
    /// Invalid DST start or end time
    InvalidDstStartEndTime,
}

impl fmt::Display for TransitionRuleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidRuleDayJulianDay => f.write_str("invalid rule day julian day"),
            Self::InvalidRuleDayMonth => f.write_str("invalid rule day month"),
            Self::InvalidRuleDayWeek => f.write_str("invalid rule day week"),
            Self::InvalidRuleDayWeekDay => f.write_str("invalid rule day week day"),
            Self::InvalidDstStartEndTime => f.write_str("invalid DST start or end time"),
        }
    }
}

impl Error for TransitionRuleError {}

/// Time zone error
#[non_exhaustive]
#[derive(Debug)]
pub enum TimeZoneError {
    /// No local time type
    NoLocalTimeType,
    /// Invalid local time type index
    InvalidLocalTimeTypeIndex,
    /// Invalid transition
    InvalidTransition,
    /// Inconsistent extra transition rule relative to the last transition
    InconsistentExtraRule,
}

impl fmt::Display for TimeZoneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoLocalTimeType => f.write_str("list of local time types must not be empty"),
            Self::InvalidLocalTimeTypeIndex => f.write_str("invalid local time type index"),
            Self::InvalidTransition => f.write_str("transitions must be sorted and unique"),
            Self::InconsistentExtraRule => f.write_str("extra transition rule is inconsistent with the last transition"),
        }
    }
}

impl Error for TimeZoneError {}
