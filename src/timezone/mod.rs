//! Time zones used to convert between UTC instants and wall-clock time.

use crate::civil::{civil_from_days, days_since_unix_epoch, is_leap_year, week_day};
use crate::constants::*;
use crate::error::parse::TzStringError;
use crate::error::timezone::{LocalTimeTypeError, TimeZoneError, TransitionRuleError};
use crate::error::{Result, TzError};
use crate::parse::{parse_posix_tz, parse_tz_file};

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Directories searched for a time zone file named by the `TZ` environment variable
const ZONE_INFO_DIRECTORIES: [&str; 3] = ["/usr/share/zoneinfo", "/share/zoneinfo", "/etc/zoneinfo"];

/// Transition of a TZif file
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct Transition {
    /// Unix time in seconds
    pub(crate) unix_time: i64,
    /// Index specifying the local time type of the transition
    pub(crate) local_time_type_index: usize,
}

impl Transition {
    pub(crate) fn new(unix_time: i64, local_time_type_index: usize) -> Self {
        Self { unix_time, local_time_type_index }
    }
}

/// Local time type associated to a time zone
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LocalTimeType {
    /// Offset from UTC in seconds
    ut_offset: i32,
    /// Daylight Saving Time indicator
    is_dst: bool,
    /// Time zone designation
    designation: Option<Arc<str>>,
}

impl LocalTimeType {
    /// Construct a local time type
    pub fn new(ut_offset: i32, is_dst: bool, designation: Option<&[u8]>) -> std::result::Result<Self, LocalTimeTypeError> {
        if ut_offset == i32::MIN {
            return Err(LocalTimeTypeError::InvalidUtcOffset);
        }

        let designation = match designation {
            None => None,
            Some(bytes) => {
                if bytes.len() < 3 {
                    return Err(LocalTimeTypeError::InvalidTimeZoneDesignationLength);
                }
                if !bytes.iter().all(|&x| x.is_ascii_alphanumeric() || x == b'+' || x == b'-') {
                    return Err(LocalTimeTypeError::InvalidTimeZoneDesignationChar);
                }
                Some(bytes.iter().map(|&x| x as char).collect::<String>().into())
            }
        };

        Ok(Self { ut_offset, is_dst, designation })
    }

    /// Construct the local time type associated to UTC
    pub fn utc() -> Self {
        Self::with_ut_offset(0)
    }

    /// Construct a local time type with the specified offset in seconds
    pub fn with_ut_offset(ut_offset: i32) -> Self {
        Self { ut_offset, is_dst: false, designation: None }
    }

    /// Returns offset from UTC in seconds
    pub fn ut_offset(&self) -> i32 {
        self.ut_offset
    }

    /// Returns daylight saving time indicator
    pub fn is_dst(&self) -> bool {
        self.is_dst
    }

    /// Returns time zone designation, which is empty when unknown
    pub fn designation(&self) -> &str {
        self.designation.as_deref().unwrap_or_default()
    }
}

/// Transition rule day
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum RuleDay {
    /// Julian day in `[1, 365]`, without taking occasional Feb 29 into account, which is not referenceable
    Julian1WithoutLeap(u16),
    /// Zero-based Julian day in `[0, 365]`, taking occasional Feb 29 into account
    Julian0WithLeap(u16),
    /// Day represented by a month in `[1, 12]`, a month week in `[1, 5]` and a week day in `[0, 6]` from Sunday
    MonthWeekDay { month: u8, week: u8, week_day: u8 },
}

impl RuleDay {
    pub(crate) fn julian_1(julian_day_1: u16) -> std::result::Result<Self, TransitionRuleError> {
        if !(1..=365).contains(&julian_day_1) {
            return Err(TransitionRuleError::InvalidRuleDayJulianDay);
        }
        Ok(Self::Julian1WithoutLeap(julian_day_1))
    }

    pub(crate) fn julian_0(julian_day_0: u16) -> std::result::Result<Self, TransitionRuleError> {
        if julian_day_0 > 365 {
            return Err(TransitionRuleError::InvalidRuleDayJulianDay);
        }
        Ok(Self::Julian0WithLeap(julian_day_0))
    }

    pub(crate) fn month_weekday(month: u8, week: u8, week_day: u8) -> std::result::Result<Self, TransitionRuleError> {
        if !(1..=12).contains(&month) {
            return Err(TransitionRuleError::InvalidRuleDayMonth);
        }
        if !(1..=5).contains(&week) {
            return Err(TransitionRuleError::InvalidRuleDayWeek);
        }
        if week_day > 6 {
            return Err(TransitionRuleError::InvalidRuleDayWeekDay);
        }
        Ok(Self::MonthWeekDay { month, week, week_day })
    }

    /// Get the transition date for the provided full year, as a month in `[0, 11]` and a day of the month in `[1, 31]`
    fn transition_date(&self, year: i64) -> (usize, i64) {
        match *self {
            Self::Julian1WithoutLeap(year_day) => {
                let year_day = i64::from(year_day);
                let month = CUMUL_DAY_IN_MONTHS_NORMAL_YEAR[1..].partition_point(|&x| x < year_day);
                (month, year_day - CUMUL_DAY_IN_MONTHS_NORMAL_YEAR[month])
            }
            Self::Julian0WithLeap(year_day) => {
                let leap = i64::from(is_leap_year(year));
                let cumul_days = |month: usize| CUMUL_DAY_IN_MONTHS_NORMAL_YEAR[month] + if month >= 2 { leap } else { 0 };

                let year_day = i64::from(year_day);
                let month = (1..MONTHS_PER_YEAR as usize).take_while(|&month| cumul_days(month) <= year_day).count();
                (month, 1 + year_day - cumul_days(month))
            }
            Self::MonthWeekDay { month, week, week_day: rule_week_day } => {
                let month = usize::from(month - 1);
                let days_in_month = crate::civil::days_in_month(year, month);

                let first_week_day = i64::from(week_day(days_since_unix_epoch(year, month, 1)));
                let first_occurrence = 1 + (i64::from(rule_week_day) - first_week_day).rem_euclid(DAYS_PER_WEEK);

                let mut month_day = first_occurrence + (i64::from(week) - 1) * DAYS_PER_WEEK;
                if month_day > days_in_month {
                    month_day -= DAYS_PER_WEEK;
                }

                (month, month_day)
            }
        }
    }

    /// Returns the UTC Unix time in seconds of the transition for the provided full year and UTC day time in seconds
    fn unix_time(&self, year: i64, day_time_in_utc: i64) -> i64 {
        let (month, month_day) = self.transition_date(year);
        days_since_unix_epoch(year, month, month_day) * SECONDS_PER_DAY + day_time_in_utc
    }
}

/// Transition rule representing alternate local time types
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct AlternateTime {
    /// Local time type for standard time
    pub(crate) std: LocalTimeType,
    /// Local time type for Daylight Saving Time
    pub(crate) dst: LocalTimeType,
    /// Start day of Daylight Saving Time
    dst_start: RuleDay,
    /// Local start day time of Daylight Saving Time, in seconds
    dst_start_time: i32,
    /// End day of Daylight Saving Time
    dst_end: RuleDay,
    /// Local end day time of Daylight Saving Time, in seconds
    dst_end_time: i32,
}

impl AlternateTime {
    pub(crate) fn new(
        std: LocalTimeType,
        dst: LocalTimeType,
        dst_start: RuleDay,
        dst_start_time: i32,
        dst_end: RuleDay,
        dst_end_time: i32,
    ) -> std::result::Result<Self, TransitionRuleError> {
        let in_week = |time: i32| i64::from(time).abs() < SECONDS_PER_WEEK;
        if !(in_week(dst_start_time) && in_week(dst_end_time)) {
            return Err(TransitionRuleError::InvalidDstStartEndTime);
        }

        Ok(Self { std, dst, dst_start, dst_start_time, dst_end, dst_end_time })
    }

    /// Find the local time type in effect at the specified Unix time in seconds
    fn find_local_time_type(&self, unix_time: i64) -> &LocalTimeType {
        let dst_start_time_in_utc = i64::from(self.dst_start_time) - i64::from(self.std.ut_offset);
        let dst_end_time_in_utc = i64::from(self.dst_end_time) - i64::from(self.dst.ut_offset);

        let dst_start = |year: i64| self.dst_start.unix_time(year, dst_start_time_in_utc);
        let dst_end = |year: i64| self.dst_end.unix_time(year, dst_end_time_in_utc);

        // Rule day times may lie outside of [0h, 24h], so the DST period started in a neighboring year can still be running
        let current_year = civil_from_days(unix_time.div_euclid(SECONDS_PER_DAY)).0;
        let is_dst = (current_year - 1..=current_year + 1).any(|year| {
            let start = dst_start(year);
            let end = if start <= dst_end(year) { dst_end(year) } else { dst_end(year + 1) };
            (start..end).contains(&unix_time)
        });

        if is_dst {
            &self.dst
        } else {
            &self.std
        }
    }
}

/// Transition rule
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum TransitionRule {
    /// Fixed local time type
    Fixed(LocalTimeType),
    /// Alternate local time types
    Alternate(AlternateTime),
}

impl TransitionRule {
    fn find_local_time_type(&self, unix_time: i64) -> &LocalTimeType {
        match self {
            Self::Fixed(local_time_type) => local_time_type,
            Self::Alternate(alternate_time) => alternate_time.find_local_time_type(unix_time),
        }
    }

    /// Local time types referenced by the rule, standard time first
    fn local_time_types(&self) -> Vec<LocalTimeType> {
        match self {
            Self::Fixed(local_time_type) => vec![local_time_type.clone()],
            Self::Alternate(AlternateTime { std, dst, .. }) => vec![std.clone(), dst.clone()],
        }
    }
}

/// Time zone
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TimeZone {
    /// List of transitions
    transitions: Vec<Transition>,
    /// List of local time types (cannot be empty)
    local_time_types: Vec<LocalTimeType>,
    /// Extra transition rule applicable after the last transition
    extra_rule: Option<TransitionRule>,
}

impl TimeZone {
    /// Construct a time zone
    pub(crate) fn new(
        transitions: Vec<Transition>,
        local_time_types: Vec<LocalTimeType>,
        extra_rule: Option<TransitionRule>,
    ) -> std::result::Result<Self, TzError> {
        if local_time_types.is_empty() {
            return Err(TimeZoneError::NoLocalTimeType.into());
        }

        if !transitions.iter().all(|x| x.local_time_type_index < local_time_types.len()) {
            return Err(TimeZoneError::InvalidLocalTimeTypeIndex.into());
        }

        if !transitions.windows(2).all(|x| x[0].unix_time < x[1].unix_time) {
            return Err(TimeZoneError::InvalidTransition.into());
        }

        if let (Some(extra_rule), Some(last_transition)) = (&extra_rule, transitions.last()) {
            let last_local_time_type = &local_time_types[last_transition.local_time_type_index];
            if last_local_time_type != extra_rule.find_local_time_type(last_transition.unix_time) {
                return Err(TimeZoneError::InconsistentExtraRule.into());
            }
        }

        Ok(Self { transitions, local_time_types, extra_rule })
    }

    /// Returns UTC time zone
    pub fn utc() -> Self {
        Self::fixed(0)
    }

    /// Returns time zone with fixed UTC offset in seconds
    pub fn fixed(ut_offset: i32) -> Self {
        Self { transitions: Vec::new(), local_time_types: vec![LocalTimeType::with_ut_offset(ut_offset)], extra_rule: None }
    }

    /// Returns the local time zone of the host.
    ///
    /// A non-empty `TZ` environment variable takes precedence. Otherwise `/etc/localtime` is read,
    /// and UTC is used when it does not exist or on non-UNIX platforms.
    ///
    pub fn local() -> Result<Self> {
        match env::var("TZ") {
            Ok(tz_string) if !tz_string.is_empty() => Self::from_posix_tz(&tz_string),
            _ => Self::system_local(),
        }
    }

    #[cfg(unix)]
    fn system_local() -> Result<Self> {
        match fs::read("/etc/localtime") {
            Ok(bytes) => Ok(Self::from_tz_data(&bytes)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Self::utc()),
            Err(error) => Err(error.into()),
        }
    }

    #[cfg(not(unix))]
    fn system_local() -> Result<Self> {
        Ok(Self::utc())
    }

    /// Returns the local time zone of the host, loaded once per process.
    ///
    /// Falls back to UTC if the local time zone cannot be loaded.
    ///
    pub fn local_shared() -> Arc<Self> {
        static LOCAL: OnceLock<Arc<TimeZone>> = OnceLock::new();

        LOCAL
            .get_or_init(|| match Self::local() {
                Ok(time_zone) => {
                    debug!("loaded local time zone with {} transitions", time_zone.transitions.len());
                    Arc::new(time_zone)
                }
                Err(_error) => {
                    warn!("failed to load local time zone, falling back to UTC: {_error}");
                    Arc::new(Self::utc())
                }
            })
            .clone()
    }

    /// Construct a time zone from the contents of a TZif file
    pub fn from_tz_data(bytes: &[u8]) -> std::result::Result<Self, TzError> {
        parse_tz_file(bytes)
    }

    /// Construct a time zone from the value of a `TZ` environment variable.
    ///
    /// The value is either a path to a TZif file (optionally prefixed by `:`), a name relative to the
    /// system zoneinfo directories, or a POSIX TZ string as described in
    /// [the POSIX documentation of the `TZ` environment variable](https://pubs.opengroup.org/onlinepubs/9699919799/basedefs/V1_chap08.html).
    ///
    pub fn from_posix_tz(tz_string: &str) -> Result<Self> {
        if tz_string.is_empty() {
            return Err(TzStringError::Empty.into());
        }

        if tz_string == "localtime" {
            return Self::system_local();
        }

        if let Some(path) = tz_string.strip_prefix(':') {
            return Ok(Self::from_tz_data(&read_tz_file(path)?)?);
        }

        match read_tz_file(tz_string) {
            Ok(bytes) => Ok(Self::from_tz_data(&bytes)?),
            Err(_) => {
                let tz_string = tz_string.trim_matches(|c: char| c.is_ascii_whitespace());

                // TZ string extensions are only allowed in TZif footers
                let rule = parse_posix_tz(tz_string.as_bytes(), false)?;
                Ok(Self::new(Vec::new(), rule.local_time_types(), Some(rule))?)
            }
        }
    }

    /// Find the local time type in effect at the specified Unix time in seconds.
    ///
    /// After the last transition, the extra rule applies when there is one, and the local time type of the last transition otherwise.
    ///
    pub fn find_local_time_type(&self, unix_time: i64) -> &LocalTimeType {
        match self.transitions.last() {
            Some(last_transition) if unix_time < last_transition.unix_time => {
                let index = self.transitions.partition_point(|x| x.unix_time <= unix_time);
                let local_time_type_index = if index > 0 { self.transitions[index - 1].local_time_type_index } else { 0 };
                &self.local_time_types[local_time_type_index]
            }
            last_transition => match &self.extra_rule {
                Some(extra_rule) => extra_rule.find_local_time_type(unix_time),
                None => &self.local_time_types[last_transition.map_or(0, |x| x.local_time_type_index)],
            },
        }
    }

    /// Returns the offset from UTC in milliseconds in effect at a UTC time value in milliseconds
    pub fn offset_at(&self, time: i64) -> i64 {
        let unix_time = time.div_euclid(MILLISECONDS_PER_SECOND);
        i64::from(self.find_local_time_type(unix_time).ut_offset()) * MILLISECONDS_PER_SECOND
    }

    /// Convert a wall-clock time value in milliseconds to a UTC time value.
    ///
    /// A wall-clock time repeated by a backward transition resolves to the earlier instant,
    /// and a wall-clock time skipped by a forward transition is interpreted with the offset in effect before the transition.
    ///
    pub fn local_to_utc(&self, local_time: i64) -> i64 {
        // Offsets in effect one day around the wall-clock time
        let offset_before = self.offset_at(local_time.saturating_sub(MILLISECONDS_PER_DAY));
        let offset_after = self.offset_at(local_time.saturating_add(MILLISECONDS_PER_DAY));

        [offset_before, offset_after]
            .into_iter()
            .map(|offset| (offset, local_time.saturating_sub(offset)))
            .filter(|&(offset, utc_time)| self.offset_at(utc_time) == offset)
            .map(|(_, utc_time)| utc_time)
            .min()
            .unwrap_or_else(|| local_time.saturating_sub(offset_before))
    }
}

/// Read a TZif file from an absolute path, or from a path relative to the system zoneinfo directories
fn read_tz_file(path: &str) -> io::Result<Vec<u8>> {
    if Path::new(path).is_absolute() || !cfg!(unix) {
        return fs::read(path);
    }

    ZONE_INFO_DIRECTORIES
        .iter()
        .find_map(|directory| fs::read(Path::new(directory).join(path)).ok())
        .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
}
