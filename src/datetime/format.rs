//! Formatting of date times with a token pattern.

use super::DateTime;
use crate::civil::CalendarFields;
use crate::constants::{MONTH_NAMES, WEEK_DAY_NAMES};

use regex::{Captures, Regex};

use std::sync::LazyLock;

/// Pattern used by [`DateTime::format_default`]
pub const DEFAULT_FORMAT: &str = "YYYY-MM-DDTHH:mm:ssZ";

/// Format tokens, longest first so that `MMMM` is never read as two `MM`
static FORMAT_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("YYYY|YY|MMMM|MMM|MM|M|DD|D|dddd|d|HH|H|mm|m|ss|s|ZZ|Z").unwrap());

impl DateTime {
    /// Format the date time with a token pattern.
    ///
    /// | Token | Output |
    /// |---|---|
    /// | `YYYY` / `YY` | full year / last two digits of the year |
    /// | `M` / `MM` | month in `[1, 12]`, zero-padded for `MM` |
    /// | `MMM` / `MMMM` | abbreviated / full English month name |
    /// | `D` / `DD` | day of the month, zero-padded for `DD` |
    /// | `d` / `dddd` | day of the week from Sunday in `[0, 6]` / full English week day name |
    /// | `H` / `HH` | hours in `[0, 23]`, zero-padded for `HH` |
    /// | `m` / `mm` | minutes, zero-padded for `mm` |
    /// | `s` / `ss` | seconds, zero-padded for `ss` |
    /// | `Z` / `ZZ` | offset from UTC as `±HH:mm` / `±HHmm` |
    ///
    /// Other characters are copied unchanged. An invalid date time is formatted as `Invalid date`.
    ///
    pub fn format(&self, pattern: &str) -> String {
        let (Some(fields), Some(zone)) = (&self.fields, self.time_zone()) else {
            return String::from("Invalid date");
        };

        FORMAT_TOKENS.replace_all(pattern, |captures: &Captures| format_token(&captures[0], fields, zone)).into_owned()
    }

    /// Format the date time as `YYYY-MM-DDTHH:mm:ssZ`
    pub fn format_default(&self) -> String {
        self.format(DEFAULT_FORMAT)
    }
}

/// Render a single format token
fn format_token(token: &str, fields: &CalendarFields, zone: &str) -> String {
    match token {
        "YYYY" => fields.year.to_string(),
        "YY" => {
            let year = fields.year.to_string();
            year[year.len().saturating_sub(2)..].to_owned()
        }
        "MMMM" => MONTH_NAMES[usize::from(fields.month)].to_owned(),
        "MMM" => MONTH_NAMES[usize::from(fields.month)][..3].to_owned(),
        "MM" => format!("{:02}", fields.month + 1),
        "M" => (fields.month + 1).to_string(),
        "DD" => format!("{:02}", fields.day),
        "D" => fields.day.to_string(),
        "dddd" => WEEK_DAY_NAMES[usize::from(fields.week_day)].to_owned(),
        "d" => fields.week_day.to_string(),
        "HH" => format!("{:02}", fields.hour),
        "H" => fields.hour.to_string(),
        "mm" => format!("{:02}", fields.minute),
        "m" => fields.minute.to_string(),
        "ss" => format!("{:02}", fields.second),
        "s" => fields.second.to_string(),
        "ZZ" => zone.to_owned(),
        "Z" => {
            let (hours, minutes) = zone.split_at(3);
            format!("{hours}:{minutes}")
        }
        _ => token.to_owned(),
    }
}
