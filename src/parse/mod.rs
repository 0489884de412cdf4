//! Parsing functions.

mod date_value;
mod tz_file;
mod tz_string;
mod utils;

pub(crate) use date_value::parse_date_string;
pub(crate) use tz_file::parse_tz_file;
pub(crate) use tz_string::parse_posix_tz;
