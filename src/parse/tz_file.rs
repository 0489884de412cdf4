//! Functions used for parsing a TZif file.

use crate::error::parse::TzFileError;
use crate::error::TzError;
use crate::parse::tz_string::parse_posix_tz;
use crate::parse::utils::{read_chunk_exact, read_exact, Cursor};
use crate::timezone::{LocalTimeType, TimeZone, Transition, TransitionRule};

use std::iter;
use std::str;

/// TZif version
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Version {
    V1,
    V2,
    V3,
}

/// TZif header
#[derive(Debug)]
struct Header {
    /// TZif version
    version: Version,
    /// Number of UT/local indicators
    ut_local_count: usize,
    /// Number of standard/wall indicators
    std_wall_count: usize,
    /// Number of leap-second records
    leap_count: usize,
    /// Number of transition times
    transition_count: usize,
    /// Number of local time type records
    type_count: usize,
    /// Number of time zone designations bytes
    char_count: usize,
}

impl Header {
    /// Parse TZif header
    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, TzFileError> {
        if read_exact(cursor, 4)? != b"TZif" {
            return Err(TzFileError::InvalidMagicNumber);
        }

        let version = match read_exact(cursor, 1)? {
            [0x00] => Version::V1,
            [0x32] => Version::V2,
            [0x33] => Version::V3,
            _ => return Err(TzFileError::UnsupportedTzFileVersion),
        };

        read_exact(cursor, 15)?;

        let mut read_count = || read_chunk_exact(cursor).map(|x| u32::from_be_bytes(x) as usize);

        let ut_local_count = read_count()?;
        let std_wall_count = read_count()?;
        let leap_count = read_count()?;
        let transition_count = read_count()?;
        let type_count = read_count()?;
        let char_count = read_count()?;

        let valid_indicator_count = |count: usize| count == 0 || count == type_count;
        if !(type_count != 0 && char_count != 0 && valid_indicator_count(ut_local_count) && valid_indicator_count(std_wall_count)) {
            return Err(TzFileError::InvalidHeader);
        }

        Ok(Self { version, ut_local_count, std_wall_count, leap_count, transition_count, type_count, char_count })
    }
}

/// TZif data blocks, with times stored on `time_size` bytes
struct DataBlocks<'a> {
    time_size: usize,
    transition_times: &'a [u8],
    transition_types: &'a [u8],
    local_time_types: &'a [u8],
    time_zone_designations: &'a [u8],
    leap_seconds: &'a [u8],
    std_walls: &'a [u8],
    ut_locals: &'a [u8],
}

impl<'a> DataBlocks<'a> {
    /// Read TZif data blocks
    fn read(cursor: &mut Cursor<'a>, header: &Header, time_size: usize) -> Result<Self, TzFileError> {
        Ok(Self {
            time_size,
            transition_times: read_exact(cursor, header.transition_count * time_size)?,
            transition_types: read_exact(cursor, header.transition_count)?,
            local_time_types: read_exact(cursor, header.type_count * 6)?,
            time_zone_designations: read_exact(cursor, header.char_count)?,
            leap_seconds: read_exact(cursor, header.leap_count * (time_size + 4))?,
            std_walls: read_exact(cursor, header.std_wall_count)?,
            ut_locals: read_exact(cursor, header.ut_local_count)?,
        })
    }

    /// Decode a big-endian time of `time_size` bytes
    fn parse_time(&self, mut data: &[u8]) -> Result<i64, TzFileError> {
        Ok(match self.time_size {
            4 => i32::from_be_bytes(read_chunk_exact(&mut data)?).into(),
            _ => i64::from_be_bytes(read_chunk_exact(&mut data)?),
        })
    }

    /// Parse leap second records as `(unix_leap_time, correction)` pairs
    fn parse_leap_seconds(&self) -> Result<Vec<(i64, i32)>, TzFileError> {
        let mut leap_seconds = Vec::with_capacity(self.leap_seconds.len() / (self.time_size + 4));

        for mut data in self.leap_seconds.chunks_exact(self.time_size + 4) {
            let unix_leap_time = self.parse_time(read_exact(&mut data, self.time_size)?)?;
            let correction = i32::from_be_bytes(read_chunk_exact(&mut data)?);
            leap_seconds.push((unix_leap_time, correction));
        }

        if let Some(&(unix_leap_time, correction)) = leap_seconds.first() {
            if !(unix_leap_time >= 0 && correction.abs() == 1) {
                return Err(TzFileError::InvalidLeapSecond);
            }
        }

        if !leap_seconds.windows(2).all(|x| x[0].0 < x[1].0 && (x[1].1 - x[0].1).abs() == 1) {
            return Err(TzFileError::InvalidLeapSecond);
        }

        Ok(leap_seconds)
    }

    /// Parse local time type records
    fn parse_local_time_types(&self) -> Result<Vec<LocalTimeType>, TzError> {
        let mut local_time_types = Vec::with_capacity(self.local_time_types.len() / 6);

        for mut data in self.local_time_types.chunks_exact(6) {
            let ut_offset = i32::from_be_bytes(read_chunk_exact(&mut data).map_err(TzFileError::from)?);
            let [dst_indicator, char_index] = read_chunk_exact(&mut data).map_err(TzFileError::from)?;

            let is_dst = match dst_indicator {
                0 => false,
                1 => true,
                _ => return Err(TzFileError::InvalidDstIndicator.into()),
            };

            let designations = self.time_zone_designations.get(usize::from(char_index)..).unwrap_or_default();
            let designation = match designations.iter().position(|&c| c == b'\0') {
                None => return Err(TzFileError::InvalidTimeZoneDesignationCharIndex.into()),
                Some(0) => None,
                Some(position) => Some(&designations[..position]),
            };

            local_time_types.push(LocalTimeType::new(ut_offset, is_dst, designation)?);
        }

        Ok(local_time_types)
    }

    /// Parse time zone data
    fn parse(&self, header: &Header, footer: Option<&[u8]>) -> Result<TimeZone, TzError> {
        let leap_seconds = self.parse_leap_seconds()?;

        // Transition times are stored in leap time when the file has leap seconds
        let to_unix_time = |unix_leap_time: i64| {
            let index = leap_seconds.partition_point(|x| x.0 < unix_leap_time);
            let correction = if index > 0 { leap_seconds[index - 1].1 } else { 0 };
            unix_leap_time - i64::from(correction)
        };

        let mut transitions = Vec::with_capacity(header.transition_count);
        for (time_data, &local_time_type_index) in self.transition_times.chunks_exact(self.time_size).zip(self.transition_types) {
            let unix_leap_time = self.parse_time(time_data)?;
            transitions.push(Transition::new(to_unix_time(unix_leap_time), local_time_type_index.into()));
        }

        let local_time_types = self.parse_local_time_types()?;

        let std_walls_iter = self.std_walls.iter().copied().chain(iter::repeat(0));
        let ut_locals_iter = self.ut_locals.iter().copied().chain(iter::repeat(0));
        if !std_walls_iter.zip(ut_locals_iter).take(header.type_count).all(|x| matches!(x, (0, 0) | (1, 0) | (1, 1))) {
            return Err(TzFileError::InvalidStdWallUtLocal.into());
        }

        let extra_rule = match footer {
            Some(footer) => parse_footer(footer, header.version == Version::V3)?,
            None => None,
        };

        TimeZone::new(transitions, local_time_types, extra_rule)
    }
}

/// Parse TZif footer
fn parse_footer(footer: &[u8], use_string_extensions: bool) -> Result<Option<TransitionRule>, TzError> {
    let footer = str::from_utf8(footer).map_err(|_| TzFileError::InvalidFooter)?;
    if !(footer.starts_with('\n') && footer.ends_with('\n')) {
        return Err(TzFileError::InvalidFooter.into());
    }

    let tz_string = footer.trim_matches(|c: char| c.is_ascii_whitespace());
    if tz_string.starts_with(':') || tz_string.contains('\0') {
        return Err(TzFileError::InvalidFooter.into());
    }

    if tz_string.is_empty() {
        return Ok(None);
    }

    parse_posix_tz(tz_string.as_bytes(), use_string_extensions).map(Some)
}

/// Parse TZif file as described in [RFC 8536](https://datatracker.ietf.org/doc/html/rfc8536)
pub(crate) fn parse_tz_file(bytes: &[u8]) -> Result<TimeZone, TzError> {
    let mut cursor = bytes;

    let header = Header::parse(&mut cursor)?;
    let v1_data_blocks = DataBlocks::read(&mut cursor, &header, 4)?;

    match header.version {
        Version::V1 => {
            if !cursor.is_empty() {
                return Err(TzFileError::RemainingDataV1.into());
            }

            v1_data_blocks.parse(&header, None)
        }
        Version::V2 | Version::V3 => {
            let header = Header::parse(&mut cursor)?;
            let data_blocks = DataBlocks::read(&mut cursor, &header, 8)?;
            data_blocks.parse(&header, Some(cursor))
        }
    }
}
