//! Byte cursor helpers shared by the parsers.

use crate::error::parse::ParseDataError;

use std::num::ParseIntError;
use std::str::{self, FromStr};

pub(super) type Cursor<'a> = &'a [u8];

/// Read exactly `count` bytes and reduce remaining data
pub(super) fn read_exact<'a>(cursor: &mut Cursor<'a>, count: usize) -> Result<&'a [u8], ParseDataError> {
    if cursor.len() < count {
        return Err(ParseDataError::UnexpectedEof);
    }

    let (result, tail) = cursor.split_at(count);
    *cursor = tail;
    Ok(result)
}

/// Read exactly `N` bytes into an array and reduce remaining data
pub(super) fn read_chunk_exact<const N: usize>(cursor: &mut Cursor<'_>) -> Result<[u8; N], ParseDataError> {
    let mut chunk = [0; N];
    chunk.copy_from_slice(read_exact(cursor, N)?);
    Ok(chunk)
}

/// Read bytes and compare them to the provided tag
pub(super) fn read_tag(cursor: &mut Cursor<'_>, tag: &[u8]) -> Result<(), ParseDataError> {
    if read_exact(cursor, tag.len())? == tag {
        Ok(())
    } else {
        Err(ParseDataError::InvalidData)
    }
}

/// Read bytes if the remaining data is prefixed by the provided tag
pub(super) fn read_optional_tag(cursor: &mut Cursor<'_>, tag: &[u8]) -> Result<bool, ParseDataError> {
    if cursor.starts_with(tag) {
        read_exact(cursor, tag.len())?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Read bytes as long as the provided predicate is true
pub(super) fn read_while<'a, F: Fn(&u8) -> bool>(cursor: &mut Cursor<'a>, f: F) -> Result<&'a [u8], ParseDataError> {
    read_exact(cursor, cursor.iter().position(|x| !f(x)).unwrap_or(cursor.len()))
}

/// Read bytes until the provided predicate is true
pub(super) fn read_until<'a, F: Fn(&u8) -> bool>(cursor: &mut Cursor<'a>, f: F) -> Result<&'a [u8], ParseDataError> {
    read_exact(cursor, cursor.iter().position(f).unwrap_or(cursor.len()))
}

/// Read a sign if present, returning `-1` for `-` and `1` otherwise
pub(super) fn read_sign(cursor: &mut Cursor<'_>) -> Result<i32, ParseDataError> {
    match cursor.first() {
        Some(b'-') => read_exact(cursor, 1).map(|_| -1),
        Some(b'+') => read_exact(cursor, 1).map(|_| 1),
        _ => Ok(1),
    }
}

/// Parse integer from a slice of bytes
pub(super) fn parse_int<T: FromStr<Err = ParseIntError>>(bytes: &[u8]) -> Result<T, ParseIntError> {
    // Non UTF-8 data is reported as an invalid digit
    str::from_utf8(bytes).unwrap_or("\u{fffd}").parse()
}
