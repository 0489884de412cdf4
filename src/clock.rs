//! Sources of the current time.

use std::fmt::Debug;
use std::time::{Duration, SystemTime};

/// Source of the current time, in milliseconds since Unix epoch (`1970-01-01T00:00:00Z`)
pub trait Clock: Debug + Send + Sync {
    /// Returns the current time in milliseconds since Unix epoch
    fn now(&self) -> i64;
}

/// Clock reading the system time
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        unix_time_milliseconds(SystemTime::now())
    }
}

/// Clock always returning the same time, in milliseconds since Unix epoch
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Returns the duration between Unix epoch and a `SystemTime`.
///
/// The `Ok` variant corresponds to a positive duration, and the `Err` variant to a negative duration.
fn duration_since_epoch(time: SystemTime) -> Result<Duration, Duration> {
    time.duration_since(SystemTime::UNIX_EPOCH).map_err(|e| e.duration())
}

/// Returns the Unix time in milliseconds for a `SystemTime`, saturating on overflow
fn unix_time_milliseconds(time: SystemTime) -> i64 {
    let milliseconds = |duration: Duration| i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);

    match duration_since_epoch(time) {
        Ok(duration) => milliseconds(duration),
        Err(duration) => -milliseconds(duration),
    }
}
