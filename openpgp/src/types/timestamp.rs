use std::fmt;
use std::time::{SystemTime, Duration as SystemDuration, UNIX_EPOCH};

use chrono::{DateTime, Local, Utc};

/// A timestamp representable by OpenPGP.
///
/// Seconds since the Unix epoch, as stored in creation and
/// modification time fields.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u32);

impl From<Timestamp> for u32 {
    fn from(t: Timestamp) -> Self {
        t.0
    }
}

impl From<u32> for Timestamp {
    fn from(t: u32) -> Self {
        Timestamp(t)
    }
}

impl From<Timestamp> for SystemTime {
    fn from(t: Timestamp) -> Self {
        UNIX_EPOCH + SystemDuration::new(t.0 as u64, 0)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format(true))
    }
}

impl Timestamp {
    /// Adds a duration to this timestamp.
    ///
    /// Returns `None` if the resulting timestamp is not
    /// representable.
    pub fn checked_add(&self, d: Duration) -> Option<Timestamp> {
        self.0.checked_add(d.0).map(Self)
    }

    /// Formats the timestamp.
    ///
    /// In UTC, the format is `2015-01-24T02:52:15Z`.  Otherwise, the
    /// time is shown in the local time zone with its offset, e.g.
    /// `2015-01-24T11:52:15+09:00`.
    pub fn format(&self, utc: bool) -> String {
        let t = SystemTime::from(*self);
        if utc {
            DateTime::<Utc>::from(t).format("%Y-%m-%dT%H:%M:%SZ").to_string()
        } else {
            DateTime::<Local>::from(t).format("%Y-%m-%dT%H:%M:%S%:z")
                .to_string()
        }
    }
}

/// A duration representable by OpenPGP.
///
/// Used by the expiration time subpackets, which are offsets from a
/// creation time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(d: u32) -> Self {
        Duration(d)
    }
}

impl From<Duration> for u32 {
    fn from(d: Duration) -> Self {
        d.0
    }
}

impl Duration {
    /// Returns the duration in seconds.
    pub fn as_secs(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const DAY: u32 = 24 * 60 * 60;
        if self.0 % DAY == 0 {
            write!(f, "{} days", self.0 / DAY)
        } else {
            write!(f, "{} seconds", self.0)
        }
    }
}
