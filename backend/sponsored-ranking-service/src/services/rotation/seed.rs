use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a rotation epoch: the lead changes every half hour.
pub const DEFAULT_EPOCH_SECS: u64 = 1800;

/// Rotation pointer source for fair rotation.
///
/// Callers supply the seed explicitly; the ranking functions never read the
/// clock themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RotationSeed(u64);

impl RotationSeed {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Seed for a calendar day: days since the common era.
    ///
    /// Consecutive days map to consecutive seeds, including across year
    /// boundaries.
    pub fn for_date(date: NaiveDate) -> Self {
        Self(date.num_days_from_ce().max(0) as u64)
    }

    /// Seed for the local calendar day of `instant` in `offset`.
    pub fn for_instant(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self::for_date(instant.with_timezone(&offset).date_naive())
    }

    /// Seed for the fixed-length epoch containing `instant`:
    /// `unix_seconds / epoch_secs`. An `epoch_secs` of 0 is treated as 1.
    ///
    /// Epochs are anchored at the Unix epoch, so they do not depend on a
    /// UTC offset.
    pub fn for_epoch(instant: DateTime<Utc>, epoch_secs: u64) -> Self {
        let secs = instant.timestamp().max(0) as u64;
        Self(secs / epoch_secs.max(1))
    }

    /// Index of the group member that takes the lead slot.
    pub fn lead_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.0 % len as u64) as usize
    }

    /// The seed `steps` renders later.
    pub fn advance(&self, steps: u64) -> Self {
        Self(self.0.wrapping_add(steps))
    }
}

impl From<u64> for RotationSeed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RotationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
