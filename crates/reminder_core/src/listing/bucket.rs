//! Calendar-day bucketing of epoch timestamps.

use crate::model::record::{EpochMillis, MILLIS_PER_DAY};
use serde::{Deserialize, Serialize};

/// One UTC-aligned day, identified by whole days since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayBucket {
    pub day: u64,
}

impl DayBucket {
    /// Bucket containing `ts`.
    pub fn of(ts: EpochMillis) -> Self {
        Self {
            day: ts.as_u64() / MILLIS_PER_DAY,
        }
    }

    pub fn start(self) -> EpochMillis {
        EpochMillis(self.day.saturating_mul(MILLIS_PER_DAY))
    }

    /// Last millisecond still inside the bucket.
    ///
    /// The final, partial bucket of the `u64` range ends at `u64::MAX`.
    pub fn end(self) -> EpochMillis {
        EpochMillis(self.start().as_u64().saturating_add(MILLIS_PER_DAY - 1))
    }

    /// Inclusive `(start, end)` bounds.
    pub fn range(self) -> (EpochMillis, EpochMillis) {
        (self.start(), self.end())
    }

    pub fn contains(self, ts: EpochMillis) -> bool {
        Self::of(ts) == self
    }
}
