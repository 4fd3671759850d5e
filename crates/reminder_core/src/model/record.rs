//! Shared record identity and timestamp primitives.
//!
//! # Responsibility
//! - Define the identifier and timestamp types every stored record uses.
//! - Define the `Timestamped` contract consumed by list materialization.
//!
//! # Invariants
//! - `RecordId` is assigned by storage and never reused for another row.
//! - `EpochMillis` cannot hold a negative value.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one calendar-day bucket.
pub const MILLIS_PER_DAY: u64 = 86_400_000;

/// Storage-assigned row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix epoch timestamp in milliseconds.
///
/// Backed by `u64` so pre-epoch values are unrepresentable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EpochMillis(pub u64);

impl EpochMillis {
    /// Reads the current wall clock.
    ///
    /// A clock set before 1970 collapses to zero.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);
        Self(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for EpochMillis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EpochMillis {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Raised when a signed timestamp is before the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegativeTimestamp(pub i64);

impl Display for NegativeTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "timestamp must not be negative, got {}", self.0)
    }
}

impl Error for NegativeTimestamp {}

/// Raised when a timestamp does not fit a signed 64-bit column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampOutOfRange(pub u64);

impl Display for TimestampOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "timestamp {} exceeds {}", self.0, i64::MAX)
    }
}

impl Error for TimestampOutOfRange {}

impl TryFrom<EpochMillis> for i64 {
    type Error = TimestampOutOfRange;

    fn try_from(value: EpochMillis) -> Result<Self, Self::Error> {
        i64::try_from(value.0).map_err(|_| TimestampOutOfRange(value.0))
    }
}

impl TryFrom<i64> for EpochMillis {
    type Error = NegativeTimestamp;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| NegativeTimestamp(value))
    }
}

/// A record that can be placed in a day bucket.
pub trait Timestamped {
    fn record_id(&self) -> RecordId;
    fn timestamp(&self) -> EpochMillis;
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn record_id(&self) -> RecordId {
        (**self).record_id()
    }

    fn timestamp(&self) -> EpochMillis {
        (**self).timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::{EpochMillis, NegativeTimestamp, TimestampOutOfRange};

    #[test]
    fn negative_storage_value_is_rejected() {
        assert_eq!(EpochMillis::try_from(-1_i64), Err(NegativeTimestamp(-1)));
        assert_eq!(EpochMillis::try_from(42_i64), Ok(EpochMillis(42)));
    }

    #[test]
    fn signed_view_round_trips_realistic_values() {
        let ts = EpochMillis(1_700_000_000_000);
        let stored = i64::try_from(ts).unwrap();
        assert_eq!(EpochMillis::try_from(stored), Ok(ts));
    }

    #[test]
    fn signed_view_rejects_values_past_i64_max() {
        let largest = EpochMillis(i64::MAX as u64);
        assert_eq!(i64::try_from(largest), Ok(i64::MAX));
        let too_large = EpochMillis(i64::MAX as u64 + 1);
        assert_eq!(
            i64::try_from(too_large),
            Err(TimestampOutOfRange(i64::MAX as u64 + 1))
        );
    }
}
