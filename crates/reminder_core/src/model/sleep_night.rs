//! Sleep night domain model.
//!
//! # Responsibility
//! - Define one tracked night: start, end and a 0..=5 quality rating.
//!
//! # Invariants
//! - A night is in progress while `end == start`.
//! - `end` is never earlier than `start`.
//! - `quality` is `-1` (unrated) or within `0..=5`.

use crate::model::record::{EpochMillis, RecordId, Timestamped};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Quality rating for one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct SleepQuality(i8);

impl SleepQuality {
    pub const UNRATED: Self = Self(-1);
    pub const MAX: i64 = 5;

    pub fn new(value: i64) -> Result<Self, SleepValidationError> {
        match value {
            -1..=Self::MAX => Ok(Self(value as i8)),
            other => Err(SleepValidationError::QualityOutOfRange(other)),
        }
    }

    pub fn value(self) -> i64 {
        i64::from(self.0)
    }

    pub fn is_rated(self) -> bool {
        self.0 >= 0
    }
}

impl Default for SleepQuality {
    fn default() -> Self {
        Self::UNRATED
    }
}

impl TryFrom<i64> for SleepQuality {
    type Error = SleepValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SleepQuality> for i64 {
    fn from(value: SleepQuality) -> Self {
        value.value()
    }
}

/// Validation failures for sleep nights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SleepValidationError {
    QualityOutOfRange(i64),
    EndBeforeStart { start: EpochMillis, end: EpochMillis },
}

impl Display for SleepValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QualityOutOfRange(value) => {
                write!(f, "sleep quality must be -1 or within 0..=5, got {value}")
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "night ends at {end} before it starts at {start}")
            }
        }
    }
}

impl Error for SleepValidationError {}

/// Stored sleep night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepNight {
    pub id: RecordId,
    pub start: EpochMillis,
    pub end: EpochMillis,
    pub quality: SleepQuality,
}

impl SleepNight {
    /// A night that started at `start` and has not ended yet.
    pub fn started(id: RecordId, start: EpochMillis) -> Self {
        Self {
            id,
            start,
            end: start,
            quality: SleepQuality::UNRATED,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.end == self.start
    }

    /// Ends the night; a clock that went backwards clamps to `start`.
    pub fn finish(&mut self, at: EpochMillis) {
        self.end = at.max(self.start);
    }

    pub fn duration_millis(&self) -> u64 {
        self.end.as_u64().saturating_sub(self.start.as_u64())
    }

    pub fn validate(&self) -> Result<(), SleepValidationError> {
        if self.end < self.start {
            return Err(SleepValidationError::EndBeforeStart {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl Timestamped for SleepNight {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn timestamp(&self) -> EpochMillis {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::{SleepNight, SleepQuality, SleepValidationError};
    use crate::model::record::{EpochMillis, RecordId};

    #[test]
    fn quality_accepts_unrated_and_scale() {
        assert_eq!(SleepQuality::new(-1).unwrap(), SleepQuality::UNRATED);
        assert_eq!(SleepQuality::new(5).unwrap().value(), 5);
        assert_eq!(
            SleepQuality::new(6),
            Err(SleepValidationError::QualityOutOfRange(6))
        );
        assert!(SleepQuality::new(-2).is_err());
    }

    #[test]
    fn finish_never_goes_before_start() {
        let mut night = SleepNight::started(RecordId(1), EpochMillis(1_000));
        assert!(night.is_in_progress());
        night.finish(EpochMillis(500));
        assert_eq!(night.end, EpochMillis(1_000));
        night.finish(EpochMillis(4_000));
        assert!(!night.is_in_progress());
        assert_eq!(night.duration_millis(), 3_000);
    }

    #[test]
    fn end_before_start_fails_validation() {
        let night = SleepNight {
            id: RecordId(1),
            start: EpochMillis(10),
            end: EpochMillis(9),
            quality: SleepQuality::UNRATED,
        };
        assert!(matches!(
            night.validate(),
            Err(SleepValidationError::EndBeforeStart { .. })
        ));
    }
}
