//! Cook domain model.
//!
//! # Responsibility
//! - Define the cooking-reminder record: a dish and when it was last cooked.
//! - Validate user-supplied names before they reach storage.
//!
//! # Invariants
//! - `id` is assigned by storage and stable for the row lifetime.
//! - `name` is non-empty after trimming.
//! - `last_cooked` only moves when the dish is cooked again.

use crate::model::record::{EpochMillis, RecordId, Timestamped};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stored cooking reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cook {
    pub id: RecordId,
    pub name: String,
    /// Wall-clock time of the most recent cooking.
    pub last_cooked: EpochMillis,
}

/// Insert payload; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCook {
    pub name: String,
    pub last_cooked: EpochMillis,
}

/// Validation failures for cook payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookValidationError {
    EmptyName,
}

impl Display for CookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "cook name cannot be empty"),
        }
    }
}

impl Error for CookValidationError {}

impl NewCook {
    /// Builds a payload with a trimmed name.
    pub fn new(name: impl AsRef<str>, last_cooked: EpochMillis) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            last_cooked,
        }
    }

    pub fn validate(&self) -> Result<(), CookValidationError> {
        validate_name(&self.name)
    }

    /// Attaches the storage-assigned id.
    pub fn into_cook(self, id: RecordId) -> Cook {
        Cook {
            id,
            name: self.name,
            last_cooked: self.last_cooked,
        }
    }
}

impl Cook {
    pub fn validate(&self) -> Result<(), CookValidationError> {
        validate_name(&self.name)
    }

    /// Records another cooking of this dish.
    pub fn cooked_at(&mut self, when: EpochMillis) {
        self.last_cooked = when;
    }
}

impl Timestamped for Cook {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn timestamp(&self) -> EpochMillis {
        self.last_cooked
    }
}

fn validate_name(name: &str) -> Result<(), CookValidationError> {
    if name.trim().is_empty() {
        return Err(CookValidationError::EmptyName);
    }
    Ok(())
}
