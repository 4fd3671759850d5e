//! Presentation items handed to an incremental list renderer.
//!
//! # Invariants
//! - A header key never equals a record key; the variant tag separates them.
//! - Record keys equal the wrapped record's id.

use crate::model::record::{RecordId, Timestamped};
use serde::{Deserialize, Serialize};

/// Integer id used by renderers that cannot carry a tagged key.
pub const HEADER_LEGACY_ID: i64 = i64::MIN;

/// One row of the materialized list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListItem<T> {
    /// Day separator; `day_number` 0 is the most recently active day.
    Header { day_number: usize },
    Record { record: T },
}

/// Renderer identity of a list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Header,
    Record(RecordId),
}

impl ItemKey {
    pub fn legacy_id(self) -> i64 {
        match self {
            Self::Header => HEADER_LEGACY_ID,
            Self::Record(id) => id.0,
        }
    }
}

impl<T> ListItem<T> {
    pub fn header(day_number: usize) -> Self {
        Self::Header { day_number }
    }

    pub fn record(record: T) -> Self {
        Self::Record { record }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header { .. })
    }

    pub fn as_record(&self) -> Option<&T> {
        match self {
            Self::Header { .. } => None,
            Self::Record { record } => Some(record),
        }
    }

    pub fn day_number(&self) -> Option<usize> {
        match self {
            Self::Header { day_number } => Some(*day_number),
            Self::Record { .. } => None,
        }
    }
}

impl<T: Timestamped> ListItem<T> {
    pub fn key(&self) -> ItemKey {
        match self {
            Self::Header { .. } => ItemKey::Header,
            Self::Record { record } => ItemKey::Record(record.record_id()),
        }
    }

    /// Same row identity; the renderer may move or rebind instead of recreate.
    pub fn same_item(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T: PartialEq> ListItem<T> {
    /// Identical content; a same-identity row needs no rebind.
    pub fn same_content(&self, other: &Self) -> bool {
        self == other
    }
}

/// Header and record counts of a materialized list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSummary {
    pub headers: usize,
    pub records: usize,
}

impl ListSummary {
    pub fn of<T>(items: &[ListItem<T>]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            if item.is_header() {
                acc.headers += 1;
            } else {
                acc.records += 1;
            }
            acc
        })
    }

    pub fn is_empty(&self) -> bool {
        self.headers == 0 && self.records == 0
    }
}
