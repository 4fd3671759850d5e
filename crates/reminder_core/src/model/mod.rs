//! Domain records for the reminder and sleep-tracking use-cases.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Expose the `Timestamped` contract that list materialization consumes.
//!
//! # Invariants
//! - Every stored record is identified by a storage-assigned `RecordId`.
//! - Timestamps are non-negative epoch milliseconds.

pub mod cook;
pub mod record;
pub mod sleep_night;
