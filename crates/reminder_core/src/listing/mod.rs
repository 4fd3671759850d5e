//! Header-annotated list materialization for diffable list views.
//!
//! # Responsibility
//! - Bucket timestamped records by calendar day.
//! - Emit a flat header/record sequence in the requested direction.
//! - Provide row identity and captions for renderers.
//!
//! # Invariants
//! - Building is pure and holds no state between calls.
//! - Rows are rebuilt in full from each snapshot, never patched in place.

pub mod bucket;
pub mod builder;
pub mod item;
pub mod label;
