//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Hand snapshots to list materialization; callers decide when to rebuild.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Services take "now" from the caller so behavior is reproducible.

pub mod cook_service;
pub mod error;
pub mod sleep_service;
