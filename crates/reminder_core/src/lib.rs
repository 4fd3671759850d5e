//! Core domain logic for the cooking reminder and sleep tracker.
//! This crate is the single source of truth for list grouping and storage rules.

pub mod db;
pub mod listing;
pub mod logging;
pub mod model;
pub mod refresh;
pub mod repo;
pub mod service;

pub use listing::bucket::DayBucket;
pub use listing::builder::{build_list, ListOrder};
pub use listing::item::{ItemKey, ListItem, ListSummary, HEADER_LEGACY_ID};
pub use listing::label::{format_timestamp, header_label};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::cook::{Cook, CookValidationError, NewCook};
pub use model::record::{
    EpochMillis, NegativeTimestamp, RecordId, TimestampOutOfRange, Timestamped, MILLIS_PER_DAY,
};
pub use model::sleep_night::{SleepNight, SleepQuality, SleepValidationError};
pub use refresh::{BuiltList, ListRefresher};
pub use repo::cook_repo::{CookRepository, RepoError, RepoResult, SqliteCookRepository};
pub use repo::sleep_repo::{SleepNightRepository, SqliteSleepNightRepository};
pub use service::cook_service::CookService;
pub use service::error::{ServiceError, ServiceResult};
pub use service::sleep_service::SleepTrackerService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
