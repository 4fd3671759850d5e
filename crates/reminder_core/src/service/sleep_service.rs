//! Sleep tracking use-case service.
//!
//! # Invariants
//! - At most one night is in progress, and it is always the latest row.
//! - Starting while a night is in progress returns that night unchanged.

use crate::listing::builder::{build_list, ListOrder};
use crate::listing::item::ListItem;
use crate::model::record::{EpochMillis, RecordId};
use crate::model::sleep_night::{SleepNight, SleepQuality};
use crate::repo::sleep_repo::SleepNightRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::info;

pub struct SleepTrackerService<R: SleepNightRepository> {
    repo: R,
}

impl<R: SleepNightRepository> SleepTrackerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The latest night if it has not ended yet.
    pub fn tonight(&self) -> ServiceResult<Option<SleepNight>> {
        Ok(self
            .repo
            .latest_night()?
            .filter(SleepNight::is_in_progress))
    }

    pub fn start_tracking(&self, now: EpochMillis) -> ServiceResult<SleepNight> {
        if let Some(night) = self.tonight()? {
            return Ok(night);
        }

        let id = self.repo.insert_night(now)?;
        info!("event=sleep_start module=service status=ok id={id}");
        self.repo
            .get_night(id)?
            .ok_or(ServiceError::InconsistentState(
                "started night not found in read-back",
            ))
    }

    /// Ends the in-progress night; `None` when nothing is being tracked.
    pub fn stop_tracking(&self, now: EpochMillis) -> ServiceResult<Option<SleepNight>> {
        let Some(mut night) = self.tonight()? else {
            return Ok(None);
        };

        night.finish(now);
        self.repo.update_night(&night)?;
        info!(
            "event=sleep_stop module=service status=ok id={} duration_ms={}",
            night.id,
            night.duration_millis()
        );
        Ok(Some(night))
    }

    pub fn rate_night(&self, id: RecordId, quality: i64) -> ServiceResult<SleepNight> {
        let quality = SleepQuality::new(quality)?;
        let mut night = self.repo.get_night(id)?.ok_or(ServiceError::NotFound(id))?;
        night.quality = quality;
        self.repo.update_night(&night)?;
        Ok(night)
    }

    pub fn clear(&self) -> ServiceResult<usize> {
        let removed = self.repo.clear()?;
        info!("event=sleep_clear module=service status=ok removed={removed}");
        Ok(removed)
    }

    /// Every night, newest first.
    pub fn nights(&self) -> ServiceResult<Vec<SleepNight>> {
        Ok(self.repo.list_nights()?)
    }

    pub fn night_list(&self, order: ListOrder) -> ServiceResult<Vec<ListItem<SleepNight>>> {
        let snapshot = self.repo.list_nights()?;
        Ok(build_list(&snapshot, order))
    }
}
