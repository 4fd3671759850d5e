//! Cooking reminder use-case service.
//!
//! # Responsibility
//! - Add, re-cook, delete and clear reminders.
//! - Materialize the day-grouped reminder list from a fresh snapshot.
//!
//! # Invariants
//! - Names are trimmed; blank names never reach storage.
//! - `cook_list` always rebuilds from the current rows.

use crate::listing::builder::{build_list, ListOrder};
use crate::listing::item::ListItem;
use crate::model::cook::{Cook, NewCook};
use crate::model::record::{EpochMillis, RecordId};
use crate::repo::cook_repo::CookRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::{debug, info};

/// Cook service facade over repository implementations.
pub struct CookService<R: CookRepository> {
    repo: R,
}

impl<R: CookRepository> CookService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a reminder cooked at `now` and returns the stored row.
    pub fn add_cook(&self, name: impl AsRef<str>, now: EpochMillis) -> ServiceResult<Cook> {
        let payload = NewCook::new(name, now);
        if payload.validate().is_err() {
            return Err(ServiceError::EmptyName);
        }

        let id = self.repo.insert_cook(&payload)?;
        info!("event=cook_add module=service status=ok id={id}");
        self.repo
            .get_cook(id)?
            .ok_or(ServiceError::InconsistentState(
                "created cook not found in read-back",
            ))
    }

    /// Records that the dish was cooked again at `now`.
    pub fn mark_cooked(&self, id: RecordId, now: EpochMillis) -> ServiceResult<Cook> {
        let mut cook = self.require(id)?;
        cook.cooked_at(now);
        self.repo.update_cook(&cook)?;
        info!("event=cook_mark module=service status=ok id={id}");
        Ok(cook)
    }

    pub fn rename_cook(&self, id: RecordId, name: impl AsRef<str>) -> ServiceResult<Cook> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ServiceError::EmptyName);
        }
        let mut cook = self.require(id)?;
        cook.name = name.to_string();
        self.repo.update_cook(&cook)?;
        Ok(cook)
    }

    pub fn delete_cook(&self, id: RecordId) -> ServiceResult<()> {
        self.repo.delete_cook(id)?;
        info!("event=cook_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Deletes every reminder; returns how many were removed.
    pub fn clear(&self) -> ServiceResult<usize> {
        let removed = self.repo.delete_all()?;
        info!("event=cook_clear module=service status=ok removed={removed}");
        Ok(removed)
    }

    pub fn get_cook(&self, id: RecordId) -> ServiceResult<Option<Cook>> {
        Ok(self.repo.get_cook(id)?)
    }

    /// Current rows ordered by `last_cooked ASC, id ASC`.
    pub fn cooks(&self) -> ServiceResult<Vec<Cook>> {
        Ok(self.repo.list_cooks()?)
    }

    pub fn has_cooks(&self) -> ServiceResult<bool> {
        Ok(!self.repo.list_cooks()?.is_empty())
    }

    /// Day-grouped rows for the current snapshot.
    pub fn cook_list(&self, order: ListOrder) -> ServiceResult<Vec<ListItem<Cook>>> {
        let snapshot = self.repo.list_cooks()?;
        let items = build_list(&snapshot, order);
        debug!(
            "event=cook_list module=service status=ok order={order:?} records={} rows={}",
            snapshot.len(),
            items.len()
        );
        Ok(items)
    }

    fn require(&self, id: RecordId) -> ServiceResult<Cook> {
        self.repo.get_cook(id)?.ok_or(ServiceError::NotFound(id))
    }
}
