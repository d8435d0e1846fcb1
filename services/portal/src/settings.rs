//! In-process copy of the church settings.
//!
//! Loaded once at startup and shared through `AppState`. Writers take
//! [`SettingsHandle::lock_writes`] and hold it from the moment they read the
//! current value until they have saved the row and called
//! [`SettingsHandle::replace`]. Writes from this process therefore reach the
//! row and the handle in the same order, and the handle always equals the
//! last row this process committed.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::repository::SettingsRepository;
use crate::domain::types::ChurchSettings;
use crate::error::PortalError;

#[derive(Clone)]
pub struct SettingsHandle {
    current: Arc<RwLock<Arc<ChurchSettings>>>,
    writer: Arc<Mutex<()>>,
}

/// Exclusive right to change the settings. Dropping it lets the next writer in.
pub struct SettingsWriteGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl SettingsHandle {
    pub fn new(settings: ChurchSettings) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(settings))),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Read the row (creating it with defaults if missing) and wrap it.
    pub async fn load<S: SettingsRepository>(repo: &S) -> Result<Self, PortalError> {
        Ok(Self::new(repo.get_or_create().await?))
    }

    pub fn current(&self) -> Arc<ChurchSettings> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Wait for the other writers to finish.
    pub async fn lock_writes(&self) -> SettingsWriteGuard<'_> {
        SettingsWriteGuard {
            _guard: self.writer.lock().await,
        }
    }

    /// Swap in a freshly persisted value. The guard proves the caller is the
    /// only writer.
    pub fn replace(
        &self,
        _guard: &SettingsWriteGuard<'_>,
        settings: ChurchSettings,
    ) -> Arc<ChurchSettings> {
        let next = Arc::new(settings);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next.clone();
        next
    }
}
