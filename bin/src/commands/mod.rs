//! CLI command implementations.

pub(crate) mod forecast;
pub(crate) mod key;
pub(crate) mod zones;

use anyhow::{Context, Result};
use spotpris_lib::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Options shared by every command that touches the store.
pub(crate) struct StoreArgs {
    pub(crate) store_dir: Option<PathBuf>,
    pub(crate) time_zone: Tz,
}

impl StoreArgs {
    /// Opens the file store, at the platform data directory by default.
    pub(crate) fn open(&self) -> Result<Arc<FileStore>> {
        let store = match &self.store_dir {
            Some(dir) => FileStore::new(dir.clone()),
            None => FileStore::with_default_path(),
        }
        .context("Failed to open the store")?;
        tracing::debug!(path = %store.base_path().display(), "Opened store");
        Ok(Arc::new(store))
    }

    /// Returns a quota guard over the store, counting days in the local zone.
    pub(crate) fn quota_guard(&self) -> Result<QuotaGuard> {
        Ok(QuotaGuard::new(
            self.open()?,
            Arc::new(SystemClock),
            self.time_zone,
        ))
    }
}
