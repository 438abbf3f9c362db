//! API key authorization and per-zone daily usage.

use chrono::NaiveDate;
use spotpris_types::{ApiKey, Clock, DATE_FORMAT, Tz, Zone, ZoneUsage};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::store::{DocumentStore, StoreError};

/// Path prefix API key records are stored under.
pub const API_KEY_PREFIX: &str = "power-price/api-keys/users";

/// Errors from authorizing or counting a request.
#[derive(Error, Debug)]
pub enum QuotaError {
    /// The key is not registered.
    #[error("The API key is not registered")]
    UnknownKey,

    /// The key has been blocked by an administrator.
    #[error("Your API key has been blocked: {reason}")]
    Blocked {
        /// Reason given by the administrator.
        reason: String,
    },

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Authorizes API keys and counts their requests per zone and local day.
#[derive(Debug, Clone)]
pub struct QuotaGuard {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    tz: Tz,
    prefix: String,
}

impl QuotaGuard {
    /// Creates a guard over `store`, counting days in `tz`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>, tz: Tz) -> Self {
        Self {
            store,
            clock,
            tz,
            prefix: API_KEY_PREFIX.to_string(),
        }
    }

    /// Sets the path prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns the document path of a key record.
    #[must_use]
    pub fn key_path(&self, key: &str) -> String {
        format!("{}/{key}", self.prefix)
    }

    /// Returns the document path of a key's usage on `date`.
    #[must_use]
    pub fn usage_path(&self, key: &str, date: NaiveDate) -> String {
        format!("{}/{key}/usage/{}", self.prefix, date.format(DATE_FORMAT))
    }

    /// Returns the record of an active key.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::UnknownKey`] if the key is not registered,
    /// [`QuotaError::Blocked`] if it is blocked, and [`QuotaError::Store`]
    /// if the store fails.
    pub async fn check_and_get_quota(&self, key: &str) -> Result<ApiKey, QuotaError> {
        let record = self.get_key(key).await?;
        if record.blocked {
            debug!(email = %record.email, "Rejected blocked API key");
            return Err(QuotaError::Blocked {
                reason: record.reason,
            });
        }
        Ok(record)
    }

    /// Returns the key's counters for today, all zero if it made no requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn usage_today(&self, key: &str) -> Result<ZoneUsage, QuotaError> {
        self.usage_on(key, self.clock.today(self.tz)).await
    }

    /// Returns the key's counters on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn usage_on(&self, key: &str, date: NaiveDate) -> Result<ZoneUsage, QuotaError> {
        let path = self.usage_path(key, date);
        let Some(document) = self.store.get(&path).await? else {
            return Ok(ZoneUsage::default());
        };
        serde_json::from_value(document)
            .map_err(|e| StoreError::ParseJson { path, source: e }.into())
    }

    /// Counts one request of `key` for `zone` today.
    ///
    /// Returns the zone's count after this request.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn increment(&self, key: &str, zone: Zone) -> Result<u64, QuotaError> {
        let path = self.usage_path(key, self.clock.today(self.tz));
        let first_use =
            serde_json::to_value(ZoneUsage::first_use(zone)).map_err(StoreError::from)?;

        if self.store.create(&path, first_use).await? {
            return Ok(1);
        }

        let count = self.store.increment(&path, zone.counter_field(), 1).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Stores a key record, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed or the store fails.
    pub async fn register_key(&self, key: &str, record: &ApiKey) -> Result<(), QuotaError> {
        validate_key(key)?;
        let document = serde_json::to_value(record).map_err(StoreError::from)?;
        self.store.set(&self.key_path(key), document).await?;
        Ok(())
    }

    /// Blocks a registered key, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::UnknownKey`] if the key is not registered, and
    /// [`QuotaError::Store`] if the store fails.
    pub async fn block_key(&self, key: &str, reason: &str) -> Result<ApiKey, QuotaError> {
        let record = self.get_key(key).await?.blocked(reason);
        self.register_key(key, &record).await?;
        Ok(record)
    }

    /// Returns the record of a key, blocked or not.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::UnknownKey`] if the key is not registered, and
    /// [`QuotaError::Store`] if the store fails.
    pub async fn get_key(&self, key: &str) -> Result<ApiKey, QuotaError> {
        validate_key(key)?;
        let path = self.key_path(key);
        let document = self
            .store
            .get(&path)
            .await?
            .ok_or(QuotaError::UnknownKey)?;
        serde_json::from_value(document)
            .map_err(|e| StoreError::ParseJson { path, source: e }.into())
    }
}

/// Keys become path segments, so anything that could address another
/// document is treated as unknown.
fn validate_key(key: &str) -> Result<(), QuotaError> {
    let valid = !key.is_empty() && key != "." && key != ".." && !key.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(QuotaError::UnknownKey)
    }
}
