//! Write-once forecast cache.

use chrono::NaiveDate;
use spotpris_types::{DATE_FORMAT, Forecast, ForecastRecord, Tz, Zone};
use std::sync::Arc;
use tracing::debug;

use crate::store::{DocumentStore, Result, StoreError};

/// Path prefix forecasts are stored under.
pub const FORECAST_PREFIX: &str = "power-price/norway-v2";

/// Caches computed forecasts per zone and local day.
///
/// Day-ahead prices never change once published, so entries are written
/// once and never replaced.
#[derive(Debug, Clone)]
pub struct ForecastCache {
    store: Arc<dyn DocumentStore>,
    prefix: String,
    tz: Tz,
}

impl ForecastCache {
    /// Creates a cache over `store` that reads timestamps back in `tz`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, tz: Tz) -> Self {
        Self {
            store,
            prefix: FORECAST_PREFIX.to_string(),
            tz,
        }
    }

    /// Sets the path prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns the document path of a zone and day.
    #[must_use]
    pub fn path(&self, zone: Zone, date: NaiveDate) -> String {
        format!(
            "{}/{}/{}",
            self.prefix,
            zone.domain(),
            date.format(DATE_FORMAT)
        )
    }

    /// Returns the cached forecast, or `None` on a miss.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the entry cannot be decoded.
    pub async fn get(&self, zone: Zone, date: NaiveDate) -> Result<Option<Forecast>> {
        let path = self.path(zone, date);
        let Some(document) = self.store.get(&path).await? else {
            debug!(%zone, %date, "Forecast cache miss");
            return Ok(None);
        };

        let record: ForecastRecord =
            serde_json::from_value(document).map_err(|e| StoreError::ParseJson {
                path: path.clone(),
                source: e,
            })?;
        if record.is_empty() {
            debug!(%zone, %date, "Ignoring empty cache entry");
            return Ok(None);
        }

        debug!(%zone, %date, hours = record.len(), "Forecast cache hit");
        Ok(Some(record.into_forecast(self.tz)))
    }

    /// Stores `forecast` unless an entry already exists.
    ///
    /// Returns true if this call stored it.
    ///
    /// # Errors
    ///
    /// Returns an error if the forecast cannot be serialized or the store fails.
    pub async fn put(&self, zone: Zone, date: NaiveDate, forecast: &Forecast) -> Result<bool> {
        let path = self.path(zone, date);
        let document = serde_json::to_value(forecast)?;
        let created = self.store.create(&path, document).await?;
        if !created {
            debug!(%zone, %date, "Forecast already cached, keeping existing entry");
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::{TimeDelta, TimeZone};
    use serde_json::json;
    use spotpris_types::{DEFAULT_TIME_ZONE, PricePoint};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 22).unwrap()
    }

    fn forecast(base: f64) -> Forecast {
        let mut forecast = Forecast::new();
        for hour in 0..24 {
            let from = DEFAULT_TIME_ZONE
                .with_ymd_and_hms(2025, 1, 22, hour, 0, 0)
                .unwrap();
            forecast.insert(PricePoint {
                price_local_per_kwh: (base + f64::from(hour)) * 11.5 / 1000.0,
                price_source_per_mwh: base + f64::from(hour),
                exchange_rate: 11.5,
                exchange_rate_date: NaiveDate::from_ymd_opt(2025, 1, 21).unwrap(),
                from,
                to: from + TimeDelta::hours(1),
            });
        }
        forecast
    }

    fn cache() -> (Arc<MemoryStore>, ForecastCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = ForecastCache::new(store.clone(), DEFAULT_TIME_ZONE);
        (store, cache)
    }

    #[test]
    fn test_path() {
        let (_, cache) = cache();
        assert_eq!(
            cache.path(Zone::No1, date()),
            "power-price/norway-v2/10YNO-1--------2/2025-01-22"
        );
        assert_eq!(
            cache.with_prefix("test").path(Zone::No4, date()),
            "test/10YNO-4--------9/2025-01-22"
        );
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (_, cache) = cache();
        assert!(cache.get(Zone::No1, date()).await.unwrap().is_none());

        let original = forecast(40.0);
        assert!(cache.put(Zone::No1, date(), &original).await.unwrap());

        let cached = cache.get(Zone::No1, date()).await.unwrap().unwrap();
        assert_eq!(cached.len(), 24);
        assert_eq!(
            serde_json::to_value(&cached).unwrap(),
            serde_json::to_value(&original).unwrap()
        );
        assert_eq!(
            cached.first().unwrap().from.timezone(),
            DEFAULT_TIME_ZONE
        );
    }

    #[tokio::test]
    async fn test_put_is_write_once() {
        let (_, cache) = cache();
        assert!(cache.put(Zone::No2, date(), &forecast(40.0)).await.unwrap());
        assert!(!cache.put(Zone::No2, date(), &forecast(90.0)).await.unwrap());

        let cached = cache.get(Zone::No2, date()).await.unwrap().unwrap();
        assert_eq!(cached.first().unwrap().price_source_per_mwh, 40.0);
    }

    #[tokio::test]
    async fn test_zones_are_separate() {
        let (_, cache) = cache();
        cache.put(Zone::No3, date(), &forecast(40.0)).await.unwrap();
        assert!(cache.get(Zone::No5, date()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_entry_is_a_miss() {
        let (store, cache) = cache();
        store
            .set(&cache.path(Zone::No1, date()), json!({}))
            .await
            .unwrap();
        assert!(cache.get(Zone::No1, date()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_an_error() {
        let (store, cache) = cache();
        store
            .set(&cache.path(Zone::No1, date()), json!({"x": "y"}))
            .await
            .unwrap();
        assert!(matches!(
            cache.get(Zone::No1, date()).await,
            Err(StoreError::ParseJson { .. })
        ));
    }
}
