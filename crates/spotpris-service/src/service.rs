//! The forecast request pipeline.

use chrono::NaiveDate;
use spotpris_forecast::{ExchangeRateResolver, ForecastBuilder};
use spotpris_store::{DocumentStore, ForecastCache, QuotaGuard};
use spotpris_types::{
    Clock, Forecast, MarketDataSource, RateSource, Zone, parse_date,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{ServiceConfig, ServiceError};

/// A forecast request as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForecastRequest {
    /// Zone short code, e.g. `NO1`.
    pub zone: String,
    /// Local calendar date as `YYYY-MM-DD`.
    pub date: String,
    /// Opaque API key.
    pub api_key: String,
}

impl ForecastRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(
        zone: impl Into<String>,
        date: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            zone: zone.into(),
            date: date.into(),
            api_key: api_key.into(),
        }
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// Requested zone.
    pub zone: Zone,
    /// Requested local date.
    pub date: NaiveDate,
    /// API key, trimmed.
    pub api_key: String,
}

/// Serves hourly price forecasts, gated by per-key daily quotas.
///
/// Each call to [`ForecastService::handle`] runs
/// validate → authorize → quota check → cache lookup → compute on miss →
/// record usage. Concurrent requests share nothing but the store; two
/// requests missing the cache for the same day may both compute, and the
/// first cache write wins.
#[derive(Debug, Clone)]
pub struct ForecastService {
    config: ServiceConfig,
    market: Arc<dyn MarketDataSource>,
    resolver: ExchangeRateResolver,
    builder: ForecastBuilder,
    cache: ForecastCache,
    quota: QuotaGuard,
    clock: Arc<dyn Clock>,
}

impl ForecastService {
    /// Wires a service from its collaborators.
    #[must_use]
    pub fn new(
        config: ServiceConfig,
        market: Arc<dyn MarketDataSource>,
        rates: Arc<dyn RateSource>,
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tz = config.time_zone;
        let resolver = ExchangeRateResolver::new(rates, Arc::clone(&clock), tz)
            .with_window_days(config.rate_window_days);
        let cache = ForecastCache::new(Arc::clone(&store), tz)
            .with_prefix(config.forecast_prefix.clone());
        let quota = QuotaGuard::new(store, Arc::clone(&clock), tz)
            .with_prefix(config.api_key_prefix.clone());

        Self {
            config,
            market,
            resolver,
            builder: ForecastBuilder::new(tz),
            cache,
            quota,
            clock,
        }
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the quota guard, for key administration.
    #[must_use]
    pub const fn quota(&self) -> &QuotaGuard {
        &self.quota
    }

    /// Returns the forecast cache.
    #[must_use]
    pub const fn cache(&self) -> &ForecastCache {
        &self.cache
    }

    /// Serves one forecast request.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] describing why the request was refused or
    /// could not be served; see [`ServiceError::status_code`].
    pub async fn handle(&self, request: &ForecastRequest) -> Result<Forecast, ServiceError> {
        let ValidatedRequest {
            zone,
            date,
            api_key,
        } = self.validate(request)?;

        let key = self.quota.check_and_get_quota(&api_key).await?;
        let used = self.quota.usage_today(&api_key).await?.count(zone);
        if used >= u64::from(key.quota) {
            // Refused attempts are counted too.
            self.record_usage(&api_key, zone).await;
            info!(%zone, quota = key.quota, used, "Quota exceeded");
            return Err(ServiceError::QuotaExceeded {
                zone,
                quota: key.quota,
                used,
            });
        }

        let forecast = self.forecast(zone, date).await?;
        self.record_usage(&api_key, zone).await;
        Ok(forecast)
    }

    /// Checks the request parameters and the requested date.
    ///
    /// # Errors
    ///
    /// Returns a 400-class [`ServiceError`] for missing or invalid
    /// parameters and for dates outside the available range.
    pub fn validate(&self, request: &ForecastRequest) -> Result<ValidatedRequest, ServiceError> {
        let zone = required("zone", &request.zone)?
            .parse::<Zone>()
            .map_err(ServiceError::InvalidZone)?;
        let date =
            parse_date(required("date", &request.date)?).map_err(ServiceError::InvalidDate)?;
        let api_key = required("api_key", &request.api_key)?.to_string();

        self.check_date(date)?;
        Ok(ValidatedRequest {
            zone,
            date,
            api_key,
        })
    }

    /// Checks that prices can exist for `date`.
    ///
    /// Tomorrow is available from the publish cutoff today; later dates
    /// never are.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::DateTooEarly`] or
    /// [`ServiceError::NotYetAvailable`].
    pub fn check_date(&self, date: NaiveDate) -> Result<(), ServiceError> {
        if date < self.config.earliest_date {
            return Err(ServiceError::DateTooEarly {
                date,
                earliest: self.config.earliest_date,
            });
        }

        let now = self.clock.now().with_timezone(&self.config.time_zone);
        let today = now.date_naive();
        let not_yet = ServiceError::NotYetAvailable {
            date,
            cutoff: self.config.publish_cutoff,
        };
        match today.succ_opt() {
            Some(tomorrow) if date > tomorrow => Err(not_yet),
            Some(tomorrow) if date == tomorrow && now.time() < self.config.publish_cutoff => {
                Err(not_yet)
            }
            _ => Ok(()),
        }
    }

    /// Returns the forecast of `zone` on `date`, from cache or computed.
    ///
    /// Cache failures are logged and fall through to computation.
    ///
    /// # Errors
    ///
    /// Returns an error if the prices or the exchange rate cannot be
    /// obtained, or the publication cannot be built into a forecast.
    pub async fn forecast(&self, zone: Zone, date: NaiveDate) -> Result<Forecast, ServiceError> {
        match self.cache.get(zone, date).await {
            Ok(Some(forecast)) => return Ok(forecast),
            Ok(None) => {}
            Err(e) => warn!(%zone, %date, error = %e, "Forecast cache lookup failed, computing"),
        }

        let document = self.market.fetch_document(zone, date).await?;
        let rate = self
            .resolver
            .resolve(
                &self.config.source_currency,
                &self.config.local_currency,
                date,
            )
            .await?;
        debug!(%zone, %date, rate = rate.rate, as_of = %rate.as_of, "Building forecast");
        let forecast = self.builder.build(&document, &rate)?;

        if let Err(e) = self.cache.put(zone, date, &forecast).await {
            warn!(%zone, %date, error = %e, "Failed to cache forecast");
        }
        Ok(forecast)
    }

    async fn record_usage(&self, api_key: &str, zone: Zone) {
        if let Err(e) = self.quota.increment(api_key, zone).await {
            warn!(%zone, error = %e, "Failed to record API key usage");
        }
    }
}

fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ServiceError::MissingParameter(name))
    } else {
        Ok(value)
    }
}
