//! Service configuration.

use chrono::{NaiveDate, NaiveTime};
use spotpris_forecast::DEFAULT_WINDOW_DAYS;
use spotpris_store::{API_KEY_PREFIX, FORECAST_PREFIX};
use spotpris_types::{DEFAULT_TIME_ZONE, LOCAL_CURRENCY, SOURCE_CURRENCY, Tz};

/// First day with day-ahead prices available, as `(year, month, day)`.
pub const DEFAULT_EARLIEST_DATE: (i32, u32, u32) = (2015, 1, 1);

/// Local hour at which next-day prices are published.
pub const DEFAULT_PUBLISH_CUTOFF_HOUR: u32 = 14;

/// Settings of a [`ForecastService`](crate::ForecastService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Zone all dates and hours are interpreted in.
    pub time_zone: Tz,
    /// Earliest date requests are accepted for.
    pub earliest_date: NaiveDate,
    /// Local time from which tomorrow's prices may be requested.
    pub publish_cutoff: NaiveTime,
    /// Currency market prices are published in.
    pub source_currency: String,
    /// Currency forecasts are converted into.
    pub local_currency: String,
    /// Store path prefix of cached forecasts.
    pub forecast_prefix: String,
    /// Store path prefix of API key records.
    pub api_key_prefix: String,
    /// Days the exchange rate lookup looks back.
    pub rate_window_days: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_EARLIEST_DATE;
        Self {
            time_zone: DEFAULT_TIME_ZONE,
            earliest_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
            publish_cutoff: NaiveTime::from_hms_opt(DEFAULT_PUBLISH_CUTOFF_HOUR, 0, 0)
                .unwrap_or(NaiveTime::MIN),
            source_currency: SOURCE_CURRENCY.to_string(),
            local_currency: LOCAL_CURRENCY.to_string(),
            forecast_prefix: FORECAST_PREFIX.to_string(),
            api_key_prefix: API_KEY_PREFIX.to_string(),
            rate_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl ServiceConfig {
    /// Sets the local time zone.
    #[must_use]
    pub const fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Sets the earliest accepted date.
    #[must_use]
    pub const fn with_earliest_date(mut self, date: NaiveDate) -> Self {
        self.earliest_date = date;
        self
    }

    /// Sets the publish cutoff.
    #[must_use]
    pub const fn with_publish_cutoff(mut self, cutoff: NaiveTime) -> Self {
        self.publish_cutoff = cutoff;
        self
    }

    /// Sets the source and local currencies.
    #[must_use]
    pub fn with_currencies(mut self, source: impl Into<String>, local: impl Into<String>) -> Self {
        self.source_currency = source.into();
        self.local_currency = local.into();
        self
    }

    /// Sets the store path prefixes.
    #[must_use]
    pub fn with_prefixes(
        mut self,
        forecast_prefix: impl Into<String>,
        api_key_prefix: impl Into<String>,
    ) -> Self {
        self.forecast_prefix = forecast_prefix.into();
        self.api_key_prefix = api_key_prefix.into();
        self
    }

    /// Sets the exchange rate look-back window.
    #[must_use]
    pub const fn with_rate_window_days(mut self, days: u64) -> Self {
        self.rate_window_days = days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.time_zone, DEFAULT_TIME_ZONE);
        assert_eq!(
            config.earliest_date,
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
        );
        assert_eq!(config.publish_cutoff, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert_eq!(config.source_currency, "EUR");
        assert_eq!(config.local_currency, "NOK");
        assert_eq!(config.forecast_prefix, "power-price/norway-v2");
        assert_eq!(config.api_key_prefix, "power-price/api-keys/users");
        assert_eq!(config.rate_window_days, 7);
    }

    #[test]
    fn test_builders() {
        let config = ServiceConfig::default()
            .with_time_zone(Tz::UTC)
            .with_currencies("EUR", "SEK")
            .with_prefixes("f", "k")
            .with_rate_window_days(3);
        assert_eq!(config.time_zone, Tz::UTC);
        assert_eq!(config.local_currency, "SEK");
        assert_eq!(config.forecast_prefix, "f");
        assert_eq!(config.api_key_prefix, "k");
        assert_eq!(config.rate_window_days, 3);
    }
}
