//! Exchange rate types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Currency the market publishes prices in.
pub const SOURCE_CURRENCY: &str = "EUR";

/// Currency forecasts are converted into.
pub const LOCAL_CURRENCY: &str = "NOK";

/// One daily observation of an exchange rate series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateObservation {
    /// Business day of the observation.
    pub date: NaiveDate,
    /// Observed value as published, before scaling.
    pub value: f64,
    /// Power-of-ten exponent the value is expressed in.
    pub scale_multiplier: i32,
}

impl RateObservation {
    /// Creates a new observation.
    #[must_use]
    pub const fn new(date: NaiveDate, value: f64, scale_multiplier: i32) -> Self {
        Self {
            date,
            value,
            scale_multiplier,
        }
    }

    /// Returns the value divided by `10^scale_multiplier`.
    #[must_use]
    pub fn scaled_value(&self) -> f64 {
        self.value / 10f64.powi(self.scale_multiplier)
    }
}

/// A resolved daily conversion factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Units of the local currency per unit of the source currency.
    pub rate: f64,
    /// Date of the observation the rate was taken from.
    pub as_of: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(rate: f64, as_of: NaiveDate) -> Self {
        Self { rate, as_of }
    }

    /// Converts a price per MWh in the source currency to local currency per kWh.
    #[must_use]
    pub fn convert_mwh_to_kwh(&self, price_per_mwh: f64) -> f64 {
        price_per_mwh * self.rate / 1000.0
    }
}

impl From<RateObservation> for ExchangeRate {
    fn from(observation: RateObservation) -> Self {
        Self::new(observation.scaled_value(), observation.date)
    }
}
