//! Hourly price points.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};

/// Decimal places kept for the local per-kWh price on emission.
const LOCAL_PRICE_DECIMALS: i32 = 4;

/// The price of one clock hour in one zone.
///
/// `price_local_per_kwh` keeps full precision in memory and is rounded to
/// four decimals only when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    /// Price in local currency per kWh.
    #[serde(rename = "NOK_per_kWh", serialize_with = "serialize_local_price")]
    pub price_local_per_kwh: f64,
    /// Price in source currency per MWh, as published.
    #[serde(rename = "EUR_per_MWh")]
    pub price_source_per_mwh: f64,
    /// Conversion factor applied.
    pub exchange_rate: f64,
    /// Date of the exchange rate observation.
    pub exchange_rate_date: NaiveDate,
    /// Start of the hour, in the local zone.
    #[serde(rename = "valid_from", serialize_with = "serialize_timestamp")]
    pub from: DateTime<Tz>,
    /// End of the hour, in the local zone.
    #[serde(rename = "valid_to", serialize_with = "serialize_timestamp")]
    pub to: DateTime<Tz>,
}

impl PricePoint {
    /// Returns the local price as it is emitted.
    #[must_use]
    pub fn rounded_local_price(&self) -> f64 {
        round_decimals(self.price_local_per_kwh, LOCAL_PRICE_DECIMALS)
    }
}

/// A price point as read back from storage.
///
/// Some stores drop the UTC offset annotation of timestamps, so the
/// instants are kept offset-agnostic until [`PricePointRecord::into_point`]
/// reattaches the canonical zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePointRecord {
    /// Price in local currency per kWh, as stored.
    #[serde(rename = "NOK_per_kWh")]
    pub price_local_per_kwh: f64,
    /// Price in source currency per MWh.
    #[serde(rename = "EUR_per_MWh")]
    pub price_source_per_mwh: f64,
    /// Conversion factor applied.
    pub exchange_rate: f64,
    /// Date of the exchange rate observation.
    pub exchange_rate_date: NaiveDate,
    /// Start of the hour.
    #[serde(rename = "valid_from")]
    pub from: DateTime<FixedOffset>,
    /// End of the hour.
    #[serde(rename = "valid_to")]
    pub to: DateTime<FixedOffset>,
}

impl PricePointRecord {
    /// Converts the record into a price point in the given zone.
    #[must_use]
    pub fn into_point(self, tz: Tz) -> PricePoint {
        PricePoint {
            price_local_per_kwh: self.price_local_per_kwh,
            price_source_per_mwh: self.price_source_per_mwh,
            exchange_rate: self.exchange_rate,
            exchange_rate_date: self.exchange_rate_date,
            from: self.from.with_timezone(&tz),
            to: self.to.with_timezone(&tz),
        }
    }
}

/// Rounds half away from zero to the given number of decimal places.
#[must_use]
pub fn round_decimals(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn serialize_local_price<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_decimals(*value, LOCAL_PRICE_DECIMALS))
}

fn serialize_timestamp<S: Serializer>(
    value: &DateTime<Tz>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeDelta, TimeZone};

    fn sample_point() -> PricePoint {
        let tz = chrono_tz::Europe::Oslo;
        let from = tz.with_ymd_and_hms(2025, 1, 22, 0, 0, 0).unwrap();
        PricePoint {
            price_local_per_kwh: 0.04714,
            price_source_per_mwh: 47.14,
            exchange_rate: 1.0,
            exchange_rate_date: NaiveDate::from_ymd_opt(2025, 1, 21).unwrap(),
            from,
            to: from + TimeDelta::hours(1),
        }
    }

    #[test]
    fn test_round_decimals() {
        assert_relative_eq!(round_decimals(0.04714, 4), 0.0471);
        assert_relative_eq!(round_decimals(1.23456, 4), 1.2346);
        assert_relative_eq!(round_decimals(2.0, 4), 2.0);
    }

    #[test]
    fn test_serialization_rounds_only_local_price() {
        let point = sample_point();
        let json = serde_json::to_value(&point).unwrap();

        assert_eq!(json["NOK_per_kWh"], serde_json::json!(0.0471));
        assert_eq!(json["EUR_per_MWh"], serde_json::json!(47.14));
        assert_eq!(json["valid_from"], "2025-01-22T00:00:00+01:00");
        assert_eq!(json["valid_to"], "2025-01-22T01:00:00+01:00");
        assert_eq!(json["exchange_rate_date"], "2025-01-21");
        assert_relative_eq!(point.price_local_per_kwh, 0.04714);
    }

    #[test]
    fn test_record_reattaches_zone() {
        let json = r#"{
            "NOK_per_kWh": 0.0471,
            "EUR_per_MWh": 47.14,
            "exchange_rate": 1.0,
            "exchange_rate_date": "2025-01-21",
            "valid_from": "2025-01-21T23:00:00Z",
            "valid_to": "2025-01-22T00:00:00Z"
        }"#;
        let record: PricePointRecord = serde_json::from_str(json).unwrap();
        let point = record.into_point(chrono_tz::Europe::Oslo);

        assert_eq!(
            point.from.to_rfc3339_opts(SecondsFormat::Secs, false),
            "2025-01-22T00:00:00+01:00"
        );
        assert_eq!(point.to - point.from, TimeDelta::hours(1));
    }
}
