//! Market publication to hourly forecast conversion.

use chrono::{DateTime, NaiveDate, TimeDelta, Timelike, Utc};
use spotpris_types::{
    ExchangeRate, Forecast, MarketDocument, ParseError, PricePoint, Tz, local_midnight,
    next_local_midnight,
};
use thiserror::Error;

/// Errors that make a market publication unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The resolution label is not recognized.
    #[error(transparent)]
    Resolution(#[from] ParseError),

    /// The publication has no price points.
    #[error("market document contains no price points")]
    Empty,

    /// A position is missing, repeated, or out of order.
    #[error("price points are not contiguous: expected position {expected}, found {found}")]
    NonContiguous {
        /// The position that should have come next.
        expected: u32,
        /// The position that was found.
        found: u32,
    },

    /// The local day containing a point has no valid start instant.
    #[error("no local start of day for {0}")]
    InvalidLocalDay(NaiveDate),
}

/// Builds hourly forecasts in a fixed local time zone.
///
/// Building is pure: the same document and rate always produce the same
/// forecast.
#[derive(Debug, Clone, Copy)]
pub struct ForecastBuilder {
    tz: Tz,
}

impl ForecastBuilder {
    /// Creates a builder bucketing into `tz`.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Returns the local time zone.
    #[must_use]
    pub const fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Converts a publication into one price point per local clock hour.
    ///
    /// Samples finer than an hour alias into their containing hour; the
    /// later sample in document order replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution label is unknown, the document is
    /// empty, or positions are not contiguous from 1.
    pub fn build(
        &self,
        document: &MarketDocument,
        exchange_rate: &ExchangeRate,
    ) -> Result<Forecast, BuildError> {
        let resolution = document.resolution()?;
        if document.is_empty() {
            return Err(BuildError::Empty);
        }

        let step_minutes = resolution.minutes();
        let mut day = LocalDay::containing(document.period_start, self.tz)?;
        let mut forecast = Forecast::new();

        for (expected, point) in (1u32..).zip(&document.points) {
            if point.position != expected {
                return Err(BuildError::NonContiguous {
                    expected,
                    found: point.position,
                });
            }

            let local_start = day.sample_start(point.position, step_minutes)?;
            let from = truncate_to_hour(local_start);

            // Overwrites any earlier sample of the same hour.
            forecast.insert(PricePoint {
                price_local_per_kwh: exchange_rate.convert_mwh_to_kwh(point.price_amount),
                price_source_per_mwh: point.price_amount,
                exchange_rate: exchange_rate.rate,
                exchange_rate_date: exchange_rate.as_of,
                from,
                to: from + TimeDelta::hours(1),
            });
        }

        Ok(forecast)
    }
}

/// The local calendar day positions are currently counted from.
#[derive(Debug)]
struct LocalDay {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    first_position: i64,
}

impl LocalDay {
    fn containing(instant: DateTime<Utc>, tz: Tz) -> Result<Self, BuildError> {
        let date = instant.with_timezone(&tz).date_naive();
        let start = local_midnight(date, tz).ok_or(BuildError::InvalidLocalDay(date))?;
        let end = next_local_midnight(&start).ok_or(BuildError::InvalidLocalDay(date))?;
        Ok(Self {
            start,
            end,
            first_position: 1,
        })
    }

    /// Returns the start of the sample at `position`, advancing to the next
    /// local day once the current one is exhausted.
    fn sample_start(&mut self, position: u32, step_minutes: i64) -> Result<DateTime<Tz>, BuildError> {
        loop {
            let offset = step_minutes * (i64::from(position) - self.first_position);
            let start = self.start + TimeDelta::minutes(offset);
            if start < self.end {
                return Ok(start);
            }

            // Slots are counted on the real day length, so 23- and 25-hour
            // days roll over at the right position.
            let slots = (self.end - self.start).num_minutes() / step_minutes;
            let next_date = self.end.date_naive();
            self.first_position += slots;
            self.start = self.end;
            self.end = next_local_midnight(&self.start)
                .ok_or(BuildError::InvalidLocalDay(next_date))?;
        }
    }
}

/// Truncates a local timestamp to the top of its clock hour.
fn truncate_to_hour(dt: DateTime<Tz>) -> DateTime<Tz> {
    dt - TimeDelta::minutes(i64::from(dt.minute()))
        - TimeDelta::seconds(i64::from(dt.second()))
        - TimeDelta::nanoseconds(i64::from(dt.nanosecond()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;
    use spotpris_types::{DEFAULT_TIME_ZONE as OSLO, MarketPoint};

    const PRICES_60M: [f64; 24] = [
        47.14, 40.6, 40.64, 40.75, 41.16, 50.12, 122.94, 200.98, 224.0, 193.92, 173.51, 167.58,
        160.22, 165.07, 174.7, 189.99, 193.27, 202.93, 175.19, 162.23, 129.99, 123.82, 103.58,
        58.51,
    ];

    fn unit_rate() -> ExchangeRate {
        ExchangeRate::new(1.0, NaiveDate::from_ymd_opt(2025, 1, 21).unwrap())
    }

    fn document(resolution: &str, start: DateTime<Utc>, prices: &[f64]) -> MarketDocument {
        let points = (1u32..)
            .zip(prices)
            .map(|(position, price)| MarketPoint::new(position, *price))
            .collect();
        MarketDocument::new(resolution, start, points)
    }

    fn winter_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 21, 23, 0, 0).unwrap()
    }

    #[test]
    fn test_hourly_document() {
        let builder = ForecastBuilder::new(OSLO);
        let forecast = builder
            .build(&document("PT60M", winter_start(), &PRICES_60M), &unit_rate())
            .unwrap();

        assert_eq!(forecast.len(), 24);
        for (hour, price) in (0u32..).zip(PRICES_60M) {
            let key = format!("2025-01-22T{hour:02}:00:00+01:00");
            let point = forecast.get(&key).unwrap();
            let expected_from = OSLO.with_ymd_and_hms(2025, 1, 22, hour, 0, 0).unwrap();

            assert_eq!(point.price_source_per_mwh, price);
            assert_relative_eq!(point.price_local_per_kwh, price / 1000.0);
            assert_eq!(point.from, expected_from);
            assert_eq!(point.to, expected_from + TimeDelta::hours(1));
            assert_eq!(point.exchange_rate, 1.0);
        }
    }

    #[test]
    fn test_literal_fixture() {
        let builder = ForecastBuilder::new(OSLO);
        let forecast = builder
            .build(&document("PT60M", winter_start(), &[47.14]), &unit_rate())
            .unwrap();

        let point = forecast.get("2025-01-22T00:00:00+01:00").unwrap();
        assert_eq!(point.price_source_per_mwh, 47.14);
        assert_relative_eq!(point.price_local_per_kwh, 0.04714);
        assert_relative_eq!(point.rounded_local_price(), 0.0471);
    }

    #[test]
    fn test_exchange_rate_applied() {
        let rate = ExchangeRate::new(11.5, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
        let forecast = ForecastBuilder::new(OSLO)
            .build(&document("PT60M", winter_start(), &[100.0, 200.0]), &rate)
            .unwrap();

        let first = forecast.first().unwrap();
        assert_relative_eq!(first.price_local_per_kwh, 1.15);
        assert_eq!(first.exchange_rate_date, rate.as_of);
        assert_relative_eq!(forecast.last().unwrap().price_local_per_kwh, 2.3);
    }

    #[test]
    fn test_quarter_hour_document_aliases_to_hours() {
        let start = Utc.with_ymd_and_hms(2025, 2, 22, 23, 0, 0).unwrap();
        let prices: Vec<f64> = (0..96)
            .map(|slot| 40.0 + f64::from(slot / 4) + f64::from(slot % 4) * 0.25)
            .collect();
        let forecast = ForecastBuilder::new(OSLO)
            .build(&document("PT15M", start, &prices), &unit_rate())
            .unwrap();

        assert_eq!(forecast.len(), 24);
        for hour in 0..24u32 {
            let key = format!("2025-02-23T{hour:02}:00:00+01:00");
            let point = forecast.get(&key).unwrap();
            // The :45 sample is last in document order.
            assert_relative_eq!(point.price_source_per_mwh, 40.0 + f64::from(hour) + 0.75);
            assert_eq!(point.to - point.from, TimeDelta::hours(1));
        }
    }

    #[test]
    fn test_unknown_resolution_is_fatal() {
        let result = ForecastBuilder::new(OSLO).build(
            &document("PT5M", winter_start(), &PRICES_60M),
            &unit_rate(),
        );
        assert_eq!(
            result,
            Err(BuildError::Resolution(ParseError::UnknownResolution(
                "PT5M".to_string()
            )))
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = ForecastBuilder::new(OSLO);
        let doc = document("PT60M", winter_start(), &PRICES_60M);

        let first = serde_json::to_string(&builder.build(&doc, &unit_rate()).unwrap()).unwrap();
        let second = serde_json::to_string(&builder.build(&doc, &unit_rate()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_spring_clock_change_has_23_hours() {
        let start = Utc.with_ymd_and_hms(2025, 3, 29, 23, 0, 0).unwrap();
        let prices = vec![50.0; 23];
        let forecast = ForecastBuilder::new(OSLO)
            .build(&document("PT60M", start, &prices), &unit_rate())
            .unwrap();

        let keys: Vec<_> = forecast.keys().collect();
        assert_eq!(keys.len(), 23);
        assert_eq!(keys[1], "2025-03-30T01:00:00+01:00");
        assert_eq!(keys[2], "2025-03-30T03:00:00+02:00");
        assert_eq!(keys[22], "2025-03-30T23:00:00+02:00");
    }

    #[test]
    fn test_autumn_clock_change_has_25_hours() {
        let start = Utc.with_ymd_and_hms(2025, 10, 25, 22, 0, 0).unwrap();
        let prices: Vec<f64> = (0..25).map(f64::from).collect();
        let forecast = ForecastBuilder::new(OSLO)
            .build(&document("PT60M", start, &prices), &unit_rate())
            .unwrap();

        assert_eq!(forecast.len(), 25);
        let summer = forecast.get("2025-10-26T02:00:00+02:00").unwrap();
        let winter = forecast.get("2025-10-26T02:00:00+01:00").unwrap();
        assert_eq!(summer.price_source_per_mwh, 2.0);
        assert_eq!(winter.price_source_per_mwh, 3.0);
        assert_eq!(
            timestamp(forecast.last().unwrap().from),
            "2025-10-26T23:00:00+01:00"
        );
    }

    #[test]
    fn test_positions_past_one_day_roll_over() {
        let prices: Vec<f64> = (0..48).map(f64::from).collect();
        let forecast = ForecastBuilder::new(OSLO)
            .build(&document("PT60M", winter_start(), &prices), &unit_rate())
            .unwrap();

        assert_eq!(forecast.len(), 48);
        let next_day = forecast.get("2025-01-23T00:00:00+01:00").unwrap();
        assert_eq!(next_day.price_source_per_mwh, 24.0);
        assert_eq!(
            timestamp(forecast.last().unwrap().from),
            "2025-01-23T23:00:00+01:00"
        );
    }

    #[test]
    fn test_missing_position_is_an_error() {
        let mut doc = document("PT60M", winter_start(), &PRICES_60M);
        doc.points.remove(5);

        let result = ForecastBuilder::new(OSLO).build(&doc, &unit_rate());
        assert_eq!(
            result,
            Err(BuildError::NonContiguous {
                expected: 6,
                found: 7
            })
        );
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let result =
            ForecastBuilder::new(OSLO).build(&document("PT60M", winter_start(), &[]), &unit_rate());
        assert_eq!(result, Err(BuildError::Empty));
    }

    #[test]
    fn test_truncate_to_hour() {
        let dt = OSLO.with_ymd_and_hms(2025, 2, 23, 14, 45, 30).unwrap();
        assert_eq!(
            truncate_to_hour(dt),
            OSLO.with_ymd_and_hms(2025, 2, 23, 14, 0, 0).unwrap()
        );
    }

    fn timestamp(dt: DateTime<Tz>) -> String {
        spotpris_types::timestamp_key(&dt)
    }
}
