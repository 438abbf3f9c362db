//! Hourly price forecasts.

use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::{PricePoint, PricePointRecord};

/// Formats the key a price point is published under.
///
/// Keys are ISO-8601 timestamps with UTC offset, e.g.
/// `2025-01-22T00:00:00+01:00`.
#[must_use]
pub fn timestamp_key(instant: &DateTime<Tz>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Hourly price points for one zone and one local day.
///
/// Points are ordered by instant, so the two `02:00` hours of an autumn
/// clock change sort in the order they happen rather than by offset text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Forecast {
    points: BTreeMap<DateTime<Tz>, PricePoint>,
}

impl Forecast {
    /// Creates an empty forecast.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Inserts a point under its `from` instant.
    ///
    /// Last write wins: a point already stored for the same hour is replaced
    /// and returned.
    pub fn insert(&mut self, point: PricePoint) -> Option<PricePoint> {
        self.points.insert(point.from, point)
    }

    /// Looks up a point by its published key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PricePoint> {
        let instant = DateTime::parse_from_rfc3339(key).ok()?;
        let tz = self.points.keys().next()?.timezone();
        self.points.get(&instant.with_timezone(&tz))
    }

    /// Looks up a point by its start instant.
    #[must_use]
    pub fn get_at(&self, from: &DateTime<Tz>) -> Option<&PricePoint> {
        self.points.get(from)
    }

    /// Returns the number of hours covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the forecast has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the published keys in chronological order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.points.keys().map(timestamp_key)
    }

    /// Returns the points in chronological order.
    pub fn points(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.values()
    }

    /// Returns the earliest point.
    #[must_use]
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.values().next()
    }

    /// Returns the latest point.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.values().next_back()
    }
}

impl Serialize for Forecast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.points.len()))?;
        for (from, point) in &self.points {
            map.serialize_entry(&timestamp_key(from), point)?;
        }
        map.end()
    }
}

/// A forecast as read back from storage, before its zone is reattached.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastRecord(BTreeMap<String, PricePointRecord>);

impl ForecastRecord {
    /// Returns the number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rebuilds the forecast with every timestamp expressed in `tz`.
    ///
    /// Keys are recomputed from the reattached `from` instants, so records
    /// whose keys were written without an offset still line up.
    #[must_use]
    pub fn into_forecast(self, tz: Tz) -> Forecast {
        let mut forecast = Forecast::new();
        for record in self.0.into_values() {
            forecast.insert(record.into_point(tz));
        }
        forecast
    }
}
