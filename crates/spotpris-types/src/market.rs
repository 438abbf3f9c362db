//! Typed day-ahead market publication.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ParseError, Resolution};

/// Timestamp layout used for interval boundaries in market publications.
const MARKET_TIME_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// A single price sample of a market publication.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketPoint {
    /// 1-based index of the sample within its period.
    pub position: u32,
    /// Price in EUR/MWh.
    pub price_amount: f64,
}

impl MarketPoint {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(position: u32, price_amount: f64) -> Self {
        Self {
            position,
            price_amount,
        }
    }
}

/// A day-ahead price publication for one zone and one period.
///
/// The resolution is kept as the raw upstream label; interpreting it is the
/// forecast builder's job so that an unknown label fails the build instead
/// of being approximated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDocument {
    /// Resolution label, e.g. `PT60M`.
    pub resolution: String,
    /// Start of the publication period.
    pub period_start: DateTime<Utc>,
    /// Samples in document order.
    pub points: Vec<MarketPoint>,
}

impl MarketDocument {
    /// Creates a new market document.
    #[must_use]
    pub fn new(
        resolution: impl Into<String>,
        period_start: DateTime<Utc>,
        points: Vec<MarketPoint>,
    ) -> Self {
        Self {
            resolution: resolution.into(),
            period_start,
            points,
        }
    }

    /// Parses the resolution label.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is not a known resolution.
    pub fn resolution(&self) -> Result<Resolution, ParseError> {
        self.resolution.parse()
    }

    /// Returns the number of samples.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the document carries no samples.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Parses a timestamp field of an upstream publication.
///
/// Accepts the minute-precision `2025-01-21T23:00Z` layout used for interval
/// boundaries, and full RFC 3339 for document metadata such as
/// `createdDateTime`.
///
/// # Errors
///
/// Returns an error if the input matches neither layout.
///
/// # Example
///
/// ```
/// use spotpris_types::parse_market_timestamp;
///
/// let start = parse_market_timestamp("2025-01-21T23:00Z").unwrap();
/// assert_eq!(start.to_rfc3339(), "2025-01-21T23:00:00+00:00");
/// ```
pub fn parse_market_timestamp(input: &str) -> Result<DateTime<Utc>, ParseError> {
    let trimmed = input.trim();
    match NaiveDateTime::parse_from_str(trimmed, MARKET_TIME_FORMAT) {
        Ok(naive) => Ok(naive.and_utc()),
        Err(short_err) => DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ParseError::InvalidTimestamp {
                input: input.to_string(),
                reason: short_err.to_string(),
            }),
    }
}
