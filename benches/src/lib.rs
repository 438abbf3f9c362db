//! Fixtures for the spotpris benchmarks.
//!
//! Run with: `cargo bench --package spotpris-bench`

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use spotpris_types::{ExchangeRate, MarketDocument, MarketPoint};

/// A day-ahead publication for the local day starting at `period_start`.
#[derive(Debug, Clone, Copy)]
pub struct DocumentConfig {
    pub resolution: &'static str,
    pub samples: u32,
}

impl DocumentConfig {
    pub const HOURLY: Self = Self {
        resolution: "PT60M",
        samples: 24,
    };

    pub const QUARTER_HOURLY: Self = Self {
        resolution: "PT15M",
        samples: 96,
    };
}

/// Start of the Oslo day 2025-01-22 in UTC.
#[must_use]
pub fn period_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 21, 23, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A deterministic price curve with a morning and an evening peak.
#[must_use]
pub fn price(position: u32) -> f64 {
    let phase = f64::from(position % 24) / 24.0 * std::f64::consts::TAU;
    (60.0 + 25.0 * phase.sin() - 10.0 * (2.0 * phase).cos()).max(0.0)
}

#[must_use]
pub fn document(config: DocumentConfig) -> MarketDocument {
    let points = (1..=config.samples)
        .map(|position| MarketPoint::new(position, price(position)))
        .collect();
    MarketDocument::new(config.resolution, period_start(), points)
}

/// The same publication as upstream XML.
#[must_use]
pub fn publication_xml(config: DocumentConfig) -> String {
    let points: String = (1..=config.samples)
        .map(|position| {
            format!(
                "<Point><position>{position}</position><price.amount>{:.2}</price.amount></Point>",
                price(position)
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<Publication_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-3:publicationdocument:7:3">
  <type>A44</type>
  <TimeSeries>
    <mRID>1</mRID>
    <Period>
      <timeInterval>
        <start>2025-01-21T23:00Z</start>
        <end>2025-01-22T23:00Z</end>
      </timeInterval>
      <resolution>{}</resolution>
      {points}
    </Period>
  </TimeSeries>
</Publication_MarketDocument>"#,
        config.resolution
    )
}

#[must_use]
pub fn rate() -> ExchangeRate {
    let as_of = period_start().date_naive();
    ExchangeRate::new(11.5, as_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_cover_one_day() {
        assert_eq!(document(DocumentConfig::HOURLY).len(), 24);
        assert_eq!(document(DocumentConfig::QUARTER_HOURLY).len(), 96);
        assert!((1..=96).all(|position| price(position) >= 0.0));
        assert!(publication_xml(DocumentConfig::HOURLY).contains("<position>24</position>"));
    }
}
