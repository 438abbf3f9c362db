//! Upstream collaborator interfaces.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{MarketDocument, RateObservation, SourceError, Zone};

/// Supplies day-ahead market publications.
#[async_trait]
pub trait MarketDataSource: Send + Sync + std::fmt::Debug {
    /// Fetches the publication covering `date` (a local calendar day) in `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotYetPublished`] when the upstream has no
    /// prices for the day yet, and other variants for transport or decoding
    /// failures.
    async fn fetch_document(
        &self,
        zone: Zone,
        date: NaiveDate,
    ) -> Result<MarketDocument, SourceError>;
}

/// Supplies daily exchange rate observations.
#[async_trait]
pub trait RateSource: Send + Sync + std::fmt::Debug {
    /// Fetches observations of `from`/`to` between `start` and `end`, inclusive.
    ///
    /// An empty vector means the window has no published observations.
    ///
    /// # Errors
    ///
    /// Returns an error for transport or decoding failures.
    async fn fetch_rate_series(
        &self,
        from: &str,
        to: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RateObservation>, SourceError>;
}
