//! ENTSO-E day-ahead price client.

use async_trait::async_trait;
use chrono::NaiveDate;
use spotpris_types::{DEFAULT_TIME_ZONE, MarketDataSource, MarketDocument, SourceError, Tz, Zone};
use std::fmt;
use tracing::debug;

use crate::client::{ClientConfig, HttpClient, REDACTED};
use crate::parse::{decode_market_document, is_acknowledgement};
use crate::url::{ENTSOE_BASE_URL, entsoe_url, local_day_bounds};

/// Configuration for the ENTSO-E client.
#[derive(Clone)]
pub struct EntsoeConfig {
    /// API base URL.
    pub base_url: String,
    /// Security token issued by the transparency platform.
    pub security_token: String,
    /// Zone calendar days are requested in.
    pub time_zone: Tz,
}

impl EntsoeConfig {
    /// Creates a configuration for the public API.
    #[must_use]
    pub fn new(security_token: impl Into<String>) -> Self {
        Self {
            base_url: ENTSOE_BASE_URL.to_string(),
            security_token: security_token.into(),
            time_zone: DEFAULT_TIME_ZONE,
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the zone calendar days are requested in.
    #[must_use]
    pub const fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }
}

impl fmt::Debug for EntsoeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntsoeConfig")
            .field("base_url", &self.base_url)
            .field("security_token", &REDACTED)
            .field("time_zone", &self.time_zone)
            .finish()
    }
}

/// Fetches day-ahead publications from the ENTSO-E transparency platform.
#[derive(Debug, Clone)]
pub struct EntsoeClient {
    http: HttpClient,
    config: EntsoeConfig,
}

impl EntsoeClient {
    /// Creates a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: EntsoeConfig, client: ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_http(HttpClient::new(client)?, config))
    }

    /// Creates a client on top of an existing HTTP client.
    ///
    /// The security token is registered for redaction.
    #[must_use]
    pub fn with_http(http: HttpClient, config: EntsoeConfig) -> Self {
        let http = http.with_secret(config.security_token.clone());
        Self { http, config }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &EntsoeConfig {
        &self.config
    }

    /// Returns the request URL for `zone` on the local day `date`.
    ///
    /// The URL carries the security token; pass it through
    /// [`HttpClient::redact`] before showing it.
    #[must_use]
    pub fn document_url(&self, zone: Zone, date: NaiveDate) -> Option<String> {
        let (start, end) = local_day_bounds(date, self.config.time_zone)?;
        Some(entsoe_url(
            &self.config.base_url,
            zone,
            start,
            end,
            &self.config.security_token,
        ))
    }
}

#[async_trait]
impl MarketDataSource for EntsoeClient {
    async fn fetch_document(
        &self,
        zone: Zone,
        date: NaiveDate,
    ) -> Result<MarketDocument, SourceError> {
        let url = self
            .document_url(zone, date)
            .ok_or_else(|| SourceError::Malformed(format!("{date} has no local start of day")))?;

        let body = self.http.get(&url).await?.ok_or_else(|| {
            SourceError::Transport(format!("Not found: {}", self.http.redact(&url)))
        })?;

        decode_response(zone, date, &body)
    }
}

/// An acknowledgement in place of a publication means the day is not out yet.
fn decode_response(zone: Zone, date: NaiveDate, body: &[u8]) -> Result<MarketDocument, SourceError> {
    if is_acknowledgement(body) {
        debug!(%zone, %date, "Day-ahead prices not published yet");
        return Err(SourceError::NotYetPublished);
    }

    Ok(decode_market_document(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EntsoeClient {
        let config = EntsoeConfig::new("top-secret-token").with_base_url("http://localhost:9");
        EntsoeClient::new(config, ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_document_url_covers_local_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
        let url = client().document_url(Zone::No2, date).unwrap();

        assert!(url.starts_with("http://localhost:9?documentType=A44"));
        assert!(url.contains("in_Domain=10YNO-2--------T"));
        assert!(url.contains("periodStart=202501212300&periodEnd=202501222300"));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = client();
        assert!(!format!("{client:?}").contains("top-secret-token"));
        assert!(!format!("{:?}", client.config()).contains("top-secret-token"));
    }

    #[test]
    fn test_acknowledgement_is_not_yet_published() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
        let body = br#"<?xml version="1.0" encoding="utf-8"?>
<Acknowledgement_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-1:acknowledgementdocument:7:0">
  <Reason><code>999</code><text>No matching data found</text></Reason>
</Acknowledgement_MarketDocument>"#;

        let err = decode_response(Zone::No1, date, body).unwrap_err();
        assert!(err.is_not_yet_published());
        assert!(err.to_string().contains("Try again later"));
    }

    #[test]
    fn test_publication_is_decoded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
        let body = br#"<Publication_MarketDocument>
  <TimeSeries>
    <Period>
      <timeInterval><start>2025-01-21T23:00Z</start><end>2025-01-22T23:00Z</end></timeInterval>
      <resolution>PT60M</resolution>
      <Point><position>1</position><price.amount>47.14</price.amount></Point>
      <Point><position>2</position><price.amount>40.6</price.amount></Point>
    </Period>
  </TimeSeries>
</Publication_MarketDocument>"#;

        let document = decode_response(Zone::No1, date, body).unwrap();
        assert_eq!(document.len(), 2);

        let err = decode_response(Zone::No1, date, b"not xml").unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_transport_error_is_redacted() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
        let err = client().fetch_document(Zone::No1, date).await.unwrap_err();

        assert!(matches!(err, SourceError::Transport(_)));
        let message = err.to_string();
        assert!(!message.contains("top-secret-token"));
        assert!(message.contains(REDACTED));
    }
}
