//! Norges Bank exchange rate client.

use async_trait::async_trait;
use chrono::NaiveDate;
use spotpris_types::{RateObservation, RateSource, SourceError};
use tracing::debug;

use crate::client::{ClientConfig, HttpClient};
use crate::parse::decode_rate_series;
use crate::url::{NORGES_BANK_BASE_URL, norges_bank_url};

/// Configuration for the Norges Bank client.
#[derive(Debug, Clone)]
pub struct NorgesBankConfig {
    /// Data API base URL.
    pub base_url: String,
}

impl Default for NorgesBankConfig {
    fn default() -> Self {
        Self {
            base_url: NORGES_BANK_BASE_URL.to_string(),
        }
    }
}

/// Fetches daily business-day exchange rates from Norges Bank.
#[derive(Debug, Clone)]
pub struct NorgesBankClient {
    http: HttpClient,
    config: NorgesBankConfig,
}

impl NorgesBankClient {
    /// Creates a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: NorgesBankConfig, client: ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_http(HttpClient::new(client)?, config))
    }

    /// Creates a client on top of an existing HTTP client.
    #[must_use]
    pub const fn with_http(http: HttpClient, config: NorgesBankConfig) -> Self {
        Self { http, config }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &NorgesBankConfig {
        &self.config
    }
}

#[async_trait]
impl RateSource for NorgesBankClient {
    async fn fetch_rate_series(
        &self,
        from: &str,
        to: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RateObservation>, SourceError> {
        let url = norges_bank_url(&self.config.base_url, from, to, start, end);

        // The API answers 404 when the window holds no observations.
        let Some(body) = self.http.get(&url).await? else {
            debug!(from, to, %start, %end, "No exchange rate observations");
            return Ok(Vec::new());
        };

        Ok(decode_rate_series(&body)?)
    }
}
