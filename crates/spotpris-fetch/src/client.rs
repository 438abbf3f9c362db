//! Shared HTTP client for upstream requests.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use spotpris_types::SourceError;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Replacement text for secrets in URLs, logs, and errors.
pub const REDACTED: &str = "***secret***";

/// Maximum number of response body characters kept in an error.
const MAX_ERROR_BODY: usize = 4000;

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("spotpris/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur during requests.
///
/// Messages never contain a registered secret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    /// The request could not be sent or the body could not be read.
    #[error("Couldn't make GET request to {url}: {message}")]
    Http {
        /// Redacted request URL.
        url: String,
        /// Redacted error description.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("Non-200 response code {status} from {url}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Redacted request URL.
        url: String,
        /// Redacted, truncated response body.
        body: String,
    },
}

impl From<DownloadError> for SourceError {
    fn from(err: DownloadError) -> Self {
        Self::Transport(err.to_string())
    }
}

/// HTTP client that keeps secrets out of logs and errors.
///
/// There are no retries here; a failed request surfaces to the caller.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    secrets: Vec<String>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("secrets", &self.secrets.len())
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .tcp_nodelay(true)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            config,
            secrets: Vec::new(),
        })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Registers a value to redact from URLs, logs, and errors.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.is_empty() {
            self.secrets.push(secret);
        }
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replaces every registered secret in `text`.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret, REDACTED))
    }

    /// Fetches `url`, returning the body.
    ///
    /// Returns `Ok(None)` if the resource does not exist (404).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not a success.
    pub async fn get(&self, url: &str) -> Result<Option<Bytes>, DownloadError> {
        let shown = self.redact(url);
        info!(url = %shown, "Making GET request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.http_error(&shown, &e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.http_error(&shown, &e))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            return Err(DownloadError::Status {
                status: status.as_u16(),
                url: shown,
                body: self.redact(&truncate(&text, MAX_ERROR_BODY)),
            });
        }

        Ok(Some(body))
    }

    fn http_error(&self, url: &str, err: &reqwest::Error) -> DownloadError {
        DownloadError::Http {
            url: url.to_string(),
            message: self.redact(&err.to_string()),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("spotpris/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_redact_secrets() {
        let client = HttpClient::with_defaults()
            .unwrap()
            .with_secret("abc-123")
            .with_secret("");

        let url = "https://example.test/api?securityToken=abc-123&x=abc-123";
        assert_eq!(
            client.redact(url),
            "https://example.test/api?securityToken=***secret***&x=***secret***"
        );
        assert_eq!(client.redact("nothing here"), "nothing here");
    }

    #[test]
    fn test_error_conversion_keeps_redacted_text() {
        let err = DownloadError::Status {
            status: 401,
            url: format!("https://example.test/api?securityToken={REDACTED}"),
            body: "Unauthorized".to_string(),
        };
        let source: SourceError = err.into();
        let message = source.to_string();
        assert!(message.contains("401"));
        assert!(message.contains(REDACTED));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("æøå", 10), "æøå");
    }
}
