//! Day-ahead electricity price forecasts for the Norwegian zones.
//!
//! This is a facade crate that re-exports functionality from the spotpris
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use spotpris_lib::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let market = EntsoeClient::new(EntsoeConfig::new("token"), ClientConfig::default())?;
//!     let rates = NorgesBankClient::new(NorgesBankConfig::default(), ClientConfig::default())?;
//!     let store = FileStore::with_default_path()?;
//!
//!     let service = ForecastService::new(
//!         ServiceConfig::default(),
//!         Arc::new(market),
//!         Arc::new(rates),
//!         Arc::new(store),
//!         Arc::new(SystemClock),
//!     );
//!
//!     let request = ForecastRequest::new("NO1", "2025-01-22", "my-api-key");
//!     let forecast = service.handle(&request).await?;
//!     write_forecast(OutputFormat::Json, &forecast, std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use spotpris_types::*;

// Re-export the forecast pipeline stages
pub use spotpris_forecast::{
    BuildError, DEFAULT_WINDOW_DAYS, ExchangeRateResolver, ForecastBuilder, RateError,
};

// Re-export upstream clients
#[cfg(feature = "fetch")]
pub use spotpris_fetch::{
    ClientConfig, DecodeError, DownloadError, EntsoeClient, EntsoeConfig, HttpClient,
    NorgesBankClient, NorgesBankConfig,
};

// Re-export storage
#[cfg(feature = "store")]
pub use spotpris_store::{
    DocumentStore, FileStore, ForecastCache, MemoryStore, QuotaError, QuotaGuard, StoreError,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use spotpris_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat, write_forecast,
};

// Re-export the request service
#[cfg(feature = "service")]
pub use spotpris_service::{
    ForecastRequest, ForecastService, ServiceConfig, ServiceError, ValidatedRequest,
};

/// Prelude module for convenient imports.
///
/// ```
/// use spotpris_lib::prelude::*;
/// ```
pub mod prelude {
    pub use spotpris_types::{
        ApiKey, Clock, ExchangeRate, Forecast, MarketDataSource, MarketDocument, PricePoint,
        RateSource, SystemClock, Tz, Zone, ZoneUsage,
    };

    pub use spotpris_forecast::{ExchangeRateResolver, ForecastBuilder};

    #[cfg(feature = "fetch")]
    pub use spotpris_fetch::{
        ClientConfig, EntsoeClient, EntsoeConfig, NorgesBankClient, NorgesBankConfig,
    };

    #[cfg(feature = "store")]
    pub use spotpris_store::{DocumentStore, FileStore, MemoryStore, QuotaGuard};

    #[cfg(feature = "format")]
    pub use spotpris_format::{Formatter, OutputFormat, write_forecast};

    #[cfg(feature = "service")]
    pub use spotpris_service::{ForecastRequest, ForecastService, ServiceConfig, ServiceError};
}
