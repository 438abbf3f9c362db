//! Persistence for spotpris.
//!
//! - [`DocumentStore`] - Minimal document store interface
//! - [`MemoryStore`] / [`FileStore`] - Store backends
//! - [`ForecastCache`] - Write-once forecast cache per zone and day
//! - [`QuotaGuard`] - API key authorization and usage counters

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod file;
mod memory;
mod quota;
mod store;

pub use cache::{FORECAST_PREFIX, ForecastCache};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use quota::{API_KEY_PREFIX, QuotaError, QuotaGuard};
pub use store::{DocumentStore, Result, StoreError};
