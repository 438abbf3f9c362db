//! Quota-gated, cached day-ahead price forecasts.
//!
//! - [`ServiceConfig`] - Time zone, publish cutoff, coverage, store layout
//! - [`ForecastService`] - The per-request pipeline
//! - [`ServiceError`] - Request failures with HTTP status equivalents

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod service;

pub use config::{DEFAULT_EARLIEST_DATE, DEFAULT_PUBLISH_CUTOFF_HOUR, ServiceConfig};
pub use error::ServiceError;
pub use service::{ForecastRequest, ForecastService, ValidatedRequest};
