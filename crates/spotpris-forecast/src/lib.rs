//! Hourly forecast construction for spotpris.
//!
//! This crate provides the pure computation at the heart of the service:
//!
//! - [`ForecastBuilder`] - Market publication to hourly local price series
//! - [`ExchangeRateResolver`] - Most recent daily rate with holiday fallback

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod resolver;

pub use builder::{BuildError, ForecastBuilder};
pub use resolver::{DEFAULT_WINDOW_DAYS, ExchangeRateResolver, RateError};
