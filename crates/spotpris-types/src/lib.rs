//! Core types for the spotpris day-ahead price service.
//!
//! This crate provides the data structures used throughout spotpris:
//!
//! - [`Zone`] - Norwegian price zone with its upstream domain identifier
//! - [`Resolution`] - Sample length of an upstream time series
//! - [`MarketDocument`] - Typed day-ahead publication
//! - [`ExchangeRate`] / [`RateObservation`] - Currency conversion inputs
//! - [`PricePoint`] / [`Forecast`] - Hourly, localized price series
//! - [`ApiKey`] / [`ZoneUsage`] - Quota bookkeeping records
//! - [`Clock`] - Source of "now" for date bucketing
//! - [`MarketDataSource`] / [`RateSource`] - Upstream collaborators

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api_key;
mod error;
mod forecast;
mod market;
mod price;
mod rate;
mod resolution;
mod source;
mod time;
mod zone;

pub use api_key::{ApiKey, ZoneUsage};
pub use error::{ParseError, SourceError};
pub use forecast::{Forecast, ForecastRecord, timestamp_key};
pub use market::{MarketDocument, MarketPoint, parse_market_timestamp};
pub use price::{PricePoint, PricePointRecord, round_decimals};
pub use rate::{ExchangeRate, LOCAL_CURRENCY, RateObservation, SOURCE_CURRENCY};
pub use resolution::Resolution;
pub use source::{MarketDataSource, RateSource};
pub use time::{
    Clock, DATE_FORMAT, DEFAULT_TIME_ZONE, FixedClock, SystemClock, local_midnight,
    next_local_midnight, parse_date,
};
pub use zone::Zone;

/// Re-exported so downstream crates name the same time zone type.
pub use chrono_tz::Tz;
