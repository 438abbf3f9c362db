//! HTTP clients for the spotpris upstream sources.
//!
//! This crate provides the network side of the forecast pipeline:
//!
//! - [`url`] - ENTSO-E and Norges Bank URL construction
//! - [`HttpClient`] - Shared HTTP client with secret redaction
//! - [`EntsoeClient`] - Day-ahead market publications
//! - [`NorgesBankClient`] - Daily exchange rate series
//! - [`decode_market_document`] / [`decode_rate_series`] - Payload decoders

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod entsoe;
mod norges_bank;
mod parse;
pub mod url;

pub use client::{ClientConfig, DownloadError, HttpClient, REDACTED};
pub use entsoe::{EntsoeClient, EntsoeConfig};
pub use norges_bank::{NorgesBankClient, NorgesBankConfig};
pub use parse::{DecodeError, decode_market_document, decode_rate_series, is_acknowledgement};
