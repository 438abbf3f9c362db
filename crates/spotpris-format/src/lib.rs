//! Output formatters for spotpris price forecasts.
//!
//! - [`JsonFormatter`] - Keyed JSON object or NDJSON
//! - [`CsvFormatter`] - CSV or TSV rows

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat, write_forecast};
pub use json::{JsonFormatter, JsonStyle};
