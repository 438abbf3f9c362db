//! Error types for spotpris.

use thiserror::Error;

/// Errors raised while parsing boundary values and upstream fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The zone short code is not one of the enumerated zones.
    #[error("{input} is not a valid zone! Valid zones are {valid}")]
    UnknownZone {
        /// The rejected input, upper-cased.
        input: String,
        /// Comma separated list of accepted codes.
        valid: String,
    },

    /// The time series resolution label is not recognized.
    #[error("unknown resolution of timeseries period: {0}")]
    UnknownResolution(String),

    /// The date is not in `YYYY-MM-DD` format.
    #[error("Could not parse {input}, in the format YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// An upstream timestamp could not be parsed.
    #[error("invalid timestamp '{input}': {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Why parsing failed.
        reason: String,
    },
}

/// Errors reported by market data and exchange rate sources.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The upstream acknowledged the request but has no prices for it yet.
    #[error(
        "The prices were not found on the transparency.entsoe.eu server. \
         Try again later or check https://transparency.entsoe.eu/news/widget if there are any delays."
    )]
    NotYetPublished,

    /// The request could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response could not be decoded into the expected shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl SourceError {
    /// Returns true if this is the "not yet published" signal.
    #[must_use]
    pub const fn is_not_yet_published(&self) -> bool {
        matches!(self, Self::NotYetPublished)
    }
}
