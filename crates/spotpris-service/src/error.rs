//! Request failures.

use chrono::{NaiveDate, NaiveTime};
use spotpris_forecast::{BuildError, RateError};
use spotpris_store::{QuotaError, StoreError};
use spotpris_types::{ParseError, SourceError, Zone};
use thiserror::Error;

/// Why a forecast request failed.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A required parameter is missing or empty.
    #[error("\"{0}\" query parameter is a required field")]
    MissingParameter(&'static str),

    /// The zone is not one of the known zones.
    #[error(transparent)]
    InvalidZone(ParseError),

    /// The date is not a valid `YYYY-MM-DD` date.
    #[error(transparent)]
    InvalidDate(ParseError),

    /// The date lies before the earliest available prices.
    #[error("No prices are available before {earliest}, requested {date}")]
    DateTooEarly {
        /// Requested date.
        date: NaiveDate,
        /// Earliest available date.
        earliest: NaiveDate,
    },

    /// The date lies too far in the future for prices to exist.
    #[error(
        "Prices for {date} are not available yet, day-ahead prices are published at {cutoff} the day before"
    )]
    NotYetAvailable {
        /// Requested date.
        date: NaiveDate,
        /// Local publish time on the previous day.
        cutoff: NaiveTime,
    },

    /// The API key is not registered.
    #[error("The API key is not registered")]
    UnknownApiKey,

    /// The API key is blocked.
    #[error("Your API key has been blocked: {reason}")]
    Blocked {
        /// Reason given by the administrator.
        reason: String,
    },

    /// The daily quota for the zone is used up.
    #[error(
        "Quota exceeded for {zone}: {used} of {quota} requests used today, try again tomorrow"
    )]
    QuotaExceeded {
        /// Requested zone.
        zone: Zone,
        /// Requests allowed per zone per day.
        quota: u32,
        /// Requests already made today, before this one.
        used: u64,
    },

    /// Prices for the date have not been published yet.
    #[error("{0}")]
    NotYetPublished(SourceError),

    /// The market data source failed.
    #[error("Upstream request failed: {0}")]
    Upstream(SourceError),

    /// No exchange rate could be resolved.
    #[error(transparent)]
    Rate(#[from] RateError),

    /// The market publication could not be turned into a forecast.
    #[error("Could not build forecast: {0}")]
    Build(#[from] BuildError),

    /// The key or usage store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Returns the HTTP status code equivalent of this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameter(_)
            | Self::InvalidZone(_)
            | Self::InvalidDate(_)
            | Self::DateTooEarly { .. }
            | Self::NotYetAvailable { .. } => 400,
            Self::UnknownApiKey => 401,
            Self::Blocked { .. } => 403,
            Self::NotYetPublished(_) => 425,
            Self::QuotaExceeded { .. } => 429,
            Self::Store(_) => 500,
            Self::Upstream(_) | Self::Rate(_) | Self::Build(_) => 502,
        }
    }

    /// Returns true if the caller can fix the request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<SourceError> for ServiceError {
    fn from(err: SourceError) -> Self {
        if err.is_not_yet_published() {
            Self::NotYetPublished(err)
        } else {
            Self::Upstream(err)
        }
    }
}

impl From<QuotaError> for ServiceError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::UnknownKey => Self::UnknownApiKey,
            QuotaError::Blocked { reason } => Self::Blocked { reason },
            QuotaError::Store(e) => Self::Store(e),
        }
    }
}
