//! Daily exchange rate resolution.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use spotpris_types::{Clock, ExchangeRate, RateSource, SourceError, Tz};
use thiserror::Error;
use tracing::{debug, warn};

/// Days looked back from the adjusted date for a published observation.
pub const DEFAULT_WINDOW_DAYS: u64 = 7;

/// Errors from resolving an exchange rate.
#[derive(Error, Debug)]
pub enum RateError {
    /// No observation was published within the look-back window.
    #[error("no {from}/{to} exchange rate published between {start} and {end}")]
    Unavailable {
        /// Source currency.
        from: String,
        /// Target currency.
        to: String,
        /// First day of the window.
        start: NaiveDate,
        /// Last day of the window.
        end: NaiveDate,
    },

    /// The rate source failed.
    #[error("exchange rate source failed: {0}")]
    Source(#[from] SourceError),
}

/// Picks the rate a day's prices are converted with.
///
/// Rates for a delivery day are taken from the business day before it. The
/// most recent observation in a window ending on that day is used, which
/// covers weekends and bank holidays.
#[derive(Debug, Clone)]
pub struct ExchangeRateResolver {
    source: Arc<dyn RateSource>,
    clock: Arc<dyn Clock>,
    tz: Tz,
    window_days: u64,
}

impl ExchangeRateResolver {
    /// Creates a resolver with the default look-back window.
    #[must_use]
    pub fn new(source: Arc<dyn RateSource>, clock: Arc<dyn Clock>, tz: Tz) -> Self {
        Self {
            source,
            clock,
            tz,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Sets the number of days looked back from the adjusted date.
    #[must_use]
    pub const fn with_window_days(mut self, days: u64) -> Self {
        self.window_days = days;
        self
    }

    /// Returns the last day of the look-back window for `target`.
    ///
    /// This is the day before `target`, clamped to yesterday when that day
    /// lies in the future.
    #[must_use]
    pub fn adjusted_date(&self, target: NaiveDate) -> NaiveDate {
        let adjusted = target.pred_opt().unwrap_or(target);
        let today = self.clock.today(self.tz);
        if adjusted > today {
            today.pred_opt().unwrap_or(today)
        } else {
            adjusted
        }
    }

    /// Resolves the `from`/`to` rate applicable to prices of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::Unavailable`] if nothing was published in the
    /// window, or [`RateError::Source`] if the source fails.
    pub async fn resolve(
        &self,
        from: &str,
        to: &str,
        target: NaiveDate,
    ) -> Result<ExchangeRate, RateError> {
        let end = self.adjusted_date(target);
        let start = end
            .checked_sub_days(Days::new(self.window_days))
            .unwrap_or(end);

        debug!(from, to, %target, %start, %end, "Resolving exchange rate");
        let observations = self.source.fetch_rate_series(from, to, start, end).await?;

        let latest = observations
            .into_iter()
            .filter(|observation| (start..=end).contains(&observation.date))
            .max_by_key(|observation| observation.date);

        match latest {
            Some(observation) => {
                if observation.date != end {
                    debug!(
                        %end,
                        used = %observation.date,
                        "No rate published on adjusted date, using most recent"
                    );
                }
                Ok(ExchangeRate::from(observation))
            }
            None => {
                warn!(from, to, %start, %end, "No exchange rate in look-back window");
                Err(RateError::Unavailable {
                    from: from.to_string(),
                    to: to.to_string(),
                    start,
                    end,
                })
            }
        }
    }
}
