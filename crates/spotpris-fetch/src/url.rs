//! Upstream URL construction.

use chrono::{DateTime, NaiveDate, Utc};
use spotpris_types::{DATE_FORMAT, Tz, Zone, local_midnight, next_local_midnight};

/// Base URL of the ENTSO-E transparency platform API.
pub const ENTSOE_BASE_URL: &str = "https://web-api.tp.entsoe.eu/api";

/// Base URL of the Norges Bank data API.
pub const NORGES_BANK_BASE_URL: &str = "https://data.norges-bank.no/api/data";

/// Timestamp layout of ENTSO-E period parameters.
const ENTSOE_PERIOD_FORMAT: &str = "%Y%m%d%H%M";

/// Returns the UTC bounds of the local calendar day `date` in `tz`.
///
/// Returns `None` if the day has no valid start in `tz`.
///
/// # Example
///
/// ```
/// use spotpris_fetch::url::local_day_bounds;
/// use spotpris_types::DEFAULT_TIME_ZONE;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
/// let (start, end) = local_day_bounds(date, DEFAULT_TIME_ZONE).unwrap();
/// assert_eq!(start.to_rfc3339(), "2025-01-21T23:00:00+00:00");
/// assert_eq!(end.to_rfc3339(), "2025-01-22T23:00:00+00:00");
/// ```
#[must_use]
pub fn local_day_bounds(date: NaiveDate, tz: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = local_midnight(date, tz)?;
    let end = next_local_midnight(&start)?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Builds the day-ahead price (A44) query for `zone` over `[start, end)`.
///
/// # Example
///
/// ```
/// use spotpris_fetch::url::{ENTSOE_BASE_URL, entsoe_url};
/// use spotpris_types::Zone;
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2025, 1, 21, 23, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 1, 22, 23, 0, 0).unwrap();
/// let url = entsoe_url(ENTSOE_BASE_URL, Zone::No1, start, end, "token");
/// assert_eq!(
///     url,
///     "https://web-api.tp.entsoe.eu/api?documentType=A44\
///      &in_Domain=10YNO-1--------2&out_Domain=10YNO-1--------2\
///      &periodStart=202501212300&periodEnd=202501222300&securityToken=token"
/// );
/// ```
#[must_use]
pub fn entsoe_url(
    base: &str,
    zone: Zone,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    token: &str,
) -> String {
    let domain = zone.domain();
    format!(
        "{base}?documentType=A44&in_Domain={domain}&out_Domain={domain}\
         &periodStart={}&periodEnd={}&securityToken={token}",
        start.format(ENTSOE_PERIOD_FORMAT),
        end.format(ENTSOE_PERIOD_FORMAT),
    )
}

/// Builds the daily `from`/`to` exchange rate query over `[start, end]`.
///
/// # Example
///
/// ```
/// use spotpris_fetch::url::{NORGES_BANK_BASE_URL, norges_bank_url};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();
/// let url = norges_bank_url(NORGES_BANK_BASE_URL, "EUR", "NOK", start, end);
/// assert_eq!(
///     url,
///     "https://data.norges-bank.no/api/data/EXR/B.EUR.NOK.SP?format=sdmx-json\
///      &startPeriod=2025-01-14&endPeriod=2025-01-21&locale=en"
/// );
/// ```
#[must_use]
pub fn norges_bank_url(base: &str, from: &str, to: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{base}/EXR/B.{}.{}.SP?format=sdmx-json&startPeriod={}&endPeriod={}&locale=en",
        from.to_uppercase(),
        to.to_uppercase(),
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use spotpris_types::DEFAULT_TIME_ZONE;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_bounds_summer() {
        let (start, end) = local_day_bounds(date(2025, 6, 1), DEFAULT_TIME_ZONE).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 5, 31, 22, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 6, 1, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_day_bounds_spring_clock_change() {
        let (start, end) = local_day_bounds(date(2025, 3, 30), DEFAULT_TIME_ZONE).unwrap();
        assert_eq!((end - start).num_hours(), 23);
    }

    #[test]
    fn test_entsoe_url_uses_zone_domain() {
        let start = Utc.with_ymd_and_hms(2025, 5, 31, 22, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 22, 0, 0).unwrap();
        let url = entsoe_url(ENTSOE_BASE_URL, Zone::No5, start, end, "t");

        assert!(url.contains("in_Domain=10Y1001A1001A48H"));
        assert!(url.contains("out_Domain=10Y1001A1001A48H"));
        assert!(url.contains("periodStart=202505312200"));
        assert!(url.contains("periodEnd=202506012200"));
        assert!(url.ends_with("securityToken=t"));
    }

    #[test]
    fn test_norges_bank_url_uppercases_currencies() {
        let url = norges_bank_url("http://localhost", "eur", "nok", date(2025, 1, 1), date(2025, 1, 8));
        assert_eq!(
            url,
            "http://localhost/EXR/B.EUR.NOK.SP?format=sdmx-json&startPeriod=2025-01-01&endPeriod=2025-01-08&locale=en"
        );
    }
}
