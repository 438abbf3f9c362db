//! Price zone definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ParseError;

/// A Norwegian day-ahead bidding zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Zone {
    /// Eastern Norway (Oslo).
    No1,
    /// Southern Norway (Kristiansand).
    No2,
    /// Central Norway (Trondheim).
    No3,
    /// Northern Norway (Tromsø).
    No4,
    /// Western Norway (Bergen).
    No5,
}

impl Zone {
    /// Returns the short code, e.g. `NO1`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::No1 => "NO1",
            Self::No2 => "NO2",
            Self::No3 => "NO3",
            Self::No4 => "NO4",
            Self::No5 => "NO5",
        }
    }

    /// Returns the EIC area code the upstream publication is keyed by.
    #[must_use]
    pub const fn domain(&self) -> &'static str {
        match self {
            Self::No1 => "10YNO-1--------2",
            Self::No2 => "10YNO-2--------T",
            Self::No3 => "10YNO-3--------J",
            Self::No4 => "10YNO-4--------9",
            Self::No5 => "10Y1001A1001A48H",
        }
    }

    /// Returns the name of this zone's counter in a usage record.
    #[must_use]
    pub const fn counter_field(&self) -> &'static str {
        match self {
            Self::No1 => "no1Counter",
            Self::No2 => "no2Counter",
            Self::No3 => "no3Counter",
            Self::No4 => "no4Counter",
            Self::No5 => "no5Counter",
        }
    }

    /// Returns all zones in code order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::No1, Self::No2, Self::No3, Self::No4, Self::No5]
    }

    /// Returns the accepted short codes joined for error messages.
    #[must_use]
    pub fn valid_codes() -> String {
        Self::all()
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Zone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|zone| zone.as_str() == code)
            .ok_or_else(|| ParseError::UnknownZone {
                input: code,
                valid: Self::valid_codes(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_parse_is_case_insensitive() {
        assert_eq!("no1".parse::<Zone>().unwrap(), Zone::No1);
        assert_eq!("No5".parse::<Zone>().unwrap(), Zone::No5);
        assert_eq!("NO3".parse::<Zone>().unwrap(), Zone::No3);
    }

    #[test]
    fn test_unknown_zone_lists_valid_codes() {
        let err = "se3".parse::<Zone>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "SE3 is not a valid zone! Valid zones are NO1, NO2, NO3, NO4, NO5"
        );
    }

    #[test]
    fn test_zone_domains() {
        assert_eq!(Zone::No1.domain(), "10YNO-1--------2");
        assert_eq!(Zone::No5.domain(), "10Y1001A1001A48H");
        assert_eq!(Zone::No4.counter_field(), "no4Counter");
    }

    #[test]
    fn test_zone_serde() {
        let json = serde_json::to_string(&Zone::No2).unwrap();
        assert_eq!(json, "\"NO2\"");
        let zone: Zone = serde_json::from_str("\"NO4\"").unwrap();
        assert_eq!(zone, Zone::No4);
    }
}
