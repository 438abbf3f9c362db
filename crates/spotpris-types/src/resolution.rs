//! Time series resolution definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ParseError;

/// Duration covered by one sample of an upstream time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// 15-minute samples.
    #[serde(rename = "PT15M")]
    Minute15,
    /// 30-minute samples.
    #[serde(rename = "PT30M")]
    Minute30,
    /// Hourly samples.
    #[serde(rename = "PT60M")]
    Minute60,
}

impl Resolution {
    /// Returns the sample length in minutes.
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        match self {
            Self::Minute15 => 15,
            Self::Minute30 => 30,
            Self::Minute60 => 60,
        }
    }

    /// Returns the ISO-8601 duration label used upstream.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Minute15 => "PT15M",
            Self::Minute30 => "PT30M",
            Self::Minute60 => "PT60M",
        }
    }

    /// Returns how many samples fall inside one clock hour.
    #[must_use]
    pub const fn samples_per_hour(&self) -> i64 {
        60 / self.minutes()
    }

    /// Returns all known resolutions.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Minute15, Self::Minute30, Self::Minute60]
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Resolution {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PT15M" => Ok(Self::Minute15),
            "PT30M" => Ok(Self::Minute30),
            "PT60M" | "PT1H" => Ok(Self::Minute60),
            other => Err(ParseError::UnknownResolution(other.to_string())),
        }
    }
}
