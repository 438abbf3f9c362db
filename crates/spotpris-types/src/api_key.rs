//! API key and usage records.

use serde::{Deserialize, Serialize};

use crate::Zone;

/// An API key record, created out-of-band by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKey {
    /// Contact address of the key holder.
    pub email: String,
    /// Whether the key has been blocked.
    pub blocked: bool,
    /// Reason shown to the holder of a blocked key.
    pub reason: String,
    /// Display name of the key holder.
    pub name: String,
    /// Requests allowed per zone per day.
    pub quota: u32,
}

impl ApiKey {
    /// Creates an active key with the given quota.
    #[must_use]
    pub fn new(email: impl Into<String>, quota: u32) -> Self {
        Self {
            email: email.into(),
            quota,
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the key as blocked with the given reason.
    #[must_use]
    pub fn blocked(mut self, reason: impl Into<String>) -> Self {
        self.blocked = true;
        self.reason = reason.into();
        self
    }
}

/// Per-zone request counters of one key on one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneUsage {
    /// Requests for NO1.
    pub no1_counter: u64,
    /// Requests for NO2.
    pub no2_counter: u64,
    /// Requests for NO3.
    pub no3_counter: u64,
    /// Requests for NO4.
    pub no4_counter: u64,
    /// Requests for NO5.
    pub no5_counter: u64,
}

impl ZoneUsage {
    /// Returns the record written on a key's first request of the day.
    #[must_use]
    pub fn first_use(zone: Zone) -> Self {
        let mut usage = Self::default();
        *usage.counter_mut(zone) = 1;
        usage
    }

    /// Returns the counter of the given zone.
    #[must_use]
    pub const fn count(&self, zone: Zone) -> u64 {
        match zone {
            Zone::No1 => self.no1_counter,
            Zone::No2 => self.no2_counter,
            Zone::No3 => self.no3_counter,
            Zone::No4 => self.no4_counter,
            Zone::No5 => self.no5_counter,
        }
    }

    /// Returns the sum over all zones.
    #[must_use]
    pub fn total(&self) -> u64 {
        Zone::all().iter().map(|zone| self.count(*zone)).sum()
    }

    const fn counter_mut(&mut self, zone: Zone) -> &mut u64 {
        match zone {
            Zone::No1 => &mut self.no1_counter,
            Zone::No2 => &mut self.no2_counter,
            Zone::No3 => &mut self.no3_counter,
            Zone::No4 => &mut self.no4_counter,
            Zone::No5 => &mut self.no5_counter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_use() {
        let usage = ZoneUsage::first_use(Zone::No3);
        assert_eq!(usage.count(Zone::No3), 1);
        assert_eq!(usage.count(Zone::No1), 0);
        assert_eq!(usage.total(), 1);
    }

    #[test]
    fn test_usage_field_names() {
        let json = serde_json::to_value(ZoneUsage::first_use(Zone::No5)).unwrap();
        assert_eq!(json["no5Counter"], 1);
        assert_eq!(json["no1Counter"], 0);

        let partial: ZoneUsage = serde_json::from_str(r#"{"no2Counter": 7}"#).unwrap();
        assert_eq!(partial.count(Zone::No2), 7);
        assert_eq!(partial.count(Zone::No4), 0);
    }

    #[test]
    fn test_api_key_defaults() {
        let key: ApiKey = serde_json::from_str(r#"{"email": "a@b.no", "quota": 100}"#).unwrap();
        assert!(!key.blocked);
        assert_eq!(key.quota, 100);

        let blocked = ApiKey::new("a@b.no", 5).blocked("abuse");
        assert!(blocked.blocked);
        assert_eq!(blocked.reason, "abuse");
    }
}
