//! Expiry times and millisecond timestamps.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Seconds since the Unix epoch after which a transaction is void.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionExpiry(u64);

impl TransactionExpiry {
    pub const fn from_epoch_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Fails for dates before the Unix epoch.
    pub fn from_datetime(at: DateTime<Utc>) -> Result<Self> {
        u64::try_from(at.timestamp())
            .map(Self)
            .map_err(|_| CodecError::invalid("transaction expiry cannot be before the unix epoch"))
    }

    /// An expiry `minutes` from the current wall-clock time.
    pub fn minutes_from_now(minutes: i64) -> Result<Self> {
        let at = Duration::try_minutes(minutes)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .ok_or_else(|| CodecError::invalid(format!("expiry {} minutes from now overflows", minutes)))?;
        Self::from_datetime(at)
    }

    pub const fn seconds(&self) -> u64 {
        self.0
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0)
            .ok()
            .and_then(|s| Utc.timestamp_opt(s, 0).single())
    }
}

impl fmt::Display for TransactionExpiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(at) => write!(f, "{}", at.to_rfc3339()),
            None => write!(f, "{}s", self.0),
        }
    }
}

/// Milliseconds since the Unix epoch, as smart contracts see time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Fails for dates before the Unix epoch.
    pub fn from_datetime(at: DateTime<Utc>) -> Result<Self> {
        u64::try_from(at.timestamp_millis())
            .map(Self)
            .map_err(|_| CodecError::invalid("timestamp cannot be before the unix epoch"))
    }

    pub const fn millis(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_from_datetime() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let expiry = TransactionExpiry::from_datetime(at).unwrap();
        assert_eq!(expiry.seconds(), 1_704_067_200);
        assert_eq!(expiry.to_datetime(), Some(at));
    }

    #[test]
    fn expiry_rejects_pre_epoch() {
        let at = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        assert!(TransactionExpiry::from_datetime(at).is_err());
        assert!(Timestamp::from_datetime(at).is_err());
    }

    #[test]
    fn expiry_in_the_future() {
        let now = Utc::now().timestamp() as u64;
        let expiry = TransactionExpiry::minutes_from_now(5).unwrap();
        assert!(expiry.seconds() >= now + 5 * 60);
    }

    #[test]
    fn timestamp_keeps_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(Timestamp::from_datetime(at).unwrap().millis(), 1_700_000_000_123);
    }
}
