//! Timestamp type used for stream start and end dates.
//!
//! Timestamps are Unix epoch milliseconds (UTC). On chain, stream boundaries are
//! whole seconds; converting back to seconds truncates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Unix timestamp in milliseconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Build a timestamp from on-chain Unix seconds.
    pub fn from_unix_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Whole seconds since epoch (sub-second part is truncated).
    pub fn as_unix_secs(&self) -> u64 {
        self.0 / 1000
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_round_trip() {
        let t = Timestamp::from_unix_secs(1_700_000_000);
        assert_eq!(t.as_millis(), 1_700_000_000_000);
        assert_eq!(t.as_unix_secs(), 1_700_000_000);
    }

    #[test]
    fn seconds_truncate_milliseconds() {
        assert_eq!(Timestamp::from_millis(1_999).as_unix_secs(), 1);
    }

    #[test]
    fn from_secs_saturates() {
        assert_eq!(Timestamp::from_unix_secs(u64::MAX).as_millis(), u64::MAX);
    }
}
