//! Timestamp value object for immutable points in time.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the later of the two timestamps.
    ///
    /// Used when refreshing `updated_at` so a clock step backwards never makes
    /// a mutation appear older than the previous one.
    pub fn at_least(self, floor: Timestamp) -> Self {
        if self.is_before(&floor) {
            floor
        } else {
            self
        }
    }

    /// UTC calendar day this timestamp falls on.
    pub fn utc_date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// RFC 3339 rendering with microsecond precision and a `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn at_least_keeps_later_value() {
        let early = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap());
        let late = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());

        assert_eq!(early.at_least(late), late);
        assert_eq!(late.at_least(early), late);
    }

    #[test]
    fn utc_date_truncates_time() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 3, 14, 23, 59, 59).unwrap());
        assert_eq!(ts.utc_date(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn rfc3339_uses_z_suffix() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 12, 25, 10, 30, 0).unwrap());
        assert_eq!(ts.to_rfc3339(), "2025-12-25T10:30:00.000000Z");
    }

    #[test]
    fn ordering_follows_time() {
        let a = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let b = Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap());
        assert!(a.is_before(&b));
        assert!(!b.is_before(&a));
        assert!(a < b);
    }
}
