//! Wall-clock abstraction

use chrono::NaiveDateTime;

/// A single reading of the wall clock.
///
/// Carries both views the watchface needs: epoch seconds for the cursor and
/// broken-down local calendar time for the human-readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    /// Seconds since the Unix epoch, UTC.
    pub utc_seconds: i64,
    /// Local calendar time at the same instant.
    pub local: NaiveDateTime,
}

impl WallTime {
    /// Build a reading from its two views.
    pub const fn new(utc_seconds: i64, local: NaiveDateTime) -> Self {
        Self { utc_seconds, local }
    }

    /// Reading for a clock whose local time equals UTC.
    ///
    /// Returns `None` when `utc_seconds` is outside chrono's representable range.
    pub fn from_utc_seconds(utc_seconds: i64) -> Option<Self> {
        chrono::DateTime::from_timestamp(utc_seconds, 0).map(|dt| Self {
            utc_seconds,
            local: dt.naive_utc(),
        })
    }
}

/// Clock trait: read-only access to time and the user's time preferences.
pub trait Clock {
    /// Current wall-clock time.
    fn now(&self) -> WallTime;

    /// `true` if the user prefers a 24-hour clock.
    fn is_24h_style(&self) -> bool;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::WallTime;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_from_utc_seconds_epoch() {
        let t = WallTime::from_utc_seconds(0).unwrap();
        assert_eq!(t.local.year(), 1970);
        assert_eq!(t.local.hour(), 0);
    }

    #[test]
    fn test_from_utc_seconds_keeps_seconds() {
        let t = WallTime::from_utc_seconds(1_700_000_000).unwrap();
        assert_eq!(t.utc_seconds, 1_700_000_000);
        assert_eq!(t.local.and_utc().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_from_utc_seconds_out_of_range() {
        assert!(WallTime::from_utc_seconds(i64::MAX).is_none());
    }
}
