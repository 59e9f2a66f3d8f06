//! Instants on the wire and their "3 hours ago" rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC instant carried on the wire as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Render how long ago this instant was, relative to `now`.
    ///
    /// Future instants (clock skew between client and server) read as "just now".
    #[must_use]
    pub fn relative_to(&self, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(self.0);
        let seconds = elapsed.num_seconds();
        if seconds < 60 {
            return "just now".to_string();
        }

        let (amount, unit) = if seconds < 3_600 {
            (elapsed.num_minutes(), "minute")
        } else if seconds < 86_400 {
            (elapsed.num_hours(), "hour")
        } else if seconds < 30 * 86_400 {
            (elapsed.num_days(), "day")
        } else if seconds < 365 * 86_400 {
            (elapsed.num_days() / 30, "month")
        } else {
            (elapsed.num_days() / 365, "year")
        };

        if amount == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{amount} {unit}s ago")
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 8, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_timestamp_display() {
        assert_eq!(Timestamp(base()).to_string(), "2025-03-08 14:30:00");
    }

    #[test]
    fn test_timestamp_serialization() {
        let serialized = serde_json::to_string(&Timestamp(base())).unwrap();
        assert_eq!(serialized, "\"2025-03-08T14:30:00Z\"");
    }

    #[test]
    fn test_timestamp_deserialization_with_millis() {
        let parsed: Timestamp = serde_json::from_str("\"2025-03-08T14:30:00.000Z\"").unwrap();
        assert_eq!(parsed.0, base());
    }

    #[test]
    fn relative_time_buckets() {
        let ts = Timestamp(base());
        assert_eq!(ts.relative_to(base() + Duration::seconds(10)), "just now");
        assert_eq!(ts.relative_to(base() + Duration::minutes(1)), "1 minute ago");
        assert_eq!(ts.relative_to(base() + Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ts.relative_to(base() + Duration::hours(2)), "2 hours ago");
        assert_eq!(ts.relative_to(base() + Duration::days(3)), "3 days ago");
        assert_eq!(ts.relative_to(base() + Duration::days(65)), "2 months ago");
        assert_eq!(ts.relative_to(base() + Duration::days(800)), "2 years ago");
    }

    #[test]
    fn future_instants_read_as_just_now() {
        let ts = Timestamp(base() + Duration::hours(1));
        assert_eq!(ts.relative_to(base()), "just now");
    }
}
