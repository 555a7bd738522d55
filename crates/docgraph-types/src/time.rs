use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// UTC timestamp with microsecond precision.
///
/// Renders as ISO-8601 without a zone suffix (`2020-10-16T14:02:32.500`),
/// using millisecond precision unless the value carries sub-millisecond
/// digits. Parsing accepts any fractional precision and an optional
/// trailing `Z`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TimePoint(i64);

impl TimePoint {
    /// Create from microseconds since the UNIX epoch.
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Create from whole seconds since the UNIX epoch.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * 1_000_000)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_micros())
    }

    /// Microseconds since the UNIX epoch.
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Whole seconds since the UNIX epoch (floored).
    pub const fn sec_since_epoch(&self) -> i64 {
        self.0.div_euclid(1_000_000)
    }

    fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.0)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) if self.0 % 1_000 == 0 => {
                write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3f"))
            }
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.6f")),
            None => write!(f, "{}us", self.0),
        }
    }
}

impl fmt::Debug for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimePoint({self})")
    }
}

impl FromStr for TimePoint {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Values outside the calendar range display as raw micros.
        if let Some(micros) = s.strip_suffix("us").and_then(|m| m.parse().ok()) {
            return Ok(Self(micros));
        }
        let trimmed = s.strip_suffix('Z').unwrap_or(s);
        let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|_| TypeError::InvalidTimePoint(s.to_string()))?;
        Ok(Self(naive.and_utc().timestamp_micros()))
    }
}

impl Serialize for TimePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_milliseconds() {
        let tp = TimePoint::from_micros(1_602_856_952_500_000);
        assert_eq!(tp.to_string(), "2020-10-16T14:02:32.500");
    }

    #[test]
    fn display_keeps_sub_millisecond_digits() {
        let tp = TimePoint::from_micros(1_602_856_952_500_123);
        assert_eq!(tp.to_string(), "2020-10-16T14:02:32.500123");
        assert_eq!(tp.to_string().parse::<TimePoint>().unwrap(), tp);
    }

    #[test]
    fn parse_variants() {
        let expected = TimePoint::from_secs(1_602_856_952);
        assert_eq!("2020-10-16T14:02:32".parse::<TimePoint>().unwrap(), expected);
        assert_eq!("2020-10-16T14:02:32.000Z".parse::<TimePoint>().unwrap(), expected);
        assert!("yesterday".parse::<TimePoint>().is_err());
    }

    #[test]
    fn out_of_calendar_range_roundtrips() {
        for tp in [TimePoint::from_micros(i64::MAX), TimePoint::from_micros(i64::MIN)] {
            let text = tp.to_string();
            assert!(text.ends_with("us"), "{text}");
            assert_eq!(text.parse::<TimePoint>().unwrap(), tp);
            let json = serde_json::to_string(&tp).unwrap();
            assert_eq!(serde_json::from_str::<TimePoint>(&json).unwrap(), tp);
        }
        assert!("12xus".parse::<TimePoint>().is_err());
    }

    #[test]
    fn sec_since_epoch_floors() {
        assert_eq!(TimePoint::from_micros(2_999_999).sec_since_epoch(), 2);
        assert_eq!(TimePoint::from_micros(-1).sec_since_epoch(), -1);
    }

    #[test]
    fn now_is_after_2020() {
        assert!(TimePoint::now().sec_since_epoch() > 1_577_836_800);
    }

    #[test]
    fn ordering_follows_micros() {
        assert!(TimePoint::from_micros(1) < TimePoint::from_micros(2));
    }

    #[test]
    fn serde_roundtrip() {
        let tp = TimePoint::from_micros(1_598_324_530_000_000);
        let json = serde_json::to_string(&tp).unwrap();
        assert_eq!(json, "\"2020-08-25T03:02:10.000\"");
        let parsed: TimePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tp);
    }
}
