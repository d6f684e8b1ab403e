use std::sync::LazyLock;

use enum_map::{Enum, EnumMap, enum_map};
use serde::{Deserialize, Serialize};

use crate::FeedError;

pub const MINUTE_MS: u64 = 60 * 1_000;
pub const HOUR_MS: u64 = 60 * MINUTE_MS;
pub const DAY_MS: u64 = 24 * HOUR_MS;

/// How many points a timeframe yields and how far apart they sit.
///
/// Only obtainable through [`Timeframe::profile`]; point count and interval
/// always come from the same table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesProfile {
    pub points: usize,
    pub interval_ms: u64,
}

impl SeriesProfile {
    /// Total wall-clock span covered by a full series.
    pub fn span_ms(&self) -> u64 {
        self.points as u64 * self.interval_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Deserialize, Serialize)]
pub enum Timeframe {
    #[serde(rename = "5m")]
    Min5,
    #[serde(rename = "15m")]
    Min15,
    #[serde(rename = "30m")]
    Min30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1W")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
    #[serde(rename = "3M")]
    Month3,
    #[serde(rename = "6M")]
    Month6,
    #[serde(rename = "1Y")]
    Year1,
    #[serde(rename = "2Y")]
    Year2,
    #[serde(rename = "5Y")]
    Year5,
}

static PROFILES: LazyLock<EnumMap<Timeframe, SeriesProfile>> = LazyLock::new(|| {
    enum_map! {
        // Intraday selections cover one to a few trading sessions.
        Timeframe::Min5 => SeriesProfile { points: 78, interval_ms: 5 * MINUTE_MS },
        Timeframe::Min15 => SeriesProfile { points: 26, interval_ms: 15 * MINUTE_MS },
        Timeframe::Min30 => SeriesProfile { points: 13, interval_ms: 30 * MINUTE_MS },
        Timeframe::Hour1 => SeriesProfile { points: 7, interval_ms: HOUR_MS },
        Timeframe::Hour4 => SeriesProfile { points: 42, interval_ms: 4 * HOUR_MS },
        // Range selections are daily buckets over the named span.
        Timeframe::Week1 => SeriesProfile { points: 7, interval_ms: DAY_MS },
        Timeframe::Month1 => SeriesProfile { points: 30, interval_ms: DAY_MS },
        Timeframe::Month3 => SeriesProfile { points: 90, interval_ms: DAY_MS },
        Timeframe::Month6 => SeriesProfile { points: 180, interval_ms: DAY_MS },
        Timeframe::Year1 => SeriesProfile { points: 365, interval_ms: DAY_MS },
        Timeframe::Year2 => SeriesProfile { points: 730, interval_ms: DAY_MS },
        Timeframe::Year5 => SeriesProfile { points: 1825, interval_ms: DAY_MS },
    }
});

impl Timeframe {
    pub const ALL: [Timeframe; 12] = [
        Timeframe::Min5,
        Timeframe::Min15,
        Timeframe::Min30,
        Timeframe::Hour1,
        Timeframe::Hour4,
        Timeframe::Week1,
        Timeframe::Month1,
        Timeframe::Month3,
        Timeframe::Month6,
        Timeframe::Year1,
        Timeframe::Year2,
        Timeframe::Year5,
    ];

    pub fn profile(self) -> SeriesProfile {
        PROFILES[self]
    }

    pub fn is_intraday(self) -> bool {
        self.profile().interval_ms < DAY_MS
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Timeframe::Min5 => "5m",
            Timeframe::Min15 => "15m",
            Timeframe::Min30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
            Timeframe::Week1 => "1W",
            Timeframe::Month1 => "1M",
            Timeframe::Month3 => "3M",
            Timeframe::Month6 => "6M",
            Timeframe::Year1 => "1Y",
            Timeframe::Year2 => "2Y",
            Timeframe::Year5 => "5Y",
        };
        write!(f, "{label}")
    }
}

impl std::str::FromStr for Timeframe {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| FeedError::InvalidRequest(format!("unknown timeframe: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_pairs_come_from_one_table() {
        let month = Timeframe::Month1.profile();
        assert_eq!(month.points, 30);
        assert_eq!(month.interval_ms, DAY_MS);

        let week = Timeframe::Week1.profile();
        assert_eq!(week.points, 7);
        assert_eq!(week.interval_ms, DAY_MS);

        let five_min = Timeframe::Min5.profile();
        assert_eq!(five_min.points, 78);
        assert_eq!(five_min.interval_ms, 5 * MINUTE_MS);
    }

    #[test]
    fn every_profile_is_nonempty() {
        for tf in Timeframe::ALL {
            let profile = tf.profile();
            assert!(profile.points > 0, "{tf} has no points");
            assert!(profile.interval_ms > 0, "{tf} has no interval");
        }
    }

    #[test]
    fn labels_roundtrip() {
        for tf in Timeframe::ALL {
            let parsed: Timeframe = tf.to_string().parse().unwrap();
            assert_eq!(parsed, tf);
        }
        assert!("90s".parse::<Timeframe>().is_err());
    }

    #[test]
    fn intraday_split() {
        assert!(Timeframe::Min5.is_intraday());
        assert!(Timeframe::Hour4.is_intraday());
        assert!(!Timeframe::Week1.is_intraday());
        assert!(!Timeframe::Year5.is_intraday());
    }
}
