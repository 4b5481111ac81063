use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Asia::Jakarta;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};
use thiserror::Error;

const WIB_FORMAT: &str = "%Y-%m-%d %H:%M:%S WIB";

/// An instant rendered in Waktu Indonesia Barat (Asia/Jakarta, UTC+7).
///
/// Stored as `DateTime<Utc>` and converted on display, so two timestamps
/// compare by instant rather than by wall-clock text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WibTimestamp(DateTime<Utc>);

#[derive(Debug, Error)]
#[error("invalid WIB timestamp '{input}', expected YYYY-MM-DD HH:MM:SS WIB")]
pub struct ParseTimestampError {
    input: String,
}

impl WibTimestamp {
    pub fn now() -> Self {
        WibTimestamp(Utc::now())
    }

    pub fn to_date_time(&self) -> DateTime<Tz> {
        Jakarta.from_utc_datetime(&self.0.naive_utc())
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for WibTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        WibTimestamp(value)
    }
}

impl fmt::Display for WibTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_date_time().format(WIB_FORMAT))
    }
}

impl FromStr for WibTimestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimestampError { input: s.to_string() };

        let naive = NaiveDateTime::parse_from_str(s.trim(), WIB_FORMAT).map_err(|_| err())?;

        // Jakarta has no DST, so every local time maps to exactly one instant.
        Jakarta
            .from_local_datetime(&naive)
            .single()
            .map(|dt| WibTimestamp(dt.with_timezone(&Utc)))
            .ok_or_else(err)
    }
}

impl Serialize for WibTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WibTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
