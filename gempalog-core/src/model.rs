use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One entry of the recent-earthquakes feed, fields kept as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarthquakeEvent {
    #[serde(rename = "Tanggal", default, deserialize_with = "verbatim")]
    pub date: String,
    #[serde(rename = "Jam", default, deserialize_with = "verbatim")]
    pub time: String,
    #[serde(rename = "Wilayah", default, deserialize_with = "verbatim")]
    pub region: String,
    #[serde(rename = "Magnitude", default, deserialize_with = "verbatim")]
    pub magnitude: String,
    #[serde(rename = "Kedalaman", default, deserialize_with = "verbatim")]
    pub depth: String,
    #[serde(rename = "Potensi", default, deserialize_with = "verbatim")]
    pub potential: String,
}

/// An earthquake reported as felt, with its plotted coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeltEarthquakeEvent {
    pub date: String,
    pub time: String,
    pub region: String,
    pub magnitude: String,
    pub depth: String,
    pub felt_intensity: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Felt-feed record before its coordinate strings are interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeltRecord {
    #[serde(rename = "Tanggal", default, deserialize_with = "verbatim")]
    pub date: String,
    #[serde(rename = "Jam", default, deserialize_with = "verbatim")]
    pub time: String,
    #[serde(rename = "Wilayah", default, deserialize_with = "verbatim")]
    pub region: String,
    #[serde(rename = "Magnitude", default, deserialize_with = "verbatim")]
    pub magnitude: String,
    #[serde(rename = "Kedalaman", default, deserialize_with = "verbatim")]
    pub depth: String,
    #[serde(rename = "Lintang", default, deserialize_with = "verbatim")]
    pub latitude: String,
    #[serde(rename = "Bujur", default, deserialize_with = "verbatim")]
    pub longitude: String,
    #[serde(rename = "Dirasakan", default, deserialize_with = "verbatim")]
    pub felt_intensity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// A felt record whose coordinates could not be turned into a map point.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{date} {time} {region}: invalid {axis} '{raw}'")]
pub struct CoordinateError {
    pub date: String,
    pub time: String,
    pub region: String,
    pub axis: Axis,
    pub raw: String,
}

/// Result of parsing the felt feed: plottable events plus the records skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeltListing {
    pub events: Vec<FeltEarthquakeEvent>,
    pub skipped: Vec<CoordinateError>,
}

impl FeltListing {
    pub fn from_raw(records: Vec<RawFeltRecord>) -> Self {
        let mut listing = FeltListing::default();

        for record in records {
            match FeltEarthquakeEvent::try_from(record) {
                Ok(event) => listing.events.push(event),
                Err(err) => listing.skipped.push(err),
            }
        }

        listing
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.skipped.is_empty()
    }
}

impl TryFrom<RawFeltRecord> for FeltEarthquakeEvent {
    type Error = CoordinateError;

    fn try_from(raw: RawFeltRecord) -> Result<Self, Self::Error> {
        let invalid = |axis: Axis, value: &str| CoordinateError {
            date: raw.date.clone(),
            time: raw.time.clone(),
            region: raw.region.clone(),
            axis,
            raw: value.to_string(),
        };

        let latitude = parse_latitude(&raw.latitude)
            .ok_or_else(|| invalid(Axis::Latitude, &raw.latitude))?;
        let longitude = parse_longitude(&raw.longitude)
            .ok_or_else(|| invalid(Axis::Longitude, &raw.longitude))?;

        Ok(FeltEarthquakeEvent {
            date: raw.date,
            time: raw.time,
            region: raw.region,
            magnitude: raw.magnitude,
            depth: raw.depth,
            felt_intensity: raw.felt_intensity,
            latitude,
            longitude,
        })
    }
}

/// `"7.38 LS"` -> `7.38`. The hemisphere suffix is dropped, the sign is kept.
pub fn parse_latitude(raw: &str) -> Option<f64> {
    parse_finite(&raw.replace("LS", "").replace("LU", ""))
}

/// `"106.21 BT"` -> `-106.21`. The sign is always inverted after parsing.
pub fn parse_longitude(raw: &str) -> Option<f64> {
    parse_finite(&raw.replace("BT", "")).map(|value| -value)
}

fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Keep the textual form of whatever BMKG sent. `null` and missing keys read
/// as an empty string so one incomplete record cannot sink the whole payload.
fn verbatim<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
