use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;
use thiserror::Error;
use tracing::warn;

use crate::model::{EarthquakeEvent, FeltEarthquakeEvent, FeltListing, RawFeltRecord};

pub mod bmkg;

pub use bmkg::BmkgFeed;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode earthquake payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// A source of earthquake listings.
///
/// Implementations report failures as [`FetchError`] so callers can tell an
/// outage apart from a feed that simply has no events.
#[async_trait]
pub trait QuakeFeed: Send + Sync + Debug {
    async fn recent(&self) -> FetchResult<Vec<EarthquakeEvent>>;

    async fn felt(&self) -> FetchResult<FeltListing>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "Infogempa")]
    info: Listing<T>,
}

#[derive(Debug, Deserialize)]
struct Listing<T> {
    gempa: Vec<T>,
}

/// Parse the `Infogempa.gempa` array of the recent-earthquakes payload.
pub fn parse_recent(body: &str) -> FetchResult<Vec<EarthquakeEvent>> {
    let envelope: Envelope<EarthquakeEvent> = serde_json::from_str(body)?;
    Ok(envelope.info.gempa)
}

/// Parse the felt-earthquakes payload, skipping records with unusable coordinates.
pub fn parse_felt(body: &str) -> FetchResult<FeltListing> {
    let envelope: Envelope<RawFeltRecord> = serde_json::from_str(body)?;
    let listing = FeltListing::from_raw(envelope.info.gempa);

    for skipped in &listing.skipped {
        warn!("skipping felt earthquake record: {skipped}");
    }

    Ok(listing)
}

/// Fetch failures are silent and degrade to empty.
pub async fn fetch_recent_earthquakes(feed: &dyn QuakeFeed) -> Vec<EarthquakeEvent> {
    feed.recent().await.unwrap_or_else(|err| {
        warn!("recent earthquakes unavailable: {err}");
        Vec::new()
    })
}

/// Fetch failures are silent and degrade to empty.
pub async fn fetch_felt_earthquakes(feed: &dyn QuakeFeed) -> Vec<FeltEarthquakeEvent> {
    match feed.felt().await {
        Ok(listing) => listing.events,
        Err(err) => {
            warn!("felt earthquakes unavailable: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recent_entry(region: &str) -> serde_json::Value {
        json!({
            "Tanggal": "19 Okt 2026",
            "Jam": "08:12:44 WIB",
            "DateTime": "2026-10-19T01:12:44+00:00",
            "Coordinates": "-7.38,106.21",
            "Lintang": "7.38 LS",
            "Bujur": "106.21 BT",
            "Magnitude": "5.0",
            "Kedalaman": "10 km",
            "Wilayah": region,
            "Potensi": "Tidak berpotensi tsunami",
        })
    }

    #[test]
    fn recent_payload_keeps_length_and_values() {
        let body = json!({
            "Infogempa": { "gempa": [recent_entry("Sukabumi"), recent_entry("Garut")] }
        })
        .to_string();

        let events = parse_recent(&body).expect("payload must parse");

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].region, "Sukabumi");
        assert_eq!(events[1].region, "Garut");
        assert_eq!(events[0].date, "19 Okt 2026");
        assert_eq!(events[0].time, "08:12:44 WIB");
        assert_eq!(events[0].magnitude, "5.0");
        assert_eq!(events[0].depth, "10 km");
        assert_eq!(events[0].potential, "Tidak berpotensi tsunami");
    }

    #[test]
    fn empty_gempa_array_is_valid() {
        let events = parse_recent(r#"{"Infogempa":{"gempa":[]}}"#).expect("must parse");
        assert!(events.is_empty());
    }

    #[test]
    fn missing_envelope_keys_are_decode_errors() {
        let err = parse_recent(r#"{"Infogempa":{}}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));

        let err = parse_felt(r#"{"gempa":[]}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn record_missing_a_field_still_parses() {
        let mut incomplete = recent_entry("Garut");
        incomplete.as_object_mut().unwrap().remove("Potensi");
        let body = json!({
            "Infogempa": { "gempa": [recent_entry("Sukabumi"), incomplete] }
        })
        .to_string();

        let events = parse_recent(&body).expect("one incomplete record must not fail the feed");

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].region, "Garut");
        assert_eq!(events[1].potential, "");
    }

    #[test]
    fn null_coordinate_skips_only_that_record() {
        let mut good = recent_entry("Sukabumi");
        good["Dirasakan"] = json!("III Sukabumi");
        let mut broken = recent_entry("Garut");
        broken["Lintang"] = serde_json::Value::Null;
        let body = json!({ "Infogempa": { "gempa": [good, broken] } }).to_string();

        let listing = parse_felt(&body).expect("payload must parse");

        assert_eq!(listing.events.len(), 1);
        assert_eq!(listing.events[0].region, "Sukabumi");
        assert_eq!(listing.skipped.len(), 1);
        assert_eq!(listing.skipped[0].region, "Garut");
    }

    #[test]
    fn felt_payload_derives_coordinates() {
        let body = json!({
            "Infogempa": { "gempa": [{
                "Tanggal": "19 Okt 2026",
                "Jam": "08:12:44 WIB",
                "Lintang": "7.38 LS",
                "Bujur": "106.21 BT",
                "Magnitude": "5.0",
                "Kedalaman": "10 km",
                "Wilayah": "Pusat gempa berada di laut 90 km BaratDaya Sukabumi",
                "Dirasakan": "III Sukabumi, II Cianjur",
            }] }
        })
        .to_string();

        let listing = parse_felt(&body).expect("payload must parse");

        assert!(listing.skipped.is_empty());
        assert_eq!(listing.events.len(), 1);
        assert_eq!(listing.events[0].latitude, 7.38);
        assert_eq!(listing.events[0].longitude, -106.21);
        assert_eq!(listing.events[0].felt_intensity, "III Sukabumi, II Cianjur");
    }

    #[derive(Debug)]
    struct BrokenFeed;

    #[async_trait]
    impl QuakeFeed for BrokenFeed {
        async fn recent(&self) -> FetchResult<Vec<EarthquakeEvent>> {
            Err(serde_json::from_str::<serde_json::Value>("not json").unwrap_err().into())
        }

        async fn felt(&self) -> FetchResult<FeltListing> {
            Err(serde_json::from_str::<serde_json::Value>("{").unwrap_err().into())
        }
    }

    #[tokio::test]
    async fn fetch_failures_are_silent_and_degrade_to_empty() {
        assert!(fetch_recent_earthquakes(&BrokenFeed).await.is_empty());
        assert!(fetch_felt_earthquakes(&BrokenFeed).await.is_empty());
    }
}
