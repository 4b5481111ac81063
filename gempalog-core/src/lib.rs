//! Core library for the GempaLog.ID dashboard.
//!
//! This crate defines:
//! - The BMKG earthquake feed and its typed records
//! - The append-only CSV store of aid submissions
//! - The page router and the plain-text page renderers
//! - Configuration handling
//!
//! It is used by `gempalog-cli`, but can also be reused by other front ends.

pub mod config;
pub mod dashboard;
pub mod feed;
pub mod model;
pub mod page;
pub mod store;
pub mod time;
pub mod view;

pub use config::{Config, FeedConfig};
pub use dashboard::Dashboard;
pub use feed::{
    BmkgFeed, FetchError, FetchResult, QuakeFeed, fetch_felt_earthquakes, fetch_recent_earthquakes,
};
pub use model::{CoordinateError, EarthquakeEvent, FeltEarthquakeEvent, FeltListing};
pub use page::Page;
pub use store::{AidRecord, AidStore, AidSubmission, AidType, StoreError};
pub use time::WibTimestamp;
pub use view::Document;
