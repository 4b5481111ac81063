use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::FeedConfig,
    feed::{FetchError, FetchResult, QuakeFeed, parse_felt, parse_recent},
    model::{EarthquakeEvent, FeltListing},
};

/// Earthquake feed backed by the public BMKG TEWS JSON endpoints.
#[derive(Debug, Clone)]
pub struct BmkgFeed {
    recent_url: String,
    felt_url: String,
    http: Client,
}

impl BmkgFeed {
    pub fn new(recent_url: String, felt_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { recent_url, felt_url, http })
    }

    pub fn from_config(config: &FeedConfig) -> reqwest::Result<Self> {
        Self::new(config.recent_url.clone(), config.felt_url.clone(), config.timeout())
    }

    async fn fetch_body(&self, url: &str) -> FetchResult<String> {
        debug!(url, "fetching earthquake feed");

        let transport = |source| FetchError::Transport { url: url.to_string(), source };

        let res = self.http.get(url).send().await.map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl QuakeFeed for BmkgFeed {
    async fn recent(&self) -> FetchResult<Vec<EarthquakeEvent>> {
        let body = self.fetch_body(&self.recent_url).await?;
        parse_recent(&body)
    }

    async fn felt(&self) -> FetchResult<FeltListing> {
        let body = self.fetch_body(&self.felt_url).await?;
        parse_felt(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
