use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
    Config,
    feed::{BmkgFeed, QuakeFeed},
    page::Page,
    store::{AidRecord, AidStore, AidSubmission, StoreError},
    time::WibTimestamp,
    view::{Document, data_bantuan, formulir, info_gempa},
};

/// Everything a page needs, built once at startup.
#[derive(Debug)]
pub struct Dashboard {
    feed: Box<dyn QuakeFeed>,
    store: AidStore,
    recent_limit: usize,
}

impl Dashboard {
    pub fn new(feed: Box<dyn QuakeFeed>, store: AidStore, recent_limit: usize) -> Self {
        Self { feed, store, recent_limit }
    }

    /// Build the BMKG-backed dashboard and make sure the aid store has its header.
    pub fn from_config(config: &Config) -> Result<Self> {
        let feed = BmkgFeed::from_config(&config.feed).context("Failed to build HTTP client")?;

        let store = AidStore::new(config.store_path.clone());
        store.ensure_initialized()?;

        Ok(Self::new(Box::new(feed), store, config.recent_limit))
    }

    pub fn store(&self) -> &AidStore {
        &self.store
    }

    /// Render one page below the application banner. Never fails: problems become in-page messages.
    pub async fn render(&self, page: Page) -> Document {
        debug!(page = page.slug(), "rendering page");

        let body = match page {
            Page::InfoGempa => {
                let recent = self.feed.recent().await;
                if let Err(err) = &recent {
                    warn!("recent earthquakes unavailable: {err}");
                }

                let felt = self.feed.felt().await;
                if let Err(err) = &felt {
                    warn!("felt earthquakes unavailable: {err}");
                }

                info_gempa::render(&recent, &felt, self.recent_limit)
            }
            Page::FormulirBantuan => formulir::render(),
            Page::DataBantuan => data_bantuan::render(&self.store),
        };

        let mut doc = Document::banner();
        doc.append(body);
        doc
    }

    /// Stamp a form submission with the current WIB time and store it.
    pub fn submit(&self, submission: AidSubmission) -> Result<AidRecord, StoreError> {
        self.submit_at(submission, WibTimestamp::now())
    }

    pub fn submit_at(
        &self,
        submission: AidSubmission,
        submitted_at: WibTimestamp,
    ) -> Result<AidRecord, StoreError> {
        let record = submission.into_record(submitted_at);
        self.store.append_record(&record)?;
        Ok(record)
    }
}
