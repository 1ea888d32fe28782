use std::sync::Arc;

use dw_core::storage::upsert;
use dw_core::{ArticleRecord, ArticleStatus, ArticleStorage, Result};
use futures::future::join_all;
use tokio::sync::{Mutex, Semaphore};
use tracing::{error, info, Instrument};

use crate::dw::DwScraper;
use crate::logging::batch_span;

const DEFAULT_CONCURRENCY: usize = 10;

/// Result of one URL in a batch. Failures don't affect other URLs.
#[derive(Debug)]
pub struct FetchOutcome {
    pub url: String,
    pub result: Result<(ArticleRecord, ArticleStatus)>,
}

/// Runs independent pipeline invocations for a batch of URLs and merges the
/// successful records into storage.
pub struct FetchManager {
    storage: Arc<dyn ArticleStorage>,
    scraper: DwScraper,
    semaphore: Arc<Semaphore>,
    /// Held across load, upsert and save so concurrent batches merge instead
    /// of overwriting each other.
    merge_lock: Mutex<()>,
}

impl FetchManager {
    pub fn new(storage: Arc<dyn ArticleStorage>, scraper: DwScraper) -> Self {
        Self {
            storage,
            scraper,
            semaphore: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
            merge_lock: Mutex::new(()),
        }
    }

    pub fn with_concurrency(mut self, permits: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(permits.max(1)));
        self
    }

    pub fn storage(&self) -> &Arc<dyn ArticleStorage> {
        &self.storage
    }

    pub fn scraper(&self) -> &DwScraper {
        &self.scraper
    }

    /// Fetch and extract one URL without storing it.
    pub async fn scrape_url(&self, url: &str) -> Result<ArticleRecord> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| dw_core::Error::External(e.into()))?;
        self.scraper.scrape_article(url).await
    }

    pub async fn fetch_all(&self, urls: &[String]) -> Result<Vec<FetchOutcome>> {
        let span = batch_span(&self.scraper.site().title, urls.len());
        self.fetch_batch(urls).instrument(span).await
    }

    async fn fetch_batch(&self, urls: &[String]) -> Result<Vec<FetchOutcome>> {
        info!("fetching articles");
        let scraped = join_all(urls.iter().map(|url| async move {
            let result = self.scrape_url(url).await;
            if let Err(e) = &result {
                error!(%url, error = %e, "article failed");
            }
            (url.clone(), result)
        }))
        .await;

        let any_ok = scraped.iter().any(|(_, r)| r.is_ok());
        let _merge = if any_ok {
            Some(self.merge_lock.lock().await)
        } else {
            None
        };
        let mut records = if any_ok {
            self.storage.load_all().await?
        } else {
            Vec::new()
        };
        let outcomes: Vec<FetchOutcome> = scraped
            .into_iter()
            .map(|(url, result)| {
                let result = result.map(|record| {
                    let status = upsert(&mut records, record.clone());
                    (record, status)
                });
                FetchOutcome { url, result }
            })
            .collect();
        if !any_ok {
            return Ok(outcomes);
        }
        self.storage.save_all(&records).await?;

        let stored = outcomes.iter().filter(|o| o.result.is_ok()).count();
        info!(stored, total = records.len(), "batch stored");
        Ok(outcomes)
    }
}
