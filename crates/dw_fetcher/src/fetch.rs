use std::time::Duration;

use async_trait::async_trait;
use dw_core::{Error, Result};
use url::Url;

use crate::dom::Document;

/// A fetched page: the raw bytes plus the tree parsed from them. Owned by
/// exactly one pipeline run.
#[derive(Debug, Clone)]
pub struct Page {
    raw: Vec<u8>,
    document: Document,
}

impl Page {
    pub fn from_raw(raw: Vec<u8>) -> Self {
        let document = Document::parse(&String::from_utf8_lossy(&raw));
        Self { raw, document }
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Retrieve and parse `url`, giving up after `timeout`
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Page>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Page> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("{} returned {}", url, status)));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;
        Ok(Page::from_raw(bytes.to_vec()))
    }
}
