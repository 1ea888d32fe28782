//! The DW site: URL filtering, fetching and extraction glued together.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use dw_core::{ArticleRecord, Error, Result, SiteConfig, SiteIdentity, Stage};
use url::Url;

use crate::adapter::SiteAdapter;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::pipeline::ExtractionPipeline;

#[derive(Clone)]
pub struct DwScraper {
    fetcher: Arc<dyn PageFetcher>,
    pipeline: ExtractionPipeline,
    timeout: Duration,
}

impl DwScraper {
    pub fn new(config: &SiteConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let pipeline = ExtractionPipeline::new(
            Arc::new(config.identity()),
            Arc::new(SiteAdapter::dw()),
        )
        .with_max_age_days(config.max_age_days);
        Self {
            fetcher,
            pipeline,
            timeout: config.timeout(),
        }
    }

    pub fn with_http(config: &SiteConfig) -> Self {
        Self::new(config, Arc::new(HttpFetcher::new()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn site(&self) -> &SiteIdentity {
        self.pipeline.site()
    }

    /// True for absolute http(s) URLs on the configured domain.
    pub fn can_handle(&self, url: &str) -> bool {
        Url::parse(url).map_or(false, |u| {
            matches!(u.scheme(), "http" | "https") && u.host_str() == Some(self.site().domain.as_str())
        })
    }

    pub async fn scrape_article(&self, url: &str) -> Result<ArticleRecord> {
        self.scrape_article_on(url, Utc::now().date_naive()).await
    }

    pub async fn scrape_article_on(&self, url: &str, today: NaiveDate) -> Result<ArticleRecord> {
        let site = self.site().title.clone();
        let parsed = Url::parse(url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)).at_stage(&site, Stage::Fetch, url))?;
        let page = self
            .fetcher
            .fetch(&parsed, self.timeout)
            .await
            .map_err(|e| e.at_stage(&site, Stage::Fetch, url))?;
        self.pipeline.run_on(url, &page, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Page;
    use async_trait::async_trait;

    struct StaticFetcher(&'static str);

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, _url: &Url, _timeout: Duration) -> Result<Page> {
            Ok(Page::from_raw(self.0.as_bytes().to_vec()))
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, url: &Url, _timeout: Duration) -> Result<Page> {
            Err(Error::Fetch(format!("{} unreachable", url)))
        }
    }

    const PAGE: &str = r#"<html><head><title>Title | DW</title>
        <script>articleChangeDateShort: "20210609",</script></head>
        <body><p class="intro">Intro</p><div class="longText"><p>Body</p></div></body></html>"#;

    #[test]
    fn test_can_handle() {
        let scraper = DwScraper::new(&SiteConfig::default(), Arc::new(StaticFetcher(PAGE)));
        assert!(scraper.can_handle("https://www.dw.com/zh/a-57821645"));
        assert!(!scraper.can_handle("https://www.clarin.com/article"));
        assert!(!scraper.can_handle("ftp://www.dw.com/zh/a-1"));
        assert!(!scraper.can_handle("not a url"));
    }

    #[tokio::test]
    async fn test_scrape_article() {
        let scraper = DwScraper::new(&SiteConfig::default(), Arc::new(StaticFetcher(PAGE)));
        let record = scraper.scrape_article("https://www.dw.com/zh/a-1").await.unwrap();
        assert_eq!(record.title(), "Title");
        assert_eq!(record.publication_date(), NaiveDate::from_ymd_opt(2021, 6, 9).unwrap());
        assert_eq!(record.website_domain(), "www.dw.com");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_tagged() {
        let scraper = DwScraper::new(&SiteConfig::default(), Arc::new(FailingFetcher));
        let err = scraper.scrape_article("https://www.dw.com/zh/a-1").await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Fetch));
        assert!(matches!(err.root(), Error::Fetch(_)));

        let err = scraper.scrape_article("::nope").await.unwrap_err();
        assert!(matches!(err.root(), Error::InvalidUrl(_)));
    }
}
