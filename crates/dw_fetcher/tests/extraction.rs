use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use dw_core::{ArticleStorage, Error, Result, SiteConfig, Stage};
use dw_fetcher::{DwScraper, FetchManager, Page, PageFetcher};
use dw_storage::JsonFileStorage;
use url::Url;

const PROSTITUTION_URL: &str = "https://www.dw.com/zh/%E5%BE%B7%E5%9B%BD%E4%BC%9A%E4%B8%8D%E4%BC%9A%E7%BB%A7%E7%BB%AD%E6%98%AF-%E6%AC%A7%E6%B4%B2%E5%A6%93%E9%99%A2/a-56587170";
const LAB_LEAK_URL: &str = "https://www.dw.com/zh/%E7%BE%8E%E6%8A%A5%E5%91%8A%E7%A7%B0%E5%AE%9E%E9%AA%8C%E5%AE%A4%E5%A4%96%E6%B3%84%E5%81%87%E8%AE%BE%E5%8F%AF%E4%BF%A1-%E5%B8%83%E6%9E%97%E8%82%AF%E8%B4%A8%E7%96%91%E7%A0%94%E7%A9%B6%E6%96%B9%E6%B3%95/a-57821645";

/// Serves `tests/fixtures/<last path segment>.html`.
struct FixtureFetcher;

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, url: &Url, _timeout: Duration) -> Result<Page> {
        let name = url.path().rsplit('/').next().unwrap_or_default();
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(format!("{}.html", name));
        let raw = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::Fetch(format!("{}: {}", path.display(), e)))?;
        Ok(Page::from_raw(raw))
    }
}

fn scraper() -> DwScraper {
    DwScraper::new(&SiteConfig::default(), Arc::new(FixtureFetcher))
}

#[tokio::test]
async fn test_prostitution_article() {
    let record = scraper().scrape_article(PROSTITUTION_URL).await.unwrap();

    assert_eq!(record.title(), "德国会不会继续是 ″欧洲妓院″？");
    assert_eq!(record.publication_date(), NaiveDate::from_ymd_opt(2021, 2, 20).unwrap());
    assert_eq!(record.id(), dw_core::derive_id(PROSTITUTION_URL));
    assert_eq!(record.source_url(), PROSTITUTION_URL);

    let expected_body = "> 德国自2002年起将性交易合法化。有批评者认为，这让德国变成了\"欧洲妓院\"。  \n\n\
        卖淫在德国是合法行业。  \n\
        据估计，德国约有数十万名性工作者。  \n\
        \n**争议不断**   \n\
        一些政治人物呼吁引入\"北欧模式\"。  \n";
    assert!(record.content().contains(expected_body), "{}", record.content());
    assert!(!record.content().contains("相关阅读"));
    assert!(!record.content().contains("strong"));
    assert!(record
        .content()
        .ends_with("原地址：[https://www.dw.com/zh/德国会不会继续是-欧洲妓院/a-56587170](https://www.dw.com/zh/德国会不会继续是-欧洲妓院/a-56587170)"));
}

#[tokio::test]
async fn test_lab_leak_article() {
    let record = scraper().scrape_article(LAB_LEAK_URL).await.unwrap();

    assert_eq!(record.title(), "美报告称实验室外泄假设可信 布林肯质疑研究方法");
    assert_eq!(record.publication_date(), NaiveDate::from_ymd_opt(2021, 6, 9).unwrap());

    let expected = "# 美报告称实验室外泄假设可信 布林肯质疑研究方法\n\n\
        LastUpdate: 2021-06-09T00:00:00Z @ [DW](/list/?v=DW): [www.dw.com](http://www.dw.com)\n\n\
        ---\n\
        > 一份美国政府实验室的报告认为，新冠病毒从武汉实验室外泄的假设是可信的。  \n\n\
        据《华尔街日报》报道，该报告由劳伦斯利弗莫尔国家实验室完成。  \n\
        \n**布林肯：方法存疑**   \n\
        美国国务卿布林肯表示，进一步调查。  \n\
        \n\n\
        原地址：[https://www.dw.com/zh/美报告称实验室外泄假设可信-布林肯质疑研究方法/a-57821645](https://www.dw.com/zh/美报告称实验室外泄假设可信-布林肯质疑研究方法/a-57821645)";
    assert_eq!(record.content(), expected);
}

#[tokio::test]
async fn test_extraction_is_deterministic() {
    let scraper = scraper();
    let a = scraper.scrape_article(LAB_LEAK_URL).await.unwrap();
    let b = scraper.scrape_article(LAB_LEAK_URL).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_missing_fixture_is_fetch_error() {
    let err = scraper()
        .scrape_article("https://www.dw.com/zh/a-0")
        .await
        .unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Fetch));
    assert!(err.to_string().contains("https://www.dw.com/zh/a-0"));
}

#[tokio::test]
async fn test_fetch_store_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(JsonFileStorage::new(dir.path().join("db/articles.json")));
    let manager = FetchManager::new(storage.clone(), scraper());

    let urls = vec![PROSTITUTION_URL.to_string(), LAB_LEAK_URL.to_string()];
    let outcomes = manager.fetch_all(&urls).await.unwrap();
    assert!(outcomes.iter().all(|o| o.result.is_ok()));

    let stored = storage.load_all().await.unwrap();
    assert_eq!(stored.len(), 2);
    let original = &outcomes[1].result.as_ref().unwrap().0;
    assert_eq!(&storage.get(original.id()).await.unwrap(), original);

    let found = storage.search(&["布林肯".to_string()]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title(), "美报告称实验室外泄假设可信 布林肯质疑研究方法");

    let listed = storage.list().await.unwrap();
    assert_eq!(listed[0].publication_date(), NaiveDate::from_ymd_opt(2021, 6, 9).unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_batches_keep_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(JsonFileStorage::new(dir.path().join("db/articles.json")));
    let manager = Arc::new(FetchManager::new(storage.clone(), scraper()));

    for round in 0..20 {
        let batch = |side: u32| vec![format!("{}?round={}&side={}", LAB_LEAK_URL, round, side)];
        let (left, right) = (batch(0), batch(1));
        let (m1, m2) = (manager.clone(), manager.clone());
        let (a, b) = tokio::join!(
            tokio::spawn(async move { m1.fetch_all(&left).await }),
            tokio::spawn(async move { m2.fetch_all(&right).await }),
        );
        for outcomes in [a.unwrap().unwrap(), b.unwrap().unwrap()] {
            assert!(outcomes[0].result.is_ok(), "round {}: {:?}", round, outcomes[0].result);
        }
    }

    assert_eq!(storage.load_all().await.unwrap().len(), 40);
}
