//! List/Get/Search over a loaded record collection. Never mutates records.

use crate::error::{Error, Result};
use crate::types::ArticleRecord;

/// Records ordered newest publication date first, ties broken by id.
pub fn list(mut records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    records.sort_by(|a, b| {
        b.publication_date()
            .cmp(&a.publication_date())
            .then_with(|| a.id().cmp(b.id()))
    });
    records
}

pub fn get(records: Vec<ArticleRecord>, id: &str) -> Result<ArticleRecord> {
    records
        .into_iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| Error::NotFound(format!("no article with id: {}", id)))
}

fn matches(record: &ArticleRecord, keyword: &str) -> bool {
    record.id() == keyword
        || record.website_id() == keyword
        || record.title().to_lowercase().contains(keyword)
        || record.content().to_lowercase().contains(keyword)
        || record.website_domain().to_lowercase().contains(keyword)
        || record.website_title().to_lowercase().contains(keyword)
}

/// Case-insensitive match of any keyword; each record appears at most once.
pub fn search<S: AsRef<str>>(records: Vec<ArticleRecord>, keywords: &[S]) -> Vec<ArticleRecord> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    records
        .into_iter()
        .filter(|r| keywords.iter().any(|k| matches(r, k)))
        .collect()
}
