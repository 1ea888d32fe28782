use async_trait::async_trait;

use crate::query;
use crate::types::ArticleRecord;
use crate::Result;

/// Whether an upserted record was new to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    New,
    Updated,
    Unchanged,
}

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Replace the stored collection with `records`
    async fn save_all(&self, records: &[ArticleRecord]) -> Result<()>;

    /// Load the whole stored collection
    async fn load_all(&self) -> Result<Vec<ArticleRecord>>;

    async fn list(&self) -> Result<Vec<ArticleRecord>> {
        Ok(query::list(self.load_all().await?))
    }

    async fn get(&self, id: &str) -> Result<ArticleRecord> {
        query::get(self.load_all().await?, id)
    }

    async fn search(&self, keywords: &[String]) -> Result<Vec<ArticleRecord>> {
        Ok(query::search(self.load_all().await?, keywords))
    }
}

/// Append or replace `record` by id, reporting what changed.
pub fn upsert(records: &mut Vec<ArticleRecord>, record: ArticleRecord) -> ArticleStatus {
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(existing) if *existing == record => ArticleStatus::Unchanged,
        Some(existing) => {
            *existing = record;
            ArticleStatus::Updated
        }
        None => {
            records.push(record);
            ArticleStatus::New
        }
    }
}
