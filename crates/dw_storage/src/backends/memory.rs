use async_trait::async_trait;
use dw_core::{ArticleRecord, ArticleStorage, Result};
use tokio::sync::RwLock;

/// Process-local collection, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<Vec<ArticleRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStorage for MemoryStorage {
    async fn save_all(&self, records: &[ArticleRecord]) -> Result<()> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<ArticleRecord>> {
        Ok(self.records.read().await.clone())
    }
}
