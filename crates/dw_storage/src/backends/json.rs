use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dw_core::{ArticleRecord, ArticleStorage, Config, Error, Result};
use tracing::debug;

static SAVE_SEQ: AtomicU64 = AtomicU64::new(0);

/// The whole collection as one JSON array on disk, rewritten on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `{root_path}/{db_path}/articles.json`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.db_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the store file, unique per save, so the final rename stays
    /// on one filesystem.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("articles.json"));
        name.push(format!(
            ".{}.{}.tmp",
            std::process::id(),
            SAVE_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ArticleStorage for JsonFileStorage {
    async fn save_all(&self, records: &[ArticleRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::Persist(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let data = serde_json::to_vec_pretty(records)
            .map_err(|e| Error::Persist(format!("Failed to encode articles: {}", e)))?;
        // Readers only ever see the old file or the complete new one.
        let staging = self.staging_path();
        tokio::fs::write(&staging, data)
            .await
            .map_err(|e| Error::Persist(format!("Failed to write {}: {}", staging.display(), e)))?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(Error::Persist(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            )));
        }

        debug!("saved {} articles to {}", records.len(), self.path.display());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<ArticleRecord>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(Error::Load(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&data)
            .map_err(|e| Error::Load(format!("Failed to decode {}: {}", self.path.display(), e)))
    }
}
