use std::sync::Arc;

use dw_core::{ArticleStorage, Config, Error, Result};

pub mod backends;

pub use backends::*;

/// Storage selected by name: `json` (the configured db file) or `memory`.
pub fn create_storage(kind: &str, config: &Config) -> Result<Arc<dyn ArticleStorage>> {
    match kind {
        "json" => Ok(Arc::new(JsonFileStorage::from_config(config))),
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        other => Err(Error::Config(format!("Unknown storage backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
}
